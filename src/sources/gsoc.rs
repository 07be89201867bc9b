//! Global Soil Organic Carbon map API, regional soil properties.

use crate::config::SourceConfig;
use crate::sources::error::SourceError;
use crate::sources::http::HttpFetcher;
use crate::types::raw::RawSoilProperties;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct SoilResponse {
    properties: Option<RawSoilProperties>,
}

pub async fn soil_properties(
    http: &HttpFetcher,
    config: &SourceConfig,
    region: &str,
) -> Result<RawSoilProperties, SourceError> {
    let url = format!("{}/region/{}", config.soil_portal_api, region);
    let response: SoilResponse = http.get_json(&url, &[]).await?;
    properties(response, &url)
}

fn properties(response: SoilResponse, url: &str) -> Result<RawSoilProperties, SourceError> {
    response.properties.ok_or_else(|| SourceError::MissingSection {
        url: url.to_string(),
        section: "properties",
    })
}
