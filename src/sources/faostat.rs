//! FAOSTAT data API: temperature change, rainfall, land area and crop
//! production, all served as `{"data": [...]}` envelopes.

use crate::config::SourceConfig;
use crate::sources::error::SourceError;
use crate::sources::http::HttpFetcher;
use crate::types::climate::YearSpan;
use crate::types::raw::{RawCropRecord, RawLandRecord, RawTrendRecord};
use serde::de::DeserializeOwned;
use serde::Deserialize;

const TEMPERATURE_CHANGE: &str = "7271";
const AGRICULTURAL_LAND: &str = "5110";
const PRODUCTION: &str = "5510";
/// Wheat, rice, barley and maize.
const CROP_ITEMS: &str = "15,27,44,56";

#[derive(Debug, Deserialize)]
#[serde(bound = "T: DeserializeOwned")]
struct Envelope<T> {
    data: Option<Vec<T>>,
}

impl<T> Envelope<T> {
    fn into_data(self, url: &str) -> Result<Vec<T>, SourceError> {
        self.data.ok_or_else(|| SourceError::MissingSection {
            url: url.to_string(),
            section: "data",
        })
    }
}

async fn fetch_data<T: DeserializeOwned>(
    http: &HttpFetcher,
    config: &SourceConfig,
    domain: &str,
    query: &[(&str, String)],
) -> Result<Vec<T>, SourceError> {
    let url = format!("{}/{}", config.faostat_api, domain);
    http.get_json::<Envelope<T>>(&url, query)
        .await?
        .into_data(&url)
}

fn trend_query(region: &str, span: YearSpan) -> Vec<(&'static str, String)> {
    vec![
        ("area", region.to_string()),
        ("element", TEMPERATURE_CHANGE.to_string()),
        ("year_start", span.start().to_string()),
        ("year_end", span.end().to_string()),
    ]
}

pub async fn temperature_trend(
    http: &HttpFetcher,
    config: &SourceConfig,
    region: &str,
    span: YearSpan,
) -> Result<Vec<RawTrendRecord>, SourceError> {
    fetch_data(http, config, "ET", &trend_query(region, span)).await
}

/// The rainfall trend is read from the QCL domain with the same element code
/// as the temperature trend.
pub async fn rainfall_trend(
    http: &HttpFetcher,
    config: &SourceConfig,
    region: &str,
    span: YearSpan,
) -> Result<Vec<RawTrendRecord>, SourceError> {
    fetch_data(http, config, "QCL", &trend_query(region, span)).await
}

pub async fn agricultural_land(
    http: &HttpFetcher,
    config: &SourceConfig,
    region: &str,
) -> Result<Vec<RawLandRecord>, SourceError> {
    let query = [
        ("area", region.to_string()),
        ("element", AGRICULTURAL_LAND.to_string()),
        ("year", config.reference_year.to_string()),
    ];
    fetch_data(http, config, "RL", &query).await
}

pub async fn crop_production(
    http: &HttpFetcher,
    config: &SourceConfig,
    region: &str,
) -> Result<Vec<RawCropRecord>, SourceError> {
    let query = [
        ("area", region.to_string()),
        ("item", CROP_ITEMS.to_string()),
        ("element", PRODUCTION.to_string()),
        ("year", config.reference_year.to_string()),
    ];
    fetch_data(http, config, "QCL", &query).await
}
