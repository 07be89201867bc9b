//! World Bank Climate Change Knowledge Portal, monthly climatology by region.

use crate::config::SourceConfig;
use crate::sources::error::SourceError;
use crate::sources::http::HttpFetcher;
use crate::types::month::Month;
use crate::types::raw::{RawMonthlyClimate, RawValue};
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Deserialize)]
struct PortalResponse {
    #[serde(rename = "monthlyData")]
    monthly_data: Option<HashMap<String, PortalMonth>>,
}

#[derive(Debug, Default, Deserialize)]
struct PortalMonth {
    #[serde(default)]
    temperature: Option<RawValue>,
    #[serde(default)]
    precipitation: Option<RawValue>,
}

pub async fn monthly_climate(
    http: &HttpFetcher,
    config: &SourceConfig,
    region: &str,
) -> Result<Vec<RawMonthlyClimate>, SourceError> {
    let url = format!("{}/region/{}", config.climate_portal_api, region);
    let response: PortalResponse = http.get_json(&url, &[]).await?;
    monthly_records(response, &url)
}

/// One record per calendar month; months absent from the response get empty
/// fields and are voided by validation.
fn monthly_records(
    response: PortalResponse,
    url: &str,
) -> Result<Vec<RawMonthlyClimate>, SourceError> {
    let entries = response
        .monthly_data
        .ok_or_else(|| SourceError::MissingSection {
            url: url.to_string(),
            section: "monthlyData",
        })?;

    let mut by_month: [Option<PortalMonth>; 12] = Default::default();
    for (label, entry) in entries {
        if let Some(month) = Month::from_label(&label) {
            by_month[month.index()] = Some(entry);
        }
    }

    Ok(Month::ALL
        .into_iter()
        .zip(by_month)
        .map(|(month, entry)| {
            let entry = entry.unwrap_or_default();
            RawMonthlyClimate {
                month,
                temperature: entry.temperature,
                rainfall: entry.precipitation,
            }
        })
        .collect())
}
