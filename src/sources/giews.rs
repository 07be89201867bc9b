//! GIEWS pages carrying monthly climate tables: the earth observation
//! country page and the country brief.
//!
//! Both tables have a header row followed by one row per month, with the
//! temperature in the second column and rainfall in the third. Rows are
//! assigned to months by position.

use crate::config::SourceConfig;
use crate::sources::error::SourceError;
use crate::sources::html::{self, Row, Table};
use crate::sources::http::HttpFetcher;
use crate::types::month::Month;
use crate::types::raw::{RawMonthlyClimate, RawValue};

const CLIMATE_TABLE_CLASS: &str = "climate-table";

pub async fn earth_observation(
    http: &HttpFetcher,
    config: &SourceConfig,
    region: &str,
) -> Result<Vec<RawMonthlyClimate>, SourceError> {
    let url = format!("{}/earthobservation/country/index.jsp", config.giews);
    let query = [("lang", "en".to_string()), ("code", region.to_string())];
    let page = http.get_text(&url, &query).await?;
    parse_earth_observation(&page, &url)
}

pub async fn country_brief(
    http: &HttpFetcher,
    config: &SourceConfig,
    region: &str,
) -> Result<Vec<RawMonthlyClimate>, SourceError> {
    let url = format!("{}/countrybrief/country.jsp", config.giews);
    let query = [("code", region.to_string())];
    let page = http.get_text(&url, &query).await?;
    parse_country_brief(&page, &url)
}

/// Uses the first table whose headers include "Month" together with
/// "Temperature" or "Rainfall".
pub(crate) fn parse_earth_observation(
    page: &str,
    url: &str,
) -> Result<Vec<RawMonthlyClimate>, SourceError> {
    html::tables(page)
        .iter()
        .find(|t| is_monthly_climate_table(t))
        .map(|t| monthly_rows(t.body_rows()))
        .ok_or_else(|| SourceError::MissingSection {
            url: url.to_string(),
            section: "monthly climate table",
        })
}

/// Uses the first table with the `climate-table` class.
pub(crate) fn parse_country_brief(
    page: &str,
    url: &str,
) -> Result<Vec<RawMonthlyClimate>, SourceError> {
    html::tables(page)
        .iter()
        .find(|t| t.has_class(CLIMATE_TABLE_CLASS))
        .map(|t| monthly_rows(t.body_rows()))
        .ok_or_else(|| SourceError::MissingSection {
            url: url.to_string(),
            section: CLIMATE_TABLE_CLASS,
        })
}

fn is_monthly_climate_table(table: &Table) -> bool {
    let has = |name: &str| table.header_texts().any(|h| h.eq_ignore_ascii_case(name));
    has("Month") && (has("Temperature") || has("Rainfall"))
}

/// Rows short of three cells are kept as empty entries so that the month
/// positions of later rows stay put.
fn monthly_rows(rows: &[Row]) -> Vec<RawMonthlyClimate> {
    rows.iter()
        .zip(Month::ALL)
        .map(|(row, month)| {
            let cell = |i: usize| {
                (row.cells.len() >= 3).then(|| RawValue::Text(row.cells[i].clone()))
            };
            RawMonthlyClimate {
                month,
                temperature: cell(1),
                rainfall: cell(2),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::sufficiency::evaluate_monthly_climate;

    fn climate_table(attrs: &str, rows: usize) -> String {
        let mut table = format!(
            "<table {}><tr><th>Month</th><th>Temperature</th><th>Rainfall</th></tr>",
            attrs
        );
        for month in Month::ALL.iter().take(rows) {
            table.push_str(&format!(
                "<tr><td>{}</td><td>{}.5</td><td>{}</td></tr>",
                month,
                20 + month.index(),
                10 * month.index()
            ));
        }
        table.push_str("</table>");
        table
    }

    #[test]
    fn test_earth_observation_full_year() {
        let page = format!(
            "<table><tr><th>Country</th></tr></table>{}",
            climate_table("", 12)
        );
        let records = parse_earth_observation(&page, "u").unwrap();
        assert_eq!(records.len(), 12);
        assert_eq!(records[0].month, Month::Jan);
        assert_eq!(records[0].temperature, Some(RawValue::from("20.5")));
        assert_eq!(records[11].rainfall, Some(RawValue::from("110")));
        assert!(evaluate_monthly_climate(&records).is_sufficient());
    }

    #[test]
    fn test_extra_rows_ignored() {
        let mut page = climate_table("", 12);
        page = page.replace(
            "</table>",
            "<tr><td>Annual</td><td>25</td><td>600</td></tr></table>",
        );
        assert_eq!(parse_earth_observation(&page, "u").unwrap().len(), 12);
    }

    #[test]
    fn test_short_row_keeps_positions() {
        let page = climate_table("", 12).replacen(
            "<tr><td>Feb</td><td>21.5</td><td>10</td></tr>",
            "<tr><td>Feb</td></tr>",
            1,
        );
        let records = parse_earth_observation(&page, "u").unwrap();
        assert_eq!(records[1].month, Month::Feb);
        assert_eq!(records[1].temperature, None);
        assert_eq!(records[2].month, Month::Mar);
        assert_eq!(records[2].temperature, Some(RawValue::from("22.5")));
        assert!(!evaluate_monthly_climate(&records).is_sufficient());
    }

    #[test]
    fn test_missing_table() {
        let err = parse_earth_observation("<table><tr><th>Month</th></tr></table>", "u")
            .unwrap_err();
        assert!(matches!(err, SourceError::MissingSection { .. }));
    }

    #[test]
    fn test_country_brief_uses_class() {
        let page = format!(
            "{}{}",
            climate_table("", 3),
            climate_table(r#"class="climate-table""#, 12)
        );
        let records = parse_country_brief(&page, "u").unwrap();
        assert_eq!(records.len(), 12);
        assert!(parse_country_brief(&climate_table("", 12), "u").is_err());
    }
}
