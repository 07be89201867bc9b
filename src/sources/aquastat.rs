//! AQUASTAT query results page, scraped for monthly water use.

use crate::config::SourceConfig;
use crate::sources::error::SourceError;
use crate::sources::html::{self, Row};
use crate::sources::http::HttpFetcher;
use crate::types::raw::{RawValue, RawWaterUsage};

/// Water withdrawal variable groups.
const WITHDRAWAL_VARIABLES: &str = "4250,4251,4252";
const RESULTS_TABLE_CLASS: &str = "dataTable";
/// Years before the reference year covered by the query.
const YEAR_WINDOW: i32 = 5;

pub async fn water_usage(
    http: &HttpFetcher,
    config: &SourceConfig,
    region: &str,
) -> Result<Vec<RawWaterUsage>, SourceError> {
    let query = [
        ("regionQuery", region.to_string()),
        (
            "yearRange",
            format!(
                "{}-{}",
                config.reference_year - YEAR_WINDOW,
                config.reference_year
            ),
        ),
        ("varGrpIds", WITHDRAWAL_VARIABLES.to_string()),
        ("showCodes", "true".to_string()),
        ("newestOnly", "true".to_string()),
    ];
    let page = http.get_text(&config.aquastat_query, &query).await?;
    parse_results(&page, &config.aquastat_query)
}

/// Reads the first `dataTable` table: one row per month with the month label,
/// rainfall, irrigation and efficiency. Rows without data cells are headers.
pub(crate) fn parse_results(page: &str, url: &str) -> Result<Vec<RawWaterUsage>, SourceError> {
    let tables = html::tables(page);
    let table = tables
        .iter()
        .find(|t| t.has_class(RESULTS_TABLE_CLASS))
        .ok_or_else(|| SourceError::MissingSection {
            url: url.to_string(),
            section: RESULTS_TABLE_CLASS,
        })?;

    Ok(table
        .rows
        .iter()
        .filter(|r| !r.cells.is_empty())
        .map(water_row)
        .collect())
}

fn water_row(row: &Row) -> RawWaterUsage {
    let cell = |i: usize| row.cells.get(i).map(|c| RawValue::Text(c.clone()));
    RawWaterUsage {
        month: row.cells.first().cloned(),
        rainfall: cell(1),
        irrigation: cell(2),
        efficiency: cell(3),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::sufficiency::evaluate_water_usage;
    use crate::types::month::Month;

    fn results_page(months: &[Month]) -> String {
        let mut page = String::from(
            r#"<table class="display dataTable"><thead><tr><th>Month</th><th>Rainfall</th><th>Irrigation</th><th>Efficiency</th></tr></thead><tbody>"#,
        );
        for m in months {
            page.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>40</td><td>72</td></tr>",
                m,
                m.index() * 3
            ));
        }
        page.push_str("</tbody></table>");
        page
    }

    #[test]
    fn test_full_year() {
        let records = parse_results(&results_page(&Month::ALL), "u").unwrap();
        assert_eq!(records.len(), 12);
        assert_eq!(records[2].month.as_deref(), Some("Mar"));
        assert_eq!(records[2].rainfall, Some(RawValue::from("6")));
        assert!(evaluate_water_usage(&records).is_sufficient());
    }

    #[test]
    fn test_partial_year_insufficient() {
        let records = parse_results(&results_page(&Month::ALL[..6]), "u").unwrap();
        assert_eq!(records.len(), 6);
        assert!(!evaluate_water_usage(&records).is_sufficient());
    }

    #[test]
    fn test_short_row_has_empty_fields() {
        let page = r#"<table class="dataTable"><tr><td>Jan</td><td>3</td></tr></table>"#;
        let records = parse_results(page, "u").unwrap();
        assert_eq!(records[0].irrigation, None);
    }

    #[test]
    fn test_missing_table() {
        assert!(matches!(
            parse_results("<table><tr><td>x</td></tr></table>", "u"),
            Err(SourceError::MissingSection { .. })
        ));
    }
}
