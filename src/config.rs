//! Endpoints and request settings of the external sources.

use bon::Builder;
use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Where and how the fetch layer talks to the outside world.
///
/// Every field has a default pointing at the public FAO / World Bank
/// services, so `SourceConfig::default()` is usable as is.
///
/// ```
/// use agroclimate::SourceConfig;
/// use std::time::Duration;
///
/// let config = SourceConfig::builder()
///     .timeout(Duration::from_secs(10))
///     .probe_primary(false)
///     .build();
/// assert_eq!(config.reference_year, 2020);
/// ```
#[derive(Debug, Clone, Builder)]
pub struct SourceConfig {
    /// FAOSTAT data API, one sub-path per domain (`ET`, `QCL`, `RL`).
    #[builder(default = "https://fenixservices.fao.org/faostat/api/v1/en/data".to_string())]
    pub faostat_api: String,

    /// FAOSTAT web portal, probed before a pipeline runs.
    #[builder(default = "https://www.fao.org/faostat/en/#data".to_string())]
    pub faostat_portal: String,

    /// Root of the GIEWS pages (earth observation and country briefs).
    #[builder(default = "https://www.fao.org/giews".to_string())]
    pub giews: String,

    #[builder(default = "https://climateknowledgeportal.worldbank.org/api/data".to_string())]
    pub climate_portal_api: String,

    #[builder(default = "http://54.229.242.119/GSOCmap/api/v1/soc".to_string())]
    pub soil_portal_api: String,

    #[builder(default = "http://www.fao.org/nr/water/aquastat/data/query/results.html".to_string())]
    pub aquastat_query: String,

    #[builder(default = DEFAULT_USER_AGENT.to_string())]
    pub user_agent: String,

    /// Bound on each individual request.
    #[builder(default = Duration::from_secs(30))]
    pub timeout: Duration,

    /// Year queried for land area and crop production.
    #[builder(default = 2020)]
    pub reference_year: i32,

    /// Whether to check the FAOSTAT portal is reachable before fetching.
    #[builder(default = true)]
    pub probe_primary: bool,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SourceConfig::default();
        assert!(config.probe_primary);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.faostat_api.ends_with("/data"));
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn test_override() {
        let config = SourceConfig::builder()
            .giews("http://localhost:9000".to_string())
            .reference_year(2018)
            .build();
        assert_eq!(config.giews, "http://localhost:9000");
        assert_eq!(config.reference_year, 2018);
        assert!(config.soil_portal_api.starts_with("http://"));
    }
}
