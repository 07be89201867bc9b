use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegionTableError {
    #[error("Failed to read region table '{0}'")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse region table")]
    Parse(#[from] serde_json::Error),

    #[error("Region '{region}' has an empty irrigation preference list")]
    EmptyPreferences { region: String },

    #[error("Region '{region}' has no farm names")]
    EmptyFarmNames { region: String },

    #[error("Region '{region}' has a negative or non-finite {field}: {value}")]
    InvalidBase {
        region: String,
        field: &'static str,
        value: f64,
    },

    #[error("Region '{region}' has {field} {peak}, expected a month index 0-11")]
    PeakOutOfRange {
        region: String,
        field: &'static str,
        peak: u8,
    },
}
