use crate::regions::error::RegionTableError;
use crate::sources::error::SourceError;
use crate::types::source::Portal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgroClimateError {
    #[error("Failed to access the {portal}")]
    PrimaryAccess {
        portal: Portal,
        #[source]
        source: SourceError,
    },

    #[error("Invalid year span {start}..={end}")]
    InvalidYearSpan { start: i32, end: i32 },

    #[error(transparent)]
    RegionTable(#[from] RegionTableError),

    #[error("Failed to build HTTP client")]
    HttpClient(#[source] reqwest::Error),
}
