use crate::types::source::SourceId;
use serde::Serialize;

/// Where a sub-record of an output record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Provenance {
    /// Taken verbatim (after validation) from an external source.
    External { source: SourceId },
    /// Generated from the regional parameter tables.
    Synthesized,
    /// A static default table.
    Default,
}

impl Provenance {
    pub fn is_external(&self) -> bool {
        matches!(self, Provenance::External { .. })
    }
}

pub const DATA_SOURCE_EXTERNAL: &str = "FAOSTAT (Scraped)";
pub const DATA_SOURCE_SYNTHESIZED: &str = "Synthesized (regional defaults)";
pub const DATA_SOURCE_MIXED: &str = "FAOSTAT (Scraped, partial fallback)";

/// Collapses per-category provenance into the single `data_source` tag of a record.
pub fn summarize<'a>(provenances: impl IntoIterator<Item = &'a Provenance>) -> &'static str {
    let (mut external, mut fallback) = (0usize, 0usize);
    for p in provenances {
        if p.is_external() {
            external += 1;
        } else {
            fallback += 1;
        }
    }
    match (external, fallback) {
        (_, 0) => DATA_SOURCE_EXTERNAL,
        (0, _) => DATA_SOURCE_SYNTHESIZED,
        _ => DATA_SOURCE_MIXED,
    }
}
