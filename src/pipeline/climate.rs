//! Assembles a [`ClimateRecord`] for one region and year span.

use crate::pipeline::resolve::resolve;
use crate::pipeline::sufficiency::{evaluate_monthly_climate, evaluate_trend};
use crate::pipeline::synthesis::{
    synthesize_monthly_climate, synthesize_rainfall_trend, synthesize_temperature_trend,
};
use crate::regions::table::RegionTable;
use crate::sources::ClimateSources;
use crate::types::climate::{
    ClimateProvenance, ClimateRecord, YearSpan, UNIT_CELSIUS, UNIT_MILLIMETRES,
};
use crate::types::provenance::{summarize, Provenance};
use crate::types::raw::{RawMonthlyClimate, RawTrendRecord};
use crate::types::source::DataCategory;
use log::info;

/// Resolves each climate category in turn: temperature trend, rainfall
/// trend, then the monthly series.
///
/// Never fails: a category without a sufficient source is synthesized from
/// the region's patterns. Unknown regions use the table's default profile.
pub async fn assemble_climate<S>(
    sources: &S,
    regions: &RegionTable,
    region: &str,
    span: YearSpan,
) -> ClimateRecord
where
    S: ClimateSources + ?Sized,
{
    let profile = regions.resolve(region);

    let temperature = resolve(
        DataCategory::TemperatureTrend,
        move |_| sources.temperature_trend(region, span),
        |raw: Vec<RawTrendRecord>| evaluate_trend(&raw, UNIT_CELSIUS),
        || {
            (
                synthesize_temperature_trend(&profile.pattern, &profile.thermal, span.years()),
                Provenance::Synthesized,
            )
        },
    )
    .await;

    let rainfall = resolve(
        DataCategory::RainfallTrend,
        move |_| sources.rainfall_trend(region, span),
        |raw: Vec<RawTrendRecord>| evaluate_trend(&raw, UNIT_MILLIMETRES),
        || {
            (
                synthesize_rainfall_trend(&profile.pattern, span.years()),
                Provenance::Synthesized,
            )
        },
    )
    .await;

    let monthly = resolve(
        DataCategory::MonthlyClimate,
        move |source| sources.monthly_climate(region, source),
        |raw: Vec<RawMonthlyClimate>| evaluate_monthly_climate(&raw),
        || {
            (
                synthesize_monthly_climate(&profile.pattern, &profile.thermal),
                Provenance::Synthesized,
            )
        },
    )
    .await;

    let provenance = ClimateProvenance {
        temperature_trend: temperature.provenance,
        rainfall_trend: rainfall.provenance,
        monthly_data: monthly.provenance,
    };
    let data_source = summarize(provenance.iter());
    info!("Climate record for {} assembled ({})", profile.name, data_source);

    ClimateRecord {
        region: profile.name.clone(),
        temperature_trend: temperature.value,
        rainfall_trend: rainfall.value,
        monthly_data: monthly.value,
        data_source,
        provenance,
        trace: vec![temperature.trace, rainfall.trace, monthly.trace],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::state::CategoryState::*;
    use crate::sources::error::SourceError;
    use crate::types::month::Month;
    use crate::types::provenance::{
        DATA_SOURCE_EXTERNAL, DATA_SOURCE_MIXED, DATA_SOURCE_SYNTHESIZED,
    };
    use crate::types::raw::RawValue;
    use crate::types::source::{Portal, SourceId};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Serves canned records per source and records the order of requests.
    #[derive(Default)]
    struct FakeClimate {
        temperature: Option<Vec<RawTrendRecord>>,
        rainfall: Option<Vec<RawTrendRecord>>,
        monthly: HashMap<SourceId, Vec<RawMonthlyClimate>>,
        requests: Mutex<Vec<SourceId>>,
    }

    fn unavailable(source: SourceId) -> SourceError {
        SourceError::NoData(source)
    }

    #[async_trait]
    impl ClimateSources for FakeClimate {
        async fn probe(&self, _portal: Portal) -> Result<(), SourceError> {
            Ok(())
        }

        async fn temperature_trend(
            &self,
            _region: &str,
            _span: YearSpan,
        ) -> Result<Vec<RawTrendRecord>, SourceError> {
            self.temperature
                .clone()
                .ok_or_else(|| unavailable(SourceId::FaostatTemperature))
        }

        async fn rainfall_trend(
            &self,
            _region: &str,
            _span: YearSpan,
        ) -> Result<Vec<RawTrendRecord>, SourceError> {
            self.rainfall
                .clone()
                .ok_or_else(|| unavailable(SourceId::FaostatRainfall))
        }

        async fn monthly_climate(
            &self,
            _region: &str,
            source: SourceId,
        ) -> Result<Vec<RawMonthlyClimate>, SourceError> {
            self.requests.lock().unwrap().push(source);
            self.monthly
                .get(&source)
                .cloned()
                .ok_or_else(|| unavailable(source))
        }
    }

    fn trend(values: &[(i32, f64)]) -> Vec<RawTrendRecord> {
        values
            .iter()
            .map(|(year, value)| RawTrendRecord {
                year: Some(RawValue::from(f64::from(*year))),
                value: Some(RawValue::from(*value)),
            })
            .collect()
    }

    fn months(count: usize) -> Vec<RawMonthlyClimate> {
        Month::ALL
            .iter()
            .take(count)
            .map(|m| RawMonthlyClimate {
                month: *m,
                temperature: Some(RawValue::from(26.0)),
                rainfall: Some(RawValue::from("120")),
            })
            .collect()
    }

    fn span() -> YearSpan {
        YearSpan::new(2010, 2012).unwrap()
    }

    #[tokio::test]
    async fn test_all_external() {
        let sources = FakeClimate {
            temperature: Some(trend(&[(2010, 0.8), (2011, 1.1)])),
            rainfall: Some(trend(&[(2010, 950.0)])),
            monthly: HashMap::from([(SourceId::GiewsEarthObservation, months(12))]),
            ..Default::default()
        };
        let record = assemble_climate(&sources, &RegionTable::builtin(), "3", span()).await;

        assert_eq!(record.region, "Middle Africa");
        assert_eq!(record.temperature_trend.len(), 2);
        assert_eq!(record.rainfall_trend[0].unit, UNIT_MILLIMETRES);
        assert_eq!(record.monthly_data.len(), 12);
        assert_eq!(record.monthly_data[0].rainfall, 120.0);
        assert_eq!(record.data_source, DATA_SOURCE_EXTERNAL);
        assert_eq!(
            *sources.requests.lock().unwrap(),
            vec![SourceId::GiewsEarthObservation]
        );
    }

    #[tokio::test]
    async fn test_monthly_falls_through_to_next_source() {
        let sources = FakeClimate {
            temperature: Some(trend(&[(2010, 0.8)])),
            rainfall: Some(trend(&[(2010, 950.0)])),
            monthly: HashMap::from([
                (SourceId::GiewsEarthObservation, months(11)),
                (SourceId::GiewsCountryBrief, months(12)),
            ]),
            ..Default::default()
        };
        let record = assemble_climate(&sources, &RegionTable::builtin(), "3", span()).await;

        assert_eq!(
            record.provenance.monthly_data,
            Provenance::External {
                source: SourceId::GiewsCountryBrief
            }
        );
        assert_eq!(
            *sources.requests.lock().unwrap(),
            vec![
                SourceId::GiewsEarthObservation,
                SourceId::ClimateKnowledgePortal,
                SourceId::GiewsCountryBrief
            ]
        );
        let monthly_trace = &record.trace[2];
        assert_eq!(monthly_trace.category, DataCategory::MonthlyClimate);
        assert_eq!(
            monthly_trace.history,
            vec![
                NotAttempted,
                Fetching(SourceId::GiewsEarthObservation),
                Insufficient(SourceId::GiewsEarthObservation),
                Fetching(SourceId::ClimateKnowledgePortal),
                Insufficient(SourceId::ClimateKnowledgePortal),
                Fetching(SourceId::GiewsCountryBrief),
                Sufficient(SourceId::GiewsCountryBrief),
            ]
        );
    }

    #[tokio::test]
    async fn test_everything_unavailable_is_synthesized() {
        let sources = FakeClimate::default();
        let record = assemble_climate(&sources, &RegionTable::builtin(), "1", span()).await;

        assert_eq!(record.region, "Northern Africa");
        assert_eq!(record.data_source, DATA_SOURCE_SYNTHESIZED);
        assert!(record.provenance.iter().all(|p| *p == Provenance::Synthesized));
        assert_eq!(
            record.temperature_trend.iter().map(|p| p.year).collect::<Vec<_>>(),
            vec![2010, 2011, 2012]
        );
        assert_eq!(record.rainfall_trend[0].value, 360.0);
        assert_eq!(record.monthly_data.len(), 12);
        assert_eq!(record.monthly_data[11].month, Month::Dec);
        assert!(record.trace.iter().all(|t| t.history.last() == Some(&Synthesized)));
    }

    #[tokio::test]
    async fn test_mixed_sources() {
        let sources = FakeClimate {
            temperature: Some(trend(&[(2011, 1.0)])),
            rainfall: Some(Vec::new()),
            ..Default::default()
        };
        let record = assemble_climate(&sources, &RegionTable::builtin(), "5", span()).await;

        assert_eq!(record.data_source, DATA_SOURCE_MIXED);
        assert!(record.provenance.temperature_trend.is_external());
        assert_eq!(record.provenance.rainfall_trend, Provenance::Synthesized);
        // the empty rainfall payload was read but had nothing usable
        assert_eq!(
            record.trace[1].attempts[0].outcome,
            crate::pipeline::state::AttemptOutcome::Insufficient {
                valid: 0,
                discarded: 0
            }
        );
    }

    #[tokio::test]
    async fn test_unknown_region_uses_default_profile() {
        let sources = FakeClimate::default();
        let record = assemble_climate(&sources, &RegionTable::builtin(), "42", span()).await;
        let reference = assemble_climate(&sources, &RegionTable::builtin(), "1", span()).await;
        assert_eq!(record.region, "Northern Africa");
        assert_eq!(record.monthly_data, reference.monthly_data);
    }
}
