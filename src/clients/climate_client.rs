//! Provides the `ClimateClient` for requesting the climate record of a region.
//!
//! This client is an intermediate builder obtained via [`AgroClimate::climate()`].

use crate::sources::{ClimateSources, FaoSources};
use crate::{AgroClimate, AgroClimateError, ClimateRecord};
use bon::bon;

/// A client builder for climate records.
///
/// Calling `.region(code).call()` runs the climate pipeline and returns a
/// [`Result<ClimateRecord, AgroClimateError>`].
pub struct ClimateClient<'a, S = FaoSources> {
    client: &'a AgroClimate<S>,
}

#[bon]
impl<'a, S: ClimateSources> ClimateClient<'a, S> {
    pub(crate) fn new(client: &'a AgroClimate<S>) -> Self {
        Self { client }
    }

    /// Starts a request for the climate record of a FAOSTAT region code.
    ///
    /// # Optional Builder Methods
    ///
    /// * `.year_start(i32)` / `.year_end(i32)`: bounds of the yearly trends,
    ///   inclusive. The end defaults to the current year and the start to
    ///   [`DEFAULT_TREND_YEARS`](crate::DEFAULT_TREND_YEARS) years before it.
    ///
    /// # Errors
    ///
    /// * [`AgroClimateError::InvalidYearSpan`] if the start year is after the end year.
    /// * [`AgroClimateError::PrimaryAccess`] if the FAOSTAT portal cannot be reached.
    ///
    /// Unavailable or insufficient sources are not errors: the affected
    /// categories are synthesized and marked as such in the record.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use agroclimate::{AgroClimate, AgroClimateError};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), AgroClimateError> {
    /// let client = AgroClimate::new()?;
    /// let record = client.climate().region("1").year_start(2010).call().await?;
    /// for month in &record.monthly_data {
    ///     println!("{}: {} mm", month.month, month.rainfall);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    #[builder(start_fn = region)]
    #[doc(hidden)]
    pub async fn build_region(
        &self,
        #[builder(start_fn)] region: &str,
        year_start: Option<i32>,
        year_end: Option<i32>,
    ) -> Result<ClimateRecord, AgroClimateError> {
        self.client
            .climate_record()
            .region(region)
            .maybe_year_start(year_start)
            .maybe_year_end(year_end)
            .call()
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::sources::error::SourceError;
    use crate::sources::ClimateSources;
    use crate::types::raw::{RawMonthlyClimate, RawTrendRecord, RawValue};
    use crate::types::source::{Portal, SourceId};
    use crate::{AgroClimate, Provenance, YearSpan};
    use async_trait::async_trait;

    /// Answers every trend request with one point per year of the span.
    struct Steady;

    #[async_trait]
    impl ClimateSources for Steady {
        async fn probe(&self, _portal: Portal) -> Result<(), SourceError> {
            Ok(())
        }

        async fn temperature_trend(
            &self,
            _region: &str,
            span: YearSpan,
        ) -> Result<Vec<RawTrendRecord>, SourceError> {
            Ok(span
                .years()
                .map(|year| RawTrendRecord {
                    year: Some(RawValue::from(f64::from(year))),
                    value: Some(RawValue::from(1.2)),
                })
                .collect())
        }

        async fn rainfall_trend(
            &self,
            region: &str,
            span: YearSpan,
        ) -> Result<Vec<RawTrendRecord>, SourceError> {
            self.temperature_trend(region, span).await
        }

        async fn monthly_climate(
            &self,
            _region: &str,
            source: SourceId,
        ) -> Result<Vec<RawMonthlyClimate>, SourceError> {
            Err(SourceError::NoData(source))
        }
    }

    #[tokio::test]
    async fn test_region_builder() {
        let client = AgroClimate::with_sources(Steady);
        let record = client
            .climate()
            .region("5")
            .year_start(2015)
            .year_end(2017)
            .call()
            .await
            .unwrap();

        assert_eq!(record.region, "Western Africa");
        assert_eq!(
            record.temperature_trend.iter().map(|p| p.year).collect::<Vec<_>>(),
            vec![2015, 2016, 2017]
        );
        assert_eq!(
            record.provenance.temperature_trend,
            Provenance::External {
                source: SourceId::FaostatTemperature
            }
        );
        assert_eq!(record.provenance.monthly_data, Provenance::Synthesized);
    }

    #[tokio::test]
    async fn test_single_year_span() {
        let client = AgroClimate::with_sources(Steady);
        let record = client
            .climate()
            .region("5")
            .year_start(2020)
            .year_end(2020)
            .call()
            .await
            .unwrap();
        assert_eq!(record.rainfall_trend.len(), 1);
    }
}
