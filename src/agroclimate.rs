//! Main entry point: the [`AgroClimate`] client, which owns the sources and
//! the region table and runs the climate and farm pipelines.

use crate::clients::climate_client::ClimateClient;
use crate::clients::farm_client::FarmClient;
use crate::config::SourceConfig;
use crate::error::AgroClimateError;
use crate::pipeline::climate::assemble_climate;
use crate::pipeline::farm::assemble_farm;
use crate::regions::table::RegionTable;
use crate::sources::{ClimateSources, FaoSources, FarmSources};
use crate::types::climate::{ClimateRecord, YearSpan};
use crate::types::farm::FarmRecord;
use crate::types::source::Portal;
use bon::bon;
use chrono::{Datelike, Utc};
use log::info;

/// Years covered by a trend when the caller gives no start year.
pub const DEFAULT_TREND_YEARS: i32 = 20;

/// Client for building climate and farm records.
///
/// Create one with [`AgroClimate::new()`] for the live FAO services, or
/// [`AgroClimate::with_sources()`] to plug in another implementation of the
/// source traits.
///
/// # Examples
///
/// ```no_run
/// # use agroclimate::{AgroClimate, AgroClimateError};
/// # #[tokio::main]
/// # async fn main() -> Result<(), AgroClimateError> {
/// let client = AgroClimate::new()?;
/// let record = client
///     .climate()
///     .region("3")
///     .year_start(2000)
///     .year_end(2020)
///     .call()
///     .await?;
/// println!("{} ({})", record.region, record.data_source);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct AgroClimate<S = FaoSources> {
    sources: S,
    regions: RegionTable,
    probe_primary: bool,
}

impl AgroClimate<FaoSources> {
    /// A client for the live services with default endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`AgroClimateError::HttpClient`] if the HTTP client cannot be built.
    pub fn new() -> Result<Self, AgroClimateError> {
        Self::with_config(SourceConfig::default())
    }

    pub fn with_config(config: SourceConfig) -> Result<Self, AgroClimateError> {
        let probe_primary = config.probe_primary;
        let sources = FaoSources::new(config).map_err(AgroClimateError::HttpClient)?;
        Ok(Self {
            sources,
            regions: RegionTable::builtin(),
            probe_primary,
        })
    }
}

impl<S> AgroClimate<S> {
    /// A client over custom sources. The primary portal is probed by default.
    pub fn with_sources(sources: S) -> Self {
        Self {
            sources,
            regions: RegionTable::builtin(),
            probe_primary: true,
        }
    }

    /// Replaces the built-in region table.
    pub fn with_regions(mut self, regions: RegionTable) -> Self {
        self.regions = regions;
        self
    }

    pub fn with_probe(mut self, probe_primary: bool) -> Self {
        self.probe_primary = probe_primary;
        self
    }

    pub fn regions(&self) -> &RegionTable {
        &self.regions
    }

    pub fn sources(&self) -> &S {
        &self.sources
    }
}

#[bon]
impl<S: ClimateSources> AgroClimate<S> {
    /// Returns a builder for climate records.
    pub fn climate(&self) -> ClimateClient<'_, S> {
        ClimateClient::new(self)
    }

    /// Builds the climate record of a region.
    ///
    /// The span defaults to the last [`DEFAULT_TREND_YEARS`] years up to the
    /// current year.
    ///
    /// # Errors
    ///
    /// * [`AgroClimateError::InvalidYearSpan`] if the start year is after the end year.
    /// * [`AgroClimateError::PrimaryAccess`] if the FAOSTAT portal probe fails.
    #[builder]
    pub async fn climate_record(
        &self,
        region: &str,
        year_start: Option<i32>,
        year_end: Option<i32>,
    ) -> Result<ClimateRecord, AgroClimateError> {
        let year_end = year_end.unwrap_or_else(|| Utc::now().year());
        let year_start = year_start.unwrap_or(year_end - (DEFAULT_TREND_YEARS - 1));
        let span = YearSpan::new(year_start, year_end)?;

        if self.probe_primary {
            let portal = Portal::FaostatClimate;
            ClimateSources::probe(&self.sources, portal)
                .await
                .map_err(|source| AgroClimateError::PrimaryAccess { portal, source })?;
        }

        info!(
            "Building climate record for region {} ({}-{})",
            region, year_start, year_end
        );
        Ok(assemble_climate(&self.sources, &self.regions, region, span).await)
    }
}

#[bon]
impl<S: FarmSources> AgroClimate<S> {
    /// Returns a builder for farm records.
    pub fn farm(&self) -> FarmClient<'_, S> {
        FarmClient::new(self)
    }

    /// Builds the record of one farm in a region.
    ///
    /// # Errors
    ///
    /// Returns [`AgroClimateError::PrimaryAccess`] if the FAOSTAT portal probe fails.
    #[builder]
    pub async fn farm_record(
        &self,
        farm_id: i64,
        region: &str,
    ) -> Result<FarmRecord, AgroClimateError> {
        if self.probe_primary {
            let portal = Portal::FaostatCrops;
            FarmSources::probe(&self.sources, portal)
                .await
                .map_err(|source| AgroClimateError::PrimaryAccess { portal, source })?;
        }

        info!("Building farm record for farm {} in region {}", farm_id, region);
        Ok(assemble_farm(&self.sources, &self.regions, farm_id, region).await)
    }
}
