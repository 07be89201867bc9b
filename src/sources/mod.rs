//! Fetch layer: the source traits consumed by the pipelines and their HTTP
//! implementation against the FAO and World Bank services.

pub mod aquastat;
pub mod cckp;
pub mod error;
pub mod faostat;
pub mod giews;
pub mod gsoc;
pub mod html;
pub mod http;

use crate::config::SourceConfig;
use crate::sources::error::SourceError;
use crate::sources::http::HttpFetcher;
use crate::types::climate::YearSpan;
use crate::types::raw::{
    RawCropRecord, RawLandRecord, RawMonthlyClimate, RawSoilProperties, RawTrendRecord,
    RawWaterUsage,
};
use crate::types::source::{Portal, SourceId};
use async_trait::async_trait;
use log::info;

/// Sources feeding the climate pipeline.
///
/// Implementations hand back loosely typed records; validation is the
/// pipeline's job. Any error means the source is unavailable for this run.
#[async_trait]
pub trait ClimateSources: Send + Sync {
    /// Checks that the primary portal answers at all.
    async fn probe(&self, portal: Portal) -> Result<(), SourceError>;

    async fn temperature_trend(
        &self,
        region: &str,
        span: YearSpan,
    ) -> Result<Vec<RawTrendRecord>, SourceError>;

    async fn rainfall_trend(
        &self,
        region: &str,
        span: YearSpan,
    ) -> Result<Vec<RawTrendRecord>, SourceError>;

    /// Monthly climate from one of the monthly sources.
    async fn monthly_climate(
        &self,
        region: &str,
        source: SourceId,
    ) -> Result<Vec<RawMonthlyClimate>, SourceError>;
}

/// Sources feeding the farm pipeline.
#[async_trait]
pub trait FarmSources: Send + Sync {
    async fn probe(&self, portal: Portal) -> Result<(), SourceError>;

    async fn agricultural_land(&self, region: &str) -> Result<Vec<RawLandRecord>, SourceError>;

    async fn soil_properties(&self, region: &str) -> Result<RawSoilProperties, SourceError>;

    async fn crop_production(&self, region: &str) -> Result<Vec<RawCropRecord>, SourceError>;

    async fn water_usage(&self, region: &str) -> Result<Vec<RawWaterUsage>, SourceError>;
}

/// The live FAO / World Bank services.
#[derive(Debug, Clone)]
pub struct FaoSources {
    http: HttpFetcher,
    config: SourceConfig,
}

impl FaoSources {
    pub fn new(config: SourceConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            http: HttpFetcher::new(&config)?,
            config,
        })
    }

    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    async fn probe_portal(&self, portal: Portal) -> Result<(), SourceError> {
        let domain = match portal {
            Portal::FaostatClimate => "ET",
            Portal::FaostatCrops => "QCL",
        };
        let url = format!("{}/{}", self.config.faostat_portal, domain);
        self.http.get_text(&url, &[]).await?;
        info!("{} is reachable", portal);
        Ok(())
    }
}

#[async_trait]
impl ClimateSources for FaoSources {
    async fn probe(&self, portal: Portal) -> Result<(), SourceError> {
        self.probe_portal(portal).await
    }

    async fn temperature_trend(
        &self,
        region: &str,
        span: YearSpan,
    ) -> Result<Vec<RawTrendRecord>, SourceError> {
        faostat::temperature_trend(&self.http, &self.config, region, span).await
    }

    async fn rainfall_trend(
        &self,
        region: &str,
        span: YearSpan,
    ) -> Result<Vec<RawTrendRecord>, SourceError> {
        faostat::rainfall_trend(&self.http, &self.config, region, span).await
    }

    async fn monthly_climate(
        &self,
        region: &str,
        source: SourceId,
    ) -> Result<Vec<RawMonthlyClimate>, SourceError> {
        match source {
            SourceId::GiewsEarthObservation => {
                giews::earth_observation(&self.http, &self.config, region).await
            }
            SourceId::ClimateKnowledgePortal => {
                cckp::monthly_climate(&self.http, &self.config, region).await
            }
            SourceId::GiewsCountryBrief => {
                giews::country_brief(&self.http, &self.config, region).await
            }
            other => Err(SourceError::NoData(other)),
        }
    }
}

#[async_trait]
impl FarmSources for FaoSources {
    async fn probe(&self, portal: Portal) -> Result<(), SourceError> {
        self.probe_portal(portal).await
    }

    async fn agricultural_land(&self, region: &str) -> Result<Vec<RawLandRecord>, SourceError> {
        faostat::agricultural_land(&self.http, &self.config, region).await
    }

    async fn soil_properties(&self, region: &str) -> Result<RawSoilProperties, SourceError> {
        gsoc::soil_properties(&self.http, &self.config, region).await
    }

    async fn crop_production(&self, region: &str) -> Result<Vec<RawCropRecord>, SourceError> {
        faostat::crop_production(&self.http, &self.config, region).await
    }

    async fn water_usage(&self, region: &str) -> Result<Vec<RawWaterUsage>, SourceError> {
        aquastat::water_usage(&self.http, &self.config, region).await
    }
}
