//! Identifies the external data sources, the data categories they feed, and
//! the priority in which sources are tried for each category.

use serde::Serialize;
use std::fmt;

/// One external data source the pipelines can attempt.
///
/// Each variant corresponds to a single endpoint (or scraped page) of the
/// FAO / World Bank family of services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceId {
    /// FAOSTAT "ET" domain, temperature change element.
    FaostatTemperature,
    /// FAOSTAT "QCL" domain queried for the rainfall trend.
    FaostatRainfall,
    /// GIEWS Earth Observation country page, monthly climate table.
    GiewsEarthObservation,
    /// World Bank Climate Change Knowledge Portal, monthly climatology.
    ClimateKnowledgePortal,
    /// GIEWS country brief, `.climate-table`.
    GiewsCountryBrief,
    /// FAOSTAT "RL" domain, agricultural land area.
    FaostatLand,
    /// Global Soil Organic Carbon map API.
    SoilPortal,
    /// FAOSTAT "QCL" domain, crop production.
    FaostatCrops,
    /// AQUASTAT query results table.
    Aquastat,
}

impl SourceId {
    pub fn label(&self) -> &'static str {
        match self {
            SourceId::FaostatTemperature => "FAOSTAT ET",
            SourceId::FaostatRainfall => "FAOSTAT QCL (rainfall)",
            SourceId::GiewsEarthObservation => "GIEWS Earth Observation",
            SourceId::ClimateKnowledgePortal => "Climate Change Knowledge Portal",
            SourceId::GiewsCountryBrief => "GIEWS Country Brief",
            SourceId::FaostatLand => "FAOSTAT RL",
            SourceId::SoilPortal => "GSOC soil portal",
            SourceId::FaostatCrops => "FAOSTAT QCL (crops)",
            SourceId::Aquastat => "AQUASTAT",
        }
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A field group of an output record that is resolved independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DataCategory {
    TemperatureTrend,
    RainfallTrend,
    MonthlyClimate,
    FarmSize,
    SoilAnalysis,
    FieldDistribution,
    WaterUsage,
    RiskAssessment,
}

impl DataCategory {
    /// Sources to try for this category, highest priority first.
    ///
    /// An empty list means the category is always filled from the fallback.
    pub fn priority(&self) -> &'static [SourceId] {
        match self {
            DataCategory::TemperatureTrend => &[SourceId::FaostatTemperature],
            DataCategory::RainfallTrend => &[SourceId::FaostatRainfall],
            DataCategory::MonthlyClimate => &[
                SourceId::GiewsEarthObservation,
                SourceId::ClimateKnowledgePortal,
                SourceId::GiewsCountryBrief,
            ],
            DataCategory::FarmSize => &[SourceId::FaostatLand],
            DataCategory::SoilAnalysis => &[SourceId::SoilPortal],
            DataCategory::FieldDistribution => &[SourceId::FaostatCrops],
            DataCategory::WaterUsage => &[SourceId::Aquastat],
            DataCategory::RiskAssessment => &[],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DataCategory::TemperatureTrend => "temperature_trend",
            DataCategory::RainfallTrend => "rainfall_trend",
            DataCategory::MonthlyClimate => "monthly_data",
            DataCategory::FarmSize => "farm_size",
            DataCategory::SoilAnalysis => "soil_analysis",
            DataCategory::FieldDistribution => "field_distribution",
            DataCategory::WaterUsage => "water_usage",
            DataCategory::RiskAssessment => "risk_assessment",
        }
    }
}

impl fmt::Display for DataCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The portal pages probed before a pipeline runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Portal {
    /// FAOSTAT climate (ET) landing page, probed by the climate pipeline.
    FaostatClimate,
    /// FAOSTAT crops and livestock (QCL) landing page, probed by the farm pipeline.
    FaostatCrops,
}

impl fmt::Display for Portal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Portal::FaostatClimate => f.write_str("FAOSTAT climate portal"),
            Portal::FaostatCrops => f.write_str("FAOSTAT crops portal"),
        }
    }
}
