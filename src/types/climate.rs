use crate::error::AgroClimateError;
use crate::pipeline::state::CategoryTrace;
use crate::types::month::Month;
use crate::types::provenance::Provenance;
use serde::Serialize;
use std::ops::RangeInclusive;

pub const UNIT_CELSIUS: &str = "°C";
pub const UNIT_MILLIMETRES: &str = "mm";

/// An inclusive range of calendar years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearSpan {
    start: i32,
    end: i32,
}

impl YearSpan {
    /// Longest span a trend may cover.
    pub const MAX_YEARS: i32 = 200;

    pub fn new(start: i32, end: i32) -> Result<Self, AgroClimateError> {
        if start > end || i64::from(end) - i64::from(start) >= i64::from(Self::MAX_YEARS) {
            return Err(AgroClimateError::InvalidYearSpan { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> i32 {
        self.start
    }

    pub fn end(&self) -> i32 {
        self.end
    }

    pub fn years(&self) -> RangeInclusive<i32> {
        self.start..=self.end
    }
}

/// One year of a temperature or rainfall trend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub year: i32,
    pub value: f64,
    pub unit: &'static str,
}

/// Climate normals for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyClimate {
    pub month: Month,
    pub temperature: f64, // °C
    pub rainfall: f64,    // mm
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClimateProvenance {
    pub temperature_trend: Provenance,
    pub rainfall_trend: Provenance,
    pub monthly_data: Provenance,
}

impl ClimateProvenance {
    pub fn iter(&self) -> impl Iterator<Item = &Provenance> {
        [&self.temperature_trend, &self.rainfall_trend, &self.monthly_data].into_iter()
    }
}

/// Output of the climate pipeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClimateRecord {
    pub region: String,
    pub temperature_trend: Vec<TrendPoint>,
    pub rainfall_trend: Vec<TrendPoint>,
    pub monthly_data: Vec<MonthlyClimate>,
    pub data_source: &'static str,
    pub provenance: ClimateProvenance,
    #[serde(skip)]
    pub trace: Vec<CategoryTrace>,
}
