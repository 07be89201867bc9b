//! Deterministic monthly series generated from a region's seasonal patterns.
//!
//! Every quantity follows the same shape: a single peak month at twice the
//! base value, decaying linearly with circular distance from the peak down to
//! zero six months away. Results are rounded half-to-even so regenerated
//! series match historical output exactly.

use crate::regions::table::{SeasonalPattern, ThermalPattern};
use crate::types::climate::{MonthlyClimate, TrendPoint, UNIT_CELSIUS, UNIT_MILLIMETRES};
use crate::types::farm::WaterUsage;
use crate::types::month::Month;

const EFFICIENCY_FLOOR: f64 = 65.0;
const EFFICIENCY_RANGE: f64 = 25.0;

/// Distance in months between `month_index` and `peak`, going around the year
/// the short way. Always in `0..=6`.
pub fn circular_distance(month_index: usize, peak: u8) -> u32 {
    let offset = (month_index as i64 - i64::from(peak)).rem_euclid(12);
    let offset = if offset > 6 { 12 - offset } else { offset };
    offset as u32
}

/// `2` at the peak month, `0` six months away.
fn seasonal_factor(month_index: usize, peak: u8) -> f64 {
    2.0 - f64::from(circular_distance(month_index, peak)) / 3.0
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}

/// Water balance for one month.
///
/// Efficiency is tied inversely to the unrounded rainfall level: 90% in the
/// driest month, 65% at the rainfall peak.
pub fn water_usage_for_month(pattern: &SeasonalPattern, month: Month) -> WaterUsage {
    let rainfall = pattern.rain_base * seasonal_factor(month.index(), pattern.rain_peak);
    let irrigation = pattern.irr_base * seasonal_factor(month.index(), pattern.irr_peak);
    // A region without rainfall sits at the dry end of the efficiency scale.
    let wetness = if pattern.rain_base > 0.0 {
        rainfall / (pattern.rain_base * 2.0)
    } else {
        0.0
    };
    let efficiency = EFFICIENCY_FLOOR + EFFICIENCY_RANGE * (1.0 - wetness);

    WaterUsage {
        month,
        rainfall: rainfall.round_ties_even(),
        irrigation: irrigation.round_ties_even(),
        efficiency: efficiency.round_ties_even(),
    }
}

pub fn synthesize_water_usage(pattern: &SeasonalPattern) -> Vec<WaterUsage> {
    Month::ALL
        .iter()
        .map(|m| water_usage_for_month(pattern, *m))
        .collect()
}

/// Temperature and rainfall normals for one month.
///
/// Temperature swings `amplitude` degrees either side of `mean`, rounded to
/// one decimal.
pub fn monthly_climate_for_month(
    pattern: &SeasonalPattern,
    thermal: &ThermalPattern,
    month: Month,
) -> MonthlyClimate {
    let rainfall = pattern.rain_base * seasonal_factor(month.index(), pattern.rain_peak);
    let temperature =
        thermal.mean + thermal.amplitude * (seasonal_factor(month.index(), thermal.peak) - 1.0);

    MonthlyClimate {
        month,
        temperature: round1(temperature),
        rainfall: rainfall.round_ties_even(),
    }
}

pub fn synthesize_monthly_climate(
    pattern: &SeasonalPattern,
    thermal: &ThermalPattern,
) -> Vec<MonthlyClimate> {
    Month::ALL
        .iter()
        .map(|m| monthly_climate_for_month(pattern, thermal, *m))
        .collect()
}

/// A flat temperature trend at the region's annual mean temperature.
pub fn synthesize_temperature_trend(
    pattern: &SeasonalPattern,
    thermal: &ThermalPattern,
    years: impl IntoIterator<Item = i32>,
) -> Vec<TrendPoint> {
    let months = synthesize_monthly_climate(pattern, thermal);
    let annual_mean =
        round1(months.iter().map(|m| m.temperature).sum::<f64>() / months.len() as f64);
    years
        .into_iter()
        .map(|year| TrendPoint {
            year,
            value: annual_mean,
            unit: UNIT_CELSIUS,
        })
        .collect()
}

/// A flat rainfall trend at the region's annual rainfall total.
pub fn synthesize_rainfall_trend(
    pattern: &SeasonalPattern,
    years: impl IntoIterator<Item = i32>,
) -> Vec<TrendPoint> {
    let annual_total: f64 = Month::ALL
        .iter()
        .map(|m| water_usage_for_month(pattern, *m).rainfall)
        .sum();
    years
        .into_iter()
        .map(|year| TrendPoint {
            year,
            value: annual_total,
            unit: UNIT_MILLIMETRES,
        })
        .collect()
}
