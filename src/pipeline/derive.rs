//! Pure derivations from region and farm identifiers and soil measurements.

use crate::regions::table::{RegionProfile, RegionTable};
use crate::types::categories::{IrrigationType, SoilType};
use crate::types::farm::LatLng;

pub const MIN_FARM_SIZE_HA: f64 = 50.0;
pub const MAX_FARM_SIZE_HA: f64 = 1000.0;
pub const DEFAULT_FARM_SIZE_HA: u32 = 100;
/// Regional agricultural land is reported in hectares; a farm is sized at
/// one ten-thousandth of it.
const LAND_TO_FARM_RATIO: f64 = 10_000.0;

/// Organic matter percentage separating the two soil classes of each pH band.
const ORGANIC_MATTER_SPLIT: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PhBand {
    /// pH below 5.5
    Acidic,
    /// 5.5 <= pH < 6.5
    SlightlyAcidic,
    /// pH 6.5 and above (and unreadable pH)
    Neutral,
}

impl PhBand {
    fn of(ph: f64) -> Self {
        if ph < 5.5 {
            PhBand::Acidic
        } else if ph < 6.5 {
            PhBand::SlightlyAcidic
        } else {
            PhBand::Neutral
        }
    }
}

/// Rows: pH band. Columns: organic matter below the split, at or above it.
const SOIL_TABLE: [(PhBand, [SoilType; 2]); 3] = [
    (PhBand::Acidic, [SoilType::SandyLoam, SoilType::LoamySand]),
    (PhBand::SlightlyAcidic, [SoilType::SiltLoam, SoilType::ClayLoam]),
    (PhBand::Neutral, [SoilType::SiltyClay, SoilType::ClayLoam]),
];

/// Classifies soil texture from pH and organic matter (percent).
pub fn soil_type(ph: f64, organic_matter: f64) -> SoilType {
    let band = PhBand::of(ph);
    let column = usize::from(!(organic_matter < ORGANIC_MATTER_SPLIT));
    SOIL_TABLE
        .iter()
        .find(|(b, _)| *b == band)
        .map_or(SoilType::ClayLoam, |(_, row)| row[column])
}

/// Picks the farm's irrigation method from its region's preference list,
/// cycling through the list by farm id.
pub fn irrigation_type(regions: &RegionTable, region: &str, farm_id: i64) -> IrrigationType {
    pick(&regions.resolve(region).irrigation_preferences, farm_id)
        .copied()
        .unwrap_or(IrrigationType::Drip)
}

pub fn farm_name(profile: &RegionProfile, farm_id: i64) -> String {
    pick(&profile.farm_names, farm_id)
        .cloned()
        .unwrap_or_else(|| "Unknown Farm".to_string())
}

/// Region base coordinate shifted by a small id-dependent offset so farms of
/// one region do not share a location.
pub fn farm_location(profile: &RegionProfile, farm_id: i64) -> LatLng {
    let id = farm_id as f64;
    LatLng {
        lat: profile.coordinate.lat + (id * 0.1).rem_euclid(1.0),
        lng: profile.coordinate.lng + (id * 0.15).rem_euclid(1.5),
    }
}

/// Farm size in hectares from the region's agricultural land area.
pub fn farm_size_from_land(agricultural_land: f64) -> u32 {
    (agricultural_land / LAND_TO_FARM_RATIO)
        .clamp(MIN_FARM_SIZE_HA, MAX_FARM_SIZE_HA)
        .round_ties_even() as u32
}

fn pick<T>(items: &[T], farm_id: i64) -> Option<&T> {
    if items.is_empty() {
        return None;
    }
    let index = farm_id.rem_euclid(items.len() as i64) as usize;
    items.get(index)
}
