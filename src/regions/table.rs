//! Static per-region parameters: names, coordinates, seasonal patterns and
//! irrigation preferences.
//!
//! A [`RegionTable`] is built once (from the built-in data or a JSON file),
//! validated, and then only read. Pipelines receive it by reference.

use crate::regions::error::RegionTableError;
use crate::types::categories::IrrigationType;
use crate::types::farm::LatLng;
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Seasonal rainfall and irrigation pattern of a region.
///
/// Bases are monthly millimetres at the shoulder of the season; the peak
/// month receives twice the base. Peaks are zero based month indices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeasonalPattern {
    pub rain_base: f64,
    pub rain_peak: u8,
    pub irr_base: f64,
    pub irr_peak: u8,
}

/// Annual temperature cycle of a region, °C.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThermalPattern {
    pub mean: f64,
    pub amplitude: f64,
    pub peak: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionProfile {
    pub name: String,
    pub coordinate: LatLng,
    pub pattern: SeasonalPattern,
    pub thermal: ThermalPattern,
    pub irrigation_preferences: Vec<IrrigationType>,
    pub farm_names: Vec<String>,
}

impl RegionProfile {
    fn validate(&self, region: &str) -> Result<(), RegionTableError> {
        if self.irrigation_preferences.is_empty() {
            return Err(RegionTableError::EmptyPreferences {
                region: region.to_string(),
            });
        }
        if self.farm_names.is_empty() {
            return Err(RegionTableError::EmptyFarmNames {
                region: region.to_string(),
            });
        }
        for (field, value) in [
            ("rain_base", self.pattern.rain_base),
            ("irr_base", self.pattern.irr_base),
            ("amplitude", self.thermal.amplitude),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(RegionTableError::InvalidBase {
                    region: region.to_string(),
                    field,
                    value,
                });
            }
        }
        for (field, peak) in [
            ("rain_peak", self.pattern.rain_peak),
            ("irr_peak", self.pattern.irr_peak),
            ("thermal peak", self.thermal.peak),
        ] {
            if peak > 11 {
                return Err(RegionTableError::PeakOutOfRange {
                    region: region.to_string(),
                    field,
                    peak,
                });
            }
        }
        Ok(())
    }
}

/// Immutable lookup of region profiles by region code, with a designated
/// default profile for unknown codes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RegionTableFile")]
pub struct RegionTable {
    regions: BTreeMap<String, RegionProfile>,
    default: RegionProfile,
}

#[derive(Deserialize)]
struct RegionTableFile {
    regions: BTreeMap<String, RegionProfile>,
    default: RegionProfile,
}

impl TryFrom<RegionTableFile> for RegionTable {
    type Error = RegionTableError;

    fn try_from(file: RegionTableFile) -> Result<Self, Self::Error> {
        RegionTable::new(file.regions, file.default)
    }
}

impl RegionTable {
    /// Builds a table, validating every profile including the default.
    pub fn new(
        regions: BTreeMap<String, RegionProfile>,
        default: RegionProfile,
    ) -> Result<Self, RegionTableError> {
        default.validate("default")?;
        for (code, profile) in &regions {
            profile.validate(code)?;
        }
        Ok(Self { regions, default })
    }

    pub fn from_json_str(json: &str) -> Result<Self, RegionTableError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, RegionTableError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| RegionTableError::Read(path.to_path_buf(), e))?;
        Self::from_json_str(&contents)
    }

    /// The five African sub-regions used by FAOSTAT area codes 1-5.
    pub fn builtin() -> Self {
        let northern_coordinate = LatLng::new(30.8, 9.4);
        let northern_pattern = SeasonalPattern {
            rain_base: 30.0,
            rain_peak: 0,
            irr_base: 50.0,
            irr_peak: 6,
        };
        let northern_thermal = ThermalPattern {
            mean: 21.0,
            amplitude: 8.0,
            peak: 6,
        };

        let regions = BTreeMap::from([
            (
                "1".to_string(),
                profile(
                    "Northern Africa",
                    northern_coordinate,
                    northern_pattern,
                    northern_thermal,
                    &[
                        IrrigationType::Drip,
                        IrrigationType::Flood,
                        IrrigationType::Subsurface,
                    ],
                    &["Green Valley Farm", "Sahara Oasis", "Atlas Highland"],
                ),
            ),
            (
                "2".to_string(),
                profile(
                    "Eastern Africa",
                    LatLng::new(0.3, 37.9),
                    SeasonalPattern {
                        rain_base: 60.0,
                        rain_peak: 3,
                        irr_base: 40.0,
                        irr_peak: 7,
                    },
                    ThermalPattern {
                        mean: 23.0,
                        amplitude: 2.5,
                        peak: 2,
                    },
                    &[
                        IrrigationType::Drip,
                        IrrigationType::Sprinkler,
                        IrrigationType::CenterPivot,
                    ],
                    &["Eastern Plains", "Highland Ranch", "Victoria Farm"],
                ),
            ),
            (
                "3".to_string(),
                profile(
                    "Middle Africa",
                    LatLng::new(6.6, 20.9),
                    SeasonalPattern {
                        rain_base: 100.0,
                        rain_peak: 7,
                        irr_base: 30.0,
                        irr_peak: 1,
                    },
                    ThermalPattern {
                        mean: 25.0,
                        amplitude: 1.5,
                        peak: 2,
                    },
                    &[
                        IrrigationType::Sprinkler,
                        IrrigationType::Flood,
                        IrrigationType::Subsurface,
                    ],
                    &[
                        "Congo Basin Farm",
                        "Equatorial Estate",
                        "Rainforest Plantation",
                    ],
                ),
            ),
            (
                "4".to_string(),
                profile(
                    "Southern Africa",
                    LatLng::new(-26.5, 24.7),
                    SeasonalPattern {
                        rain_base: 50.0,
                        rain_peak: 1,
                        irr_base: 45.0,
                        irr_peak: 7,
                    },
                    ThermalPattern {
                        mean: 18.5,
                        amplitude: 6.5,
                        peak: 0,
                    },
                    &[
                        IrrigationType::Drip,
                        IrrigationType::Sprinkler,
                        IrrigationType::CenterPivot,
                    ],
                    &["Kalahari Estate", "Cape Vineyard", "Southern Meadows"],
                ),
            ),
            (
                "5".to_string(),
                profile(
                    "Western Africa",
                    LatLng::new(11.7, -4.3),
                    SeasonalPattern {
                        rain_base: 80.0,
                        rain_peak: 8,
                        irr_base: 35.0,
                        irr_peak: 2,
                    },
                    ThermalPattern {
                        mean: 27.5,
                        amplitude: 3.5,
                        peak: 3,
                    },
                    &[
                        IrrigationType::Sprinkler,
                        IrrigationType::Flood,
                        IrrigationType::CenterPivot,
                    ],
                    &["Savanna Ranch", "Niger Delta Farm", "Coastal Plantation"],
                ),
            ),
        ]);

        let default = profile(
            "Northern Africa",
            northern_coordinate,
            northern_pattern,
            northern_thermal,
            &[
                IrrigationType::Drip,
                IrrigationType::Sprinkler,
                IrrigationType::Flood,
            ],
            &["Unknown Farm"],
        );

        Self { regions, default }
    }

    pub fn get(&self, code: &str) -> Option<&RegionProfile> {
        self.regions.get(code)
    }

    /// Looks up a region, falling back to the default profile for unknown codes.
    pub fn resolve(&self, code: &str) -> &RegionProfile {
        match self.regions.get(code) {
            Some(profile) => profile,
            None => {
                warn!(
                    "Unknown region code '{}', using default region values ({})",
                    code, self.default.name
                );
                &self.default
            }
        }
    }

    pub fn default_profile(&self) -> &RegionProfile {
        &self.default
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.regions.keys().map(String::as_str)
    }
}

impl Default for RegionTable {
    fn default() -> Self {
        Self::builtin()
    }
}

fn profile(
    name: &str,
    coordinate: LatLng,
    pattern: SeasonalPattern,
    thermal: ThermalPattern,
    irrigation_preferences: &[IrrigationType],
    farm_names: &[&str],
) -> RegionProfile {
    RegionProfile {
        name: name.to_string(),
        coordinate,
        pattern,
        thermal,
        irrigation_preferences: irrigation_preferences.to_vec(),
        farm_names: farm_names.iter().map(|s| s.to_string()).collect(),
    }
}
