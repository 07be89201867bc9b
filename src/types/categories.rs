//! Closed category sets used in farm records.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Soil texture class derived from pH and organic matter.
///
/// See [`crate::soil_type`] for the decision table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoilType {
    #[serde(rename = "Sandy Loam")]
    SandyLoam,
    #[serde(rename = "Loamy Sand")]
    LoamySand,
    #[serde(rename = "Silt Loam")]
    SiltLoam,
    #[serde(rename = "Clay Loam")]
    ClayLoam,
    #[serde(rename = "Silty Clay")]
    SiltyClay,
}

impl SoilType {
    pub fn name(&self) -> &'static str {
        match self {
            SoilType::SandyLoam => "Sandy Loam",
            SoilType::LoamySand => "Loamy Sand",
            SoilType::SiltLoam => "Silt Loam",
            SoilType::ClayLoam => "Clay Loam",
            SoilType::SiltyClay => "Silty Clay",
        }
    }
}

impl fmt::Display for SoilType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Irrigation method of a farm.
///
/// Region tables list these as preference lists; see [`crate::irrigation_type`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IrrigationType {
    Drip,
    Sprinkler,
    Flood,
    #[serde(rename = "Center Pivot")]
    CenterPivot,
    Subsurface,
}

impl IrrigationType {
    pub const ALL: [IrrigationType; 5] = [
        IrrigationType::Drip,
        IrrigationType::Sprinkler,
        IrrigationType::Flood,
        IrrigationType::CenterPivot,
        IrrigationType::Subsurface,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            IrrigationType::Drip => "Drip",
            IrrigationType::Sprinkler => "Sprinkler",
            IrrigationType::Flood => "Flood",
            IrrigationType::CenterPivot => "Center Pivot",
            IrrigationType::Subsurface => "Subsurface",
        }
    }
}

impl fmt::Display for IrrigationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_names_match_display() {
        for t in IrrigationType::ALL {
            let json = serde_json::to_string(&t).unwrap();
            assert_eq!(json, format!("\"{}\"", t));
            let back: IrrigationType = serde_json::from_str(&json).unwrap();
            assert_eq!(back, t);
        }
        let json = serde_json::to_string(&SoilType::SiltyClay).unwrap();
        assert_eq!(json, "\"Silty Clay\"");
    }
}
