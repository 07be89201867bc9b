use crate::pipeline::state::CategoryTrace;
use crate::types::categories::{IrrigationType, SoilType};
use crate::types::month::Month;
use crate::types::provenance::Provenance;
use serde::{Deserialize, Serialize};

/// A geographic coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FarmInfo {
    pub id: i64,
    pub name: String,
    /// Hectares.
    pub size: u32,
    pub location: LatLng,
    pub soil_type: SoilType,
    pub irrigation_type: IrrigationType,
    pub crops: Vec<String>,
}

/// Topsoil properties of a farm.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SoilAnalysis {
    pub ph: f64,
    /// Percent.
    pub organic_matter: f64,
    /// mg/kg.
    pub nitrogen: f64,
    /// mg/kg.
    pub phosphorus: f64,
    /// mg/kg.
    pub potassium: f64,
    /// Volumetric fraction.
    pub water_holding_capacity: f64,
}

impl Default for SoilAnalysis {
    fn default() -> Self {
        Self {
            ph: 6.5,
            organic_matter: 2.0,
            nitrogen: 50.0,
            phosphorus: 30.0,
            potassium: 150.0,
            water_holding_capacity: 0.15,
        }
    }
}

/// Share of the farm's fields given to one crop, in percent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldShare {
    pub name: String,
    pub value: u32,
}

impl FieldShare {
    pub fn new(name: impl Into<String>, value: u32) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaterUsage {
    pub month: Month,
    pub rainfall: f64,
    pub irrigation: f64,
    /// Irrigation efficiency, percent.
    pub efficiency: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskEntry {
    #[serde(rename = "type")]
    pub kind: String,
    /// 0-100.
    pub probability: u8,
    /// 1-5.
    pub impact: u8,
    pub mitigation: String,
}

impl RiskEntry {
    fn new(kind: &str, probability: u8, impact: u8, mitigation: &str) -> Self {
        Self {
            kind: kind.to_string(),
            probability,
            impact,
            mitigation: mitigation.to_string(),
        }
    }
}

/// The static risk table used for every farm.
pub fn default_risk_assessment() -> Vec<RiskEntry> {
    vec![
        RiskEntry::new(
            "Drought",
            50,
            3,
            "Implement water conservation practices and drought-resistant crop varieties.",
        ),
        RiskEntry::new(
            "Pest Infestation",
            40,
            3,
            "Regular monitoring and integrated pest management strategies.",
        ),
        RiskEntry::new(
            "Extreme Weather",
            30,
            4,
            "Weather-resistant infrastructure and crop insurance.",
        ),
        RiskEntry::new(
            "Soil Degradation",
            35,
            3,
            "Implement crop rotation and cover crops to maintain soil health.",
        ),
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FarmProvenance {
    pub size: Provenance,
    pub soil_analysis: Provenance,
    pub field_distribution: Provenance,
    pub water_usage: Provenance,
    pub risk_assessment: Provenance,
}

impl FarmProvenance {
    /// Categories backed by an external source; the risk table never is.
    pub fn fetched(&self) -> impl Iterator<Item = &Provenance> {
        [
            &self.size,
            &self.soil_analysis,
            &self.field_distribution,
            &self.water_usage,
        ]
        .into_iter()
    }
}

/// Output of the farm pipeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FarmRecord {
    pub farm_info: FarmInfo,
    pub soil_analysis: SoilAnalysis,
    pub field_distribution: Vec<FieldShare>,
    pub water_usage: Vec<WaterUsage>,
    pub risk_assessment: Vec<RiskEntry>,
    pub data_source: &'static str,
    pub provenance: FarmProvenance,
    #[serde(skip)]
    pub trace: Vec<CategoryTrace>,
}
