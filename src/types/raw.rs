//! Loosely typed records as handed over by the fetch layer.
//!
//! External services disagree on whether numbers are JSON numbers or strings,
//! and scraped table cells are always text. Every numeric field therefore
//! arrives as an optional [`RawValue`] and is only interpreted by the
//! pipeline's validation step, which drops entries it cannot read.

use crate::types::month::Month;
use serde::Deserialize;

/// A scalar value of unknown shape.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl RawValue {
    /// Interprets the value as a finite number. Text is trimmed first.
    pub fn as_f64(&self) -> Option<f64> {
        let n = match self {
            RawValue::Number(n) => *n,
            RawValue::Text(s) => s.trim().parse::<f64>().ok()?,
            RawValue::Other(_) => return None,
        };
        n.is_finite().then_some(n)
    }

    /// Interprets the value as a calendar year; fractional years are rejected.
    pub fn as_year(&self) -> Option<i32> {
        match self {
            RawValue::Text(s) => s.trim().parse::<i32>().ok(),
            RawValue::Number(n) if n.fract() == 0.0 && n.abs() <= i32::MAX as f64 => {
                Some(*n as i32)
            }
            _ => None,
        }
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

/// One row of a yearly indicator series (FAOSTAT `data[]` item).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawTrendRecord {
    #[serde(default)]
    pub year: Option<RawValue>,
    #[serde(default)]
    pub value: Option<RawValue>,
}

/// One month of a climate table.
#[derive(Debug, Clone, PartialEq)]
pub struct RawMonthlyClimate {
    pub month: Month,
    pub temperature: Option<RawValue>,
    pub rainfall: Option<RawValue>,
}

/// One row of a water usage table. The month is the row's label cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawWaterUsage {
    pub month: Option<String>,
    pub rainfall: Option<RawValue>,
    pub irrigation: Option<RawValue>,
    pub efficiency: Option<RawValue>,
}

/// Agricultural land area item (FAOSTAT RL).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawLandRecord {
    #[serde(default)]
    pub value: Option<RawValue>,
}

/// Crop production item (FAOSTAT QCL).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawCropRecord {
    #[serde(default)]
    pub item_name: Option<String>,
    #[serde(default)]
    pub value: Option<RawValue>,
}

/// Soil property block of the soil portal response.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawSoilProperties {
    #[serde(default)]
    pub ph: Option<RawValue>,
    #[serde(default, rename = "om")]
    pub organic_matter: Option<RawValue>,
    #[serde(default, rename = "n")]
    pub nitrogen: Option<RawValue>,
    #[serde(default, rename = "p")]
    pub phosphorus: Option<RawValue>,
    #[serde(default, rename = "k")]
    pub potassium: Option<RawValue>,
    #[serde(default, rename = "whc")]
    pub water_holding_capacity: Option<RawValue>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_value_numbers() {
        assert_eq!(RawValue::from(1.5).as_f64(), Some(1.5));
        assert_eq!(RawValue::from(" 21.4 ").as_f64(), Some(21.4));
        assert_eq!(RawValue::from("n/a").as_f64(), None);
        assert_eq!(RawValue::from("NaN").as_f64(), None);
        assert_eq!(RawValue::Other(serde_json::Value::Bool(true)).as_f64(), None);
    }

    #[test]
    fn test_raw_value_years() {
        assert_eq!(RawValue::from(2001.0).as_year(), Some(2001));
        assert_eq!(RawValue::from("1999").as_year(), Some(1999));
        assert_eq!(RawValue::from(2001.5).as_year(), None);
        assert_eq!(RawValue::from("2001.5").as_year(), None);
    }

    #[test]
    fn test_deserialize_mixed_payload() {
        let records: Vec<RawTrendRecord> = serde_json::from_str(
            r#"[{"year": "2001", "value": 1.2}, {"year": 2002, "value": null}, {"value": true}]"#,
        )
        .unwrap();
        assert_eq!(records[0].year, Some(RawValue::from("2001")));
        assert_eq!(records[1].value, None);
        assert_eq!(records[2].year, None);
        assert!(matches!(records[2].value, Some(RawValue::Other(_))));
    }

    #[test]
    fn test_soil_properties_renames() {
        let props: RawSoilProperties =
            serde_json::from_str(r#"{"ph": 5.1, "om": "3.4", "whc": 0.2}"#).unwrap();
        assert_eq!(props.ph, Some(RawValue::Number(5.1)));
        assert_eq!(props.organic_matter, Some(RawValue::from("3.4")));
        assert_eq!(props.nitrogen, None);
    }
}
