//! Turns crop production figures into field shares.
//!
//! Crops split a 70 point budget in proportion to production; fallow land
//! takes the rest, never less than 5 points.

use crate::types::farm::FieldShare;
use crate::types::raw::RawCropRecord;

pub const CROP_BUDGET: f64 = 70.0;
pub const FALLOW: &str = "Fallow";
pub const MIN_FALLOW: u32 = 5;

/// Crop production aggregated by crop name, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CropProduction {
    crops: Vec<(String, f64)>,
    total: f64,
}

impl CropProduction {
    /// Adds production for a crop; repeated names accumulate into the first entry.
    pub fn add(&mut self, name: &str, value: f64) {
        match self.crops.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing += value,
            None => self.crops.push((name.to_string(), value)),
        }
        self.total += value;
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.crops.is_empty()
    }

    pub fn len(&self) -> usize {
        self.crops.len()
    }
}

impl<'a> FromIterator<(&'a str, f64)> for CropProduction {
    fn from_iter<I: IntoIterator<Item = (&'a str, f64)>>(iter: I) -> Self {
        let mut production = CropProduction::default();
        for (name, value) in iter {
            production.add(name, value);
        }
        production
    }
}

/// Accumulates usable records: a non-empty name and a positive production value.
///
/// Returns the production and the number of records skipped.
pub fn accumulate(records: &[RawCropRecord]) -> (CropProduction, usize) {
    let mut production = CropProduction::default();
    let mut skipped = 0;
    for record in records {
        let name = record.item_name.as_deref().map(str::trim).unwrap_or("");
        let value = record.value.as_ref().and_then(|v| v.as_f64()).unwrap_or(0.0);
        if name.is_empty() || value <= 0.0 {
            skipped += 1;
            continue;
        }
        production.add(name, value);
    }
    (production, skipped)
}

/// Distribution used when no production data is available.
///
/// Sums to 70, not 100; consumers have historically relied on these exact values.
pub fn default_distribution() -> Vec<FieldShare> {
    vec![
        FieldShare::new("Wheat", 25),
        FieldShare::new("Barley", 20),
        FieldShare::new("Maize", 15),
        FieldShare::new(FALLOW, 10),
    ]
}

/// Converts production into percentage shares, Fallow last.
///
/// Shares sum to 100 as long as the rounded crop shares leave room for the
/// fallow floor. With dozens of tiny crops the rounding excess can push the
/// total above 100.
pub fn normalize(production: &CropProduction) -> Vec<FieldShare> {
    if production.is_empty() || production.total <= 0.0 {
        return default_distribution();
    }

    let mut shares: Vec<FieldShare> = production
        .crops
        .iter()
        .map(|(name, value)| {
            let share = (value / production.total * CROP_BUDGET).round_ties_even();
            FieldShare::new(name.clone(), share as u32)
        })
        .collect();

    let allotted: u32 = shares.iter().map(|s| s.value).sum();
    let fallow = 100u32.saturating_sub(allotted).max(MIN_FALLOW);
    shares.push(FieldShare::new(FALLOW, fallow));
    shares
}

/// Crop names of a distribution, excluding fallow land.
pub fn crop_names(distribution: &[FieldShare]) -> Vec<String> {
    distribution
        .iter()
        .filter(|s| s.name != FALLOW)
        .map(|s| s.name.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::raw::RawValue;
    use proptest::prelude::*;

    #[test]
    fn test_empty_input_gives_literal_default() {
        let shares = normalize(&CropProduction::default());
        assert_eq!(
            shares,
            vec![
                FieldShare::new("Wheat", 25),
                FieldShare::new("Barley", 20),
                FieldShare::new("Maize", 15),
                FieldShare::new("Fallow", 10),
            ]
        );
    }

    #[test]
    fn test_zero_total_gives_default() {
        let production: CropProduction = [("Wheat", 0.0), ("Rice", 0.0)].into_iter().collect();
        assert_eq!(normalize(&production), default_distribution());
    }

    #[test]
    fn test_shares_and_fallow() {
        let production: CropProduction = [("Wheat", 500.0), ("Rice", 300.0), ("Maize", 200.0)]
            .into_iter()
            .collect();
        let shares = normalize(&production);
        assert_eq!(
            shares,
            vec![
                FieldShare::new("Wheat", 35),
                FieldShare::new("Rice", 21),
                FieldShare::new("Maize", 14),
                FieldShare::new("Fallow", 30),
            ]
        );
    }

    #[test]
    fn test_fallow_absorbs_rounding() {
        // three equal crops: 23.33 each rounds to 23, fallow gets 31
        let production: CropProduction = [("A", 1.0), ("B", 1.0), ("C", 1.0)].into_iter().collect();
        let shares = normalize(&production);
        assert_eq!(shares.last(), Some(&FieldShare::new("Fallow", 31)));
        assert_eq!(shares.iter().map(|s| s.value).sum::<u32>(), 100);
    }

    #[test]
    fn test_first_seen_order_and_duplicates() {
        let production: CropProduction = [("Maize", 10.0), ("Wheat", 10.0), ("Maize", 20.0)]
            .into_iter()
            .collect();
        let shares = normalize(&production);
        let names: Vec<_> = shares.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Maize", "Wheat", "Fallow"]);
        // Maize 30/40 * 70 = 52.5 -> 52, Wheat 17.5 -> 18
        assert_eq!(shares[0].value, 52);
        assert_eq!(shares[1].value, 18);
        assert_eq!(shares[2].value, 30);
    }

    #[test]
    fn test_accumulate_skips_unusable_records() {
        let records = vec![
            RawCropRecord {
                item_name: Some("Wheat".into()),
                value: Some(RawValue::from("1200")),
            },
            RawCropRecord {
                item_name: Some("".into()),
                value: Some(RawValue::from(50.0)),
            },
            RawCropRecord {
                item_name: Some("Rice".into()),
                value: None,
            },
            RawCropRecord {
                item_name: Some("Barley".into()),
                value: Some(RawValue::from(0.0)),
            },
            RawCropRecord {
                item_name: Some("Maize".into()),
                value: Some(RawValue::from(800.0)),
            },
        ];
        let (production, skipped) = accumulate(&records);
        assert_eq!(skipped, 3);
        assert_eq!(production.len(), 2);
        assert_eq!(production.total(), 2000.0);
    }

    #[test]
    fn test_crop_names_exclude_fallow() {
        let names = crop_names(&default_distribution());
        assert_eq!(names, ["Wheat", "Barley", "Maize"]);
    }

    proptest! {
        // Holds while the rounded crop shares stay within 95 points, which
        // any realistic crop list does. Past roughly 50 crops the rounding
        // excess plus the fallow floor can exceed 100.
        #[test]
        fn prop_shares_sum_to_hundred(values in prop::collection::vec(0.0f64..1.0e7, 1..20)) {
            let names: Vec<String> = (0..values.len()).map(|i| format!("crop{}", i)).collect();
            let production: CropProduction = names
                .iter()
                .map(String::as_str)
                .zip(values.iter().copied())
                .collect();
            prop_assume!(production.total() > 0.0);

            let shares = normalize(&production);
            prop_assert_eq!(shares.iter().map(|s| s.value).sum::<u32>(), 100);
            prop_assert_eq!(shares.last().map(|s| s.name.as_str()), Some(FALLOW));
            prop_assert!(shares.last().map_or(false, |s| s.value >= MIN_FALLOW));
        }
    }
}
