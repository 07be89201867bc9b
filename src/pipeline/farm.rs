//! Assembles a [`FarmRecord`] for one farm in one region.

use crate::pipeline::derive::{
    farm_location, farm_name, farm_size_from_land, irrigation_type, soil_type,
    DEFAULT_FARM_SIZE_HA,
};
use crate::pipeline::distribution::{accumulate, crop_names, normalize, CropProduction};
use crate::pipeline::resolve::{resolve, settle};
use crate::pipeline::sufficiency::{evaluate_water_usage, Evaluation};
use crate::pipeline::synthesis::synthesize_water_usage;
use crate::regions::table::RegionTable;
use crate::sources::FarmSources;
use crate::types::farm::{
    default_risk_assessment, FarmInfo, FarmProvenance, FarmRecord, SoilAnalysis,
};
use crate::types::provenance::{summarize, Provenance};
use crate::types::raw::{
    RawCropRecord, RawLandRecord, RawSoilProperties, RawValue, RawWaterUsage,
};
use crate::types::source::DataCategory;
use log::info;

/// Resolves size, soil, field distribution, water usage and risk for a farm.
///
/// Never fails. Identity fields (name, location, irrigation) are pure
/// functions of the farm id and region.
pub async fn assemble_farm<S>(
    sources: &S,
    regions: &RegionTable,
    farm_id: i64,
    region: &str,
) -> FarmRecord
where
    S: FarmSources + ?Sized,
{
    let profile = regions.resolve(region);

    let size = resolve(
        DataCategory::FarmSize,
        move |_| sources.agricultural_land(region),
        |raw: Vec<RawLandRecord>| evaluate_land(&raw),
        || (DEFAULT_FARM_SIZE_HA, Provenance::Default),
    )
    .await;

    let soil = resolve(
        DataCategory::SoilAnalysis,
        move |_| sources.soil_properties(region),
        |raw: RawSoilProperties| evaluate_soil(&raw),
        || (SoilAnalysis::default(), Provenance::Default),
    )
    .await;

    let fields = resolve(
        DataCategory::FieldDistribution,
        move |_| sources.crop_production(region),
        |raw: Vec<RawCropRecord>| evaluate_crops(&raw),
        || (CropProduction::default(), Provenance::Default),
    )
    .await
    .map(|production| normalize(&production));

    let water = resolve(
        DataCategory::WaterUsage,
        move |_| sources.water_usage(region),
        |raw: Vec<RawWaterUsage>| evaluate_water_usage(&raw),
        || (synthesize_water_usage(&profile.pattern), Provenance::Synthesized),
    )
    .await;

    let risk = settle(
        DataCategory::RiskAssessment,
        default_risk_assessment(),
        Provenance::Default,
    );

    let farm_info = FarmInfo {
        id: farm_id,
        name: farm_name(profile, farm_id),
        size: size.value,
        location: farm_location(profile, farm_id),
        soil_type: soil_type(soil.value.ph, soil.value.organic_matter),
        irrigation_type: irrigation_type(regions, region, farm_id),
        crops: crop_names(&fields.value),
    };

    let provenance = FarmProvenance {
        size: size.provenance,
        soil_analysis: soil.provenance,
        field_distribution: fields.provenance,
        water_usage: water.provenance,
        risk_assessment: risk.provenance,
    };
    let data_source = summarize(provenance.fetched());
    info!(
        "Farm record for {} ({}) assembled ({})",
        farm_info.name, farm_id, data_source
    );

    FarmRecord {
        farm_info,
        soil_analysis: soil.value,
        field_distribution: fields.value,
        water_usage: water.value,
        risk_assessment: risk.value,
        data_source,
        provenance,
        trace: vec![size.trace, soil.trace, fields.trace, water.trace, risk.trace],
    }
}

/// The first readable land area decides the farm size.
fn evaluate_land(raw: &[RawLandRecord]) -> Evaluation<u32> {
    let first = raw
        .iter()
        .enumerate()
        .find_map(|(i, r)| Some((i, r.value.as_ref()?.as_f64()?)));
    match first {
        Some((index, land)) => Evaluation::Sufficient {
            value: farm_size_from_land(land),
            valid: 1,
            discarded: index,
        },
        None => Evaluation::Insufficient {
            valid: 0,
            discarded: raw.len(),
        },
    }
}

/// Each readable property replaces its default; the result counts as
/// sufficient when at least one property was readable.
fn evaluate_soil(raw: &RawSoilProperties) -> Evaluation<SoilAnalysis> {
    let mut soil = SoilAnalysis::default();
    let (mut valid, mut discarded) = (0, 0);

    let fields: [(&Option<RawValue>, &mut f64); 6] = [
        (&raw.ph, &mut soil.ph),
        (&raw.organic_matter, &mut soil.organic_matter),
        (&raw.nitrogen, &mut soil.nitrogen),
        (&raw.phosphorus, &mut soil.phosphorus),
        (&raw.potassium, &mut soil.potassium),
        (&raw.water_holding_capacity, &mut soil.water_holding_capacity),
    ];
    for (source, target) in fields {
        match source.as_ref().map(RawValue::as_f64) {
            Some(Some(value)) => {
                *target = value;
                valid += 1;
            }
            Some(None) => discarded += 1,
            None => {}
        }
    }

    if valid > 0 {
        Evaluation::Sufficient {
            value: soil,
            valid,
            discarded,
        }
    } else {
        Evaluation::Insufficient { valid, discarded }
    }
}

fn evaluate_crops(raw: &[RawCropRecord]) -> Evaluation<CropProduction> {
    let (production, skipped) = accumulate(raw);
    let valid = raw.len() - skipped;
    if production.total() > 0.0 {
        Evaluation::Sufficient {
            value: production,
            valid,
            discarded: skipped,
        }
    } else {
        Evaluation::Insufficient {
            valid,
            discarded: skipped,
        }
    }
}
