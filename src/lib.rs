mod agroclimate;
mod clients;
mod config;
mod error;
mod pipeline;
mod regions;
mod sources;
mod types;

pub use agroclimate::*;
pub use config::*;
pub use error::AgroClimateError;

pub use clients::climate_client::*;
pub use clients::farm_client::*;

pub use types::categories::*;
pub use types::climate::*;
pub use types::farm::*;
pub use types::month::Month;
pub use types::provenance::*;
pub use types::raw::*;
pub use types::source::*;

pub use regions::error::RegionTableError;
pub use regions::table::*;

pub use sources::error::SourceError;
pub use sources::{ClimateSources, FaoSources, FarmSources};

pub use pipeline::climate::assemble_climate;
pub use pipeline::derive::{
    farm_location, farm_name, irrigation_type, soil_type, DEFAULT_FARM_SIZE_HA, MAX_FARM_SIZE_HA,
    MIN_FARM_SIZE_HA,
};
pub use pipeline::distribution::{default_distribution, normalize, CropProduction, CROP_BUDGET};
pub use pipeline::farm::assemble_farm;
pub use pipeline::state::{Attempt, AttemptOutcome, CategoryState, CategoryTrace};
pub use pipeline::synthesis::{
    synthesize_monthly_climate, synthesize_rainfall_trend, synthesize_temperature_trend,
    synthesize_water_usage,
};
