pub mod climate_client;
pub mod farm_client;
