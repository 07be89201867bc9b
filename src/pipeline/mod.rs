pub mod climate;
pub mod derive;
pub mod distribution;
pub mod farm;
pub mod resolve;
pub mod state;
pub mod sufficiency;
pub mod synthesis;
