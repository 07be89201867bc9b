pub mod categories;
pub mod climate;
pub mod farm;
pub mod month;
pub mod provenance;
pub mod raw;
pub mod source;
