pub mod cozy;
pub mod material;
