// Adapters layer: concrete implementations for external systems (the
// routing engine, the candidate store, seed files).

pub mod memory;
pub mod osrm;
pub mod seed;
