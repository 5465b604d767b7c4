pub mod haversine;
pub mod orchestrator;
pub mod ranker;

pub use haversine::haversine_km;
pub use orchestrator::{FallbackPolicy, ProximityOrchestrator, SelectionPolicy};
pub use ranker::{rank_nearest, RankedCandidate};
