pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{Settings, TomlConfig};

pub use adapters::memory::InMemoryCandidateSource;
pub use adapters::osrm::{OsrmClient, OsrmConfig, RoutingOutcome};
pub use core::orchestrator::{FallbackPolicy, ProximityOrchestrator, SelectionPolicy};
pub use domain::model::{DistanceResult, GeoPoint, Item};
pub use domain::ports::{CandidateFilter, CandidateSource, Page};
pub use utils::error::{ResolveError, Result};
