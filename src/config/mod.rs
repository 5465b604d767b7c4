#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

use crate::adapters::osrm::OsrmConfig;
use crate::core::orchestrator::{FallbackPolicy, SelectionPolicy};
use crate::utils::error::{ResolveError, Result};
use crate::utils::validation::{
    validate_positive_number, validate_range, validate_url, Validate,
};

/// Fully resolved runtime settings, produced by either config provider.
#[derive(Debug, Clone)]
pub struct Settings {
    pub routing: OsrmConfig,
    pub selection: SelectionPolicy,
    pub seed_path: String,
    pub monitoring: bool,
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_url("routing.base_url", &self.routing.base_url)?;
        validate_range(
            "routing.connect_timeout_secs",
            self.routing.connect_timeout.as_secs(),
            1,
            60,
        )?;
        validate_range(
            "routing.request_timeout_secs",
            self.routing.request_timeout.as_secs(),
            1,
            60,
        )?;
        validate_positive_number("selection.top_k", self.selection.top_k, 1)?;
        validate_range("selection.page_size", self.selection.page_size, 1, 500)?;

        if self.seed_path.is_empty() {
            return Err(ResolveError::MissingConfigError {
                field: "seed.path".to_string(),
            });
        }
        Ok(())
    }
}

pub fn parse_fallback(value: &str) -> Result<FallbackPolicy> {
    match value {
        "never" => Ok(FallbackPolicy::Never),
        "next-candidate" => Ok(FallbackPolicy::NextCandidate),
        other => Err(ResolveError::InvalidConfigValueError {
            field: "fallback".to_string(),
            value: other.to_string(),
            reason: "expected 'never' or 'next-candidate'".to_string(),
        }),
    }
}
