use clap::Parser;

use crate::adapters::osrm;
use crate::config::{parse_fallback, Settings, TomlConfig};
use crate::core::orchestrator::SelectionPolicy;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "ride-radar")]
#[command(about = "Finds the nearest rentable item and the road distance to reach it")]
pub struct CliConfig {
    /// Your current latitude
    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,

    /// Your current longitude
    #[arg(long, allow_negative_numbers = true)]
    pub lon: f64,

    /// Destination latitude: measure a direct route instead of looking up items
    #[arg(long, requires = "to_lon", allow_negative_numbers = true)]
    pub to_lat: Option<f64>,

    /// Destination longitude, paired with --to-lat
    #[arg(long, requires = "to_lat", allow_negative_numbers = true)]
    pub to_lon: Option<f64>,

    #[arg(long, default_value = osrm::DEFAULT_BASE_URL)]
    pub routing_url: String,

    #[arg(long, default_value = "2")]
    pub connect_timeout_secs: u64,

    #[arg(long, default_value = "3")]
    pub request_timeout_secs: u64,

    #[arg(long, default_value = "3")]
    pub top_k: usize,

    #[arg(long, default_value = "50")]
    pub page_size: usize,

    /// What to do when the routing call fails: "never" or "next-candidate"
    #[arg(long, default_value = "never")]
    pub fallback: String,

    /// CSV seed file for the item store
    #[arg(long, default_value = "./data/items.csv")]
    pub seed: String,

    /// TOML config file; replaces the routing/selection/seed flags above
    #[arg(long)]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit JSON log lines instead of the console format")]
    pub log_json: bool,

    #[arg(long, help = "Report process stats after the run")]
    pub monitor: bool,
}

impl CliConfig {
    /// Resolved settings: the config file wins when one is supplied,
    /// otherwise the flags (and their defaults) apply.
    pub fn settings(&self) -> Result<Settings> {
        if let Some(path) = &self.config {
            let mut settings = TomlConfig::from_file(path)?.settings()?;
            settings.monitoring = settings.monitoring || self.monitor;
            return Ok(settings);
        }

        let settings = Settings {
            routing: osrm::OsrmConfig {
                base_url: self.routing_url.clone(),
                connect_timeout: Duration::from_secs(self.connect_timeout_secs),
                request_timeout: Duration::from_secs(self.request_timeout_secs),
            },
            selection: SelectionPolicy {
                top_k: self.top_k,
                page_size: self.page_size,
                fallback: parse_fallback(&self.fallback)?,
            },
            seed_path: self.seed.clone(),
            monitoring: self.monitor,
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn direct_target(&self) -> Option<(f64, f64)> {
        match (self.to_lat, self.to_lon) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }
}
