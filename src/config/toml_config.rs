use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::adapters::osrm;
use crate::config::{parse_fallback, Settings};
use crate::core::orchestrator::SelectionPolicy;
use crate::utils::error::Result;
use crate::utils::validation::Validate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub routing: RoutingConfig,
    pub seed: SeedConfig,
    pub selection: Option<SelectionConfig>,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    pub base_url: String,
    pub connect_timeout_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionConfig {
    pub top_k: Option<usize>,
    pub page_size: Option<usize>,
    pub fallback: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);
        Ok(toml::from_str(&processed_content)?)
    }

    /// Replaces `${VAR_NAME}` placeholders with environment values, so seed
    /// paths and engine URLs can differ per deployment without editing the
    /// file. Unset variables are left as-is.
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    /// Resolved settings with defaults applied to every omitted field.
    pub fn settings(&self) -> Result<Settings> {
        let selection = self.selection.clone().unwrap_or(SelectionConfig {
            top_k: None,
            page_size: None,
            fallback: None,
        });

        let settings = Settings {
            routing: osrm::OsrmConfig {
                base_url: self.routing.base_url.clone(),
                connect_timeout: Duration::from_secs(
                    self.routing.connect_timeout_secs.unwrap_or(2),
                ),
                request_timeout: Duration::from_secs(
                    self.routing.request_timeout_secs.unwrap_or(3),
                ),
            },
            selection: SelectionPolicy {
                top_k: selection.top_k.unwrap_or(3),
                page_size: selection.page_size.unwrap_or(50),
                fallback: parse_fallback(selection.fallback.as_deref().unwrap_or("never"))?,
            },
            seed_path: self.seed.path.clone(),
            monitoring: self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false),
        };
        settings.validate()?;
        Ok(settings)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.settings().map(|_| ())
    }
}
