use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("No candidates with a usable location")]
    NoCandidates,

    #[error("Routing service unavailable: {message}")]
    RoutingUnavailable { message: String },

    #[error("Internal error: {message}")]
    InternalError { message: String },

    #[error("HTTP client setup failed: {0}")]
    HttpClientError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Config file parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Data,
    External,
    Config,
    System,
}

impl ResolveError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } => ErrorCategory::Input,
            Self::NoCandidates => ErrorCategory::Data,
            Self::RoutingUnavailable { .. } => ErrorCategory::External,
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. }
            | Self::TomlError(_) => ErrorCategory::Config,
            Self::InternalError { .. }
            | Self::HttpClientError(_)
            | Self::CsvError(_)
            | Self::IoError(_)
            | Self::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NoCandidates => ErrorSeverity::Low,
            Self::RoutingUnavailable { .. } => ErrorSeverity::Medium,
            Self::InvalidInput { .. }
            | Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. }
            | Self::TomlError(_)
            | Self::CsvError(_)
            | Self::IoError(_) => ErrorSeverity::High,
            Self::InternalError { .. } | Self::HttpClientError(_) | Self::SerializationError(_) => {
                ErrorSeverity::Critical
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => {
                "Check that latitude is within [-90, 90] and longitude within [-180, 180]"
            }
            Self::NoCandidates => "Seed the item store or relax the search filters",
            Self::RoutingUnavailable { .. } => {
                "The routing engine is throttling or down; wait a moment and retry"
            }
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. }
            | Self::TomlError(_) => "Fix the configuration value and run again",
            Self::CsvError(_) | Self::IoError(_) => {
                "Check that the seed file exists and every row has the expected columns"
            }
            Self::InternalError { .. } | Self::HttpClientError(_) | Self::SerializationError(_) => {
                "This is a bug or an environment fault; rerun with --verbose and report the log"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::InvalidInput { message } => format!("Invalid coordinates: {}", message),
            Self::NoCandidates => "No rentable items with a known location were found".to_string(),
            Self::RoutingUnavailable { .. } => {
                "The routing service is currently unavailable".to_string()
            }
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. }
            | Self::TomlError(_) => format!("Configuration problem: {}", self),
            Self::CsvError(_) | Self::IoError(_) => {
                format!("Could not load the item seed: {}", self)
            }
            Self::InternalError { .. } | Self::HttpClientError(_) | Self::SerializationError(_) => {
                "An internal error occurred while resolving the nearest item".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ResolveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routing_unavailable_is_retryable() {
        let err = ResolveError::RoutingUnavailable {
            message: "rate limit".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert_eq!(err.category(), ErrorCategory::External);
    }

    #[test]
    fn test_invalid_input_is_an_input_error() {
        let err = ResolveError::InvalidInput {
            message: "latitude 191 outside [-90, 90]".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.user_friendly_message().contains("191"));
    }

    #[test]
    fn test_no_candidates_is_low_severity() {
        assert_eq!(ResolveError::NoCandidates.severity(), ErrorSeverity::Low);
    }
}
