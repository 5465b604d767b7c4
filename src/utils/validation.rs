use crate::utils::error::{ResolveError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_latitude(value: f64) -> Result<()> {
    if !(-90.0..=90.0).contains(&value) {
        return Err(ResolveError::InvalidInput {
            message: format!("latitude {} outside [-90, 90]", value),
        });
    }
    Ok(())
}

pub fn validate_longitude(value: f64) -> Result<()> {
    if !(-180.0..=180.0).contains(&value) {
        return Err(ResolveError::InvalidInput {
            message: format!("longitude {} outside [-180, 180]", value),
        });
    }
    Ok(())
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(ResolveError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ResolveError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(ResolveError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(ResolveError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(ResolveError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_latitude() {
        assert!(validate_latitude(52.95).is_ok());
        assert!(validate_latitude(-90.0).is_ok());
        assert!(validate_latitude(90.0).is_ok());
        assert!(validate_latitude(191.0).is_err());
        assert!(validate_latitude(-90.001).is_err());
        assert!(validate_latitude(f64::NAN).is_err());
    }

    #[test]
    fn test_validate_longitude() {
        assert!(validate_longitude(-1.16).is_ok());
        assert!(validate_longitude(180.0).is_ok());
        assert!(validate_longitude(-180.5).is_err());
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("routing_url", "https://example.com").is_ok());
        assert!(validate_url("routing_url", "http://example.com").is_ok());
        assert!(validate_url("routing_url", "").is_err());
        assert!(validate_url("routing_url", "invalid-url").is_err());
        assert!(validate_url("routing_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("top_k", 3, 1).is_ok());
        assert!(validate_positive_number("top_k", 0, 1).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("request_timeout_secs", 3u64, 1, 60).is_ok());
        assert!(validate_range("request_timeout_secs", 0u64, 1, 60).is_err());
        assert!(validate_range("request_timeout_secs", 120u64, 1, 60).is_err());
    }
}
