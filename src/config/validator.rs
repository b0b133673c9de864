use thiserror::Error;

use crate::config::{MockServerSettings, ServiceSettings, Settings};

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate(settings: &Settings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = Self::validate_service(&settings.service) {
            errors.extend(e);
        }

        if let Err(e) = Self::validate_mock_server(&settings.mock_server) {
            errors.extend(e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_service(service: &ServiceSettings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if service.base_url.trim().is_empty() {
            errors.push(ValidationError::MissingField("service.base_url".to_string()));
        } else {
            match reqwest::Url::parse(&service.base_url) {
                Ok(url) if matches!(url.scheme(), "http" | "https") => {}
                Ok(url) => errors.push(ValidationError::InvalidValue {
                    field: "service.base_url".to_string(),
                    reason: format!("Unsupported scheme '{}'", url.scheme()),
                }),
                Err(e) => errors.push(ValidationError::InvalidValue {
                    field: "service.base_url".to_string(),
                    reason: e.to_string(),
                }),
            }
        }

        if service.timeout_seconds == Some(0) {
            errors.push(ValidationError::InvalidValue {
                field: "service.timeout_seconds".to_string(),
                reason: "Timeout must be greater than 0".to_string(),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_mock_server(mock: &MockServerSettings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        // port 0 is allowed and binds an ephemeral port
        if mock.host.is_empty() {
            errors.push(ValidationError::MissingField("mock_server.host".to_string()));
        }

        if mock.label.trim().is_empty() {
            errors.push(ValidationError::MissingField("mock_server.label".to_string()));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config() {
        let settings = Settings::default();
        assert!(ConfigValidator::validate(&settings).is_ok());
    }

    #[test]
    fn test_invalid_base_url() {
        let mut settings = Settings::default();
        settings.service.base_url = "not a url".to_string();

        let errors = ConfigValidator::validate(&settings).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], ValidationError::InvalidValue { .. }));
    }

    #[test]
    fn test_unsupported_scheme() {
        let mut settings = Settings::default();
        settings.service.base_url = "ftp://example.com".to_string();

        let errors = ConfigValidator::validate(&settings).unwrap_err();
        assert!(errors[0].to_string().contains("Unsupported scheme 'ftp'"));
    }

    #[test]
    fn test_collects_every_error() {
        let mut settings = Settings::default();
        settings.service.base_url = String::new();
        settings.service.timeout_seconds = Some(0);
        settings.mock_server.host = String::new();

        let errors = ConfigValidator::validate(&settings).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.iter().any(|e| matches!(e, ValidationError::MissingField(f) if f == "service.base_url")));
    }
}
