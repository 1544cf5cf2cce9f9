//! Telephony provider configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::foundation::PhoneNumberValidator;

/// Telephony provider configuration (Plivo-compatible voice API)
#[derive(Debug, Clone, Deserialize)]
pub struct TelephonyConfig {
    /// Provider account auth ID
    pub auth_id: String,

    /// Provider account auth token
    pub auth_token: SecretString,

    /// Caller number in E.164 format (the "from" leg of every call)
    pub caller_number: String,

    /// Publicly reachable base URL for answer/callback webhooks
    pub base_url: String,

    /// Speech collection window in seconds
    #[serde(default = "default_speech_timeout")]
    pub speech_timeout_secs: u64,
}

impl TelephonyConfig {
    /// Validate telephony configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.auth_id.is_empty() {
            return Err(ValidationError::EmptyAuthId);
        }
        if self.auth_token.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("TELEPHONY_AUTH_TOKEN"));
        }
        if self.caller_number.is_empty() {
            return Err(ValidationError::MissingRequired("TELEPHONY_CALLER_NUMBER"));
        }
        // The caller number is the "from" leg of every call; it must be a
        // self-describing international number, no region context applies.
        if !PhoneNumberValidator::new(None).validate(&self.caller_number) {
            return Err(ValidationError::InvalidCallerNumber);
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidBaseUrl);
        }
        Ok(())
    }

    /// Base URL with any trailing slash removed
    pub fn base_url_trimmed(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

fn default_speech_timeout() -> u64 {
    5
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> TelephonyConfig {
        TelephonyConfig {
            auth_id: "MAXXXXXXXXXXXXXXXXXX".to_string(),
            auth_token: SecretString::new("token".to_string()),
            caller_number: "+5511999999999".to_string(),
            base_url: "https://vigia.example.com".to_string(),
            speech_timeout_secs: 5,
        }
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_validation_empty_auth_id() {
        let config = TelephonyConfig {
            auth_id: String::new(),
            ..valid_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_missing_token() {
        let config = TelephonyConfig {
            auth_token: SecretString::new(String::new()),
            ..valid_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_undialable_caller_number() {
        let config = TelephonyConfig {
            caller_number: "123".to_string(),
            ..valid_config()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidCallerNumber)
        ));
    }

    #[test]
    fn test_validation_rejects_non_http_base_url() {
        let config = TelephonyConfig {
            base_url: "vigia.example.com".to_string(),
            ..valid_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let config = TelephonyConfig {
            base_url: "https://vigia.example.com/".to_string(),
            ..valid_config()
        };
        assert_eq!(config.base_url_trimmed(), "https://vigia.example.com");
    }
}
