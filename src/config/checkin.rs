//! Check-in verification configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Check-in verification configuration
///
/// Controls the passphrase check, the retry budgets of the two state
/// machines, and the acknowledgement vocabulary accepted during escalation.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckInConfig {
    /// Expected spoken passphrase (case-insensitive substring match)
    #[serde(default = "default_passphrase")]
    pub passphrase: String,

    /// Verification attempts before escalation
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Confirmation attempts before giving up unconfirmed
    #[serde(default = "default_confirmation_max_attempts")]
    pub confirmation_max_attempts: u32,

    /// Acknowledgement words accepted from the emergency contact
    #[serde(default = "default_acknowledgements")]
    pub acknowledgements: Vec<String>,

    /// Default region for parsing national-format phone numbers (ISO 3166-1)
    #[serde(default = "default_region")]
    pub default_region: Option<String>,
}

impl CheckInConfig {
    /// Validate check-in configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.passphrase.trim().is_empty() {
            return Err(ValidationError::EmptyPassphrase);
        }
        if self.max_attempts == 0 || self.confirmation_max_attempts == 0 {
            return Err(ValidationError::InvalidMaxAttempts);
        }
        if self.acknowledgements.iter().all(|w| w.trim().is_empty()) {
            return Err(ValidationError::EmptyAcknowledgements);
        }
        if let Some(region) = &self.default_region {
            if region.parse::<phonenumber::country::Id>().is_err() {
                return Err(ValidationError::UnknownRegion(region.clone()));
            }
        }
        Ok(())
    }

    /// Parsed default region, if configured
    pub fn region(&self) -> Option<phonenumber::country::Id> {
        self.default_region
            .as_deref()
            .and_then(|r| r.parse().ok())
    }
}

impl Default for CheckInConfig {
    fn default() -> Self {
        Self {
            passphrase: default_passphrase(),
            max_attempts: default_max_attempts(),
            confirmation_max_attempts: default_confirmation_max_attempts(),
            acknowledgements: default_acknowledgements(),
            default_region: default_region(),
        }
    }
}

fn default_passphrase() -> String {
    "protegido".to_string()
}

fn default_max_attempts() -> u32 {
    2
}

fn default_confirmation_max_attempts() -> u32 {
    3
}

fn default_acknowledgements() -> Vec<String> {
    ["ok", "confirmo", "entendido", "entendi", "obrigado", "valeu"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_region() -> Option<String> {
    Some("BR".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CheckInConfig::default();
        assert_eq!(config.passphrase, "protegido");
        assert_eq!(config.max_attempts, 2);
        assert_eq!(config.confirmation_max_attempts, 3);
        assert_eq!(config.acknowledgements.len(), 6);
        assert_eq!(config.region(), Some(phonenumber::country::BR));
    }

    #[test]
    fn test_validation_empty_passphrase() {
        let config = CheckInConfig {
            passphrase: "  ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_attempts() {
        let config = CheckInConfig {
            max_attempts: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_unknown_region() {
        let config = CheckInConfig {
            default_region: Some("XX".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_no_region_is_valid() {
        let config = CheckInConfig {
            default_region: None,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.region(), None);
    }
}
