//! Recurring check-in schedule configuration
//!
//! Schedules are declarative: a YAML file maps contact names to the
//! wall-clock times their check-in call fires, loaded once at startup and
//! handed to the scheduler. Nothing is hardcoded in the process.
//!
//! ```yaml
//! gustavo:
//!   - "10:11"
//!   - "11:00"
//! verificacao1:
//!   - "10:30"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use super::error::{ConfigError, ValidationError};

/// Schedule section of the application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleConfig {
    /// Path to the YAML schedule file; no file means no recurring check-ins
    pub file: Option<String>,

    /// IANA timezone trigger times are interpreted in
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            file: None,
            timezone: default_timezone(),
        }
    }
}

impl ScheduleConfig {
    /// Load the trigger table from the configured file
    ///
    /// Returns an empty table when no file is configured.
    pub fn load_triggers(&self) -> Result<TriggerTable, ConfigError> {
        match &self.file {
            Some(path) => TriggerTable::from_file(path),
            None => Ok(TriggerTable::default()),
        }
    }

    /// Validate schedule configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.tz().map(|_| ())
    }

    /// Parsed trigger timezone
    pub fn tz(&self) -> Result<chrono_tz::Tz, ValidationError> {
        self.timezone
            .parse()
            .map_err(|_| ValidationError::UnknownTimezone(self.timezone.clone()))
    }
}

fn default_timezone() -> String {
    "America/Sao_Paulo".to_string()
}

/// A time of day a check-in fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerTime {
    pub hour: u8,
    pub minute: u8,
}

impl TriggerTime {
    pub fn new(hour: u8, minute: u8) -> Result<Self, ValidationError> {
        if hour > 23 || minute > 59 {
            return Err(ValidationError::InvalidScheduleTime {
                name: String::new(),
                hour,
                minute,
            });
        }
        Ok(Self { hour, minute })
    }

    /// Six-field cron expression firing daily at this time
    pub fn cron_expr(&self) -> String {
        format!("0 {} {} * * *", self.minute, self.hour)
    }
}

/// Contact name -> daily trigger times, parsed and validated
#[derive(Debug, Clone, Default)]
pub struct TriggerTable {
    entries: BTreeMap<String, Vec<TriggerTime>>,
}

impl TriggerTable {
    /// Parse a trigger table from YAML text
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let raw: BTreeMap<String, Vec<String>> = serde_yaml::from_str(yaml)?;
        let mut entries = BTreeMap::new();
        for (name, times) in raw {
            let name = name.to_lowercase();
            let mut parsed = Vec::with_capacity(times.len());
            for time in &times {
                parsed.push(parse_time(&name, time)?);
            }
            entries.insert(name, parsed);
        }
        Ok(Self { entries })
    }

    /// Parse a trigger table from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml(&yaml)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over (contact name, trigger time) pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, TriggerTime)> {
        self.entries
            .iter()
            .flat_map(|(name, times)| times.iter().map(move |t| (name.as_str(), *t)))
    }
}

fn parse_time(name: &str, time: &str) -> Result<TriggerTime, ConfigError> {
    let invalid = || {
        ConfigError::ValidationFailed(ValidationError::InvalidScheduleTime {
            name: name.to_string(),
            hour: 255,
            minute: 255,
        })
    };

    let (hour, minute) = time.split_once(':').ok_or_else(invalid)?;
    let hour: u8 = hour.trim().parse().map_err(|_| invalid())?;
    let minute: u8 = minute.trim().parse().map_err(|_| invalid())?;
    TriggerTime::new(hour, minute).map_err(|_| {
        ConfigError::ValidationFailed(ValidationError::InvalidScheduleTime {
            name: name.to_string(),
            hour,
            minute,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trigger_table() {
        let yaml = "gustavo:\n  - \"10:11\"\n  - \"11:00\"\nverificacao1:\n  - \"10:30\"\n";
        let table = TriggerTable::from_yaml(yaml).unwrap();
        let pairs: Vec<_> = table.iter().collect();
        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs[0].0, "gustavo");
        assert_eq!(pairs[0].1, TriggerTime { hour: 10, minute: 11 });
    }

    #[test]
    fn test_names_are_lowercased() {
        let yaml = "Gustavo:\n  - \"08:00\"\n";
        let table = TriggerTable::from_yaml(yaml).unwrap();
        let pairs: Vec<_> = table.iter().collect();
        assert_eq!(pairs[0].0, "gustavo");
    }

    #[test]
    fn test_rejects_out_of_range_time() {
        let yaml = "gustavo:\n  - \"25:00\"\n";
        assert!(TriggerTable::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_rejects_malformed_time() {
        let yaml = "gustavo:\n  - \"morning\"\n";
        assert!(TriggerTable::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_cron_expr() {
        let time = TriggerTime::new(10, 11).unwrap();
        assert_eq!(time.cron_expr(), "0 11 10 * * *");
    }

    #[test]
    fn test_empty_config_loads_empty_table() {
        let config = ScheduleConfig::default();
        assert!(config.load_triggers().unwrap().is_empty());
    }

    #[test]
    fn test_default_timezone_is_sao_paulo() {
        let config = ScheduleConfig::default();
        assert_eq!(config.tz().unwrap(), chrono_tz::America::Sao_Paulo);
    }

    #[test]
    fn test_unknown_timezone_is_rejected() {
        let config = ScheduleConfig {
            timezone: "Mars/Olympus_Mons".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::UnknownTimezone(_))
        ));
    }
}
