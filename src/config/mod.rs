//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Values are read with the `VIGIA` prefix
//! and nested sections use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use vigia::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod checkin;
mod error;
mod schedule;
mod server;
mod telephony;

pub use checkin::CheckInConfig;
pub use error::{ConfigError, ValidationError};
pub use schedule::{ScheduleConfig, TriggerTable, TriggerTime};
pub use server::{Environment, ServerConfig};
pub use telephony::TelephonyConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Telephony provider configuration (credentials, caller number, webhooks)
    pub telephony: TelephonyConfig,

    /// Check-in verification configuration (passphrase, retry budgets)
    #[serde(default)]
    pub checkin: CheckInConfig,

    /// Recurring check-in schedule configuration
    #[serde(default)]
    pub schedule: ScheduleConfig,

    /// Contact directory file path
    #[serde(default = "default_contacts_file")]
    pub contacts_file: String,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads `.env` if present, then reads environment variables with the
    /// `VIGIA` prefix, e.g. `VIGIA__SERVER__PORT=5000` -> `server.port`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::Environment::default().prefix("VIGIA").separator("__"))
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.telephony.validate()?;
        self.checkin.validate()?;
        self.schedule.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

fn default_contacts_file() -> String {
    "contacts.json".to_string()
}
