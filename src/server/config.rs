use std::net::SocketAddr;

use crate::server::error::config::ConfigError;

/// Runtime configuration read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
    pub bind_address: String,
    /// Length of timed calendar events
    pub calendar_event_minutes: i64,
}

impl Config {
    pub const DEFAULT_BIND_ADDRESS: &'static str = "0.0.0.0:8080";
    pub const DEFAULT_CALENDAR_EVENT_MINUTES: i64 = 120;

    /// Reads `DATABASE_URL`, `BIND_ADDRESS` and `CALENDAR_EVENT_MINUTES`.
    ///
    /// # Returns
    /// - `Ok(Config)` - All required variables present and valid
    /// - `Err(ConfigError::MissingEnvVar)` - `DATABASE_URL` is not set
    /// - `Err(ConfigError::InvalidEnvValue)` - `BIND_ADDRESS` is not a socket address or
    ///   `CALENDAR_EVENT_MINUTES` is not a positive integer
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("DATABASE_URL"))?;

        let bind_address =
            lookup("BIND_ADDRESS").unwrap_or_else(|| Self::DEFAULT_BIND_ADDRESS.to_string());
        if let Err(e) = bind_address.parse::<SocketAddr>() {
            return Err(ConfigError::InvalidEnvValue {
                var: "BIND_ADDRESS",
                reason: e.to_string(),
            });
        }

        let calendar_event_minutes = match lookup("CALENDAR_EVENT_MINUTES") {
            None => Self::DEFAULT_CALENDAR_EVENT_MINUTES,
            Some(raw) => match raw.trim().parse::<i64>() {
                Ok(minutes) if minutes > 0 => minutes,
                Ok(minutes) => {
                    return Err(ConfigError::InvalidEnvValue {
                        var: "CALENDAR_EVENT_MINUTES",
                        reason: format!("expected a positive number of minutes, got {minutes}"),
                    })
                }
                Err(e) => {
                    return Err(ConfigError::InvalidEnvValue {
                        var: "CALENDAR_EVENT_MINUTES",
                        reason: e.to_string(),
                    })
                }
            },
        };

        Ok(Self {
            database_url,
            bind_address,
            calendar_event_minutes,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            bind_address: Self::DEFAULT_BIND_ADDRESS.to_string(),
            calendar_event_minutes: Self::DEFAULT_CALENDAR_EVENT_MINUTES,
        }
    }
}
