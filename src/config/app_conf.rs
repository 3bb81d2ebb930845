use std::env;
use tracing::{debug, error, warn};

use crate::config::ConfigError;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("APP_HOST").unwrap_or_else(|_| {
            warn!("APP_HOST not set, defaulting to 127.0.0.1");
            "127.0.0.1".to_string()
        });

        let port = match env::var("APP_PORT") {
            Ok(raw) => raw.parse::<u16>().map_err(|_| {
                error!("Invalid APP_PORT value: {}", raw);
                ConfigError::InvalidValue(format!("Invalid APP_PORT value: {}", raw))
            })?,
            Err(_) => {
                warn!("APP_PORT not set, defaulting to 8080");
                8080
            }
        };
        debug!("Listen address: {}:{}", host, port);

        Ok(AppConfig { host, port })
    }

    /// Socket address string for the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}
