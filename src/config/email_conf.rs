use serde::{Deserialize, Serialize};
use std::env;
use tracing::{debug, error, info, warn};
use validator::ValidateEmail;

use crate::config::ConfigError;

/// Email configuration for SMTP settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    /// SMTP server hostname
    pub smtp_host: String,
    /// SMTP server port
    pub smtp_port: u16,
    /// SMTP username, empty means no authentication
    pub smtp_username: String,
    /// SMTP password, empty means no authentication
    pub smtp_password: String,
    /// Whether to use TLS encryption
    pub use_tls: bool,
    /// Whether to use STARTTLS
    pub use_starttls: bool,
    /// From email address
    pub from_email: String,
    /// From name (display name)
    pub from_name: String,
    /// Recipient of the internal quotation notifications
    pub owner_email: String,
    /// Connection timeout in seconds
    pub connection_timeout_secs: u64,
}

impl EmailConfig {
    /// Create EmailConfig from environment variables.
    ///
    /// Every variable is optional and falls back to [`EmailConfig::default`]. A variable
    /// that is present but cannot be parsed is an error.
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading email configuration from environment variables");
        let defaults = EmailConfig::default();

        let smtp_host = env::var("SMTP_HOST").unwrap_or_else(|_| {
            warn!("SMTP_HOST not set, defaulting to {}", defaults.smtp_host);
            defaults.smtp_host.clone()
        });
        debug!("SMTP host: {}", smtp_host);

        let smtp_port = env::var("SMTP_PORT")
            .unwrap_or_else(|_| {
                warn!("SMTP_PORT not set, defaulting to 587");
                "587".to_string()
            })
            .parse::<u16>()
            .map_err(|_| {
                error!("Invalid SMTP_PORT value");
                ConfigError::InvalidValue("Invalid SMTP_PORT value".to_string())
            })?;
        debug!("SMTP port: {}", smtp_port);

        let smtp_username = env::var("SMTP_USERNAME").unwrap_or_else(|_| {
            warn!("SMTP_USERNAME not set, SMTP authentication disabled");
            String::new()
        });
        debug!("SMTP username: {}", smtp_username);

        let smtp_password = env::var("SMTP_PASSWORD").unwrap_or_default();
        debug!("SMTP password: [REDACTED]");

        let use_tls = parse_bool_var("SMTP_USE_TLS", true)?;
        debug!("SMTP use TLS: {}", use_tls);

        let use_starttls = parse_bool_var("SMTP_USE_STARTTLS", true)?;
        debug!("SMTP use STARTTLS: {}", use_starttls);

        let from_email = env::var("SMTP_FROM_EMAIL").unwrap_or_else(|_| {
            warn!("SMTP_FROM_EMAIL not set, defaulting to {}", defaults.from_email);
            defaults.from_email.clone()
        });
        debug!("From email: {}", from_email);

        let from_name = env::var("SMTP_FROM_NAME").unwrap_or_else(|_| {
            warn!("SMTP_FROM_NAME not set, using default");
            defaults.from_name.clone()
        });
        debug!("From name: {}", from_name);

        let owner_email = env::var("QUOTATION_OWNER_EMAIL").unwrap_or_else(|_| {
            warn!("QUOTATION_OWNER_EMAIL not set, notifications go to the from address");
            from_email.clone()
        });
        debug!("Owner email: {}", owner_email);

        let connection_timeout_secs = env::var("SMTP_CONNECTION_TIMEOUT")
            .unwrap_or_else(|_| {
                warn!("SMTP_CONNECTION_TIMEOUT not set, defaulting to 30 seconds");
                "30".to_string()
            })
            .parse::<u64>()
            .map_err(|_| {
                error!("Invalid SMTP_CONNECTION_TIMEOUT value");
                ConfigError::InvalidValue("Invalid SMTP_CONNECTION_TIMEOUT value".to_string())
            })?;
        debug!("Connection timeout: {} seconds", connection_timeout_secs);

        let config = EmailConfig {
            smtp_host,
            smtp_port,
            smtp_username,
            smtp_password,
            use_tls,
            use_starttls,
            from_email,
            from_name,
            owner_email,
            connection_timeout_secs,
        };

        config.validate()?;
        info!("Email configuration loaded successfully");
        Ok(config)
    }

    /// Create EmailConfig for testing
    pub fn from_test_env() -> Self {
        EmailConfig {
            smtp_host: "localhost".to_string(),
            smtp_port: 1025,
            smtp_username: "test".to_string(),
            smtp_password: "test".to_string(),
            use_tls: false,
            use_starttls: false,
            from_email: "test@example.com".to_string(),
            from_name: "Test Portfolio".to_string(),
            owner_email: "owner@example.com".to_string(),
            connection_timeout_secs: 10,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        info!("Validating email configuration");

        if self.smtp_host.is_empty() {
            error!("SMTP host is empty");
            return Err(ConfigError::ValidationError("SMTP host cannot be empty".to_string()));
        }

        if self.smtp_port == 0 {
            error!("SMTP port is 0");
            return Err(ConfigError::ValidationError("SMTP port cannot be 0".to_string()));
        }

        // Credentials come as a pair
        if self.smtp_username.is_empty() != self.smtp_password.is_empty() {
            error!("SMTP credentials are incomplete");
            return Err(ConfigError::ValidationError(
                "SMTP username and password must be set together".to_string(),
            ));
        }

        if !self.from_email.validate_email() {
            error!("Invalid from email format");
            return Err(ConfigError::ValidationError("Invalid from email format".to_string()));
        }

        if !self.owner_email.validate_email() {
            error!("Invalid owner email format");
            return Err(ConfigError::ValidationError("Invalid owner email format".to_string()));
        }

        if self.connection_timeout_secs == 0 {
            error!("Connection timeout is 0");
            return Err(ConfigError::ValidationError("Connection timeout cannot be 0".to_string()));
        }

        info!("Email configuration validation successful");
        Ok(())
    }

    /// Get SMTP server URL
    pub fn get_smtp_url(&self) -> String {
        format!("{}:{}", self.smtp_host, self.smtp_port)
    }

    pub fn has_credentials(&self) -> bool {
        !self.smtp_username.is_empty() && !self.smtp_password.is_empty()
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        EmailConfig {
            smtp_host: "smtp.gmail.com".to_string(),
            smtp_port: 587,
            smtp_username: "".to_string(),
            smtp_password: "".to_string(),
            use_tls: true,
            use_starttls: true,
            from_email: "noreply@example.com".to_string(),
            from_name: "Portfolio".to_string(),
            owner_email: "noreply@example.com".to_string(),
            connection_timeout_secs: 30,
        }
    }
}

fn parse_bool_var(key: &str, default: bool) -> Result<bool, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw.trim().parse::<bool>().map_err(|_| {
            error!("Invalid {} value: {}", key, raw);
            ConfigError::InvalidValue(format!("Invalid {} value: {}", key, raw))
        }),
        Err(_) => {
            warn!("{} not set, defaulting to {}", key, default);
            Ok(default)
        }
    }
}
