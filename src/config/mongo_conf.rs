use serde::{Deserialize, Serialize};
use std::env;
use tracing::{debug, error, info, warn};

use crate::config::ConfigError;

/// MongoDB configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoConfig {
    /// MongoDB connection URI
    pub uri: String,
    /// Database name
    pub database: String,
    /// Username for authentication (optional)
    pub username: Option<String>,
    /// Password for authentication (optional)
    pub password: Option<String>,
    /// Collection holding quotation requests
    pub quotation_collection: String,
    /// Connection pool size
    pub pool_size: u32,
    /// Connection timeout in seconds
    pub connection_timeout_secs: u64,
}

impl MongoConfig {
    /// Load MongoDB configuration from environment variables
    ///
    /// Expected environment variables (all optional):
    /// - MONGO_URI: MongoDB connection URI (defaults to mongodb://localhost:27017)
    /// - MONGO_DATABASE: Database name (defaults to portfolio)
    /// - MONGO_USERNAME / MONGO_PASSWORD: credentials
    /// - MONGO_QUOTATION_COLLECTION: Collection name (defaults to quotations)
    /// - MONGO_POOL_SIZE: Connection pool size (defaults to 10)
    /// - MONGO_CONNECTION_TIMEOUT: Connection timeout in seconds (defaults to 5)
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading MongoDB configuration from environment variables");
        let defaults = MongoConfig::default();

        let uri = env::var("MONGO_URI").unwrap_or_else(|_| {
            warn!("MONGO_URI not set, using default: {}", defaults.uri);
            defaults.uri.clone()
        });
        debug!("MongoDB URI configured");

        let database = env::var("MONGO_DATABASE").unwrap_or_else(|_| {
            warn!("MONGO_DATABASE not set, using default: {}", defaults.database);
            defaults.database.clone()
        });
        debug!("MongoDB database: {}", database);

        let username = env::var("MONGO_USERNAME").ok();
        if let Some(ref user) = username {
            debug!("MongoDB username: {}", user);
        } else {
            debug!("No MongoDB username specified");
        }

        let password = env::var("MONGO_PASSWORD").ok();
        if password.is_some() {
            debug!("MongoDB password provided");
        } else {
            debug!("No MongoDB password specified");
        }

        let quotation_collection = env::var("MONGO_QUOTATION_COLLECTION").unwrap_or_else(|_| {
            debug!("MONGO_QUOTATION_COLLECTION not set, using default: {}", defaults.quotation_collection);
            defaults.quotation_collection.clone()
        });
        debug!("MongoDB quotation collection: {}", quotation_collection);

        let pool_size = env::var("MONGO_POOL_SIZE")
            .unwrap_or_else(|_| {
                warn!("MONGO_POOL_SIZE not set, using default: 10");
                "10".to_string()
            })
            .parse::<u32>()
            .map_err(|_| {
                error!("Invalid MONGO_POOL_SIZE value");
                ConfigError::InvalidValue("Invalid MONGO_POOL_SIZE value".to_string())
            })?;
        debug!("MongoDB pool size: {}", pool_size);

        let connection_timeout_secs = env::var("MONGO_CONNECTION_TIMEOUT")
            .unwrap_or_else(|_| {
                warn!("MONGO_CONNECTION_TIMEOUT not set, using default: 5 seconds");
                "5".to_string()
            })
            .parse::<u64>()
            .map_err(|_| {
                error!("Invalid MONGO_CONNECTION_TIMEOUT value");
                ConfigError::InvalidValue("Invalid MONGO_CONNECTION_TIMEOUT value".to_string())
            })?;
        debug!("MongoDB connection timeout: {} seconds", connection_timeout_secs);

        let config = MongoConfig {
            uri,
            database,
            username,
            password,
            quotation_collection,
            pool_size,
            connection_timeout_secs,
        };

        config.validate()?;
        info!("MongoDB configuration loaded successfully");
        Ok(config)
    }

    /// Create MongoConfig for testing
    pub fn from_test_env() -> Self {
        MongoConfig {
            uri: "mongodb://localhost:27017".to_string(),
            database: "test_db".to_string(),
            username: Some("testuser".to_string()),
            password: Some("testpass".to_string()),
            quotation_collection: "test_quotations".to_string(),
            pool_size: 2,
            connection_timeout_secs: 2,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        info!("Validating MongoDB configuration");

        if self.uri.is_empty() {
            error!("MongoDB URI is empty");
            return Err(ConfigError::ValidationError("MongoDB URI cannot be empty".to_string()));
        }

        if !self.uri.starts_with("mongodb://") && !self.uri.starts_with("mongodb+srv://") {
            error!("MongoDB URI has an unsupported scheme");
            return Err(ConfigError::ValidationError(
                "MongoDB URI must start with mongodb:// or mongodb+srv://".to_string(),
            ));
        }

        if self.database.is_empty() {
            error!("MongoDB database is empty");
            return Err(ConfigError::ValidationError("MongoDB database cannot be empty".to_string()));
        }

        if self.quotation_collection.is_empty() {
            error!("MongoDB quotation collection is empty");
            return Err(ConfigError::ValidationError("MongoDB quotation collection cannot be empty".to_string()));
        }

        if self.pool_size == 0 {
            error!("MongoDB pool size is 0");
            return Err(ConfigError::ValidationError("MongoDB pool size must be greater than 0".to_string()));
        }

        if self.connection_timeout_secs == 0 {
            error!("MongoDB connection timeout is 0");
            return Err(ConfigError::ValidationError("MongoDB connection timeout must be greater than 0".to_string()));
        }

        if let Some(ref user) = self.username {
            if user.is_empty() {
                error!("MongoDB username is empty");
                return Err(ConfigError::ValidationError("MongoDB username cannot be empty if set".to_string()));
            }
        }
        if let Some(ref pass) = self.password {
            if pass.is_empty() {
                error!("MongoDB password is empty");
                return Err(ConfigError::ValidationError("MongoDB password cannot be empty if set".to_string()));
            }
        }
        info!("MongoDB configuration validation successful");
        Ok(())
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        MongoConfig {
            uri: "mongodb://localhost:27017".to_string(),
            database: "portfolio".to_string(),
            username: None,
            password: None,
            quotation_collection: "quotations".to_string(),
            pool_size: 10,
            connection_timeout_secs: 5,
        }
    }
}
