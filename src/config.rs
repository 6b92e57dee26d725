use anyhow::{Result, anyhow};
use serde::Deserialize;
use std::env;
use tracing::{info, warn};

// Import logging macros
use crate::{log_system_event, log_validation};

/// Complete application configuration loaded from environment variables
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub identity_database: DatabaseConfig,
    pub assessment_database: DatabaseConfig,
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub assessment: AssessmentConfig,
    pub logging: LoggingConfig,
}

/// Database connection configuration. Identity and assessment data live in
/// two separate stores, each with its own URL.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

/// Token verification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub jwt_secret: String,
}

/// Assessment pipeline configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AssessmentConfig {
    /// Definition id substituted when a response recorded none.
    pub default_assessment_id: String,
}

/// Logging system configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_enabled: bool,
    pub console_enabled: bool,
    pub log_directory: String,
}

impl Config {
    /// Load configuration from environment variables with sensible defaults
    pub fn from_env() -> Result<Self> {
        log_system_event!(config, "Loading application configuration from environment variables");

        let config = Config {
            identity_database: DatabaseConfig::identity_from_env()?,
            assessment_database: DatabaseConfig::assessment_from_env()?,
            server: ServerConfig::from_env()?,
            auth: AuthConfig::from_env()?,
            assessment: AssessmentConfig::from_env()?,
            logging: LoggingConfig::from_env()?,
        };

        log_system_event!(config, "Configuration loaded successfully");
        config.log_configuration_summary();

        Ok(config)
    }

    /// Log a summary of loaded configuration (without sensitive data)
    fn log_configuration_summary(&self) {
        info!(
            identity_database_url_masked = %mask_sensitive_data(&self.identity_database.url),
            assessment_database_url_masked = %mask_sensitive_data(&self.assessment_database.url),
            server_address = %format!("{}:{}", self.server.host, self.server.port),
            default_assessment_id = %self.assessment.default_assessment_id,
            log_level = %self.logging.level,
            "Configuration summary"
        );
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        for url in [&self.identity_database.url, &self.assessment_database.url] {
            if !url.contains("sqlite:") && !url.contains("postgres://") {
                return Err(anyhow!(
                    "Database URLs must start with 'sqlite:' or 'postgres://'"
                ));
            }
        }

        if self.server.port == 0 {
            return Err(anyhow!("Server port must be greater than 0"));
        }

        if self.auth.jwt_secret.is_empty() || self.auth.jwt_secret == "change-me" {
            warn!("JWT secret appears to be placeholder or empty - tokens from other services will not verify");
        }

        if self.assessment.default_assessment_id.is_empty() {
            return Err(anyhow!("DEFAULT_ASSESSMENT_ID must not be empty"));
        }

        if !["trace", "debug", "info", "warn", "error"]
            .contains(&self.logging.level.to_lowercase().as_str())
            && !self.logging.level.contains(',')
        {
            warn!("Invalid log level '{}', using 'info' as fallback", self.logging.level);
        }

        log_validation!(success, "configuration", "Configuration validation completed successfully");
        Ok(())
    }
}

impl DatabaseConfig {
    pub fn identity_from_env() -> Result<Self> {
        let url = env::var("IDENTITY_DATABASE_URL")
            .unwrap_or_else(|_| "sqlite:literexia_users.db".to_string());

        Ok(DatabaseConfig { url })
    }

    pub fn assessment_from_env() -> Result<Self> {
        let url = env::var("ASSESSMENT_DATABASE_URL")
            .unwrap_or_else(|_| "sqlite:literexia_assessments.db".to_string());

        Ok(DatabaseConfig { url })
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        let port_str = env::var("PORT").unwrap_or_else(|_| "3000".to_string());

        let port = port_str.parse::<u16>().map_err(|_| {
            anyhow!("Invalid PORT value: '{}'. Must be a number between 1-65535", port_str)
        })?;

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        Ok(ServerConfig { port, host })
    }
}

impl AuthConfig {
    pub fn from_env() -> Result<Self> {
        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| "change-me".to_string());

        Ok(AuthConfig { jwt_secret })
    }
}

impl AssessmentConfig {
    pub fn from_env() -> Result<Self> {
        let default_assessment_id =
            env::var("DEFAULT_ASSESSMENT_ID").unwrap_or_else(|_| "FL-G1-001".to_string());

        Ok(AssessmentConfig {
            default_assessment_id,
        })
    }
}

impl LoggingConfig {
    pub fn from_env() -> Result<Self> {
        let level = env::var("RUST_LOG").unwrap_or_else(|_| "info,literexia=debug".to_string());

        let file_enabled = env::var("LOG_FILE_ENABLED")
            .unwrap_or_else(|_| "true".to_string())
            .parse::<bool>()
            .unwrap_or(true);

        let console_enabled = env::var("LOG_CONSOLE_ENABLED")
            .unwrap_or_else(|_| "true".to_string())
            .parse::<bool>()
            .unwrap_or(true);

        let log_directory = env::var("LOG_DIRECTORY").unwrap_or_else(|_| "logs".to_string());

        Ok(LoggingConfig {
            level,
            file_enabled,
            console_enabled,
            log_directory,
        })
    }
}

/// Mask sensitive data in configuration for safe logging
fn mask_sensitive_data(data: &str) -> String {
    if data.len() <= 8 {
        "*".repeat(data.len())
    } else {
        format!("{}***{}", &data[..4], &data[data.len() - 4..])
    }
}
