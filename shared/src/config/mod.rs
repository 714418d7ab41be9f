//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical business areas:
//! - `auth` - Signed token and password policy configuration
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection and logging configuration
//! - `otp` - One-time code validity and phone canonicalization
//! - `server` - HTTP server and CORS configuration
//! - `sms` - SMS provider selection and credentials
//!
//! Values are layered: built-in defaults, then `config/default.toml`, then
//! `config/<environment>.toml`, then `APP__SECTION__KEY` environment variables.

pub mod auth;
pub mod database;
pub mod environment;
pub mod otp;
pub mod server;
pub mod sms;

use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};

pub use auth::{AuthConfig, JwtConfig, PasswordPolicy};
pub use database::DatabaseConfig;
pub use environment::{Environment, LoggingConfig};
pub use otp::OtpConfig;
pub use server::ServerConfig;
pub use sms::SmsConfig;

/// Directory searched for TOML configuration files
const CONFIG_DIR: &str = "config";

/// Prefix of environment variables overriding file values
const ENV_PREFIX: &str = "APP";

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Signed token and password configuration
    pub auth: AuthConfig,

    /// One-time code configuration
    pub otp: OtpConfig,

    /// SMS provider configuration
    pub sms: SmsConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    ///
    /// Missing files are skipped; environment variables always win.
    pub fn load() -> Result<Self, ConfigError> {
        let environment = Environment::from_env();
        Self::load_for(environment)
    }

    /// Load configuration for an explicit environment
    pub fn load_for(environment: Environment) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name(&format!("{}/default", CONFIG_DIR)).required(false))
            .add_source(
                File::with_name(&format!("{}/{}", CONFIG_DIR, environment.config_name()))
                    .required(false),
            )
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        let mut app_config: AppConfig = config.try_deserialize()?;
        app_config.environment = environment;
        app_config.logging = LoggingConfig::for_environment(environment).merge(app_config.logging);
        app_config.validate()?;
        Ok(app_config)
    }

    /// Reject configurations that must never reach production
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.environment.is_production() && self.auth.jwt.is_using_default_secret() {
            return Err(ConfigError::Message(
                "auth.jwt.secret must be set in production".to_string(),
            ));
        }
        if self.otp.validity_minutes <= 0 {
            return Err(ConfigError::Message(
                "otp.validity_minutes must be positive".to_string(),
            ));
        }
        if self.auth.password.min_length > self.auth.password.max_length {
            return Err(ConfigError::Message(
                "auth.password.min_length exceeds max_length".to_string(),
            ));
        }
        Ok(())
    }
}
