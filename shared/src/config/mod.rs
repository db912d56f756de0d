//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - JWT signing and token lifetime configuration
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection and `.env` loading

pub mod auth;
pub mod database;
pub mod environment;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use auth::JwtConfig;
pub use database::DatabaseConfig;
pub use environment::Environment;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Database configuration
    pub database: DatabaseConfig,

    /// JWT signing configuration
    pub jwt: JwtConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads the environment-specific `.env` file first (a missing file is
    /// not an error - system environment variables are used as-is), then
    /// reads each sub-configuration from the environment.
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        let _ = dotenvy::from_filename(environment.env_file());

        Self {
            environment,
            database: DatabaseConfig::from_env(),
            jwt: JwtConfig::from_env(),
        }
    }
}
