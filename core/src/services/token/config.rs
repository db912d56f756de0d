//! Configuration for the token service

use chrono::Duration;
use gk_shared::config::JwtConfig;

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// Symmetric JWT signing secret, shared by issuance and validation
    pub jwt_secret: String,
    /// Issuer claim stamped into every token
    pub issuer: String,
    /// Access token lifetime in minutes
    pub access_token_expiry_minutes: i64,
    /// Refresh token lifetime in days
    pub refresh_token_expiry_days: i64,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "development-secret-change-in-production".to_string(),
            issuer: "gatekey".to_string(),
            access_token_expiry_minutes: 15,
            refresh_token_expiry_days: 7,
        }
    }
}

impl TokenServiceConfig {
    /// Access token lifetime as a chrono duration
    pub fn access_lifetime(&self) -> Duration {
        Duration::minutes(self.access_token_expiry_minutes)
    }

    /// Refresh token lifetime as a chrono duration
    pub fn refresh_lifetime(&self) -> Duration {
        Duration::days(self.refresh_token_expiry_days)
    }

    /// Access token lifetime in seconds, as reported in issued pairs
    pub fn access_expires_in(&self) -> i64 {
        self.access_token_expiry_minutes * 60
    }

    /// Refresh token lifetime in seconds, as reported in issued pairs
    pub fn refresh_expires_in(&self) -> i64 {
        self.refresh_token_expiry_days * 24 * 60 * 60
    }
}

impl From<&JwtConfig> for TokenServiceConfig {
    fn from(config: &JwtConfig) -> Self {
        Self {
            jwt_secret: config.secret.clone(),
            issuer: config.issuer.clone(),
            access_token_expiry_minutes: config.access_token_expiry_minutes,
            refresh_token_expiry_days: config.refresh_token_expiry_days,
        }
    }
}
