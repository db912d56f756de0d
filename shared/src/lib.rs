//! Shared configuration types for the Gatekey token service
//!
//! This crate provides the configuration surface consumed by the core and
//! infrastructure layers:
//! - JWT signing configuration (secret, issuer, token lifetimes)
//! - Database connection configuration
//! - Environment detection and `.env` file loading

pub mod config;

// Re-export commonly used items at crate root
pub use config::{AppConfig, DatabaseConfig, Environment, JwtConfig};
