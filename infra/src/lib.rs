//! # Infrastructure Layer
//!
//! Concrete implementations of the core layer's persistence traits,
//! backed by MySQL through SQLx:
//!
//! - **Database**: connection pool management and migrations
//! - **MySqlTokenStore**: token metadata persistence
//! - **MySqlUserDirectory**: read-only user lookups

pub mod database;

pub use database::{DatabasePool, MySqlTokenStore, MySqlUserDirectory, PoolStatistics};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection or query error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
