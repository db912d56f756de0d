//! Database module - MySQL implementations using SQLx
//!
//! Provides the database access layer:
//! - Connection pool management
//! - TokenStore and UserDirectory implementations

pub mod connection;
pub mod mysql;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use mysql::{MySqlTokenStore, MySqlUserDirectory};
