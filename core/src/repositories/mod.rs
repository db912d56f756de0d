//! Collaborator contracts consumed by the token service.
//!
//! The token metadata store and the user directory are external
//! collaborators; this module defines their traits and (for tests)
//! in-memory mock implementations.

pub mod token;
pub mod user;

pub use token::TokenStore;
pub use user::UserDirectory;

#[cfg(test)]
pub use token::MockTokenStore;
#[cfg(test)]
pub use user::MockUserDirectory;
