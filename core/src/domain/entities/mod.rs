//! Domain entities for the Gatekey token service.

pub mod token;
pub mod user;

pub use token::{Claims, TokenKind, TokenMetadata, TokenPair};
pub use user::User;
