//! Token entities: signed claims, persisted metadata, and issued pairs.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::User;

/// Kind of an issued token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Short-lived credential authorizing API calls
    Access,
    /// Long-lived credential used only to mint new access tokens
    Refresh,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Access => write!(f, "access"),
            TokenKind::Refresh => write!(f, "refresh"),
        }
    }
}

/// Claims structure for the JWT payload
///
/// Claims are immutable once signed; the `jti` is the revocation key linking
/// a signed token to its metadata record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Not before timestamp
    pub nbf: i64,

    /// Issuer
    pub iss: String,

    /// JWT ID (unique identifier for the token)
    pub jti: String,

    /// User email
    pub email: String,

    /// User role (access tokens only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Token kind ("access" or "refresh")
    pub token_type: TokenKind,

    /// Device identifier, when the client reports one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,

    /// Client application identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
}

impl Claims {
    /// Creates claims for an access token
    ///
    /// The role is embedded so API-layer authorization can work from the
    /// token alone.
    pub fn access(user: &User, issuer: &str, lifetime: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: user.id.to_string(),
            iat: now.timestamp(),
            exp: (now + lifetime).timestamp(),
            nbf: now.timestamp(),
            iss: issuer.to_string(),
            jti: Uuid::new_v4().to_string(),
            email: user.email.clone(),
            role: Some(user.role.clone()),
            token_type: TokenKind::Access,
            device_id: None,
            client_id: None,
        }
    }

    /// Creates claims for a refresh token
    ///
    /// The role is omitted: refresh tokens only prove session continuity,
    /// and the current role is re-fetched when a new access token is minted.
    pub fn refresh(user: &User, issuer: &str, lifetime: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: user.id.to_string(),
            iat: now.timestamp(),
            exp: (now + lifetime).timestamp(),
            nbf: now.timestamp(),
            iss: issuer.to_string(),
            jti: Uuid::new_v4().to_string(),
            email: user.email.clone(),
            role: None,
            token_type: TokenKind::Refresh,
            device_id: None,
            client_id: None,
        }
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Checks if the claims are within their validity window
    pub fn is_valid(&self) -> bool {
        let now = Utc::now().timestamp();
        now >= self.nbf && now < self.exp
    }

    /// Gets the subject user ID from the claims
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }

    /// Gets the token ID (jti) from the claims
    pub fn token_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.jti)
    }

    /// Expiry as a UTC timestamp
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

/// Token metadata record persisted alongside every issued token
///
/// One record per token - access and refresh tokens of a pair never share a
/// record. The revocation flag is monotonic: once set it never reverts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    /// Primary key, equal to the claim `jti`
    pub id: Uuid,

    /// Owning user
    pub user_id: Uuid,

    /// Kind of the token this record tracks
    pub kind: TokenKind,

    /// Device identifier, when the client reported one
    pub device_id: Option<String>,

    /// Client application identifier
    pub client_id: Option<String>,

    /// Whether the token has been revoked
    pub is_revoked: bool,

    /// Timestamp when the token was issued
    pub created_at: DateTime<Utc>,

    /// Timestamp when the token expires
    pub expires_at: DateTime<Utc>,

    /// Timestamp of the last successful validation, None until first use
    pub last_used_at: Option<DateTime<Utc>>,
}

impl TokenMetadata {
    /// Builds the metadata record for freshly issued claims
    ///
    /// Only called on claims this service just built, so the UUID fields are
    /// known to parse.
    pub fn for_claims(claims: &Claims) -> Result<Self, uuid::Error> {
        Ok(Self {
            id: claims.token_id()?,
            user_id: claims.user_id()?,
            kind: claims.token_type,
            device_id: claims.device_id.clone(),
            client_id: claims.client_id.clone(),
            is_revoked: false,
            created_at: Utc::now(),
            expires_at: claims
                .expires_at()
                .unwrap_or_else(Utc::now),
            last_used_at: None,
        })
    }

    /// Checks if the record is past its expiry
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Checks if the record is active (not revoked, not expired)
    pub fn is_active(&self) -> bool {
        !self.is_revoked && !self.is_expired()
    }

    /// Marks the record as revoked
    pub fn revoke(&mut self) {
        self.is_revoked = true;
    }
}

/// Access/refresh token pair returned to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Signed JWT access token
    pub access_token: String,

    /// Signed JWT refresh token
    pub refresh_token: String,

    /// Access token lifetime in seconds
    pub access_expires_in: i64,

    /// Refresh token lifetime in seconds
    pub refresh_expires_in: i64,
}

impl TokenPair {
    /// Creates a new token pair with the lifetimes it was issued under
    pub fn new(
        access_token: String,
        refresh_token: String,
        access_expires_in: i64,
        refresh_expires_in: i64,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            access_expires_in,
            refresh_expires_in,
        }
    }
}
