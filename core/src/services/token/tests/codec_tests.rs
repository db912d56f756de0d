//! Unit tests for the claim codec

use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};

use crate::domain::entities::token::{Claims, TokenKind};
use crate::domain::entities::user::User;
use crate::errors::TokenError;
use crate::services::token::ClaimCodec;

const SECRET: &str = "test-secret";
const ISSUER: &str = "gatekey";

fn codec() -> ClaimCodec {
    ClaimCodec::new(SECRET, ISSUER)
}

fn access_claims() -> Claims {
    Claims::access(&User::new("a@b.com", "user"), ISSUER, Duration::minutes(15))
}

#[test]
fn test_encode_decode_round_trip() {
    let codec = codec();
    let claims = access_claims();

    let token = codec.encode(&claims).unwrap();
    let decoded = codec.decode(&token).unwrap();

    assert_eq!(decoded, claims);
}

#[test]
fn test_round_trip_preserves_optional_fields() {
    let codec = codec();
    let mut claims = access_claims();
    claims.device_id = Some("device-7".to_string());
    claims.client_id = Some("mobile".to_string());

    let decoded = codec.decode(&codec.encode(&claims).unwrap()).unwrap();

    assert_eq!(decoded, claims);
}

#[test]
fn test_round_trip_refresh_without_role() {
    let codec = codec();
    let claims = Claims::refresh(&User::new("a@b.com", "user"), ISSUER, Duration::days(7));

    let decoded = codec.decode(&codec.encode(&claims).unwrap()).unwrap();

    assert_eq!(decoded.role, None);
    assert_eq!(decoded.token_type, TokenKind::Refresh);
    assert_eq!(decoded, claims);
}

#[test]
fn test_decode_rejects_garbage() {
    let codec = codec();

    assert_eq!(codec.decode("not a token").unwrap_err(), TokenError::InvalidToken);
    assert_eq!(codec.decode("a.b.c").unwrap_err(), TokenError::InvalidToken);
    assert_eq!(codec.decode("").unwrap_err(), TokenError::InvalidToken);
}

#[test]
fn test_decode_rejects_wrong_secret() {
    let codec = codec();
    let other = ClaimCodec::new("another-secret", ISSUER);
    let token = other.encode(&access_claims()).unwrap();

    assert_eq!(codec.decode(&token).unwrap_err(), TokenError::InvalidToken);
}

#[test]
fn test_decode_rejects_algorithm_substitution() {
    // Same secret, but signed under HS384: the algorithm header alone must
    // sink the token.
    let claims = access_claims();
    let token = encode(
        &Header::new(Algorithm::HS384),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap();

    assert_eq!(codec().decode(&token).unwrap_err(), TokenError::InvalidToken);
}

#[test]
fn test_decode_rejects_wrong_issuer() {
    let codec = codec();
    let foreign = ClaimCodec::new(SECRET, "someone-else");
    let claims = Claims::access(
        &User::new("a@b.com", "user"),
        "someone-else",
        Duration::minutes(15),
    );
    let token = foreign.encode(&claims).unwrap();

    assert_eq!(codec.decode(&token).unwrap_err(), TokenError::InvalidToken);
}

#[test]
fn test_decode_rejects_expired() {
    let codec = codec();
    let mut claims = access_claims();
    claims.iat = (Utc::now() - Duration::minutes(30)).timestamp();
    claims.nbf = claims.iat;
    claims.exp = (Utc::now() - Duration::minutes(15)).timestamp();

    let token = codec.encode(&claims).unwrap();

    assert_eq!(codec.decode(&token).unwrap_err(), TokenError::TokenExpired);
}

#[test]
fn test_decode_rejects_not_yet_valid() {
    let codec = codec();
    let mut claims = access_claims();
    claims.nbf = (Utc::now() + Duration::hours(1)).timestamp();
    claims.exp = (Utc::now() + Duration::hours(2)).timestamp();

    let token = codec.encode(&claims).unwrap();

    assert_eq!(
        codec.decode(&token).unwrap_err(),
        TokenError::TokenNotYetValid
    );
}

#[test]
fn test_decode_unverified_accepts_expired_and_foreign_signatures() {
    let codec = codec();

    let mut expired = access_claims();
    expired.exp = (Utc::now() - Duration::days(1)).timestamp();
    let expired_token = codec.encode(&expired).unwrap();
    assert_eq!(codec.decode_unverified(&expired_token).unwrap(), expired);

    // Signature is not checked, only structure
    let foreign = ClaimCodec::new("another-secret", ISSUER);
    let foreign_token = foreign.encode(&access_claims()).unwrap();
    assert!(codec.decode_unverified(&foreign_token).is_ok());
}

#[test]
fn test_decode_unverified_still_rejects_garbage() {
    let codec = codec();

    assert_eq!(
        codec.decode_unverified("garbage").unwrap_err(),
        TokenError::InvalidToken
    );
}
