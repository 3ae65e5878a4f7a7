//! Integration test for JWT auth validation.
//!
//! Mints tokens through the same `JwtConfig` the server uses and checks the
//! validation path. No running server or database is needed.
//!
//! Run with: `cargo test --test auth_test`
use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use uuid::Uuid;

use servihub_backend::auth::jwt::{Claims, JwtConfig};

/// A fake secret for testing — never use the real one in tests committed to git.
const TEST_SECRET: &str = "test-secret-at-least-256-bits-long-for-hs256-xxxxxxx";

#[test]
fn test_token_round_trip() {
    let jwt = JwtConfig::new(TEST_SECRET);
    let user_id = Uuid::new_v4();

    let token = jwt.create_token(user_id).expect("Failed to mint token");
    let claims = jwt.validate_token(&token).expect("Token should be valid");

    assert_eq!(claims.sub, user_id.to_string());
    assert_eq!(claims.user_id().unwrap(), user_id);
    assert!(claims.exp > claims.iat);
}

#[test]
fn test_expired_token_is_rejected() {
    let now = Utc::now().timestamp() as usize;

    let claims = Claims {
        sub: Uuid::new_v4().to_string(),
        exp: now - 300, // expired 5 minutes ago (well past the 60s default leeway)
        iat: now - 3600,
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap();

    let result = JwtConfig::new(TEST_SECRET).validate_token(&token);
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("ExpiredSignature"));
}

#[test]
fn test_wrong_secret_is_rejected() {
    let token = JwtConfig::new(TEST_SECRET)
        .create_token(Uuid::new_v4())
        .unwrap();

    let result =
        JwtConfig::new("completely-wrong-secret-xxxxxxxxxxxxxxxxxxx").validate_token(&token);
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("InvalidSignature"));
}

#[test]
fn test_garbage_token_is_rejected() {
    let result = JwtConfig::new(TEST_SECRET).validate_token("not.a.valid.jwt");
    assert!(result.is_err());
}

#[test]
fn test_non_uuid_subject_is_rejected() {
    let now = Utc::now().timestamp() as usize;

    let claims = Claims {
        sub: "definitely-not-a-uuid".to_string(),
        exp: now + 3600,
        iat: now,
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap();

    // The signature is fine, but the subject can't resolve to a user id.
    let decoded = JwtConfig::new(TEST_SECRET)
        .validate_token(&token)
        .expect("Token itself should be valid");
    assert!(decoded.user_id().is_err());
}
