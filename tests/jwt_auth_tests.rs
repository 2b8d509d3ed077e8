// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JWT authentication tests.
//!
//! These tests verify that JWT tokens created by the auth routes can be
//! decoded by the auth middleware, catching compatibility issues early.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use city_companion::middleware::auth::create_jwt;

/// Claims structure that must match what the middleware expects.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: usize,
    iat: usize,
}

#[test]
fn test_jwt_roundtrip() {
    let signing_key = b"test_signing_key_32_bytes_long!!";
    let user_id = "1f6dc4f2-5f0a-4b2e-8a36-demo";

    let token = create_jwt(user_id, signing_key, 60).unwrap();

    let key = DecodingKey::from_secret(signing_key);
    let validation = Validation::new(Algorithm::HS256);

    let token_data = decode::<Claims>(&token, &key, &validation)
        .expect("Failed to decode JWT - check Claims struct compatibility");

    assert_eq!(token_data.claims.sub, user_id);
    assert!(token_data.claims.exp > token_data.claims.iat);
}

#[test]
fn test_jwt_wrong_key_rejected() {
    let token = create_jwt("user-1", b"test_signing_key_32_bytes_long!!", 60).unwrap();

    let key = DecodingKey::from_secret(b"a_completely_different_key_here!");
    let validation = Validation::new(Algorithm::HS256);

    assert!(decode::<Claims>(&token, &key, &validation).is_err());
}

#[test]
fn test_jwt_tampered_payload_rejected() {
    let signing_key = b"test_signing_key_32_bytes_long!!";
    let token = create_jwt("user-1", signing_key, 60).unwrap();

    // Swap the payload segment for one claiming a different subject
    let other = create_jwt("user-2", signing_key, 60).unwrap();
    let parts: Vec<&str> = token.split('.').collect();
    let other_parts: Vec<&str> = other.split('.').collect();
    let tampered = format!("{}.{}.{}", parts[0], other_parts[1], parts[2]);

    let key = DecodingKey::from_secret(signing_key);
    let validation = Validation::new(Algorithm::HS256);

    assert!(decode::<Claims>(&tampered, &key, &validation).is_err());
}

#[test]
fn test_jwt_ttl_applied() {
    let signing_key = b"test_signing_key_32_bytes_long!!";
    let token = create_jwt("user-1", signing_key, 120).unwrap();

    let key = DecodingKey::from_secret(signing_key);
    let validation = Validation::new(Algorithm::HS256);
    let token_data = decode::<Claims>(&token, &key, &validation).unwrap();

    let lifetime = token_data.claims.exp - token_data.claims.iat;
    assert_eq!(lifetime, 120 * 60);
}
