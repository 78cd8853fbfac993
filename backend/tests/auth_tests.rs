//! Authentication tests
//!
//! Covers credential validation, password hashing, JWT claim round-trips,
//! and the refresh-token digest that keeps raw tokens out of the database.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use proptest::prelude::*;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use shared::validation::{validate_email, validate_password};

// Mirrors the digest stored for refresh tokens: only the SHA-256 of the
// token ever reaches the database, base64url without padding.
fn hash_token(token: &str) -> String {
    URL_SAFE_NO_PAD.encode(Sha256::digest(token.as_bytes()))
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    email: String,
    exp: i64,
    iat: i64,
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_password_hash_verifies() {
        // Low cost keeps the test fast; production cost comes from config
        let hash = bcrypt::hash("correct-horse-battery", 4).unwrap();
        assert!(bcrypt::verify("correct-horse-battery", &hash).unwrap());
        assert!(!bcrypt::verify("wrong-password", &hash).unwrap());
    }

    #[test]
    fn test_password_hashes_are_salted() {
        let first = bcrypt::hash("correct-horse-battery", 4).unwrap();
        let second = bcrypt::hash("correct-horse-battery", 4).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_jwt_claims_roundtrip() {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: "2c4b9f4e-6f8f-4d51-9e0c-0f8f7a3c1d2e".to_string(),
            email: "catador@vinisima.es".to_string(),
            iat: now,
            exp: now + 900,
        };
        let secret = b"test-secret";
        let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(secret)).unwrap();

        let decoded = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(secret),
            &Validation::default(),
        )
        .unwrap();
        assert_eq!(decoded.claims.sub, claims.sub);
        assert_eq!(decoded.claims.email, claims.email);
    }

    #[test]
    fn test_jwt_rejects_wrong_secret() {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: "x".to_string(),
            email: "catador@vinisima.es".to_string(),
            iat: now,
            exp: now + 900,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"right-secret"),
        )
        .unwrap();

        let result = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"other-secret"),
            &Validation::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_jwt_rejects_expired_token() {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: "x".to_string(),
            email: "catador@vinisima.es".to_string(),
            iat: now - 3600,
            exp: now - 1800,
        };
        let secret = b"test-secret";
        let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(secret)).unwrap();

        let result = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(secret),
            &Validation::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_token_digest_shape() {
        let digest = hash_token("some-opaque-refresh-token");
        // 32 bytes base64url without padding
        assert_eq!(digest.len(), 43);
        assert!(!digest.contains('='));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    proptest! {
        /// The digest is deterministic and never echoes the token
        #[test]
        fn prop_token_digest_is_deterministic(token in "[a-zA-Z0-9-]{16,64}") {
            let first = hash_token(&token);
            let second = hash_token(&token);
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(first.len(), 43);
            prop_assert!(!first.contains(&token));
        }

        /// Distinct tokens produce distinct digests
        #[test]
        fn prop_distinct_tokens_distinct_digests(
            a in "[a-z0-9]{24}",
            b in "[a-z0-9]{24}",
        ) {
            prop_assume!(a != b);
            prop_assert_ne!(hash_token(&a), hash_token(&b));
        }

        /// Well-formed addresses pass, everything without @ or . fails
        #[test]
        fn prop_email_validation(local in "[a-z]{1,12}", domain in "[a-z]{1,12}") {
            let email = format!("{}@{}.es", local, domain);
            prop_assert!(validate_email(&email).is_ok());
            prop_assert!(validate_email(&local).is_err());
        }

        /// The eight-character floor is exact
        #[test]
        fn prop_password_length_floor(password in "[a-zA-Z0-9]{0,32}") {
            let result = validate_password(&password);
            if password.len() >= 8 {
                prop_assert!(result.is_ok());
            } else {
                prop_assert!(result.is_err());
            }
        }
    }
}
