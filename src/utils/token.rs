use crate::error::{Error, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Claims carried by every access token. `sub` is the user's email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

pub fn issue(secret: &str, subject: &str, expiration_hours: i64) -> Result<String> {
    let now = Utc::now();
    let claims = Claims {
        sub: subject.to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::hours(expiration_hours)).timestamp(),
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| Error::Internal(format!("Failed to sign token: {}", e)))
}

pub fn decode_token(secret: &str, token: &str) -> Result<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => Error::TokenExpired,
        _ => Error::Unauthorized("Invalid token".to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-test-secret";

    #[test]
    fn issued_token_has_three_segments_and_round_trips() {
        let token = issue(SECRET, "pen@example.com", 24).unwrap();
        assert_eq!(token.split('.').count(), 3);

        let claims = decode_token(SECRET, &token).unwrap();
        assert_eq!(claims.sub, "pen@example.com");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = issue(SECRET, "pen@example.com", 24).unwrap();
        let err = decode_token("other-secret", &token).unwrap_err();
        assert!(matches!(err, Error::Unauthorized(_)));
    }

    #[test]
    fn expired_token_maps_to_token_expired() {
        // Negative window puts exp in the past.
        let token = issue(SECRET, "pen@example.com", -1).unwrap();
        let err = decode_token(SECRET, &token).unwrap_err();
        assert!(matches!(err, Error::TokenExpired));
    }

    #[test]
    fn garbage_is_unauthorized() {
        let err = decode_token(SECRET, "not.a.token").unwrap_err();
        assert!(matches!(err, Error::Unauthorized(_)));
    }
}
