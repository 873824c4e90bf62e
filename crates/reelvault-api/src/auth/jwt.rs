//! HS256 JWT validation.
//!
//! Token issuance (login/refresh) lives outside this service; the API only
//! validates bearer tokens minted with the shared secret. `sub` carries the
//! user id.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use reelvault_core::AppError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const ISSUER: &str = "reelvault";

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    iss: String,
    sub: String,
    iat: i64,
    exp: i64,
}

#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtService {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[ISSUER]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Mint a token for a user. Used by tests and local tooling.
    pub fn issue_token(&self, user_id: Uuid, ttl: Duration) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            iss: ISSUER.to_string(),
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
    }

    /// Validate a token and return the authenticated user id.
    pub fn validate_token(&self, token: &str) -> Result<Uuid, AppError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))?;

        data.claims
            .sub
            .parse::<Uuid>()
            .map_err(|_| AppError::Unauthorized("Token subject is not a user id".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_and_validate_roundtrip() {
        let service = JwtService::new("test-secret");
        let user_id = Uuid::new_v4();

        let token = service.issue_token(user_id, Duration::minutes(5)).unwrap();
        assert_eq!(service.validate_token(&token).unwrap(), user_id);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issuer = JwtService::new("secret-a");
        let verifier = JwtService::new("secret-b");

        let token = issuer
            .issue_token(Uuid::new_v4(), Duration::minutes(5))
            .unwrap();
        assert!(matches!(
            verifier.validate_token(&token),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = JwtService::new("test-secret");
        let token = service
            .issue_token(Uuid::new_v4(), Duration::minutes(-10))
            .unwrap();
        assert!(matches!(
            service.validate_token(&token),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let service = JwtService::new("test-secret");
        assert!(matches!(
            service.validate_token("not-a-jwt"),
            Err(AppError::Unauthorized(_))
        ));
    }
}
