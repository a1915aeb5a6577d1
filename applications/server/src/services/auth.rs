/// Session tokens and password hashing
use crate::error::{Result, ServerError};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use wallet_core::UserId;

/// Upper bound on token lifetime (ten years)
const MAX_TOKEN_EXPIRATION_HOURS: u64 = 24 * 365 * 10;

#[derive(Clone)]
pub struct AuthService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_expiration: Duration,
    bcrypt_cost: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (user ID)
    pub exp: i64,    // Expiration time
    pub iat: i64,    // Issued at
}

impl AuthService {
    pub fn new(secret: &str, token_expiration_hours: u64, bcrypt_cost: u32) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            token_expiration: Duration::hours(
                token_expiration_hours.min(MAX_TOKEN_EXPIRATION_HOURS) as i64,
            ),
            bcrypt_cost,
        }
    }

    /// Hash a password using bcrypt
    pub fn hash_password(&self, password: &str) -> Result<String> {
        bcrypt::hash(password, self.bcrypt_cost).map_err(ServerError::from)
    }

    /// Verify a password against a hash
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool> {
        bcrypt::verify(password, hash).map_err(ServerError::from)
    }

    /// Issue a session token for `user_id`
    pub fn issue_token(&self, user_id: &UserId) -> Result<String> {
        let now = Utc::now();
        let exp = now + self.token_expiration;

        let claims = Claims {
            sub: user_id.as_str().to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| ServerError::Internal(format!("Failed to sign token: {}", e)))
    }

    /// Verify a session token and return the identity it was issued for
    ///
    /// Fails on a malformed token, a foreign signature or an expired token.
    pub fn verify_token(&self, token: &str) -> Result<UserId> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &Validation::default())?;

        if token_data.claims.sub.is_empty() {
            return Err(ServerError::Unauthorized(
                "You are not a valid user".to_string(),
            ));
        }

        Ok(UserId::new(token_data.claims.sub))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> AuthService {
        AuthService::new("secret", 24, 4)
    }

    #[test]
    fn test_password_hashing() {
        let auth = service();
        let password = "my_secure_password";

        let hash = auth.hash_password(password).unwrap();
        assert_ne!(hash, password);
        assert!(auth.verify_password(password, &hash).unwrap());
        assert!(!auth.verify_password("wrong_password", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let auth = service();
        let first = auth.hash_password("same").unwrap();
        let second = auth.hash_password("same").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_token_round_trip() {
        let auth = service();
        let user_id = UserId::new("user-123");

        let token = auth.issue_token(&user_id).unwrap();
        assert_eq!(auth.verify_token(&token).unwrap(), user_id);
    }

    #[test]
    fn test_token_from_other_secret_rejected() {
        let token = AuthService::new("other", 24, 4)
            .issue_token(&UserId::new("user-123"))
            .unwrap();

        assert!(matches!(
            service().verify_token(&token),
            Err(ServerError::Jwt(_))
        ));
    }

    #[test]
    fn test_malformed_token_rejected() {
        let auth = service();
        assert!(auth.verify_token("").is_err());
        assert!(auth.verify_token("not.a.token").is_err());
    }
}
