use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::errors::AppResult;
use crate::models::User;

// Token payload: the user's identity plus standard time bounds. Stateless —
// nothing is persisted, the signature and expiry carry the whole credential.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub id: String,
    pub username: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_ttl: Duration,
}

impl JwtService {
    pub fn new(secret: &str, token_ttl_days: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            token_ttl: Duration::days(token_ttl_days),
        }
    }

    pub fn create_token(&self, user: &User) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            id: user.id.clone(),
            username: user.username.clone(),
            iat: now.timestamp(),
            exp: (now + self.token_ttl).timestamp(),
        };

        Ok(encode(&Header::default(), &claims, &self.encoding_key)?)
    }

    pub fn validate_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &Validation::default())?;
        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: "7f9c0e1a".into(),
            username: "alice".into(),
            password: "$2b$10$hash".into(),
        }
    }

    #[test]
    fn token_roundtrip_preserves_identity() {
        let jwt_service = JwtService::new("test_secret", 15);
        let user = user();

        let token = jwt_service.create_token(&user).unwrap();
        let claims = jwt_service.validate_token(&token).unwrap();

        assert_eq!(claims.id, user.id);
        assert_eq!(claims.username, user.username);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn expired_token_is_rejected() {
        // Expiry one day in the past, well beyond the default leeway.
        let jwt_service = JwtService::new("test_secret", -1);
        let token = jwt_service.create_token(&user()).unwrap();

        assert!(jwt_service.validate_token(&token).is_err());
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = JwtService::new("other_secret", 15)
            .create_token(&user())
            .unwrap();

        assert!(JwtService::new("test_secret", 15)
            .validate_token(&token)
            .is_err());
    }
}
