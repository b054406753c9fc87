use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::models::AccountId;

/// JWT claims carried by an access or id token
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: AccountId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(sub: AccountId, email: Option<String>, expiry_hours: u64) -> Self {
        let now = Utc::now();
        Self {
            sub,
            email,
            iat: now.timestamp(),
            exp: (now + Duration::hours(expiry_hours as i64)).timestamp(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("Token generation failed: {0}")]
    Generation(String),
    #[error("Token verification failed: {0}")]
    Verification(String),
}

/// Signing and verification keys derived from the configured secret
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    expiry_hours: u64,
}

impl TokenKeys {
    pub fn new(secret: &str, expiry_hours: u64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            expiry_hours,
        }
    }

    /// Sign a token for the given subject, optionally embedding the email
    /// claim (used for the id token)
    pub fn sign(&self, sub: AccountId, email: Option<String>) -> Result<String, TokenError> {
        let claims = Claims::new(sub, email, self.expiry_hours);
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| TokenError::Generation(e.to_string()))
    }

    /// Verify a token's signature and expiry and return its claims
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())
            .map_err(|e| TokenError::Verification(e.to_string()))?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn sign_and_verify_roundtrip() {
        let keys = TokenKeys::new("test-secret", 24);
        let sub = Uuid::new_v4();

        let token = keys.sign(sub, Some("a@student.ju.se".to_string())).unwrap();
        let claims = keys.verify(&token).unwrap();

        assert_eq!(claims.sub, sub);
        assert_eq!(claims.email.as_deref(), Some("a@student.ju.se"));
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn verify_rejects_garbage() {
        let keys = TokenKeys::new("test-secret", 24);
        assert!(keys.verify("not-a-token").is_err());
    }

    #[test]
    fn verify_rejects_wrong_secret() {
        let signer = TokenKeys::new("secret-a", 24);
        let verifier = TokenKeys::new("secret-b", 24);

        let token = signer.sign(Uuid::new_v4(), None).unwrap();
        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn verify_rejects_expired_token() {
        let keys = TokenKeys::new("test-secret", 24);
        let now = Utc::now();
        // Two hours past expiry, well beyond the default leeway
        let claims = Claims {
            sub: Uuid::new_v4(),
            email: None,
            iat: (now - Duration::hours(3)).timestamp(),
            exp: (now - Duration::hours(2)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret("test-secret".as_bytes()),
        )
        .unwrap();

        assert!(keys.verify(&token).is_err());
    }
}
