use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

pub const LOGIN_TTL_MINUTES: i64 = 10;
pub const REFRESH_TTL_MINUTES: i64 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub username: String,
    pub exp: i64,
}

#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct SessionAuthority {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl SessionAuthority {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    pub fn issue(&self, user_name: &str, ttl: Duration) -> Result<IssuedToken> {
        let expires_at = Utc::now()
            .checked_add_signed(ttl)
            .ok_or_else(|| AppError::InternalError("Failed to calculate expiration".to_string()))?;

        // Whole seconds, so the cookie expiry matches the `exp` claim exactly.
        let exp = expires_at.timestamp();
        let expires_at = DateTime::from_timestamp(exp, 0)
            .ok_or_else(|| AppError::InternalError("Failed to calculate expiration".to_string()))?;

        let claims = Claims {
            username: user_name.to_string(),
            exp,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalError(format!("Token generation failed: {}", e)))?;

        Ok(IssuedToken { token, expires_at })
    }

    pub fn verify(&self, token: &str) -> Result<Claims> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidToken => AppError::BadRequest("Bad request".to_string()),
                _ => AppError::Unauthorized("Unauthorized".to_string()),
            })?;

        if claims.exp <= Utc::now().timestamp() {
            return Err(AppError::Unauthorized("Unauthorized".to_string()));
        }

        Ok(claims)
    }

    pub fn refresh(&self, claims: &Claims, ttl: Duration) -> Result<IssuedToken> {
        self.issue(&claims.username, ttl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authority() -> SessionAuthority {
        SessionAuthority::new(b"test-secret")
    }

    fn assert_unauthorized(result: Result<Claims>) {
        assert!(
            matches!(result, Err(AppError::Unauthorized(_))),
            "expected Unauthorized, got {:?}",
            result
        );
    }

    #[test]
    fn issued_token_verifies_for_same_user() {
        let sessions = authority();
        let issued = sessions
            .issue("alice", Duration::minutes(LOGIN_TTL_MINUTES))
            .unwrap();

        let claims = sessions.verify(&issued.token).unwrap();
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.exp, issued.expires_at.timestamp());

        let remaining = issued.expires_at - Utc::now();
        assert!(remaining <= Duration::minutes(LOGIN_TTL_MINUTES));
        assert!(remaining > Duration::minutes(LOGIN_TTL_MINUTES - 1));
    }

    #[test]
    fn expired_token_is_unauthorized() {
        let sessions = authority();
        let issued = sessions.issue("alice", Duration::seconds(-5)).unwrap();

        assert_unauthorized(sessions.verify(&issued.token));
    }

    #[test]
    fn token_expiring_now_is_unauthorized() {
        let sessions = authority();
        let issued = sessions.issue("alice", Duration::zero()).unwrap();

        assert_unauthorized(sessions.verify(&issued.token));
    }

    #[test]
    fn token_signed_with_other_secret_is_unauthorized() {
        let issued = SessionAuthority::new(b"other-secret")
            .issue("alice", Duration::minutes(5))
            .unwrap();

        assert_unauthorized(authority().verify(&issued.token));
    }

    #[test]
    fn tampering_any_byte_is_unauthorized() {
        let sessions = authority();
        let token = sessions
            .issue("alice", Duration::minutes(5))
            .unwrap()
            .token;

        for (index, original) in token.char_indices() {
            if original == '.' {
                continue;
            }
            let replacement = if original == 'A' { 'B' } else { 'A' };
            let mut tampered = token.clone();
            tampered.replace_range(index..index + 1, &replacement.to_string());

            assert_unauthorized(sessions.verify(&tampered));
        }
    }

    #[test]
    fn malformed_token_is_bad_request() {
        let sessions = authority();

        for token in ["", "not-a-jwt", "only.two"] {
            assert!(
                matches!(sessions.verify(token), Err(AppError::BadRequest(_))),
                "expected BadRequest for {:?}",
                token
            );
        }
    }

    #[test]
    fn refresh_extends_and_keeps_old_token_valid() {
        let sessions = authority();
        let original = sessions.issue("alice", Duration::minutes(10)).unwrap();
        let claims = sessions.verify(&original.token).unwrap();

        let refreshed = sessions
            .refresh(&claims, Duration::minutes(REFRESH_TTL_MINUTES))
            .unwrap();

        assert_eq!(sessions.verify(&refreshed.token).unwrap().username, "alice");
        assert!(sessions.verify(&original.token).is_ok());
        assert!(refreshed.expires_at < original.expires_at);
    }
}
