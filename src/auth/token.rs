use crate::error::AuthError;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use log::debug;
use serde::{Deserialize, Serialize};

pub const TOKEN_TTL_DAYS: i64 = 7;

const ALGORITHM: Algorithm = Algorithm::HS256;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: i64,
}

/// Issues and verifies HS256-signed identity tokens.
///
/// The codec is stateless: a token is valid for as long as its signature
/// checks out under the current secret and its `exp` has not passed.
/// There is no revocation.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(ALGORITHM);
        validation.leeway = 0;
        validation.validate_nbf = false;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn issue(&self, subject: &str) -> jsonwebtoken::errors::Result<String> {
        self.issue_at(subject, Utc::now())
    }

    /// Issue a token as if the current time were `now`.
    pub fn issue_at(
        &self,
        subject: &str,
        now: DateTime<Utc>,
    ) -> jsonwebtoken::errors::Result<String> {
        let claims = Claims {
            sub: subject.to_string(),
            exp: (now + Duration::days(TOKEN_TTL_DAYS)).timestamp(),
        };
        jsonwebtoken::encode(&Header::new(ALGORITHM), &claims, &self.encoding_key)
    }

    /// Check signature and expiry, returning the subject the token asserts.
    pub fn verify(&self, token: &str) -> Result<String, AuthError> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims.sub)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
                _ => {
                    debug!("Token rejected: {}", e);
                    AuthError::InvalidToken
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn test_issue_and_verify_round_trip() {
        let codec = TokenCodec::new(SECRET);
        for email in ["a@b.com", "x@y.com", "user+tag@example.co.uk"] {
            let token = codec.issue(email).unwrap();
            assert_eq!(codec.verify(&token).unwrap(), email);
        }
    }

    #[test]
    fn test_expiry_is_seven_days_after_issue() {
        let codec = TokenCodec::new(SECRET);
        let now = Utc::now();
        let token = codec.issue_at("a@b.com", now).unwrap();
        let data = jsonwebtoken::decode::<Claims>(
            &token,
            &DecodingKey::from_secret(SECRET.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .unwrap();
        assert_eq!(data.claims.exp, now.timestamp() + 7 * 24 * 60 * 60);
        assert_eq!(data.header.alg, Algorithm::HS256);
    }

    #[test]
    fn test_expired_token_rejected_as_expired() {
        let codec = TokenCodec::new(SECRET);
        let token = codec
            .issue_at("a@b.com", Utc::now() - Duration::days(TOKEN_TTL_DAYS) - Duration::seconds(5))
            .unwrap();
        assert_eq!(codec.verify(&token), Err(AuthError::ExpiredToken));
    }

    #[test]
    fn test_signature_checked_before_expiry() {
        let token = TokenCodec::new("other-secret")
            .issue_at("a@b.com", Utc::now() - Duration::days(30))
            .unwrap();
        assert_eq!(TokenCodec::new(SECRET).verify(&token), Err(AuthError::InvalidToken));
    }

    #[test]
    fn test_wrong_secret_rejected_as_invalid() {
        let token = TokenCodec::new("secret-1").issue("a@b.com").unwrap();
        let result = TokenCodec::new("secret-2").verify(&token);
        assert_eq!(result, Err(AuthError::InvalidToken));
    }

    #[test]
    fn test_malformed_token_rejected_as_invalid() {
        let codec = TokenCodec::new(SECRET);
        for token in ["", "not-a-token", "a.b.c", "Bearer abc"] {
            assert_eq!(codec.verify(token), Err(AuthError::InvalidToken));
        }
    }

    #[test]
    fn test_other_algorithm_rejected_as_invalid() {
        let claims = Claims {
            sub: "a@b.com".to_string(),
            exp: (Utc::now() + Duration::days(1)).timestamp(),
        };
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS384),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        assert_eq!(TokenCodec::new(SECRET).verify(&token), Err(AuthError::InvalidToken));
    }

    #[test]
    fn test_missing_subject_rejected_as_invalid() {
        #[derive(Serialize)]
        struct NoSubject {
            exp: i64,
        }
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &NoSubject {
                exp: (Utc::now() + Duration::days(1)).timestamp(),
            },
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        assert_eq!(TokenCodec::new(SECRET).verify(&token), Err(AuthError::InvalidToken));
    }
}
