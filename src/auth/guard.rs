use super::token::TokenCodec;
use crate::error::AuthError;
use log::warn;

const BEARER_PREFIX: &str = "Bearer ";

/// Resolve the raw `Authorization` header value to the subject it asserts.
///
/// The `Bearer ` prefix is optional and matched exactly; whatever follows it
/// is handed to the codec untouched.
pub fn authorize(codec: &TokenCodec, authorization: Option<&str>) -> Result<String, AuthError> {
    let raw = match authorization {
        Some(value) if !value.is_empty() => value,
        _ => {
            warn!("Rejected request: authorization header missing");
            return Err(AuthError::MissingAuthorization);
        }
    };

    let token = raw.strip_prefix(BEARER_PREFIX).unwrap_or(raw);

    codec.verify(token).map_err(|e| {
        warn!("Rejected request: {}", e);
        e
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn codec() -> TokenCodec {
        TokenCodec::new("guard-secret")
    }

    #[test]
    fn test_absent_header_is_missing() {
        assert_eq!(authorize(&codec(), None), Err(AuthError::MissingAuthorization));
    }

    #[test]
    fn test_empty_header_is_missing() {
        assert_eq!(authorize(&codec(), Some("")), Err(AuthError::MissingAuthorization));
    }

    #[test]
    fn test_bearer_prefixed_token_resolves_subject() {
        let codec = codec();
        let token = codec.issue("a@b.com").unwrap();
        let header = format!("Bearer {}", token);
        assert_eq!(authorize(&codec, Some(&header)).unwrap(), "a@b.com");
    }

    #[test]
    fn test_bare_token_resolves_subject() {
        let codec = codec();
        let token = codec.issue("a@b.com").unwrap();
        assert_eq!(authorize(&codec, Some(&token)).unwrap(), "a@b.com");
    }

    #[test]
    fn test_prefix_match_is_case_sensitive() {
        let codec = codec();
        let token = codec.issue("a@b.com").unwrap();
        let header = format!("bearer {}", token);
        assert_eq!(authorize(&codec, Some(&header)), Err(AuthError::InvalidToken));
    }

    #[test]
    fn test_extra_whitespace_is_not_trimmed() {
        let codec = codec();
        let token = codec.issue("a@b.com").unwrap();
        let header = format!("Bearer  {}", token);
        assert_eq!(authorize(&codec, Some(&header)), Err(AuthError::InvalidToken));
    }

    #[test]
    fn test_prefix_without_token_is_invalid() {
        assert_eq!(authorize(&codec(), Some("Bearer ")), Err(AuthError::InvalidToken));
    }

    #[test]
    fn test_expired_token_reported_as_expired() {
        let codec = codec();
        let token = codec.issue_at("a@b.com", Utc::now() - Duration::days(8)).unwrap();
        let header = format!("Bearer {}", token);
        assert_eq!(authorize(&codec, Some(&header)), Err(AuthError::ExpiredToken));
    }
}
