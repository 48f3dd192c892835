use super::api::AppState;
use crate::auth::authorize;
use crate::error::{ApiError, AuthError};
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

/// Extractor that runs the bearer-token guard and yields the token's subject.
/// Handlers that take `AuthUser` reject unauthenticated requests with 401.
#[derive(Debug, Clone)]
pub struct AuthUser(pub String);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let authorization = match parts.headers.get(header::AUTHORIZATION) {
            Some(value) => Some(value.to_str().map_err(|_| AuthError::InvalidToken)?),
            None => None,
        };

        let email = authorize(&state.codec, authorization)?;
        Ok(AuthUser(email))
    }
}
