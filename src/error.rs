use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use crate::llm::ParseReplyBackendError;
use log::error;
use serde_json::json;
use thiserror::Error;

/// Failures of the bearer-token flow. The display text doubles as the
/// `detail` returned to the client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Authorization token missing")]
    MissingAuthorization,
    #[error("Token expired")]
    ExpiredToken,
    #[error("Invalid token")]
    InvalidToken,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Unauthorized(#[from] AuthError),
    #[error("{0}")]
    MalformedRequestBody(String),
    #[error("Internal server error")]
    TokenIssuance(#[from] jsonwebtoken::errors::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::MalformedRequestBody(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::TokenIssuance(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MalformedRequestBody(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::TokenIssuance(e) = &self {
            error!("Failed to issue token: {}", e);
        }
        (self.status(), Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("wildcard origin '*' is not allowed in ALLOWED_ORIGINS")]
    WildcardOrigin,
    #[error("invalid origin '{0}' in ALLOWED_ORIGINS")]
    InvalidOrigin(String),
    #[error("both --tls-cert-path and --tls-key-path must be provided to enable TLS")]
    IncompleteTls,
    #[error(transparent)]
    ReplyBackend(#[from] ParseReplyBackendError),
}
