use super::auth::AuthUser;
use super::extract::JsonBody;
use crate::auth::TokenCodec;
use crate::config::ServerConfig;
use crate::error::ApiError;
use crate::llm::ReplyGenerator;
use crate::models::auth::{Credentials, TokenResponse};
use crate::models::chat::{ChatReply, ChatRequest};
use crate::models::StatusMessage;
use axum::{
    extract::State,
    http::HeaderValue,
    routing::{get, post},
    Json, Router,
};
use log::{debug, info};
use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

pub const HOME_MESSAGE: &str = "Backend working ✅";

#[derive(Clone)]
pub struct AppState {
    pub codec: Arc<TokenCodec>,
    pub replies: Arc<dyn ReplyGenerator>,
}

impl AppState {
    pub fn new(codec: TokenCodec, replies: Arc<dyn ReplyGenerator>) -> Self {
        Self {
            codec: Arc::new(codec),
            replies,
        }
    }
}

/// Credentialed CORS for an explicit origin list. Methods and headers are
/// mirrored from the preflight since `*` cannot be combined with credentials.
pub fn cors_layer(allowed_origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}

pub fn build_router(state: AppState, allowed_origins: Vec<HeaderValue>) -> Router {
    Router::new()
        .route("/", get(home_handler))
        .route("/signup", post(signup_handler))
        .route("/login", post(login_handler))
        .route("/chat", post(chat_handler))
        .layer(cors_layer(allowed_origins))
        .with_state(state)
}

pub async fn start_http_server(
    config: &ServerConfig,
    state: AppState,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let addr = config
        .addr
        .parse::<SocketAddr>()
        .map_err(|e| format!("Invalid server address '{}': {}", config.addr, e))?;
    let app = build_router(state, config.allowed_origins.clone());

    if let Some(tls) = &config.tls {
        info!(
            "TLS enabled. Loading certificate from '{}' and key from '{}'",
            tls.cert_path, tls.key_path
        );
        // ring and aws-lc-rs are both compiled in, so the provider must be chosen
        let _ = rustls::crypto::ring::default_provider().install_default();
        let tls_config =
            axum_server::tls_rustls::RustlsConfig::from_pem_file(&tls.cert_path, &tls.key_path)
                .await?;

        info!("HTTPS server listening on: https://{}", addr);
        axum_server::bind_rustls(addr, tls_config)
            .serve(app.into_make_service())
            .await?;
    } else {
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| format!("Failed to bind HTTP server to {}: {}", addr, e))?;
        info!("HTTP server listening on: http://{}", addr);
        axum::serve(listener, app.into_make_service()).await?;
    }

    Ok(())
}

async fn home_handler() -> Json<StatusMessage> {
    Json(StatusMessage {
        message: HOME_MESSAGE.to_string(),
    })
}

async fn signup_handler(
    State(state): State<AppState>,
    JsonBody(user): JsonBody<Credentials>,
) -> Result<Json<TokenResponse>, ApiError> {
    info!("New Signup: {}", user.email);
    let token = state.codec.issue(&user.email)?;
    Ok(Json(TokenResponse { token }))
}

async fn login_handler(
    State(state): State<AppState>,
    JsonBody(user): JsonBody<Credentials>,
) -> Result<Json<TokenResponse>, ApiError> {
    info!("Login Request: {}", user.email);
    let token = state.codec.issue(&user.email)?;
    Ok(Json(TokenResponse { token }))
}

async fn chat_handler(
    State(state): State<AppState>,
    AuthUser(email): AuthUser,
    JsonBody(request): JsonBody<ChatRequest>,
) -> Result<Json<ChatReply>, ApiError> {
    info!("User: {}, Message: {}", email, request.message);
    if let Some(chat_id) = &request.chat_id {
        debug!("Chat id for {}: {}", email, chat_id);
    }

    let reply = state.replies.generate_reply(&request.message).await;
    Ok(Json(ChatReply { reply }))
}
