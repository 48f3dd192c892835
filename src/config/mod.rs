use crate::cli::Args;
use crate::error::ConfigError;
use crate::llm::ReplyBackend;
use axum::http::HeaderValue;
use log::warn;

/// Signing secret used when `SECRET_KEY` is not provided. Tokens signed with
/// it can be forged by anyone who has read this source.
pub const INSECURE_DEFAULT_SECRET: &str = "mysecretkey";

#[derive(Debug, Clone)]
pub struct TlsPaths {
    pub cert_path: String,
    pub key_path: String,
}

/// Validated runtime configuration. Built once at startup and read-only after.
#[derive(Clone)]
pub struct ServerConfig {
    pub addr: String,
    pub secret: String,
    pub using_default_secret: bool,
    pub allowed_origins: Vec<HeaderValue>,
    pub reply_backend: ReplyBackend,
    pub tls: Option<TlsPaths>,
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("addr", &self.addr)
            .field("secret", &"<redacted>")
            .field("using_default_secret", &self.using_default_secret)
            .field("allowed_origins", &self.allowed_origins)
            .field("reply_backend", &self.reply_backend)
            .field("tls", &self.tls)
            .finish()
    }
}

impl ServerConfig {
    pub fn from_args(args: &Args) -> Result<Self, ConfigError> {
        let (secret, using_default_secret) = resolve_secret(args.secret_key.as_deref());
        if using_default_secret {
            warn!(
                "SECRET_KEY is not set. Falling back to the built-in insecure secret; \
                 any client can forge tokens. Set SECRET_KEY before deploying."
            );
        }

        let allowed_origins = parse_origins(&args.allowed_origins)?;
        if allowed_origins.is_empty() {
            warn!("ALLOWED_ORIGINS is empty. Cross-origin browser requests will be refused.");
        }

        let reply_backend = args.reply_backend.parse::<ReplyBackend>()?;

        let tls = if args.enable_tls {
            match (&args.tls_cert_path, &args.tls_key_path) {
                (Some(cert_path), Some(key_path)) => Some(TlsPaths {
                    cert_path: cert_path.clone(),
                    key_path: key_path.clone(),
                }),
                _ => return Err(ConfigError::IncompleteTls),
            }
        } else {
            None
        };

        Ok(Self {
            addr: args.server_addr.clone(),
            secret,
            using_default_secret,
            allowed_origins,
            reply_backend,
            tls,
        })
    }
}

fn resolve_secret(provided: Option<&str>) -> (String, bool) {
    match provided {
        Some(s) if !s.trim().is_empty() => (s.to_string(), false),
        _ => (INSECURE_DEFAULT_SECRET.to_string(), true),
    }
}

pub fn parse_origins(raw: &[String]) -> Result<Vec<HeaderValue>, ConfigError> {
    let mut origins = Vec::with_capacity(raw.len());
    for entry in raw {
        let origin = entry.trim();
        if origin.is_empty() {
            continue;
        }
        if origin.contains('*') {
            return Err(ConfigError::WildcardOrigin);
        }
        let value = HeaderValue::from_str(origin)
            .map_err(|_| ConfigError::InvalidOrigin(origin.to_string()))?;
        origins.push(value);
    }
    Ok(origins)
}
