pub mod mock;

use async_trait::async_trait;
use self::mock::MockReplyGenerator;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Produces the assistant's reply to a chat message.
///
/// The `/chat` handler only ever sees this trait, so a model-backed
/// implementation can replace the mock without changing the route.
#[async_trait]
pub trait ReplyGenerator: Send + Sync {
    async fn generate_reply(&self, message: &str) -> String;

    fn name(&self) -> &str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplyBackend {
    Mock,
}

#[derive(Debug, PartialEq, Eq)]
pub struct ParseReplyBackendError {
    message: String,
}

impl fmt::Display for ParseReplyBackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ParseReplyBackendError {}

impl FromStr for ReplyBackend {
    type Err = ParseReplyBackendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mock" => Ok(ReplyBackend::Mock),
            _ => Err(ParseReplyBackendError {
                message: format!("Invalid reply backend: '{}'", s),
            }),
        }
    }
}

pub fn new_generator(backend: ReplyBackend) -> Arc<dyn ReplyGenerator> {
    match backend {
        ReplyBackend::Mock => Arc::new(MockReplyGenerator),
    }
}
