pub mod auth;
pub mod chat;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StatusMessage {
    pub message: String,
}
