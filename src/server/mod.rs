pub mod api;
pub mod auth;
pub mod extract;

use self::api::AppState;
use crate::auth::TokenCodec;
use crate::config::ServerConfig;
use crate::llm::new_generator;
use log::info;
use std::error::Error;

pub struct Server {
    config: ServerConfig,
    state: AppState,
}

impl Server {
    pub fn new(config: ServerConfig) -> Self {
        let codec = TokenCodec::new(&config.secret);
        let replies = new_generator(config.reply_backend);
        info!("Reply generator: {}", replies.name());
        let state = AppState::new(codec, replies);

        Self { config, state }
    }

    pub async fn run(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        api::start_http_server(&self.config, self.state.clone()).await
    }
}
