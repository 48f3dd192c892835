pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod llm;
pub mod models;
pub mod server;

use cli::Args;
use config::ServerConfig;
use log::info;
use server::Server;
use std::error::Error;

pub async fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    let config = ServerConfig::from_args(&args)?;

    info!("--- Core Configuration ---");
    info!("Server Address: {}", config.addr);
    info!(
        "Signing Secret: {}",
        if config.using_default_secret { "INSECURE DEFAULT" } else { "from SECRET_KEY" }
    );
    info!("Allowed Origins: {:?}", args.allowed_origins);
    info!("Reply Backend: {}", args.reply_backend);
    info!("TLS Enabled: {}", config.tls.is_some());
    info!("-------------------------");

    let server = Server::new(config);
    server.run().await?;

    Ok(())
}
