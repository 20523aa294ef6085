mod config;
mod dashboard;
mod error;
mod extract;
mod handlers;
mod insights;
mod server;
mod store;
mod types;

use std::sync::Arc;

use anyhow::Result;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::Config;
use crate::extract::OpenAiClient;
use crate::server::MemoryServer;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("social_memory=info".parse()?)
                .add_directive("tower_http=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;
    let store = store::Store::init(&config.store_path)?;
    let llm = Arc::new(OpenAiClient::new(&config));
    let server = MemoryServer::new(store, llm, config.public_base_url.clone());

    let listener = TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, model = %config.model, "starting social-memory webhook server");

    axum::serve(listener, server::router(server)).await?;
    Ok(())
}
