//! Epifund Web Server
//!
//! Run with: cargo run -p epifund-web

use std::net::SocketAddr;

use epifund_common::AppConfig;
use epifund_data::DataStore;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting Epifund Web Server...");

    let config = AppConfig::from_env()?;

    // Eager load: a mandatory dataset that fails here aborts startup
    let store = DataStore::load(&config)?;

    let state = epifund_web::state::AppState::new(config, store);
    let addr: SocketAddr = format!("{}:{}", state.config.server.host, state.config.server.port)
        .parse()?;

    let app = epifund_web::router::build_router(state);

    info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
