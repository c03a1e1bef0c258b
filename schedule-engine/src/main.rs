use std::net::SocketAddr;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use schedule_engine::cache::{CacheConfig, CachedTransitClient};
use schedule_engine::client::{ClientConfig, TransitClient};
use schedule_engine::config::EngineConfig;
use schedule_engine::web::{AppState, create_router};

const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("schedule_engine=info,tower_http=info")),
        )
        .init();

    let base_url = std::env::var("TRANSIT_API_URL")
        .map_err(|_| "TRANSIT_API_URL must be set to the transit provider's base URL")?;
    let api_key = std::env::var("TRANSIT_API_KEY").unwrap_or_else(|_| {
        warn!("TRANSIT_API_KEY not set. API calls will fail.");
        String::new()
    });
    let addr: SocketAddr = std::env::var("LISTEN_ADDR")
        .unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string())
        .parse()?;

    let client = TransitClient::new(ClientConfig::new(base_url, api_key))?;
    let cached = CachedTransitClient::new(client, &CacheConfig::default());

    let app = create_router(AppState::new(cached, EngineConfig::default()));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Schedule engine listening");
    info!("  GET  /health               - Health check");
    info!("  POST /destinations/resolve - Resolve a destination table");
    info!("  GET  /routes/schedule      - Fixed-route pattern and timetable");
    info!("  GET  /stations/nearby      - Nearby bike-share stations");

    axum::serve(listener, app).await?;
    Ok(())
}
