//! # pswap-api: Binary Entry Point
//!
//! Starts the Axum HTTP server for the pilot swap portal.
//! Binds to configurable port (default 8080).

use pswap_api::state::{AppConfig, AppState};
use pswap_client::SwapApiClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = AppConfig::from_env()?;
    tracing::info!(?config, "configuration loaded");

    // The case store is optional: without it the case list is served from
    // the fixture and the directory routes return 503.
    let client = if std::env::var_os("SWAP_API_URL").is_some() {
        match SwapApiClient::from_env() {
            Ok(client) => {
                tracing::info!("case store client configured");
                Some(client)
            }
            Err(e) => {
                tracing::error!("Failed to create case store client: {e}");
                return Err(e.into());
            }
        }
    } else {
        tracing::warn!(
            "SWAP_API_URL not set. Serving cases from the fixture; directory and swap request endpoints will return 503."
        );
        None
    };

    let port = config.port;
    let state = AppState::bootstrap(config, client).map_err(|e| {
        tracing::error!("Bootstrap failed: {e}");
        e
    })?;

    let app = pswap_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("pilot swap portal API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Structured tracing. `LOG_FORMAT=json` switches to JSON lines.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
