// Royalty Ledger - Web Server
// REST API with Axum over an in-memory ledger

use anyhow::{Context, Result};
use royalty_ledger::{build_ledger, build_router, telemetry, AppState, ServerConfig};

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init();
    tracing::info!(version = royalty_ledger::VERSION, "starting royalty ledger server");

    let config = ServerConfig::from_env()?;

    // State lives for the process lifetime only
    let ledger = build_ledger(&config)?;
    let app = build_router(AppState::new(ledger));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    tracing::info!("Server live on http://localhost:{}", config.port);

    axum::serve(listener, app)
        .await
        .context("Server error")?;

    Ok(())
}
