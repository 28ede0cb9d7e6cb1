//! Green Campus gateway.
//!
//! - Loads `greencampus.yaml` (or `$GREENCAMPUS_CONFIG`)
//! - Refreshes the snapshot from the configured source on an interval
//! - Serves the projected dashboard over HTTP

use std::net::SocketAddr;
use tracing_subscriber::{fmt, EnvFilter};

use greencampus_core::error::{GreenCampusError, Result};
use greencampus_gateway::{app_state, config, refresh, router};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "greencampus-gateway failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let path = std::env::var("GREENCAMPUS_CONFIG").unwrap_or_else(|_| "greencampus.yaml".into());
    let cfg = config::load_from_file(&path)?;
    let listen: SocketAddr = cfg.gateway.listen.parse().map_err(|e| {
        GreenCampusError::BadRequest(format!("gateway.listen must be a valid SocketAddr: {e}"))
    })?;

    let state = app_state::AppState::new(cfg)?;
    let refresher = refresh::spawn(state.clone());
    let app = router::build_router(state.clone());

    tracing::info!(%listen, config = %path, "greencampus-gateway starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| GreenCampusError::Internal(format!("bind {listen} failed: {e}")))?;

    let drain_state = state.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutdown requested; draining");
            drain_state.metrics().set_draining();
        })
        .await
        .map_err(|e| GreenCampusError::Internal(format!("server failed: {e}")))?;

    refresher.abort();
    Ok(())
}
