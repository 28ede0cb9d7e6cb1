//! Snapshot refresh cycle.
//!
//! One fetch per cycle. Failures keep the previous snapshot and are recorded
//! on the store; the next tick tries again.

use std::time::{Duration, Instant};

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use greencampus_core::error::Result;

use crate::app_state::AppState;

/// Fetch, validate and apply one snapshot. Returns the new generation.
pub async fn refresh_once(state: &AppState) -> Result<u64> {
    let source = state.source();
    let started = Instant::now();
    let fetched = source.fetch_metrics().await;
    state
        .metrics()
        .fetch_duration
        .observe(&[("source", source.name())], started.elapsed());

    let applied = fetched.and_then(|snap| state.store().apply(snap));
    match &applied {
        Ok(generation) => {
            state
                .metrics()
                .refreshes
                .inc(&[("source", source.name()), ("outcome", "ok")]);
            state.metrics().snapshot_generation.set(
                &[("source", source.name())],
                i64::try_from(*generation).unwrap_or(i64::MAX),
            );
            tracing::info!(source = source.name(), generation, "snapshot refreshed");
        }
        Err(e) => {
            state
                .metrics()
                .refreshes
                .inc(&[("source", source.name()), ("outcome", e.client_code().as_str())]);
            state.store().record_failure(e);
            tracing::warn!(source = source.name(), error = %e, "snapshot refresh failed; keeping previous");
        }
    }
    applied
}

/// Spawn the periodic refresh task. The first tick fires immediately.
pub fn spawn(state: AppState) -> JoinHandle<()> {
    let period = Duration::from_millis(state.cfg().gateway.refresh_interval_ms);
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            if state.is_draining() {
                tracing::info!("draining; refresh loop stopped");
                break;
            }
            let _ = refresh_once(&state).await;
        }
    })
}
