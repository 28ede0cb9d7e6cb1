//! Shared application state for the Green Campus gateway.
//!
//! Wires the metrics source, snapshot store, renderers and metrics registry.
//! Startup errors are returned, not panicked on.

use std::sync::Arc;

use greencampus_core::error::Result;
use greencampus_core::render::{
    ChartRenderer, DisabledMapRenderer, MapRenderer, SvgChartRenderer, TileMapRenderer,
};

use crate::config::GatewayConfig;
use crate::obs::GatewayMetrics;
use crate::snapshot::SnapshotStore;
use crate::source::{self, MetricsSource};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: GatewayConfig,
    source: Arc<dyn MetricsSource>,
    store: SnapshotStore,
    metrics: GatewayMetrics,
    chart: Arc<dyn ChartRenderer>,
    map: Arc<dyn MapRenderer>,
}

impl AppState {
    /// Build application state with the source named in the config.
    pub fn new(cfg: GatewayConfig) -> Result<Self> {
        let source = source::from_config(&cfg.source)?;
        Ok(Self::with_source(cfg, source))
    }

    /// Build application state around an explicit source.
    pub fn with_source(cfg: GatewayConfig, source: Arc<dyn MetricsSource>) -> Self {
        let map: Arc<dyn MapRenderer> = match std::env::var(&cfg.map.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Arc::new(TileMapRenderer::new(key.trim())),
            _ => {
                tracing::warn!(env = %cfg.map.api_key_env, "map tile key not set; map tiles disabled");
                Arc::new(DisabledMapRenderer)
            }
        };

        tracing::info!(source = source.name(), "metrics source configured");

        Self {
            inner: Arc::new(AppStateInner {
                cfg,
                source,
                store: SnapshotStore::new(),
                metrics: GatewayMetrics::default(),
                chart: Arc::new(SvgChartRenderer),
                map,
            }),
        }
    }

    pub fn cfg(&self) -> &GatewayConfig {
        &self.inner.cfg
    }

    pub fn source(&self) -> Arc<dyn MetricsSource> {
        Arc::clone(&self.inner.source)
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.inner.store
    }

    pub fn metrics(&self) -> &GatewayMetrics {
        &self.inner.metrics
    }

    pub fn chart(&self) -> Arc<dyn ChartRenderer> {
        Arc::clone(&self.inner.chart)
    }

    pub fn map(&self) -> Arc<dyn MapRenderer> {
        Arc::clone(&self.inner.map)
    }

    pub fn is_draining(&self) -> bool {
        self.inner.metrics.is_draining()
    }
}
