//! Metrics sources (the `fetch_metrics` contract).
//!
//! A source produces one whole [`Snapshot`] per call. The refresh loop calls
//! it at most once per cycle and never retries inside a cycle.

use std::sync::Arc;

use async_trait::async_trait;

use greencampus_core::error::{GreenCampusError, Result};
use greencampus_core::fixtures::sample_snapshot;
use greencampus_core::model::Snapshot;

use crate::config::{SourceConfig, SourceKind};

#[async_trait]
pub trait MetricsSource: Send + Sync {
    /// Short name used in logs and metric labels.
    fn name(&self) -> &'static str;
    async fn fetch_metrics(&self) -> Result<Snapshot>;
}

/// Serves the built-in sample campus.
#[derive(Debug, Default)]
pub struct FixtureSource;

impl FixtureSource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MetricsSource for FixtureSource {
    fn name(&self) -> &'static str {
        "fixture"
    }

    async fn fetch_metrics(&self) -> Result<Snapshot> {
        Ok(sample_snapshot())
    }
}

/// Reads a JSON snapshot from disk on every fetch.
#[derive(Debug)]
pub struct FileSource {
    path: String,
}

impl FileSource {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl MetricsSource for FileSource {
    fn name(&self) -> &'static str {
        "file"
    }

    async fn fetch_metrics(&self) -> Result<Snapshot> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| GreenCampusError::Fetch(format!("read {} failed: {e}", self.path)))?;
        serde_json::from_str(&raw)
            .map_err(|e| GreenCampusError::Fetch(format!("invalid snapshot {}: {e}", self.path)))
    }
}

/// Build the configured source.
pub fn from_config(cfg: &SourceConfig) -> Result<Arc<dyn MetricsSource>> {
    match cfg.kind {
        SourceKind::Fixture => Ok(Arc::new(FixtureSource::new())),
        SourceKind::File => {
            let path = cfg.path.clone().ok_or_else(|| {
                GreenCampusError::BadRequest("source.path is required for kind=file".into())
            })?;
            Ok(Arc::new(FileSource::new(path)))
        }
    }
}
