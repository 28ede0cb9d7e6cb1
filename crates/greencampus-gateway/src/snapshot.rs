//! Current snapshot holder.
//!
//! Readers get an `Arc<Snapshot>` and never see a half-applied update: a new
//! snapshot is validated in full before it replaces the old one. A failed
//! refresh leaves the previous snapshot in place and records the error.

use std::collections::HashSet;
use std::sync::{Arc, RwLock};
use std::time::SystemTime;

use greencampus_core::error::{GreenCampusError, Result};
use greencampus_core::model::Snapshot;

#[derive(Default)]
struct StoreState {
    current: Option<Arc<Snapshot>>,
    generation: u64,
    last_error: Option<String>,
    last_success: Option<SystemTime>,
    acknowledged: HashSet<u32>,
}

/// Read-side view of the store at one instant.
#[derive(Debug, Clone)]
pub struct StoreView {
    pub snapshot: Option<Arc<Snapshot>>,
    pub generation: u64,
    pub last_error: Option<String>,
    pub last_success: Option<SystemTime>,
    pub acknowledged: HashSet<u32>,
}

#[derive(Default)]
pub struct SnapshotStore {
    inner: RwLock<StoreState>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn poisoned() -> GreenCampusError {
        GreenCampusError::Internal("snapshot store lock poisoned".into())
    }

    /// Validate and swap in `snapshot`. Returns the new generation.
    ///
    /// Acknowledgements are kept only for alerts still present.
    pub fn apply(&self, snapshot: Snapshot) -> Result<u64> {
        snapshot.validate()?;
        let live: HashSet<u32> = snapshot.alerts.iter().map(|a| a.id).collect();
        let snapshot = Arc::new(snapshot);

        let mut g = self.inner.write().map_err(|_| Self::poisoned())?;
        g.acknowledged.retain(|id| live.contains(id));
        g.current = Some(snapshot);
        g.generation += 1;
        g.last_error = None;
        g.last_success = Some(SystemTime::now());
        Ok(g.generation)
    }

    /// Record a failed refresh; the current snapshot is kept.
    pub fn record_failure(&self, err: &GreenCampusError) {
        match self.inner.write() {
            Ok(mut g) => g.last_error = Some(err.to_string()),
            Err(_) => tracing::error!(
                error = %err,
                "snapshot store lock poisoned; refresh failure not recorded"
            ),
        }
    }

    pub fn current(&self) -> Option<Arc<Snapshot>> {
        self.inner.read().ok().and_then(|g| g.current.clone())
    }

    pub fn view(&self) -> Result<StoreView> {
        let g = self.inner.read().map_err(|_| Self::poisoned())?;
        Ok(StoreView {
            snapshot: g.current.clone(),
            generation: g.generation,
            last_error: g.last_error.clone(),
            last_success: g.last_success,
            acknowledged: g.acknowledged.clone(),
        })
    }

    /// Acknowledge every alert of the current snapshot. Returns how many were
    /// newly acknowledged.
    pub fn acknowledge_all(&self) -> Result<usize> {
        let mut g = self.inner.write().map_err(|_| Self::poisoned())?;
        let ids: Vec<u32> = g
            .current
            .as_ref()
            .map(|s| s.alerts.iter().map(|a| a.id).collect())
            .unwrap_or_default();
        Ok(ids.into_iter().filter(|id| g.acknowledged.insert(*id)).count())
    }
}
