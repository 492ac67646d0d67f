//! Topology manager — owns the published snapshot.
//!
//! Readers get the current snapshot with one atomic load and never block.
//! A rebuild loads rows and builds the replacement entirely outside any
//! lock; only the final version check and pointer swap run under the
//! publish mutex. Readers holding the previous `Arc<Snapshot>` keep using it
//! until they drop it.
//!
//! ```text
//! Uninitialized --ok--> Ready(v1) --ok--> Ready(v2) --err--> Ready(v2)
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use arc_swap::ArcSwapOption;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::graph::{GraphBuilder, Snapshot};
use crate::model::TopologyRecords;
use crate::storage::TopologyStore;
use crate::{Error, Result};

/// Readiness report for health checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Health {
    pub ready: bool,
    pub version: u64,
    pub built_at: Option<DateTime<Utc>>,
    pub floors: usize,
    pub waypoints: usize,
    pub edges: usize,
    pub rooms: usize,
    pub warnings: usize,
}

impl Health {
    fn uninitialized() -> Self {
        Self {
            ready: false,
            version: 0,
            built_at: None,
            floors: 0,
            waypoints: 0,
            edges: 0,
            rooms: 0,
            warnings: 0,
        }
    }

    fn of(snapshot: &Snapshot) -> Self {
        Self {
            ready: true,
            version: snapshot.version(),
            built_at: Some(snapshot.built_at()),
            floors: snapshot.floor_count(),
            waypoints: snapshot.waypoint_count(),
            edges: snapshot.edge_count(),
            rooms: snapshot.room_count(),
            warnings: snapshot.warnings().len(),
        }
    }
}

/// Sole owner of the published topology.
pub struct TopologyManager<S: TopologyStore> {
    store: S,
    published: ArcSwapOption<Snapshot>,
    publish_lock: Mutex<()>,
    next_version: AtomicU64,
}

impl<S: TopologyStore> TopologyManager<S> {
    /// A manager with nothing published yet.
    pub fn new(store: S) -> Self {
        Self {
            store,
            published: ArcSwapOption::empty(),
            publish_lock: Mutex::new(()),
            next_version: AtomicU64::new(1),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// The last successfully published snapshot, or `None` before the first
    /// successful rebuild. Never blocks.
    pub fn current(&self) -> Option<Arc<Snapshot>> {
        self.published.load_full()
    }

    /// Like [`current`](Self::current) but `Err(NotReady)` when empty.
    pub fn snapshot(&self) -> Result<Arc<Snapshot>> {
        self.current().ok_or(Error::NotReady)
    }

    pub fn is_ready(&self) -> bool {
        self.published.load().is_some()
    }

    pub fn health(&self) -> Health {
        match self.published.load().as_deref() {
            Some(snapshot) => Health::of(snapshot),
            None => Health::uninitialized(),
        }
    }

    /// Reload rows from the store, build, and publish.
    ///
    /// On failure the published snapshot is untouched. Returns the version
    /// current after the call.
    pub async fn rebuild(&self) -> Result<u64> {
        let version = self.next_version.fetch_add(1, Ordering::Relaxed);
        let records = match self.store.load_topology().await {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(version, store = self.store.name(), error = %e, "topology load failed");
                return Err(e);
            }
        };
        self.build_and_publish(version, records)
    }

    /// Build and publish from rows the caller already has.
    pub fn rebuild_from(&self, records: TopologyRecords) -> Result<u64> {
        let version = self.next_version.fetch_add(1, Ordering::Relaxed);
        self.build_and_publish(version, records)
    }

    fn build_and_publish(&self, version: u64, records: TopologyRecords) -> Result<u64> {
        let snapshot = GraphBuilder::new(version).build(records)?;
        Ok(self.publish(snapshot))
    }

    /// Swap in `snapshot` unless a newer version was published while it was
    /// being built.
    fn publish(&self, snapshot: Snapshot) -> u64 {
        let _guard = self.publish_lock.lock();

        if let Some(current) = self.published.load().as_deref() {
            if current.version() > snapshot.version() {
                tracing::debug!(
                    discarded = snapshot.version(),
                    current = current.version(),
                    "superseded snapshot discarded",
                );
                return current.version();
            }
        }

        let version = snapshot.version();
        tracing::info!(
            version,
            waypoints = snapshot.waypoint_count(),
            edges = snapshot.edge_count(),
            rooms = snapshot.room_count(),
            warnings = snapshot.warnings().len(),
            "topology published",
        );
        self.published.store(Some(Arc::new(snapshot)));
        version
    }
}
