//! In-memory topology store.
//!
//! This is the reference implementation of `TopologyStore`.
//! It keeps the rows in one `TopologyRecords` protected by a RwLock, so a
//! load always observes either all or none of a single mutation.
//!
//! The mutators here stand in for the administrative write path of a real
//! deployment; they do no validation. Bad rows are caught by the builder on
//! the next rebuild.
//!
//! Clones share the same rows, so a test can keep a handle for mutation
//! while a `TopologyManager` owns another.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use parking_lot::RwLock;
use async_trait::async_trait;

use crate::model::*;
use crate::{Error, Result};
use super::TopologyStore;

// ============================================================================
// MemoryStore
// ============================================================================

/// In-memory topology rows.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<MemoryInner>,
}

#[derive(Default)]
struct MemoryInner {
    records: RwLock<TopologyRecords>,
    /// Number of successful loads; handy for asserting rebuild traffic.
    loads: AtomicU64,
    /// When set, loads fail with this message.
    fail_with: RwLock<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: TopologyRecords) -> Self {
        let store = Self::new();
        store.replace_all(records);
        store
    }

    /// Swap every row at once.
    pub fn replace_all(&self, records: TopologyRecords) {
        *self.inner.records.write() = records;
    }

    /// Apply several changes as one atomic edit.
    pub fn update<R>(&self, f: impl FnOnce(&mut TopologyRecords) -> R) -> R {
        f(&mut self.inner.records.write())
    }

    pub fn insert_floor(&self, floor: Floor) {
        self.inner.records.write().floors.push(floor);
    }

    pub fn insert_waypoint(&self, waypoint: Waypoint) {
        self.inner.records.write().waypoints.push(waypoint);
    }

    pub fn insert_edge(&self, edge: Edge) {
        self.inner.records.write().edges.push(edge);
    }

    pub fn insert_room(&self, room: Room) {
        self.inner.records.write().rooms.push(room);
    }

    pub fn insert_kiosk(&self, kiosk: Kiosk) {
        self.inner.records.write().kiosks.push(kiosk);
    }

    /// Remove an edge. Returns true if it existed.
    pub fn remove_edge(&self, id: EdgeId) -> bool {
        let mut records = self.inner.records.write();
        let before = records.edges.len();
        records.edges.retain(|e| e.id != id);
        records.edges.len() != before
    }

    /// Remove a waypoint. Edges, rooms and kiosks pointing at it are left
    /// alone, mirroring a store without foreign keys.
    pub fn remove_waypoint(&self, id: WaypointId) -> bool {
        let mut records = self.inner.records.write();
        let before = records.waypoints.len();
        records.waypoints.retain(|w| w.id != id);
        records.waypoints.len() != before
    }

    /// Make subsequent loads fail (simulated outage), or recover with `None`.
    pub fn set_failure(&self, message: Option<String>) {
        *self.inner.fail_with.write() = message;
    }

    pub fn load_count(&self) -> u64 {
        self.inner.loads.load(Ordering::Relaxed)
    }
}

// ============================================================================
// TopologyStore impl
// ============================================================================

#[async_trait]
impl TopologyStore for MemoryStore {
    async fn load_topology(&self) -> Result<TopologyRecords> {
        if let Some(message) = self.inner.fail_with.read().clone() {
            return Err(Error::Storage(message));
        }
        let records = self.inner.records.read().clone();
        self.inner.loads.fetch_add(1, Ordering::Relaxed);
        Ok(records)
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

// ============================================================================
// Tests
// ============================================================================
