//! # Topology Store Trait
//!
//! This is THE contract between the navigation core and whatever owns the
//! topology rows. The core only ever reads a fully materialized bundle; all
//! mutation happens behind the store, outside the core.
//!
//! ## Implementations
//!
//! | Store | Module | Description |
//! |-------|--------|-------------|
//! | `MemoryStore` | `memory` | In-memory rows for testing/embedding |
//! | `JsonFileStore` | `json` | A `TopologyRecords` JSON document on disk |

pub mod memory;
pub mod json;

use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::model::TopologyRecords;
use crate::Result;

pub use memory::MemoryStore;
pub use json::JsonFileStore;

// ============================================================================
// Store Configuration
// ============================================================================

/// Which store a `Navigator` should open.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StoreConfig {
    /// In-memory, starts empty.
    #[default]
    Memory,

    /// JSON topology document, re-read on every load.
    JsonFile { path: PathBuf },
}

impl StoreConfig {
    /// Instantiate the configured store.
    pub fn open(&self) -> Box<dyn TopologyStore> {
        match self {
            StoreConfig::Memory => Box::new(MemoryStore::new()),
            StoreConfig::JsonFile { path } => Box::new(JsonFileStore::new(path.clone())),
        }
    }
}

// ============================================================================
// TopologyStore Trait
// ============================================================================

/// Read interface onto persisted topology.
///
/// Implementations must return a consistent bundle: rows from one point in
/// time, never half of an administrative change. Any failure surfaces as a
/// failed rebuild; the core does not retry.
#[async_trait]
pub trait TopologyStore: Send + Sync + 'static {
    /// Load every floor, waypoint, edge, room and kiosk.
    async fn load_topology(&self) -> Result<TopologyRecords>;

    /// Short label for logs.
    fn name(&self) -> &'static str {
        "store"
    }
}

#[async_trait]
impl<T: TopologyStore + ?Sized> TopologyStore for Box<T> {
    async fn load_topology(&self) -> Result<TopologyRecords> {
        (**self).load_topology().await
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

#[async_trait]
impl<T: TopologyStore + ?Sized> TopologyStore for std::sync::Arc<T> {
    async fn load_topology(&self) -> Result<TopologyRecords> {
        (**self).load_topology().await
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
