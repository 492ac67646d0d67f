//! # indoor-nav — Multi-Floor Indoor Navigation Engine
//!
//! Routes people through a building: from a kiosk or a known waypoint to a
//! room found by fuzzy keyword, across floors by elevator or stairs.
//!
//! ## Design Principles
//!
//! 1. **Immutable snapshots**: a topology version is built once and never mutated
//! 2. **Atomic publish**: readers load one `Arc<Snapshot>`; rebuilds swap it
//! 3. **Trait-first storage**: `TopologyStore` is the contract with persistence
//! 4. **Deterministic answers**: same snapshot + same query = same route
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use indoor_nav::{Navigator, RouteConstraints, WaypointId};
//!
//! # async fn example() -> indoor_nav::Result<()> {
//! let nav = Navigator::open_memory();
//! // ... populate nav.store() ...
//! nav.rebuild().await?;
//!
//! for m in nav.resolve_destination("library")? {
//!     println!("{} (rank {})", m.room.name, m.rank.score());
//! }
//!
//! let route = nav.route(WaypointId(1), WaypointId(4), &RouteConstraints::accessible())?;
//! for change in route.floor_changes() {
//!     println!("floor {} -> {} via {:?}", change.from_floor, change.to_floor, change.via);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Stores
//!
//! | Store | Config | Description |
//! |-------|--------|-------------|
//! | Memory | `StoreConfig::Memory` | In-memory rows for testing/embedding |
//! | JSON file | `StoreConfig::JsonFile` | Topology document on disk |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod graph;
pub mod index;
pub mod path;
pub mod storage;
pub mod topology;
pub mod config;
pub mod export;

use std::sync::Arc;

// ============================================================================
// Re-exports: Model
// ============================================================================

pub use model::{
    Floor, FloorId, Waypoint, WaypointId, WaypointKind,
    Edge, EdgeId, EdgeKind, EdgeDirection,
    Room, RoomId, Kiosk, KioskId,
    TopologyRecords, Route, Leg, FloorChange,
};

// ============================================================================
// Re-exports: Engine
// ============================================================================

pub use graph::{GraphBuilder, Snapshot, Violation, BuildWarning};
pub use index::{RoomIndex, RoomMatch, MatchRank};
pub use path::{PathEngine, RouteConstraints, SearchLimits, CancelToken};
pub use topology::{TopologyManager, Health};

// ============================================================================
// Re-exports: Storage / config
// ============================================================================

pub use storage::{TopologyStore, StoreConfig, MemoryStore, JsonFileStore};
pub use config::NavigatorConfig;

// ============================================================================
// Top-level Navigator handle
// ============================================================================

/// A route from a kiosk to the room its query resolved to.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct KioskRoute {
    pub kiosk: KioskId,
    pub destination: RoomMatch,
    pub route: Route,
}

/// The primary entry point. A `Navigator` wraps a topology store and serves
/// destination lookups and routes against the currently published snapshot.
pub struct Navigator<S: TopologyStore> {
    topology: TopologyManager<S>,
    config: NavigatorConfig,
}

impl<S: TopologyStore> Navigator<S> {
    /// Create a Navigator over the given store with default settings.
    pub fn with_store(store: S) -> Self {
        Self::with_config(store, NavigatorConfig::default())
    }

    pub fn with_config(store: S, config: NavigatorConfig) -> Self {
        Self { topology: TopologyManager::new(store), config }
    }

    /// Reload the topology from the store and publish it.
    ///
    /// Called by the administrative write path after any change. A failed
    /// rebuild leaves the previous topology serving.
    pub async fn rebuild(&self) -> Result<u64> {
        self.topology.rebuild().await
    }

    /// The published snapshot, if any rebuild has succeeded yet.
    pub fn current(&self) -> Option<Arc<Snapshot>> {
        self.topology.current()
    }

    /// Ranked rooms matching `query`; empty when nothing matches.
    pub fn resolve_destination(&self, query: &str) -> Result<Vec<RoomMatch>> {
        let snapshot = self.topology.snapshot()?;
        let mut matches = snapshot.room_index().resolve(query);
        if self.config.max_matches > 0 {
            matches.truncate(self.config.max_matches);
        }
        Ok(matches)
    }

    /// Shortest route under the configured default budget.
    pub fn route(
        &self,
        from: WaypointId,
        to: WaypointId,
        constraints: &RouteConstraints,
    ) -> Result<Route> {
        self.route_with(from, to, constraints, &self.config.search, None)
    }

    /// Shortest route with an explicit budget and optional cancellation.
    pub fn route_with(
        &self,
        from: WaypointId,
        to: WaypointId,
        constraints: &RouteConstraints,
        limits: &SearchLimits,
        cancel: Option<&CancelToken>,
    ) -> Result<Route> {
        let snapshot = self.topology.snapshot()?;
        PathEngine::new(&snapshot).find_path_with(from, to, constraints, limits, cancel)
    }

    /// Route from a kiosk to the best room matching `query`.
    ///
    /// Kiosk lookup, room resolution and the search all use one snapshot.
    pub fn route_from_kiosk(
        &self,
        kiosk: KioskId,
        query: &str,
        constraints: &RouteConstraints,
    ) -> Result<KioskRoute> {
        let snapshot = self.topology.snapshot()?;
        let origin = snapshot.kiosk(kiosk).ok_or(Error::UnknownKiosk(kiosk))?.waypoint;
        let destination = snapshot
            .room_index()
            .best(query)
            .ok_or_else(|| Error::NotFound(format!("room matching '{query}'")))?;

        let route = PathEngine::new(&snapshot).find_path_with(
            origin,
            destination.room.entrance,
            constraints,
            &self.config.search,
            None,
        )?;
        Ok(KioskRoute { kiosk, destination, route })
    }

    pub fn health(&self) -> Health {
        self.topology.health()
    }

    pub fn config(&self) -> &NavigatorConfig {
        &self.config
    }

    /// Access the underlying store (for the administrative write path).
    pub fn store(&self) -> &S {
        self.topology.store()
    }

    pub fn topology(&self) -> &TopologyManager<S> {
        &self.topology
    }
}

/// In-memory navigator for testing and embedding.
impl Navigator<MemoryStore> {
    pub fn open_memory() -> Self {
        Self::with_store(MemoryStore::new())
    }
}

/// Navigator over whatever store the config names.
impl Navigator<Box<dyn TopologyStore>> {
    pub fn open(config: NavigatorConfig) -> Self {
        let store = config.store.open();
        Self::with_config(store, config)
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Topology validation failed with {} violation(s)", violations.len())]
    Validation { violations: Vec<Violation> },

    #[error("Unknown waypoint: {0}")]
    InvalidWaypoint(WaypointId),

    #[error("No path from waypoint {from} to waypoint {to}")]
    NoPath { from: WaypointId, to: WaypointId },

    #[error("Search budget exceeded after {expanded} expansions")]
    Timeout { expanded: usize },

    #[error("Search cancelled")]
    Cancelled,

    #[error("No topology has been published yet")]
    NotReady,

    #[error("Unknown kiosk: {0}")]
    UnknownKiosk(KioskId),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Caused by the request (stale ids, unknown kiosk), not by the service.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidWaypoint(_) | Error::UnknownKiosk(_) | Error::NotFound(_)
        )
    }

    /// Worth retrying with a larger budget.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Timeout { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
