//! Graph builder — raw topology rows to a validated [`Snapshot`].
//!
//! Every structural defect is collected before failing, so an operator sees
//! the whole list at once instead of fixing one record per rebuild.

use chrono::{DateTime, Utc};
use hashbrown::{HashMap, HashSet};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::index::RoomIndex;
use crate::model::*;
use crate::{Error, Result};
use super::snapshot::{Adjacency, Link, Slot, Snapshot};

// ============================================================================
// Violations and warnings
// ============================================================================

/// A structural defect that prevents a topology from being published.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[serde(rename_all = "snake_case")]
pub enum Violation {
    #[error("duplicate floor id {0}")]
    DuplicateFloor(FloorId),

    #[error("duplicate waypoint id {0}")]
    DuplicateWaypoint(WaypointId),

    #[error("duplicate edge id {0}")]
    DuplicateEdge(EdgeId),

    #[error("duplicate room id {0}")]
    DuplicateRoom(RoomId),

    #[error("duplicate kiosk id {0}")]
    DuplicateKiosk(KioskId),

    #[error("floors {first} and {floor} both sit at level {level} of building {building}")]
    DuplicateLevel {
        floor: FloorId,
        first: FloorId,
        building: u64,
        level: i32,
    },

    #[error("waypoint {waypoint} is on unknown floor {floor}")]
    WaypointUnknownFloor { waypoint: WaypointId, floor: FloorId },

    #[error("edge {edge} references missing waypoint {waypoint}")]
    DanglingEdge { edge: EdgeId, waypoint: WaypointId },

    #[error("edge {edge} has invalid weight {weight}")]
    InvalidWeight { edge: EdgeId, weight: f64 },

    #[error("edge {edge} of kind {kind:?} joins floors {from_floor} and {to_floor}")]
    EdgeFloorMismatch {
        edge: EdgeId,
        kind: EdgeKind,
        from_floor: FloorId,
        to_floor: FloorId,
    },

    #[error("room {room} is on unknown floor {floor}")]
    RoomUnknownFloor { room: RoomId, floor: FloorId },

    #[error("room {room} entrance waypoint {entrance} does not exist")]
    MissingEntrance { room: RoomId, entrance: WaypointId },

    #[error("room {room} is on floor {floor} but its entrance is on floor {entrance_floor}")]
    EntranceFloorMismatch {
        room: RoomId,
        floor: FloorId,
        entrance_floor: FloorId,
    },

    #[error("kiosk {kiosk} references missing waypoint {waypoint}")]
    KioskWaypointMissing { kiosk: KioskId, waypoint: WaypointId },
}

/// A defect tolerated in published topologies.
///
/// Partially connected construction data is common, so these are logged and
/// kept on the snapshot rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "warning", rename_all = "snake_case")]
pub enum BuildWarning {
    /// An elevator or stairs waypoint with no transition edge of its own kind.
    UnlinkedShaft { waypoint: WaypointId, kind: WaypointKind },
    /// A transition edge touching a shaft of the other kind, e.g. a stairs
    /// transition ending at an elevator waypoint.
    ShaftKindMismatch {
        waypoint: WaypointId,
        kind: WaypointKind,
        edge: EdgeId,
        via: EdgeKind,
    },
}

impl std::fmt::Display for BuildWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildWarning::UnlinkedShaft { waypoint, kind } => {
                write!(f, "{kind:?} waypoint {waypoint} has no transition edge")
            }
            BuildWarning::ShaftKindMismatch { waypoint, kind, edge, via } => {
                write!(f, "{via:?} edge {edge} ends at {kind:?} waypoint {waypoint}")
            }
        }
    }
}

// ============================================================================
// GraphBuilder
// ============================================================================

/// Converts [`TopologyRecords`] into a [`Snapshot`].
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    version: u64,
    built_at: Option<DateTime<Utc>>,
}

impl GraphBuilder {
    /// A builder whose snapshots carry `version`.
    pub fn new(version: u64) -> Self {
        Self { version, built_at: None }
    }

    /// Pin the build timestamp instead of reading the clock.
    pub fn built_at(mut self, at: DateTime<Utc>) -> Self {
        self.built_at = Some(at);
        self
    }

    /// Validate `records` and build the snapshot.
    ///
    /// Fails with [`Error::Validation`] carrying every violation found.
    pub fn build(&self, records: TopologyRecords) -> Result<Snapshot> {
        let violations = validate(&records);
        if !violations.is_empty() {
            tracing::warn!(
                version = self.version,
                violations = violations.len(),
                "topology rejected",
            );
            return Err(Error::Validation { violations });
        }

        let TopologyRecords { mut floors, mut waypoints, mut edges, rooms, kiosks } = records;

        floors.sort_by_key(|f| (f.level, f.id));
        waypoints.sort_by_key(|w| w.id);
        edges.sort_by_key(|e| e.id);

        let floor_slots: HashMap<FloorId, usize> =
            floors.iter().enumerate().map(|(i, f)| (f.id, i)).collect();
        let waypoint_slots: HashMap<WaypointId, Slot> = waypoints
            .iter()
            .enumerate()
            .map(|(i, w)| (w.id, i as Slot))
            .collect();

        let adjacency = build_adjacency(&waypoints, &waypoint_slots, &edges);
        let warnings = shaft_warnings(&waypoints, &edges);
        for warning in &warnings {
            tracing::warn!(version = self.version, "{warning}");
        }

        let kiosks: HashMap<KioskId, Kiosk> = kiosks.into_iter().map(|k| (k.id, k)).collect();
        let rooms = RoomIndex::build(rooms);

        tracing::debug!(
            version = self.version,
            floors = floors.len(),
            waypoints = waypoints.len(),
            edges = edges.len(),
            rooms = rooms.len(),
            kiosks = kiosks.len(),
            "snapshot built",
        );

        Ok(Snapshot {
            version: self.version,
            built_at: self.built_at.unwrap_or_else(Utc::now),
            floors,
            floor_slots,
            waypoints,
            waypoint_slots,
            adjacency,
            edges,
            kiosks,
            rooms,
            warnings,
        })
    }
}

// ============================================================================
// Validation
// ============================================================================

/// First occurrence wins; later duplicates are reported.
fn index_unique<'a, T, K>(
    items: &'a [T],
    key: impl Fn(&T) -> K,
    duplicate: impl Fn(K) -> Violation,
    violations: &mut Vec<Violation>,
) -> HashMap<K, &'a T>
where
    K: std::hash::Hash + Eq + Copy,
{
    let mut map = HashMap::with_capacity(items.len());
    for item in items {
        let k = key(item);
        if map.contains_key(&k) {
            violations.push(duplicate(k));
        } else {
            map.insert(k, item);
        }
    }
    map
}

fn validate(records: &TopologyRecords) -> Vec<Violation> {
    let mut violations = Vec::new();

    let floors = index_unique(&records.floors, |f| f.id, Violation::DuplicateFloor, &mut violations);
    let waypoints = index_unique(&records.waypoints, |w| w.id, Violation::DuplicateWaypoint, &mut violations);

    let mut levels: HashMap<(u64, i32), FloorId> = HashMap::new();
    for f in &records.floors {
        if !floors.get(&f.id).is_some_and(|kept| std::ptr::eq(*kept, f)) {
            continue; // already reported as a duplicate id
        }
        match levels.entry((f.building_id, f.level)) {
            hashbrown::hash_map::Entry::Occupied(e) => violations.push(Violation::DuplicateLevel {
                floor: f.id,
                first: *e.get(),
                building: f.building_id,
                level: f.level,
            }),
            hashbrown::hash_map::Entry::Vacant(e) => {
                e.insert(f.id);
            }
        }
    }

    for w in &records.waypoints {
        if !floors.contains_key(&w.floor_id) {
            violations.push(Violation::WaypointUnknownFloor { waypoint: w.id, floor: w.floor_id });
        }
    }

    let mut seen_edges = HashSet::with_capacity(records.edges.len());
    for e in &records.edges {
        if !seen_edges.insert(e.id) {
            violations.push(Violation::DuplicateEdge(e.id));
        }
        if !e.weight.is_finite() || e.weight < 0.0 {
            violations.push(Violation::InvalidWeight { edge: e.id, weight: e.weight });
        }

        let from = waypoints.get(&e.from);
        let to = waypoints.get(&e.to);
        if from.is_none() {
            violations.push(Violation::DanglingEdge { edge: e.id, waypoint: e.from });
        }
        if to.is_none() && e.to != e.from {
            violations.push(Violation::DanglingEdge { edge: e.id, waypoint: e.to });
        }

        if let (Some(from), Some(to)) = (from, to) {
            let same_floor = from.floor_id == to.floor_id;
            if same_floor == e.kind.is_transition() {
                violations.push(Violation::EdgeFloorMismatch {
                    edge: e.id,
                    kind: e.kind,
                    from_floor: from.floor_id,
                    to_floor: to.floor_id,
                });
            }
        }
    }

    let mut seen_rooms = HashSet::with_capacity(records.rooms.len());
    for r in &records.rooms {
        if !seen_rooms.insert(r.id) {
            violations.push(Violation::DuplicateRoom(r.id));
        }
        if !floors.contains_key(&r.floor_id) {
            violations.push(Violation::RoomUnknownFloor { room: r.id, floor: r.floor_id });
        }
        match waypoints.get(&r.entrance) {
            None => violations.push(Violation::MissingEntrance { room: r.id, entrance: r.entrance }),
            Some(w) if w.floor_id != r.floor_id => {
                violations.push(Violation::EntranceFloorMismatch {
                    room: r.id,
                    floor: r.floor_id,
                    entrance_floor: w.floor_id,
                });
            }
            Some(_) => {}
        }
    }

    let mut seen_kiosks = HashSet::with_capacity(records.kiosks.len());
    for k in &records.kiosks {
        if !seen_kiosks.insert(k.id) {
            violations.push(Violation::DuplicateKiosk(k.id));
        }
        if !waypoints.contains_key(&k.waypoint) {
            violations.push(Violation::KioskWaypointMissing { kiosk: k.id, waypoint: k.waypoint });
        }
    }

    violations
}

// ============================================================================
// Adjacency
// ============================================================================

/// Directional edges land only in the source's list; bidirectional edges in
/// both. Each list is ordered by (neighbor id, weight, edge id).
fn build_adjacency(
    waypoints: &[Waypoint],
    slots: &HashMap<WaypointId, Slot>,
    edges: &[Edge],
) -> Vec<Adjacency> {
    let mut adjacency: Vec<Adjacency> = vec![SmallVec::new(); waypoints.len()];

    for e in edges {
        // Endpoints were validated above.
        let (Some(&from), Some(&to)) = (slots.get(&e.from), slots.get(&e.to)) else {
            continue;
        };
        adjacency[from as usize].push(Link { to, weight: e.weight, kind: e.kind, edge: e.id });
        if e.is_bidirectional() && from != to {
            adjacency[to as usize].push(Link { to: from, weight: e.weight, kind: e.kind, edge: e.id });
        }
    }

    for links in &mut adjacency {
        links.sort_by(|a, b| {
            a.to.cmp(&b.to)
                .then_with(|| a.weight.total_cmp(&b.weight))
                .then_with(|| a.edge.cmp(&b.edge))
        });
    }
    adjacency
}

fn shaft_warnings(waypoints: &[Waypoint], edges: &[Edge]) -> Vec<BuildWarning> {
    let kinds: HashMap<WaypointId, WaypointKind> = waypoints.iter().map(|w| (w.id, w.kind)).collect();
    let mut linked: HashSet<WaypointId> = HashSet::new();
    let mut warnings = Vec::new();

    for e in edges {
        let Some(shaft) = e.kind.shaft_kind() else { continue };
        for end in [e.from, e.to] {
            match kinds.get(&end) {
                Some(&kind) if kind == shaft => {
                    linked.insert(end);
                }
                Some(&kind) if kind.is_shaft() => warnings.push(BuildWarning::ShaftKindMismatch {
                    waypoint: end,
                    kind,
                    edge: e.id,
                    via: e.kind,
                }),
                _ => {}
            }
        }
    }

    warnings.extend(
        waypoints
            .iter()
            .filter(|w| w.kind.is_shaft() && !linked.contains(&w.id))
            .map(|w| BuildWarning::UnlinkedShaft { waypoint: w.id, kind: w.kind }),
    );
    warnings
}

// ============================================================================
// Tests
// ============================================================================
