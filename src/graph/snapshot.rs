//! Immutable, versioned materialization of one topology.
//!
//! Waypoints are stored densely, ordered by id, and addressed internally by
//! their position ("slot"). Because slot order equals id order, any tie-break
//! on slot is also a tie-break on waypoint id.

use chrono::{DateTime, Utc};
use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::index::RoomIndex;
use crate::model::*;
use super::BuildWarning;

/// Dense waypoint position inside a snapshot.
pub(crate) type Slot = u32;

/// One outgoing traversal from a waypoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub(crate) to: Slot,
    pub weight: f64,
    pub kind: EdgeKind,
    pub edge: EdgeId,
}

pub(crate) type Adjacency = SmallVec<[Link; 4]>;

/// One consistent version of the building topology.
///
/// Never mutated after construction; share it behind an `Arc`.
#[derive(Debug)]
pub struct Snapshot {
    pub(crate) version: u64,
    pub(crate) built_at: DateTime<Utc>,
    /// Ordered by level, then id.
    pub(crate) floors: Vec<Floor>,
    pub(crate) floor_slots: HashMap<FloorId, usize>,
    /// Ordered by id.
    pub(crate) waypoints: Vec<Waypoint>,
    pub(crate) waypoint_slots: HashMap<WaypointId, Slot>,
    /// Parallel to `waypoints`.
    pub(crate) adjacency: Vec<Adjacency>,
    /// Ordered by id.
    pub(crate) edges: Vec<Edge>,
    pub(crate) kiosks: HashMap<KioskId, Kiosk>,
    pub(crate) rooms: RoomIndex,
    pub(crate) warnings: Vec<BuildWarning>,
}

impl Snapshot {
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn built_at(&self) -> DateTime<Utc> {
        self.built_at
    }

    /// Non-fatal defects found while building.
    pub fn warnings(&self) -> &[BuildWarning] {
        &self.warnings
    }

    // ========================================================================
    // Lookups
    // ========================================================================

    pub fn floor(&self, id: FloorId) -> Option<&Floor> {
        self.floor_slots.get(&id).map(|&i| &self.floors[i])
    }

    /// Floors ordered bottom to top.
    pub fn floors(&self) -> &[Floor] {
        &self.floors
    }

    pub fn waypoint(&self, id: WaypointId) -> Option<&Waypoint> {
        self.slot_of(id).map(|s| self.waypoint_at(s))
    }

    pub fn contains_waypoint(&self, id: WaypointId) -> bool {
        self.waypoint_slots.contains_key(&id)
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn waypoints_on_floor(&self, floor: FloorId) -> impl Iterator<Item = &Waypoint> {
        self.waypoints.iter().filter(move |w| w.floor_id == floor)
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(id)
    }

    pub fn rooms_on_floor(&self, floor: FloorId) -> impl Iterator<Item = &Room> {
        self.rooms.rooms().filter(move |r| r.floor_id == floor)
    }

    pub fn room_index(&self) -> &RoomIndex {
        &self.rooms
    }

    pub fn kiosk(&self, id: KioskId) -> Option<&Kiosk> {
        self.kiosks.get(&id)
    }

    /// Outgoing `(neighbor, link)` pairs of a waypoint, honoring edge
    /// direction. Empty for unknown ids.
    pub fn neighbors(&self, id: WaypointId) -> Vec<(WaypointId, Link)> {
        self.slot_of(id)
            .map(|s| {
                self.links(s)
                    .iter()
                    .map(|l| (self.waypoint_at(l.to).id, *l))
                    .collect()
            })
            .unwrap_or_default()
    }

    // ========================================================================
    // Counts
    // ========================================================================

    pub fn floor_count(&self) -> usize {
        self.floors.len()
    }

    pub fn waypoint_count(&self) -> usize {
        self.waypoints.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn kiosk_count(&self) -> usize {
        self.kiosks.len()
    }

    // ========================================================================
    // Export
    // ========================================================================

    /// Rebuild the row bundle this snapshot was built from.
    pub fn to_records(&self) -> TopologyRecords {
        let mut kiosks: Vec<Kiosk> = self.kiosks.values().cloned().collect();
        kiosks.sort_by_key(|k| k.id);
        TopologyRecords {
            floors: self.floors.clone(),
            waypoints: self.waypoints.clone(),
            edges: self.edges.clone(),
            rooms: self.rooms.rooms().cloned().collect(),
            kiosks,
        }
    }

    // ========================================================================
    // Slot access (path engine)
    // ========================================================================

    pub(crate) fn slot_of(&self, id: WaypointId) -> Option<Slot> {
        self.waypoint_slots.get(&id).copied()
    }

    pub(crate) fn waypoint_at(&self, slot: Slot) -> &Waypoint {
        &self.waypoints[slot as usize]
    }

    pub(crate) fn links(&self, slot: Slot) -> &[Link] {
        &self.adjacency[slot as usize]
    }
}
