//! Waypoint — the atomic node of the routing graph.

use serde::{Deserialize, Serialize};
use super::FloorId;

/// Opaque waypoint identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WaypointId(pub u64);

impl std::fmt::Display for WaypointId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What physically sits at a waypoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaypointKind {
    Corridor,
    RoomEntrance,
    Elevator,
    Stairs,
    Kiosk,
    Exterior,
}

impl WaypointKind {
    /// Elevator and stairs waypoints are the per-floor stops of a shaft.
    pub fn is_shaft(self) -> bool {
        matches!(self, WaypointKind::Elevator | WaypointKind::Stairs)
    }
}

/// A navigable point on exactly one floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub id: WaypointId,
    pub floor_id: FloorId,
    pub x: f64,
    pub y: f64,
    pub kind: WaypointKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Waypoint {
    pub fn new(id: WaypointId, floor_id: FloorId, kind: WaypointKind) -> Self {
        Self {
            id,
            floor_id,
            x: 0.0,
            y: 0.0,
            kind,
            name: None,
        }
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}
