//! TopologyRecords — the raw row bundle a store hands to the builder.

use serde::{Deserialize, Serialize};
use super::{Edge, Floor, Kiosk, Room, Waypoint};

/// Fully materialized topology rows, as loaded from storage.
///
/// Nothing here is validated; `GraphBuilder` does that.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopologyRecords {
    #[serde(default)]
    pub floors: Vec<Floor>,
    #[serde(default)]
    pub waypoints: Vec<Waypoint>,
    #[serde(default)]
    pub edges: Vec<Edge>,
    #[serde(default)]
    pub rooms: Vec<Room>,
    #[serde(default)]
    pub kiosks: Vec<Kiosk>,
}

impl TopologyRecords {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.floors.is_empty()
            && self.waypoints.is_empty()
            && self.edges.is_empty()
            && self.rooms.is_empty()
            && self.kiosks.is_empty()
    }
}
