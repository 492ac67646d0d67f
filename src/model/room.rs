//! Rooms and kiosks — the named places a route starts or ends at.

use serde::{Deserialize, Serialize};
use super::{FloorId, WaypointId};

/// Opaque room identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub u64);

impl std::fmt::Display for RoomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque kiosk identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KioskId(pub u64);

impl std::fmt::Display for KioskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A destination room. Routes to it end at `entrance`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub floor_id: FloorId,
    pub entrance: WaypointId,
    pub name: String,
    /// Free-form comma/space separated search terms. Rooms created before
    /// keywords existed carry `None`.
    #[serde(default)]
    pub keywords: Option<String>,
}

impl Room {
    pub fn new(id: RoomId, floor_id: FloorId, entrance: WaypointId, name: impl Into<String>) -> Self {
        Self {
            id,
            floor_id,
            entrance,
            name: name.into(),
            keywords: None,
        }
    }

    pub fn with_keywords(mut self, keywords: impl Into<String>) -> Self {
        self.keywords = Some(keywords.into());
        self
    }
}

/// A fixed information kiosk; its waypoint is the default route origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kiosk {
    pub id: KioskId,
    pub waypoint: WaypointId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Kiosk {
    pub fn new(id: KioskId, waypoint: WaypointId) -> Self {
        Self { id, waypoint, name: None }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}
