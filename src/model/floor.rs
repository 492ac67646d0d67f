//! Floor of a building.

use serde::{Deserialize, Serialize};

/// Opaque floor identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FloorId(pub u64);

impl std::fmt::Display for FloorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One storey of one building.
///
/// `level` orders floors vertically and may be negative for basements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Floor {
    pub id: FloorId,
    pub building_id: u64,
    pub level: i32,
    pub name: String,
}

impl Floor {
    pub fn new(id: FloorId, level: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            building_id: 0,
            level,
            name: name.into(),
        }
    }

    pub fn in_building(mut self, building_id: u64) -> Self {
        self.building_id = building_id;
        self
    }
}
