//! Edge — a weighted connection between two waypoints.

use serde::{Deserialize, Serialize};
use super::{WaypointId, WaypointKind};

/// Opaque edge identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(pub u64);

impl std::fmt::Display for EdgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How an edge is traversed.
///
/// `Walk` stays on one floor; the transition kinds always change floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    Walk,
    ElevatorTransition,
    StairsTransition,
}

impl EdgeKind {
    pub fn is_transition(self) -> bool {
        !matches!(self, EdgeKind::Walk)
    }

    /// The shaft waypoint kind a transition edge belongs to.
    pub fn shaft_kind(self) -> Option<WaypointKind> {
        match self {
            EdgeKind::Walk => None,
            EdgeKind::ElevatorTransition => Some(WaypointKind::Elevator),
            EdgeKind::StairsTransition => Some(WaypointKind::Stairs),
        }
    }
}

/// Traversal direction of an edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeDirection {
    #[default]
    Bidirectional,
    /// Only `from -> to` is traversable (e.g. a descending-only escalator).
    OneWay,
}

/// A connection between two waypoints with a non-negative traversal cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub from: WaypointId,
    pub to: WaypointId,
    pub weight: f64,
    #[serde(default)]
    pub direction: EdgeDirection,
    pub kind: EdgeKind,
}

impl Edge {
    pub fn new(id: EdgeId, from: WaypointId, to: WaypointId, weight: f64, kind: EdgeKind) -> Self {
        Self {
            id,
            from,
            to,
            weight,
            direction: EdgeDirection::Bidirectional,
            kind,
        }
    }

    pub fn walk(id: EdgeId, from: WaypointId, to: WaypointId, weight: f64) -> Self {
        Self::new(id, from, to, weight, EdgeKind::Walk)
    }

    pub fn one_way(mut self) -> Self {
        self.direction = EdgeDirection::OneWay;
        self
    }

    pub fn is_bidirectional(&self) -> bool {
        self.direction == EdgeDirection::Bidirectional
    }
}
