//! Route — an ordered walk from origin to destination.

use serde::{Deserialize, Serialize};
use super::{EdgeId, EdgeKind, FloorId, Waypoint, WaypointId};

/// One traversed edge between consecutive route waypoints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Leg {
    pub edge: EdgeId,
    pub kind: EdgeKind,
    pub cost: f64,
}

/// A point along a route where the floor changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorChange {
    /// Index into `Route::legs` of the transition leg.
    pub at: usize,
    pub from_floor: FloorId,
    pub to_floor: FloorId,
    pub via: EdgeKind,
}

/// A route: waypoint -[leg]-> waypoint -[leg]-> waypoint ...
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Snapshot version the route was computed against.
    pub version: u64,
    /// Waypoints in traversal order. Always has one more element than `legs`.
    pub waypoints: Vec<Waypoint>,
    pub legs: Vec<Leg>,
    pub total_cost: f64,
}

impl Route {
    pub fn single(version: u64, waypoint: Waypoint) -> Self {
        Self {
            version,
            waypoints: vec![waypoint],
            legs: Vec::new(),
            total_cost: 0.0,
        }
    }

    /// Number of legs walked; zero for a route to the origin itself.
    pub fn hops(&self) -> usize {
        self.legs.len()
    }

    /// True when origin and destination are the same waypoint.
    pub fn is_empty(&self) -> bool {
        self.legs.is_empty()
    }

    pub fn start(&self) -> &Waypoint {
        self.waypoints.first().expect("Route always has at least one waypoint")
    }

    pub fn end(&self) -> &Waypoint {
        self.waypoints.last().expect("Route always has at least one waypoint")
    }

    /// Extend the route with a leg and the waypoint it arrives at.
    pub fn append(&mut self, leg: Leg, waypoint: Waypoint) {
        self.total_cost += leg.cost;
        self.legs.push(leg);
        self.waypoints.push(waypoint);
    }

    pub fn waypoint_ids(&self) -> Vec<WaypointId> {
        self.waypoints.iter().map(|w| w.id).collect()
    }

    /// Floors in visit order, consecutive repeats collapsed.
    pub fn floors(&self) -> Vec<FloorId> {
        let mut floors: Vec<FloorId> = self.waypoints.iter().map(|w| w.floor_id).collect();
        floors.dedup();
        floors
    }

    /// Every leg whose endpoints sit on different floors.
    pub fn floor_changes(&self) -> Vec<FloorChange> {
        self.waypoints
            .windows(2)
            .zip(&self.legs)
            .enumerate()
            .filter(|(_, (pair, _))| pair[0].floor_id != pair[1].floor_id)
            .map(|(at, (pair, leg))| FloorChange {
                at,
                from_floor: pair[0].floor_id,
                to_floor: pair[1].floor_id,
                via: leg.kind,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WaypointKind;

    fn wp(id: u64, floor: u64, kind: WaypointKind) -> Waypoint {
        Waypoint::new(WaypointId(id), FloorId(floor), kind)
    }

    fn leg(edge: u64, kind: EdgeKind, cost: f64) -> Leg {
        Leg { edge: EdgeId(edge), kind, cost }
    }

    #[test]
    fn test_single_route_has_no_cost() {
        let route = Route::single(1, wp(1, 1, WaypointKind::Kiosk));
        assert!(route.is_empty());
        assert_eq!(route.hops(), 0);
        assert_eq!(route.total_cost, 0.0);
        assert_eq!(route.start().id, route.end().id);
    }

    #[test]
    fn test_floor_changes_follow_transition_legs() {
        let mut route = Route::single(1, wp(1, 1, WaypointKind::Corridor));
        route.append(leg(1, EdgeKind::Walk, 5.0), wp(2, 1, WaypointKind::Elevator));
        route.append(leg(2, EdgeKind::ElevatorTransition, 10.0), wp(3, 2, WaypointKind::Elevator));
        route.append(leg(3, EdgeKind::StairsTransition, 4.0), wp(4, 3, WaypointKind::Stairs));
        route.append(leg(4, EdgeKind::Walk, 3.0), wp(5, 3, WaypointKind::RoomEntrance));

        assert_eq!(route.total_cost, 22.0);
        assert_eq!(route.hops(), 4);
        assert_eq!(route.floors(), vec![FloorId(1), FloorId(2), FloorId(3)]);

        let changes = route.floor_changes();
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].at, 1);
        assert_eq!(changes[0].via, EdgeKind::ElevatorTransition);
        assert_eq!(changes[1].from_floor, FloorId(2));
        assert_eq!(changes[1].to_floor, FloorId(3));
        assert_eq!(changes[1].via, EdgeKind::StairsTransition);
    }
}
