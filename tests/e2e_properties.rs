//! Property tests for the path engine over random two-floor topologies.
//!
//! Each generated topology has up to 12 waypoints spread over two floors and
//! random edges; same-floor edges are walks, cross-floor edges are elevator
//! or stairs transitions. Results are checked against a Bellman-Ford
//! reference computed straight from the edge list.

use indoor_nav::{
    Edge, EdgeId, EdgeKind, Error, Floor, FloorId, GraphBuilder, PathEngine, RouteConstraints,
    Snapshot, TopologyRecords, Waypoint, WaypointId, WaypointKind,
};
use proptest::prelude::*;

// ============================================================================
// Generators
// ============================================================================

fn topology() -> impl Strategy<Value = TopologyRecords> {
    (2usize..12)
        .prop_flat_map(|n| {
            let floors = proptest::collection::vec(1u64..=2, n);
            let edges = proptest::collection::vec(
                (0..n, 0..n, 0u32..20, any::<bool>(), any::<bool>()),
                0..n * 3,
            );
            (floors, edges)
        })
        .prop_map(|(floors, raw_edges)| {
            let waypoints = floors
                .iter()
                .enumerate()
                .map(|(i, &f)| Waypoint::new(WaypointId(i as u64 + 1), FloorId(f), WaypointKind::Corridor))
                .collect::<Vec<_>>();

            let edges = raw_edges
                .into_iter()
                .enumerate()
                .map(|(i, (a, b, w, one_way, stairs))| {
                    let kind = if floors[a] == floors[b] {
                        EdgeKind::Walk
                    } else if stairs {
                        EdgeKind::StairsTransition
                    } else {
                        EdgeKind::ElevatorTransition
                    };
                    let edge = Edge::new(
                        EdgeId(i as u64 + 1),
                        WaypointId(a as u64 + 1),
                        WaypointId(b as u64 + 1),
                        f64::from(w),
                        kind,
                    );
                    if one_way { edge.one_way() } else { edge }
                })
                .collect();

            TopologyRecords {
                floors: vec![Floor::new(FloorId(1), 0, "F1"), Floor::new(FloorId(2), 1, "F2")],
                waypoints,
                edges,
                ..TopologyRecords::default()
            }
        })
}

// ============================================================================
// Reference implementation
// ============================================================================

/// Cheapest cost from `from` to `to`, or `None` if unreachable.
fn reference_cost(
    records: &TopologyRecords,
    from: WaypointId,
    to: WaypointId,
    constraints: &RouteConstraints,
) -> Option<f64> {
    let n = records.waypoints.len();
    let slot = |id: WaypointId| (id.0 - 1) as usize;
    let mut dist = vec![f64::INFINITY; n];
    dist[slot(from)] = 0.0;

    for _ in 0..n {
        for e in records.edges.iter().filter(|e| constraints.allows(e.kind)) {
            let (a, b) = (slot(e.from), slot(e.to));
            if dist[a] + e.weight < dist[b] {
                dist[b] = dist[a] + e.weight;
            }
            if e.is_bidirectional() && dist[b] + e.weight < dist[a] {
                dist[a] = dist[b] + e.weight;
            }
        }
    }
    dist[slot(to)].is_finite().then_some(dist[slot(to)])
}

/// Does some allowed edge join `a` to `b` in that direction with `weight`?
fn has_edge(records: &TopologyRecords, a: WaypointId, b: WaypointId, weight: f64, kind: EdgeKind) -> bool {
    records.edges.iter().any(|e| {
        e.kind == kind
            && e.weight == weight
            && ((e.from == a && e.to == b) || (e.is_bidirectional() && e.from == b && e.to == a))
    })
}

fn build(records: &TopologyRecords) -> Snapshot {
    GraphBuilder::new(1).build(records.clone()).expect("generated topology is valid")
}

fn pick(records: &TopologyRecords, i: usize) -> WaypointId {
    records.waypoints[i % records.waypoints.len()].id
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_route_to_self_is_single_waypoint(records in topology(), a in 0usize..12) {
        let snap = build(&records);
        let a = pick(&records, a);
        let route = PathEngine::new(&snap).find_path(a, a, &RouteConstraints::any()).unwrap();
        prop_assert_eq!(route.waypoint_ids(), vec![a]);
        prop_assert_eq!(route.total_cost, 0.0);
    }

    #[test]
    fn prop_route_is_valid_and_optimal(records in topology(), a in 0usize..12, b in 0usize..12) {
        let snap = build(&records);
        let (a, b) = (pick(&records, a), pick(&records, b));
        let constraints = RouteConstraints::any();

        match PathEngine::new(&snap).find_path(a, b, &constraints) {
            Ok(route) => {
                prop_assert_eq!(route.start().id, a);
                prop_assert_eq!(route.end().id, b);
                prop_assert_eq!(route.legs.len() + 1, route.waypoints.len());

                let mut sum = 0.0;
                for (pair, leg) in route.waypoints.windows(2).zip(&route.legs) {
                    prop_assert!(has_edge(&records, pair[0].id, pair[1].id, leg.cost, leg.kind));
                    // Floors change exactly at transition legs.
                    prop_assert_eq!(pair[0].floor_id != pair[1].floor_id, leg.kind.is_transition());
                    sum += leg.cost;
                }
                prop_assert_eq!(sum, route.total_cost);
                prop_assert_eq!(Some(route.total_cost), reference_cost(&records, a, b, &constraints));
            }
            Err(Error::NoPath { .. }) => {
                prop_assert_eq!(reference_cost(&records, a, b, &constraints), None);
            }
            Err(other) => prop_assert!(false, "unexpected error {other:?}"),
        }
    }

    #[test]
    fn prop_accessible_routes_avoid_stairs(records in topology(), a in 0usize..12, b in 0usize..12) {
        let snap = build(&records);
        let (a, b) = (pick(&records, a), pick(&records, b));
        let constraints = RouteConstraints::accessible();

        match PathEngine::new(&snap).find_path(a, b, &constraints) {
            Ok(route) => {
                prop_assert!(route.legs.iter().all(|l| l.kind != EdgeKind::StairsTransition));
                prop_assert_eq!(Some(route.total_cost), reference_cost(&records, a, b, &constraints));
            }
            Err(Error::NoPath { .. }) => {
                prop_assert_eq!(reference_cost(&records, a, b, &constraints), None);
            }
            Err(other) => prop_assert!(false, "unexpected error {other:?}"),
        }
    }

    #[test]
    fn prop_same_query_same_answer(records in topology(), a in 0usize..12, b in 0usize..12) {
        let snap = build(&records);
        let (a, b) = (pick(&records, a), pick(&records, b));
        let engine = PathEngine::new(&snap);

        let first = engine.find_path(a, b, &RouteConstraints::any()).ok();
        let second = engine.find_path(a, b, &RouteConstraints::any()).ok();
        prop_assert_eq!(&first, &second);

        // A fresh build of the same rows answers identically too.
        let rebuilt = build(&records);
        let third = PathEngine::new(&rebuilt).find_path(a, b, &RouteConstraints::any()).ok();
        prop_assert_eq!(
            first.map(|r| (r.waypoint_ids(), r.total_cost)),
            third.map(|r| (r.waypoint_ids(), r.total_cost)),
        );
    }
}
