//! Path engine — weighted shortest path over a [`Snapshot`].
//!
//! Dijkstra with a binary heap keyed by (accumulated cost, waypoint id), so
//! equal-cost frontier entries are always settled lowest id first and the
//! same query on the same snapshot always yields the same route.
//!
//! Search state is sparse (only touched waypoints are recorded); nothing
//! proportional to the whole snapshot is allocated per query.

pub mod constraints;

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Instant;

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;

use crate::graph::Snapshot;
use crate::graph::snapshot::Slot;
use crate::model::*;
use crate::{Error, Result};

pub use constraints::{CancelToken, RouteConstraints, SearchLimits};

// ============================================================================
// Search state
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
struct Frontier {
    cost: f64,
    slot: Slot,
}

impl Eq for Frontier {}

impl Ord for Frontier {
    /// Reversed so the max-heap pops the cheapest, then lowest-id, entry.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.slot.cmp(&self.slot))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Clone, Copy)]
struct Visit {
    cost: f64,
    /// Predecessor slot and the leg that reached this waypoint from it.
    via: Option<(Slot, Leg)>,
    settled: bool,
}

// ============================================================================
// PathEngine
// ============================================================================

/// Shortest-path search bound to one snapshot.
///
/// Holds only a shared borrow; any number of engines may search the same
/// snapshot concurrently.
#[derive(Debug, Clone, Copy)]
pub struct PathEngine<'s> {
    snapshot: &'s Snapshot,
}

impl<'s> PathEngine<'s> {
    pub fn new(snapshot: &'s Snapshot) -> Self {
        Self { snapshot }
    }

    /// Unbudgeted, uncancellable search.
    pub fn find_path(
        &self,
        from: WaypointId,
        to: WaypointId,
        constraints: &RouteConstraints,
    ) -> Result<Route> {
        self.find_path_with(from, to, constraints, &SearchLimits::unlimited(), None)
    }

    /// Search from `from` to `to`.
    ///
    /// Fails with `InvalidWaypoint` before any work if either end is unknown,
    /// `NoPath` when the frontier drains, `Timeout` when `limits` run out and
    /// `Cancelled` when `cancel` fires. Budgets and cancellation are checked
    /// between heap pops.
    pub fn find_path_with(
        &self,
        from: WaypointId,
        to: WaypointId,
        constraints: &RouteConstraints,
        limits: &SearchLimits,
        cancel: Option<&CancelToken>,
    ) -> Result<Route> {
        let snap = self.snapshot;
        let start = snap.slot_of(from).ok_or(Error::InvalidWaypoint(from))?;
        let goal = snap.slot_of(to).ok_or(Error::InvalidWaypoint(to))?;

        if start == goal {
            return Ok(Route::single(snap.version(), snap.waypoint_at(start).clone()));
        }

        // A budget too large to represent as an instant never expires.
        let deadline = limits.timeout().and_then(|t| Instant::now().checked_add(t));
        let mut visits: HashMap<Slot, Visit> = HashMap::new();
        let mut frontier = BinaryHeap::new();
        let mut expanded = 0usize;

        visits.insert(start, Visit { cost: 0.0, via: None, settled: false });
        frontier.push(Frontier { cost: 0.0, slot: start });

        while let Some(Frontier { cost, slot }) = frontier.pop() {
            if cancel.is_some_and(CancelToken::is_cancelled) {
                tracing::debug!(%from, %to, expanded, "path search cancelled");
                return Err(Error::Cancelled);
            }

            let Some(visit) = visits.get_mut(&slot) else { continue };
            if visit.settled || cost > visit.cost {
                continue; // stale heap entry
            }
            visit.settled = true;

            if slot == goal {
                tracing::trace!(%from, %to, expanded, cost, "path found");
                return Ok(self.reconstruct(&visits, start, goal));
            }

            if limits.max_expansions.is_some_and(|max| expanded >= max)
                || deadline.is_some_and(|d| Instant::now() >= d)
            {
                tracing::debug!(%from, %to, expanded, "path search budget exhausted");
                return Err(Error::Timeout { expanded });
            }
            expanded += 1;

            for link in snap.links(slot) {
                if !constraints.allows(link.kind) {
                    continue;
                }
                let next = cost + link.weight;
                let leg = Leg { edge: link.edge, kind: link.kind, cost: link.weight };
                match visits.entry(link.to) {
                    Entry::Occupied(mut e) => {
                        let v = e.get_mut();
                        if v.settled || next >= v.cost {
                            continue;
                        }
                        v.cost = next;
                        v.via = Some((slot, leg));
                    }
                    Entry::Vacant(e) => {
                        e.insert(Visit { cost: next, via: Some((slot, leg)), settled: false });
                    }
                }
                frontier.push(Frontier { cost: next, slot: link.to });
            }
        }

        tracing::trace!(%from, %to, expanded, "no path");
        Err(Error::NoPath { from, to })
    }

    /// Walk predecessor links back from `goal`.
    fn reconstruct(&self, visits: &HashMap<Slot, Visit>, start: Slot, goal: Slot) -> Route {
        let snap = self.snapshot;
        let mut chain = Vec::new();
        let mut cursor = goal;
        while let Some((prev, leg)) = visits.get(&cursor).and_then(|v| v.via) {
            chain.push((leg, cursor));
            cursor = prev;
        }
        debug_assert_eq!(cursor, start);

        let mut route = Route::single(snap.version(), snap.waypoint_at(start).clone());
        for (leg, slot) in chain.into_iter().rev() {
            route.append(leg, snap.waypoint_at(slot).clone());
        }
        route
    }
}

// ============================================================================
// Tests
// ============================================================================
