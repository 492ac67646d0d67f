//! Per-query traversal rules, budgets and cancellation.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::model::EdgeKind;

/// Which edge kinds a query may traverse.
///
/// Constraints never change the graph; they only decide whether a given
/// edge is legal for this query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteConstraints {
    /// Step-free routing: stairs transitions are never taken.
    #[serde(default)]
    pub accessible_only: bool,
    /// Additional edge kinds to avoid.
    #[serde(default)]
    pub excluded: Vec<EdgeKind>,
}

impl RouteConstraints {
    /// No restrictions.
    pub fn any() -> Self {
        Self::default()
    }

    pub fn accessible() -> Self {
        Self { accessible_only: true, excluded: Vec::new() }
    }

    pub fn excluding(mut self, kind: EdgeKind) -> Self {
        if !self.excluded.contains(&kind) {
            self.excluded.push(kind);
        }
        self
    }

    pub fn allows(&self, kind: EdgeKind) -> bool {
        if self.accessible_only && kind == EdgeKind::StairsTransition {
            return false;
        }
        !self.excluded.contains(&kind)
    }
}

/// Search budget. Exceeding it fails with [`crate::Error::Timeout`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchLimits {
    /// Maximum number of waypoints settled before giving up.
    #[serde(default)]
    pub max_expansions: Option<usize>,
    /// Wall-clock budget in milliseconds.
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

impl SearchLimits {
    pub fn unlimited() -> Self {
        Self::default()
    }

    pub fn with_max_expansions(mut self, n: usize) -> Self {
        self.max_expansions = Some(n);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = Some(timeout.as_millis().min(u64::MAX as u128) as u64);
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

/// Cooperative cancellation flag shared between a caller and a search.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}
