//! # Navigation Graph
//!
//! `GraphBuilder` turns raw rows into an immutable `Snapshot`: the adjacency
//! lists the path engine walks, the lookup tables, and the room index.

pub mod builder;
pub mod snapshot;

pub use builder::{GraphBuilder, Violation, BuildWarning};
pub use snapshot::{Snapshot, Link};
