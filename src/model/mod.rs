//! # Topology Model
//!
//! Plain records describing a building: floors, waypoints, edges, rooms,
//! kiosks, and the routes computed over them.
//! These types cross every boundary: storage ↔ builder ↔ path engine ↔ user.
//!
//! This module holds pure data and performs no I/O.

pub mod floor;
pub mod waypoint;
pub mod edge;
pub mod room;
pub mod records;
pub mod route;

pub use floor::{Floor, FloorId};
pub use waypoint::{Waypoint, WaypointId, WaypointKind};
pub use edge::{Edge, EdgeId, EdgeKind, EdgeDirection};
pub use room::{Room, RoomId, Kiosk, KioskId};
pub use records::TopologyRecords;
pub use route::{Route, Leg, FloorChange};
