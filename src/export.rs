//! Topology JSON export — serialize a snapshot back to its rows.
//!
//! The output is a `TopologyRecords` document that `JsonFileStore` loads
//! as-is, so a published topology can be archived or moved between
//! deployments.
//!
//! ```text
//! Snapshot → export_topology_json() → topology.json → JsonFileStore → rebuild()
//! ```

use std::io::Write;

use crate::graph::Snapshot;
use crate::Result;

/// Write `snapshot`'s rows as pretty-printed JSON.
pub fn export_topology_json(snapshot: &Snapshot, writer: &mut dyn Write) -> Result<()> {
    let records = snapshot.to_records();
    serde_json::to_writer_pretty(&mut *writer, &records)?;
    writeln!(writer)?;
    Ok(())
}

/// Export to an in-memory string.
pub fn export_topology_string(snapshot: &Snapshot) -> Result<String> {
    let mut buf = Vec::new();
    export_topology_json(snapshot, &mut buf)?;
    // serde_json only emits UTF-8.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
