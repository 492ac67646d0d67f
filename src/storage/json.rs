//! JSON file topology store.
//!
//! Reads a `TopologyRecords` document (the format `export` writes) from disk
//! on every load, so an operator can edit the file and trigger a rebuild.

use std::path::{Path, PathBuf};
use async_trait::async_trait;

use crate::model::TopologyRecords;
use crate::Result;
use super::TopologyStore;

/// Topology rows kept in a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TopologyStore for JsonFileStore {
    async fn load_topology(&self) -> Result<TopologyRecords> {
        let text = tokio::fs::read_to_string(&self.path).await?;
        let records = serde_json::from_str(&text)?;
        Ok(records)
    }

    fn name(&self) -> &'static str {
        "json_file"
    }
}
