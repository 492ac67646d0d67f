//! Navigator configuration.
//!
//! ```json
//! {
//!   "store": { "kind": "json_file", "path": "/var/lib/nav/topology.json" },
//!   "search": { "max_expansions": 50000, "timeout_ms": 250 },
//!   "max_matches": 10
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::path::SearchLimits;
use crate::storage::StoreConfig;
use crate::{Error, Result};

fn default_max_matches() -> usize {
    20
}

/// Settings for a [`crate::Navigator`]. Every field has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigatorConfig {
    #[serde(default)]
    pub store: StoreConfig,
    /// Budget applied to routes that don't pass their own.
    #[serde(default)]
    pub search: SearchLimits,
    /// Cap on `resolve_destination` results; 0 means unlimited.
    #[serde(default = "default_max_matches")]
    pub max_matches: usize,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            search: SearchLimits::default(),
            max_matches: default_max_matches(),
        }
    }
}

impl NavigatorConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}
