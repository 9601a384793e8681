use serde::{Deserialize, Serialize};

/// Degraded-mode snapshot file configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SnapshotConfig {
    /// Path of the JSON record snapshot (default: "./records-snapshot.json")
    #[serde(default = "default_snapshot_path")]
    pub path: String,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            path: default_snapshot_path(),
        }
    }
}

fn default_snapshot_path() -> String {
    "./records-snapshot.json".to_string()
}
