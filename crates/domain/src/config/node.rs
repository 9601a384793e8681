use serde::{Deserialize, Serialize};

/// Primary-role input. Only the elected primary writes the snapshot file.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct NodeConfig {
    /// Explicit primary flag. When unset, the role is derived from the
    /// deployment identity (`POD_NAME` ending in "-0").
    #[serde(default)]
    pub primary: Option<bool>,
}
