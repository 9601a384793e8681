use super::{
    DatabaseConfig, InvalidationConfig, LoggingConfig, NodeConfig, ServerConfig, SnapshotConfig,
};
use crate::errors::DomainError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level process configuration, loaded from TOML. Every section has
/// serde defaults so a missing file or empty section still yields a runnable
/// configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub invalidation: InvalidationConfig,
    #[serde(default)]
    pub snapshot: SnapshotConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub node: NodeConfig,
}

impl Config {
    /// Load from a TOML file. A `None` path yields the defaults; a named
    /// path that does not exist or does not parse is a startup failure.
    pub fn load(path: Option<&str>) -> Result<Self, DomainError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let raw = std::fs::read_to_string(Path::new(path))
            .map_err(|e| DomainError::InvalidConfig(format!("cannot read '{path}': {e}")))?;
        let config: Config = toml::from_str(&raw)
            .map_err(|e| DomainError::InvalidConfig(format!("cannot parse '{path}': {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.server.listen.trim().is_empty() {
            return Err(DomainError::InvalidConfig("server.listen is empty".into()));
        }
        if self.invalidation.channel.trim().is_empty() {
            return Err(DomainError::InvalidConfig(
                "invalidation.channel is empty".into(),
            ));
        }
        Ok(())
    }

    /// Resolve the primary role: explicit config wins, otherwise the process
    /// is primary iff its deployment identity ends in "-0" (the first member
    /// of an ordered replica set).
    pub fn is_primary(&self, pod_name: Option<&str>) -> bool {
        match self.node.primary {
            Some(explicit) => explicit,
            None => pod_name.map(|n| n.ends_with("-0")).unwrap_or(false),
        }
    }
}
