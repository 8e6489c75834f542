use std::path::PathBuf;

use serde::Deserialize;

use mailarc_broker::BrokerConfig;

/// Top-level configuration for the attachments worker, loaded from a TOML
/// file. Every section and field has a default so an absent file yields a
/// runnable local configuration.
#[derive(Debug, Default, Deserialize)]
pub struct WorkerConfig {
    /// Broker connection configuration.
    #[serde(default)]
    pub broker: BrokerConfig,

    /// Storage backend configuration.
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Storage backend configuration.
#[derive(Debug, Deserialize)]
pub struct StorageConfig {
    /// Base directory holding the content-addressed attachment objects.
    #[serde(default = "default_root")]
    pub root: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from("/var/lib/mailarc/attachments")
}
