use serde::{Deserialize, Serialize};

/// Invalidation feed configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InvalidationConfig {
    /// Address of the pub/sub feed (default: "127.0.0.1:6400")
    #[serde(default = "default_feed_addr")]
    pub feed_addr: String,

    /// Channel name to subscribe to (default: "dns-records")
    #[serde(default = "default_channel")]
    pub channel: String,

    /// Seconds to wait before reconnecting a dropped subscription (default: 5)
    #[serde(default = "default_reconnect_secs")]
    pub reconnect_secs: u64,
}

impl Default for InvalidationConfig {
    fn default() -> Self {
        Self {
            feed_addr: default_feed_addr(),
            channel: default_channel(),
            reconnect_secs: default_reconnect_secs(),
        }
    }
}

fn default_feed_addr() -> String {
    "127.0.0.1:6400".to_string()
}

fn default_channel() -> String {
    "dns-records".to_string()
}

fn default_reconnect_secs() -> u64 {
    5
}
