//! Real-time event delivery configuration.

use serde::{Deserialize, Serialize};

/// Settings for the in-process pub/sub hub that pushes lifecycle events to
/// connected clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealtimeConfig {
    /// Whether events are published at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Buffer size of each per-user broadcast channel.
    #[serde(default = "default_channel_buffer")]
    pub channel_buffer_size: usize,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            channel_buffer_size: default_channel_buffer(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_channel_buffer() -> usize {
    64
}
