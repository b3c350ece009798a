//! Configuration type definitions.

use serde::Deserialize;

use crate::relay::DEFAULT_ENDPOINT_NAME;

/// Presence text shown while the bot is online.
pub const DEFAULT_ACTIVITY: &str = "/help | Canopus Development";

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub discord: DiscordConfig,
    #[serde(default)]
    pub relay: RelayConfig,
}

/// Discord bot configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DiscordConfig {
    pub token: String,
    /// "Listening to ..." presence; empty disables it.
    #[serde(default = "default_activity")]
    pub activity: String,
}

/// Emoji relay settings.
#[derive(Debug, Clone, Deserialize)]
pub struct RelayConfig {
    /// Name of the per-channel webhook messages are relayed through.
    #[serde(default = "default_endpoint_name")]
    pub endpoint_name: String,
    /// Channel IDs to relay in. Empty means every channel.
    #[serde(default)]
    pub channels: Vec<u64>,
    /// Messages matching any of these regexes are left alone.
    #[serde(default)]
    pub ignore_patterns: Vec<String>,
    /// Never relay direct messages.
    #[serde(default = "default_true")]
    pub guilds_only: bool,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            endpoint_name: default_endpoint_name(),
            channels: Vec::new(),
            ignore_patterns: Vec::new(),
            guilds_only: true,
        }
    }
}

fn default_activity() -> String {
    DEFAULT_ACTIVITY.to_string()
}

fn default_endpoint_name() -> String {
    DEFAULT_ENDPOINT_NAME.to_string()
}

fn default_true() -> bool {
    true
}
