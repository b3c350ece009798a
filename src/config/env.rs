//! Environment variable overrides for configuration.
//!
//! Supports overriding config values with environment variables:
//! - `CANOPUS_DISCORD_TOKEN` - Discord bot token
//! - `CANOPUS_RELAY_ENDPOINT_NAME` - Relay webhook name
//! - `CANOPUS_CONFIG` - Path of the config file

use std::env;

use crate::config::types::Config;

/// Environment variable prefix for all config overrides.
const ENV_PREFIX: &str = "CANOPUS";

/// Apply environment variable overrides to a config.
///
/// Lets the token be kept out of the config file.
pub fn apply_env_overrides(mut config: Config) -> Config {
    if let Ok(token) = env::var(format!("{}_DISCORD_TOKEN", ENV_PREFIX)) {
        config.discord.token = token;
    }

    if let Ok(name) = env::var(format!("{}_RELAY_ENDPOINT_NAME", ENV_PREFIX)) {
        config.relay.endpoint_name = name;
    }

    config
}

/// Returns the names of override variables that are set but empty.
pub fn check_empty_env_vars() -> Vec<String> {
    let vars = [
        format!("{}_DISCORD_TOKEN", ENV_PREFIX),
        format!("{}_RELAY_ENDPOINT_NAME", ENV_PREFIX),
    ];

    vars.into_iter()
        .filter(|var| env::var(var).map(|v| v.is_empty()).unwrap_or(false))
        .collect()
}

/// Get the config file path from environment or use default.
///
/// Checks `CANOPUS_CONFIG`, otherwise returns "canopus.conf".
pub fn get_config_path() -> String {
    env::var(format!("{}_CONFIG", ENV_PREFIX)).unwrap_or_else(|_| "canopus.conf".to_string())
}
