//! Configuration file parsing (HOCON format).

use std::fs;
use std::path::Path;

use crate::common::error::ConfigError;
use crate::config::types::Config;
use hocon::HoconLoader;

/// Load configuration from a HOCON file.
///
/// The file is read up front so a missing or unreadable file surfaces as an
/// I/O error with its path rather than as a parse failure.
pub fn load_config(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::IoError {
        path: path.display().to_string(),
        source,
    })?;
    load_config_str(&content)
}

/// Load configuration from a HOCON string.
pub fn load_config_str(content: &str) -> Result<Config, ConfigError> {
    let parse_error = |e: hocon::Error| ConfigError::ParseError {
        message: e.to_string(),
    };
    HoconLoader::new()
        .load_str(content)
        .map_err(parse_error)?
        .resolve()
        .map_err(parse_error)
}

/// Tidy values that commonly arrive with stray whitespace or repeats.
///
/// Runs after environment overrides so both sources are treated alike.
pub fn normalize(mut config: Config) -> Config {
    config.discord.token = config.discord.token.trim().to_string();
    config.relay.endpoint_name = config.relay.endpoint_name.trim().to_string();

    let mut seen = Vec::with_capacity(config.relay.channels.len());
    config.relay.channels.retain(|channel| {
        if seen.contains(channel) {
            false
        } else {
            seen.push(*channel);
            true
        }
    });
    config
}
