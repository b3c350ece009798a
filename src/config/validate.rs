//! Configuration validation.
//!
//! Validates configuration values and provides helpful error messages.

use fancy_regex::Regex;

use crate::common::error::ConfigError;
use crate::common::messages::{MAX_WEBHOOK_NAME_LEN, RESERVED_NAME_PARTS};
use crate::config::types::Config;

/// Validate a configuration and return detailed errors.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let mut errors = Vec::new();

    if config.discord.token.is_empty() {
        errors.push("discord.token is required".to_string());
    }
    if config.discord.token == "YOUR_DISCORD_TOKEN_HERE" {
        errors.push("discord.token has not been configured (still using placeholder)".to_string());
    }

    let name = config.relay.endpoint_name.trim();
    if name.is_empty() {
        errors.push("relay.endpoint_name is required".to_string());
    }
    if name.chars().count() > MAX_WEBHOOK_NAME_LEN {
        errors.push(format!(
            "relay.endpoint_name must be at most {} characters (got {})",
            MAX_WEBHOOK_NAME_LEN,
            name.chars().count()
        ));
    }
    let lower = name.to_lowercase();
    for part in RESERVED_NAME_PARTS {
        if lower.contains(part) {
            errors.push(format!("relay.endpoint_name must not contain '{}'", part));
        }
    }

    for (i, channel) in config.relay.channels.iter().enumerate() {
        if *channel == 0 {
            errors.push(format!("relay.channels[{}] must be non-zero", i));
        }
    }

    for (i, pattern) in config.relay.ignore_patterns.iter().enumerate() {
        if Regex::new(pattern).is_err() {
            errors.push(format!(
                "relay.ignore_patterns[{}] is not a valid regex: '{}'",
                i, pattern
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError {
            message: errors.join("\n"),
        })
    }
}
