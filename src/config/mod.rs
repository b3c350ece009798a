//! Configuration parsing and types.

pub mod env;
pub mod parser;
pub mod types;
pub mod validate;

use tracing::warn;

use crate::common::error::ConfigError;

pub use parser::{load_config, normalize};
pub use types::*;

/// Load the config file, apply environment overrides and validate.
pub fn load_and_validate(path: &str) -> Result<Config, ConfigError> {
    for var in env::check_empty_env_vars() {
        warn!("Environment variable {} is set but empty", var);
    }

    let config = normalize(env::apply_env_overrides(load_config(path)?));
    validate::validate_config(&config)?;
    Ok(config)
}
