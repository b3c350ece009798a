//! Error types for the application.

use thiserror::Error;

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {message}")]
    ParseError { message: String },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

/// Errors reported by the chat platform while resolving endpoints,
/// publishing or deleting.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("Permission denied: {message}")]
    PermissionDenied { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Relay endpoint '{name}' already exists in channel {channel_id}")]
    EndpointExists { channel_id: u64, name: String },

    #[error("Relay endpoint has no execution token")]
    MissingToken,

    #[error("Discord error: {0}")]
    Discord(serenity::Error),
}

impl PlatformError {
    /// Whether the platform refused the action for lack of permission.
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied { .. })
    }

    /// Whether the target of the action no longer exists.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<serenity::Error> for PlatformError {
    fn from(error: serenity::Error) -> Self {
        let status = match &error {
            serenity::Error::Http(http_error) => http_error.status_code().map(|s| s.as_u16()),
            _ => None,
        };

        match status {
            Some(403) => Self::PermissionDenied {
                message: error.to_string(),
            },
            Some(404) => Self::NotFound {
                message: error.to_string(),
            },
            _ => Self::Discord(error),
        }
    }
}

/// Result type alias for platform operations.
pub type PlatformResult<T> = std::result::Result<T, PlatformError>;
