//! Common utilities and types shared across the application.

pub mod error;
pub mod messages;

pub use error::{PlatformError, PlatformResult};
pub use messages::{webhook_username, AuthorIdentity, IncomingMessage};
