//! Relaying rewritten messages.
//!
//! ## Module Structure
//!
//! - `platform`: the channel capability surface (`RelayPlatform`)
//! - `endpoint`: idempotent per-channel endpoint get-or-create
//! - `identity`: publish-then-delete under the author's identity
//! - `filter`: eligibility guards and configured policy
//! - `service`: the per-message pipeline (`EmojiRelay`)

pub mod endpoint;
pub mod filter;
pub mod identity;
pub mod platform;
pub mod service;

#[cfg(test)]
pub(crate) mod fake;

pub use filter::RelayFilter;
pub use identity::{IdentityRelay, RelayOutcome, DEFAULT_ENDPOINT_NAME};
pub use platform::{RelayEndpoint, RelayPlatform};
pub use service::EmojiRelay;
