//! Per-message relay pipeline.

use tracing::debug;

use crate::common::IncomingMessage;
use crate::emoji::{rewrite_message, EmojiDirectory, EmojiResolver};
use crate::relay::filter::RelayFilter;
use crate::relay::identity::{IdentityRelay, RelayOutcome};
use crate::relay::platform::RelayPlatform;

/// Filters, rewrites and relays inbound messages.
///
/// Holds no mutable state, so any number of messages can be handled
/// concurrently through a shared reference.
pub struct EmojiRelay<P, D> {
    filter: RelayFilter,
    directory: D,
    relay: IdentityRelay<P>,
}

impl<P: RelayPlatform, D: EmojiDirectory> EmojiRelay<P, D> {
    pub fn new(filter: RelayFilter, directory: D, relay: IdentityRelay<P>) -> Self {
        Self {
            filter,
            directory,
            relay,
        }
    }

    #[cfg(test)]
    pub fn relay(&self) -> &IdentityRelay<P> {
        &self.relay
    }

    /// Process one inbound message.
    pub async fn handle(&self, message: &IncomingMessage) -> RelayOutcome {
        if let Some(reason) = self.filter.check(message) {
            return RelayOutcome::Skipped(reason);
        }

        let rewritten = {
            let resolver = EmojiResolver::new(&self.directory);
            rewrite_message(&message.text, &resolver)
        };
        if !rewritten.substituted {
            debug!("No known shortcodes in message {}", message.message_id);
            return RelayOutcome::Unchanged;
        }

        self.relay.relay(message, &rewritten).await
    }
}
