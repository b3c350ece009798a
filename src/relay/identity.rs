//! Republishing rewritten messages under the author's identity.
//!
//! Publishing and deleting are two separate steps with no rollback. Publish
//! always comes first: if it fails the original is left alone, and if the
//! delete fails afterwards the repost stays and the original is kept too.

use tracing::{debug, error, info, warn};

use crate::common::IncomingMessage;
use crate::emoji::RewriteResult;
use crate::relay::endpoint::get_or_create;
use crate::relay::platform::RelayPlatform;

/// Well-known name of the relay endpoint when none is configured.
pub const DEFAULT_ENDPOINT_NAME: &str = "Canopus";

/// What happened to a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayOutcome {
    /// A guard or eligibility rule rejected the message.
    Skipped(SkipReason),
    /// No shortcode resolved; the message was left as authored.
    Unchanged,
    /// Reposted and the original removed.
    Relayed,
    /// Reposted, but the original could not be removed.
    RelayedOriginalKept,
    /// Endpoint resolution or publish failed; the original is untouched.
    Failed,
}

/// Why a message was not processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    AutomatedAuthor,
    NoColon,
    DirectMessage,
    ChannelNotAllowed,
    IgnoredPattern,
    /// Attachments, stickers or a reply that a text repost cannot carry.
    HasExtras,
}

/// Posts rewritten text through the channel's relay endpoint.
pub struct IdentityRelay<P> {
    platform: P,
    endpoint_name: String,
}

impl<P: RelayPlatform> IdentityRelay<P> {
    pub fn new(platform: P, endpoint_name: impl Into<String>) -> Self {
        Self {
            platform,
            endpoint_name: endpoint_name.into(),
        }
    }

    #[cfg(test)]
    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Relay a rewritten message. Never fails; errors are logged and
    /// reflected in the outcome.
    pub async fn relay(&self, message: &IncomingMessage, rewritten: &RewriteResult) -> RelayOutcome {
        if !rewritten.substituted {
            return RelayOutcome::Unchanged;
        }

        let endpoint =
            match get_or_create(&self.platform, message.channel_id, &self.endpoint_name).await {
                Ok(endpoint) => endpoint,
                Err(e) => {
                    error!(
                        "Failed to resolve relay endpoint in channel {}: {}",
                        message.channel_id, e
                    );
                    return RelayOutcome::Failed;
                }
            };

        if let Err(e) = self
            .platform
            .publish_as(&endpoint, &rewritten.text, &message.author)
            .await
        {
            error!(
                "Failed to relay message {} in channel {}, original kept: {}",
                message.message_id, message.channel_id, e
            );
            return RelayOutcome::Failed;
        }

        match self
            .platform
            .delete_message(message.channel_id, message.message_id)
            .await
        {
            Ok(()) => {
                info!(
                    "Relayed message {} from {} in channel {}",
                    message.message_id, message.author.display_name, message.channel_id
                );
                RelayOutcome::Relayed
            }
            Err(e) if e.is_not_found() => {
                debug!("Original message {} was already deleted", message.message_id);
                RelayOutcome::RelayedOriginalKept
            }
            Err(e) if e.is_permission_denied() => {
                warn!(
                    "Relayed message {} but may not delete messages in channel {}: {}",
                    message.message_id, message.channel_id, e
                );
                RelayOutcome::RelayedOriginalKept
            }
            Err(e) => {
                warn!(
                    "Relayed message {} but could not delete the original: {}",
                    message.message_id, e
                );
                RelayOutcome::RelayedOriginalKept
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{AuthorIdentity, PlatformError};
    use crate::relay::fake::FakePlatform;
    use serenity::model::id::{ChannelId, MessageId};

    fn message(id: u64, channel: u64) -> IncomingMessage {
        IncomingMessage {
            message_id: MessageId::new(id),
            channel_id: ChannelId::new(channel),
            guild_id: None,
            author: AuthorIdentity {
                display_name: "Vega".to_string(),
                avatar_url: "https://cdn.example/avatar.png".to_string(),
            },
            is_automated: false,
            has_extras: false,
            text: ":smile:".to_string(),
        }
    }

    fn substituted() -> RewriteResult {
        RewriteResult {
            text: "<:smile:123>".to_string(),
            substituted: true,
        }
    }

    #[tokio::test]
    async fn test_publishes_then_deletes() {
        let relay = IdentityRelay::new(FakePlatform::new(), DEFAULT_ENDPOINT_NAME);

        let outcome = relay.relay(&message(1, 10), &substituted()).await;
        assert_eq!(outcome, RelayOutcome::Relayed);

        let platform = relay.platform();
        let published = platform.published();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].text, "<:smile:123>");
        assert_eq!(published[0].identity.display_name, "Vega");
        assert_eq!(published[0].identity.avatar_url, "https://cdn.example/avatar.png");
        assert_eq!(platform.deleted(), vec![MessageId::new(1)]);

        let calls = platform.calls();
        let publish = calls.iter().position(|c| *c == "publish").unwrap();
        let delete = calls.iter().position(|c| *c == "delete").unwrap();
        assert!(publish < delete);
    }

    #[tokio::test]
    async fn test_unsubstituted_makes_no_calls() {
        let relay = IdentityRelay::new(FakePlatform::new(), DEFAULT_ENDPOINT_NAME);
        let unchanged = RewriteResult {
            text: ":ghost:".to_string(),
            substituted: false,
        };

        let outcome = relay.relay(&message(1, 10), &unchanged).await;
        assert_eq!(outcome, RelayOutcome::Unchanged);
        assert!(relay.platform().calls().is_empty());
    }

    #[tokio::test]
    async fn test_publish_failure_keeps_original() {
        let platform = FakePlatform {
            fail_publish: true,
            ..FakePlatform::default()
        };
        let relay = IdentityRelay::new(platform, DEFAULT_ENDPOINT_NAME);

        let outcome = relay.relay(&message(1, 10), &substituted()).await;
        assert_eq!(outcome, RelayOutcome::Failed);
        assert!(relay.platform().deleted().is_empty());
        assert!(!relay.platform().calls().contains(&"delete"));
    }

    #[tokio::test]
    async fn test_endpoint_failure_keeps_original() {
        let platform = FakePlatform {
            fail_create: true,
            ..FakePlatform::default()
        };
        let relay = IdentityRelay::new(platform, DEFAULT_ENDPOINT_NAME);

        let outcome = relay.relay(&message(1, 10), &substituted()).await;
        assert_eq!(outcome, RelayOutcome::Failed);
        assert_eq!(relay.platform().calls(), vec!["list", "create"]);
    }

    #[tokio::test]
    async fn test_delete_failure_is_swallowed() {
        fn denied() -> PlatformError {
            PlatformError::PermissionDenied {
                message: "Missing Permissions".to_string(),
            }
        }
        let platform = FakePlatform {
            fail_delete: Some(denied as fn() -> PlatformError),
            ..FakePlatform::default()
        };
        let relay = IdentityRelay::new(platform, DEFAULT_ENDPOINT_NAME);

        let outcome = relay.relay(&message(1, 10), &substituted()).await;
        assert_eq!(outcome, RelayOutcome::RelayedOriginalKept);

        // published exactly once, never retried
        assert_eq!(relay.platform().published().len(), 1);
        let calls = relay.platform().calls();
        assert_eq!(calls.iter().filter(|c| **c == "publish").count(), 1);
        assert_eq!(calls.iter().filter(|c| **c == "delete").count(), 1);
    }

    #[tokio::test]
    async fn test_already_deleted_original_is_swallowed() {
        fn gone() -> PlatformError {
            PlatformError::NotFound {
                message: "Unknown Message".to_string(),
            }
        }
        let platform = FakePlatform {
            fail_delete: Some(gone as fn() -> PlatformError),
            ..FakePlatform::default()
        };
        let relay = IdentityRelay::new(platform, DEFAULT_ENDPOINT_NAME);

        let outcome = relay.relay(&message(1, 10), &substituted()).await;
        assert_eq!(outcome, RelayOutcome::RelayedOriginalKept);
    }

    #[tokio::test]
    async fn test_concurrent_messages_share_one_endpoint() {
        let relay = IdentityRelay::new(FakePlatform::new(), DEFAULT_ENDPOINT_NAME);
        let (first, second) = (message(1, 10), message(2, 10));
        let rewritten = substituted();

        let (a, b) = tokio::join!(
            relay.relay(&first, &rewritten),
            relay.relay(&second, &rewritten)
        );
        assert_eq!(a, RelayOutcome::Relayed);
        assert_eq!(b, RelayOutcome::Relayed);

        let published = relay.platform().published();
        assert_eq!(published.len(), 2);
        assert_eq!(published[0].endpoint, published[1].endpoint);
    }
}
