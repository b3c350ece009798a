//! Channel capability surface used by the relay.

use serenity::async_trait;
use serenity::model::id::{ChannelId, MessageId};

use crate::common::{AuthorIdentity, PlatformResult};

/// A named per-channel publishing identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayEndpoint<H> {
    pub channel_id: ChannelId,
    pub name: String,
    /// Platform handle used to publish through the endpoint.
    pub handle: H,
}

/// Operations the relay needs from the chat platform.
#[async_trait]
pub trait RelayPlatform: Send + Sync {
    type Handle: Clone + Send + Sync;

    /// List the endpoints in `channel_id` whose name equals `name`, oldest first.
    async fn list_relay_endpoints(
        &self,
        channel_id: ChannelId,
        name: &str,
    ) -> PlatformResult<Vec<RelayEndpoint<Self::Handle>>>;

    async fn create_relay_endpoint(
        &self,
        channel_id: ChannelId,
        name: &str,
    ) -> PlatformResult<RelayEndpoint<Self::Handle>>;

    /// Post `text` through the endpoint presented as `identity`.
    async fn publish_as(
        &self,
        endpoint: &RelayEndpoint<Self::Handle>,
        text: &str,
        identity: &AuthorIdentity,
    ) -> PlatformResult<()>;

    async fn delete_message(&self, channel_id: ChannelId, message_id: MessageId) -> PlatformResult<()>;
}
