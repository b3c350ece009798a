//! Webhook-backed relay platform.
//!
//! Relay endpoints are channel webhooks; publishing executes the webhook with
//! the author's name and avatar.

use std::sync::Arc;

use serenity::async_trait;
use serenity::builder::{CreateAllowedMentions, CreateWebhook, ExecuteWebhook};
use serenity::http::Http;
use serenity::model::id::{ChannelId, MessageId};
use serenity::model::webhook::Webhook;

use crate::common::{AuthorIdentity, PlatformError, PlatformResult};
use crate::relay::{RelayEndpoint, RelayPlatform};

/// Relay platform backed by the Discord HTTP API.
#[derive(Clone)]
pub struct SerenityPlatform {
    http: Arc<Http>,
}

impl SerenityPlatform {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl RelayPlatform for SerenityPlatform {
    type Handle = Webhook;

    async fn list_relay_endpoints(
        &self,
        channel_id: ChannelId,
        name: &str,
    ) -> PlatformResult<Vec<RelayEndpoint<Webhook>>> {
        let mut webhooks = channel_id.webhooks(&self.http).await?;
        // Snowflakes grow over time, so this puts the oldest first.
        webhooks.sort_by_key(|webhook| webhook.id);

        Ok(webhooks
            .into_iter()
            .filter(|webhook| webhook.name.as_deref() == Some(name) && webhook.token.is_some())
            .map(|webhook| RelayEndpoint {
                channel_id,
                name: name.to_string(),
                handle: webhook,
            })
            .collect())
    }

    async fn create_relay_endpoint(
        &self,
        channel_id: ChannelId,
        name: &str,
    ) -> PlatformResult<RelayEndpoint<Webhook>> {
        let webhook = channel_id
            .create_webhook(&*self.http, CreateWebhook::new(name))
            .await?;

        Ok(RelayEndpoint {
            channel_id,
            name: name.to_string(),
            handle: webhook,
        })
    }

    async fn publish_as(
        &self,
        endpoint: &RelayEndpoint<Webhook>,
        text: &str,
        identity: &AuthorIdentity,
    ) -> PlatformResult<()> {
        if endpoint.handle.token.is_none() {
            return Err(PlatformError::MissingToken);
        }

        // The original already pinged anyone it mentions.
        let builder = ExecuteWebhook::new()
            .content(text)
            .username(identity.display_name.as_str())
            .avatar_url(identity.avatar_url.as_str())
            .allowed_mentions(CreateAllowedMentions::new());

        endpoint.handle.execute(&*self.http, false, builder).await?;
        Ok(())
    }

    async fn delete_message(&self, channel_id: ChannelId, message_id: MessageId) -> PlatformResult<()> {
        channel_id.delete_message(&self.http, message_id).await?;
        Ok(())
    }
}
