//! Discord event handling.
//!
//! Converts gateway messages into `IncomingMessage`s and runs each one
//! through the relay pipeline on its own task.

use std::sync::Arc;

use serenity::cache::Cache;
use serenity::gateway::ActivityData;
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::prelude::*;
use tracing::{debug, info};

use crate::common::{webhook_username, AuthorIdentity, IncomingMessage};
use crate::config::types::Config;
use crate::discord::platform::SerenityPlatform;
use crate::relay::{EmojiRelay, IdentityRelay, RelayFilter, RelayOutcome};

/// Relay pipeline wired to the live Discord connection.
pub type DiscordRelay = EmojiRelay<SerenityPlatform, Arc<Cache>>;

/// Handles gateway events for the relay.
pub struct RelayHandler {
    filter: RelayFilter,
    endpoint_name: String,
    activity: String,
    /// Built once the gateway is ready; `None` while disconnected.
    relay: Option<Arc<DiscordRelay>>,
}

impl RelayHandler {
    pub fn new(config: &Config) -> Self {
        Self {
            filter: RelayFilter::from_config(&config.relay),
            endpoint_name: config.relay.endpoint_name.clone(),
            activity: config.discord.activity.clone(),
            relay: None,
        }
    }

    pub fn handle_ready(&mut self, context: &Context, ready: &Ready) {
        info!(
            "Discord bot connected as {} ({} guilds)",
            ready.user.name,
            ready.guilds.len()
        );

        if !self.activity.is_empty() {
            context.set_activity(Some(ActivityData::listening(self.activity.as_str())));
        }

        let relay = IdentityRelay::new(
            SerenityPlatform::new(context.http.clone()),
            self.endpoint_name.clone(),
        );
        self.relay = Some(Arc::new(EmojiRelay::new(
            self.filter.clone(),
            context.cache.clone(),
            relay,
        )));
    }

    pub fn handle_disconnect(&mut self) {
        self.relay = None;
    }

    /// Spawn processing of one message; messages are handled independently.
    pub fn handle_message(&self, message: Message) {
        let Some(relay) = self.relay.clone() else {
            debug!("Dropping message {} - relay not ready", message.id);
            return;
        };

        let incoming = incoming_message(&message);
        tokio::spawn(async move {
            match relay.handle(&incoming).await {
                RelayOutcome::Skipped(reason) => {
                    debug!("Skipped message {}: {:?}", incoming.message_id, reason)
                }
                outcome => debug!("Message {} -> {:?}", incoming.message_id, outcome),
            }
        });
    }
}

/// Snapshot the parts of a gateway message the relay needs.
pub fn incoming_message(message: &Message) -> IncomingMessage {
    let display_name = message
        .member
        .as_ref()
        .and_then(|member| member.nick.clone())
        .or_else(|| message.author.global_name.clone())
        .unwrap_or_else(|| message.author.name.clone());

    IncomingMessage {
        message_id: message.id,
        channel_id: message.channel_id,
        guild_id: message.guild_id,
        author: AuthorIdentity {
            display_name: webhook_username(&display_name),
            avatar_url: message.author.face(),
        },
        is_automated: message.author.bot || message.webhook_id.is_some(),
        has_extras: !message.attachments.is_empty()
            || !message.sticker_items.is_empty()
            || message.message_reference.is_some(),
        text: message.content.clone(),
    }
}
