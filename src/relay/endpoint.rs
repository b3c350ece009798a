//! Per-channel relay endpoint resolution.
//!
//! An endpoint is looked up by its well-known name and created on first need.
//! Concurrent creators may both create one; everyone then adopts the first
//! endpoint the platform lists under that name, so a channel converges on a
//! single logical endpoint.

use serenity::model::id::ChannelId;
use tracing::{debug, info};

use crate::common::{PlatformError, PlatformResult};
use crate::relay::platform::{RelayEndpoint, RelayPlatform};

/// Find the channel's relay endpoint, creating it if absent.
pub async fn get_or_create<P: RelayPlatform + ?Sized>(
    platform: &P,
    channel_id: ChannelId,
    name: &str,
) -> PlatformResult<RelayEndpoint<P::Handle>> {
    if let Some(endpoint) = first_named(platform, channel_id, name).await? {
        return Ok(endpoint);
    }

    match platform.create_relay_endpoint(channel_id, name).await {
        Ok(created) => {
            info!("Created relay endpoint '{}' in channel {}", name, channel_id);
            // Another task may have created one first; the oldest wins.
            Ok(first_named(platform, channel_id, name).await?.unwrap_or(created))
        }
        Err(PlatformError::EndpointExists { .. }) => {
            debug!(
                "Relay endpoint '{}' appeared in channel {} during creation, re-fetching",
                name, channel_id
            );
            first_named(platform, channel_id, name)
                .await?
                .ok_or_else(|| PlatformError::NotFound {
                    message: format!("relay endpoint '{}' in channel {}", name, channel_id),
                })
        }
        Err(e) => Err(e),
    }
}

async fn first_named<P: RelayPlatform + ?Sized>(
    platform: &P,
    channel_id: ChannelId,
    name: &str,
) -> PlatformResult<Option<RelayEndpoint<P::Handle>>> {
    let endpoints = platform.list_relay_endpoints(channel_id, name).await?;
    Ok(endpoints.into_iter().find(|endpoint| endpoint.name == name))
}
