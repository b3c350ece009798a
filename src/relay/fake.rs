//! In-memory platform for relay tests.

use std::sync::Mutex;

use serenity::async_trait;
use serenity::model::id::{ChannelId, MessageId};

use crate::common::{AuthorIdentity, PlatformError, PlatformResult};
use crate::relay::platform::{RelayEndpoint, RelayPlatform};

/// A message published through a relay endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Published {
    pub endpoint: u64,
    pub text: String,
    pub identity: AuthorIdentity,
}

#[derive(Debug, Default)]
pub(crate) struct State {
    endpoints: Vec<RelayEndpoint<u64>>,
    next_handle: u64,
    creations: usize,
    published: Vec<Published>,
    deleted: Vec<MessageId>,
    /// Every call, in order, for sequencing assertions.
    calls: Vec<&'static str>,
}

/// A platform whose every operation yields once before acting, so
/// concurrently polled callers interleave.
#[derive(Debug, Default)]
pub struct FakePlatform {
    pub(crate) state: Mutex<State>,
    pub reject_duplicates: bool,
    pub fail_create: bool,
    pub fail_publish: bool,
    pub fail_delete: Option<fn() -> PlatformError>,
}

impl FakePlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_endpoint(self, channel_id: ChannelId, name: &str) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            state.next_handle += 1;
            let handle = state.next_handle;
            state.endpoints.push(RelayEndpoint {
                channel_id,
                name: name.to_string(),
                handle,
            });
        }
        self
    }

    pub fn endpoints(&self) -> Vec<RelayEndpoint<u64>> {
        self.state.lock().unwrap().endpoints.clone()
    }

    pub fn creations(&self) -> usize {
        self.state.lock().unwrap().creations
    }

    pub fn published(&self) -> Vec<Published> {
        self.state.lock().unwrap().published.clone()
    }

    pub fn deleted(&self) -> Vec<MessageId> {
        self.state.lock().unwrap().deleted.clone()
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.state.lock().unwrap().calls.clone()
    }

    fn record(&self, call: &'static str) {
        self.state.lock().unwrap().calls.push(call);
    }
}

#[async_trait]
impl RelayPlatform for FakePlatform {
    type Handle = u64;

    async fn list_relay_endpoints(
        &self,
        channel_id: ChannelId,
        name: &str,
    ) -> PlatformResult<Vec<RelayEndpoint<u64>>> {
        tokio::task::yield_now().await;
        self.record("list");
        let state = self.state.lock().unwrap();
        Ok(state
            .endpoints
            .iter()
            .filter(|e| e.channel_id == channel_id && e.name == name)
            .cloned()
            .collect())
    }

    async fn create_relay_endpoint(
        &self,
        channel_id: ChannelId,
        name: &str,
    ) -> PlatformResult<RelayEndpoint<u64>> {
        tokio::task::yield_now().await;
        self.record("create");
        if self.fail_create {
            return Err(PlatformError::PermissionDenied {
                message: "Missing Permissions".to_string(),
            });
        }

        let mut state = self.state.lock().unwrap();
        let exists = state
            .endpoints
            .iter()
            .any(|e| e.channel_id == channel_id && e.name == name);
        if exists && self.reject_duplicates {
            return Err(PlatformError::EndpointExists {
                channel_id: channel_id.get(),
                name: name.to_string(),
            });
        }

        state.creations += 1;
        state.next_handle += 1;
        let endpoint = RelayEndpoint {
            channel_id,
            name: name.to_string(),
            handle: state.next_handle,
        };
        state.endpoints.push(endpoint.clone());
        Ok(endpoint)
    }

    async fn publish_as(
        &self,
        endpoint: &RelayEndpoint<u64>,
        text: &str,
        identity: &AuthorIdentity,
    ) -> PlatformResult<()> {
        tokio::task::yield_now().await;
        self.record("publish");
        if self.fail_publish {
            return Err(PlatformError::PermissionDenied {
                message: "Missing Permissions".to_string(),
            });
        }

        self.state.lock().unwrap().published.push(Published {
            endpoint: endpoint.handle,
            text: text.to_string(),
            identity: identity.clone(),
        });
        Ok(())
    }

    async fn delete_message(&self, _channel_id: ChannelId, message_id: MessageId) -> PlatformResult<()> {
        tokio::task::yield_now().await;
        self.record("delete");
        if let Some(error) = self.fail_delete {
            return Err(error());
        }

        self.state.lock().unwrap().deleted.push(message_id);
        Ok(())
    }
}
