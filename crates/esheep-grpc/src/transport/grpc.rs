//! gRPC transport over a tonic channel.

use super::{AgentTransport, CallResult};
use crate::proto::{
    ActionReq, ActionRes, ActionSpaceRes, CommonRes, CreateRoomReq, CreateRoomRes, Credit,
    EsheepAgentClient, InformRes, JoinRoomReq, ObservationRes,
};
use async_trait::async_trait;
use esheep_core::{EsheepError, EsheepResult};
use std::time::Duration;
use tonic::transport::{Channel, Endpoint};
use tonic::Response;
use tracing::debug;

/// Delay between connection attempts while waiting for readiness.
const READY_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Transport backed by the generated `EsheepAgent` client.
#[derive(Debug, Clone)]
pub struct GrpcTransport {
    client: EsheepAgentClient<Channel>,
}

impl GrpcTransport {
    /// Connects to `endpoint`, waiting up to `timeout` for the channel to
    /// become ready.
    pub async fn connect(endpoint: &str, timeout: Duration) -> EsheepResult<Self> {
        let channel = wait_for_ready(endpoint, timeout).await?;
        Ok(Self::from_channel(channel))
    }

    /// Creates from an existing channel.
    pub fn from_channel(channel: Channel) -> Self {
        Self {
            client: EsheepAgentClient::new(channel),
        }
    }
}

/// Dials `uri` until a connection succeeds or `timeout` elapses.
///
/// There is no reconnect after this point; the returned channel is used for
/// the lifetime of the facade.
pub async fn wait_for_ready(uri: &str, timeout: Duration) -> EsheepResult<Channel> {
    let endpoint = Endpoint::from_shared(uri.to_string())
        .map_err(|e| EsheepError::InvalidEndpoint(format!("{}: {}", uri, e)))?
        .connect_timeout(timeout);

    let attempts = async {
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            match endpoint.connect().await {
                Ok(channel) => return channel,
                Err(e) => {
                    debug!(attempt, "Channel to {} not ready: {}", uri, e);
                    tokio::time::sleep(READY_POLL_INTERVAL).await;
                }
            }
        }
    };

    tokio::time::timeout(timeout, attempts)
        .await
        .map_err(|_| EsheepError::ConnectTimeout {
            endpoint: uri.to_string(),
            timeout,
        })
}

fn body<T>(response: Response<T>) -> Option<T> {
    Some(response.into_inner())
}

#[async_trait]
impl AgentTransport for GrpcTransport {
    async fn create_room(&mut self, request: CreateRoomReq) -> CallResult<CreateRoomRes> {
        self.client.create_room(request).await.map(body)
    }

    async fn join_room(&mut self, request: JoinRoomReq) -> CallResult<CommonRes> {
        self.client.join_room(request).await.map(body)
    }

    async fn leave_room(&mut self, credit: Credit) -> CallResult<CommonRes> {
        self.client.leave_room(credit).await.map(body)
    }

    async fn action_space(&mut self, credit: Credit) -> CallResult<ActionSpaceRes> {
        self.client.action_space(credit).await.map(body)
    }

    async fn action(&mut self, request: ActionReq) -> CallResult<ActionRes> {
        self.client.action(request).await.map(body)
    }

    async fn observation(&mut self, credit: Credit) -> CallResult<ObservationRes> {
        self.client.observation(credit).await.map(body)
    }

    async fn inform(&mut self, credit: Credit) -> CallResult<InformRes> {
        self.client.inform(credit).await.map(body)
    }

    async fn reincarnation(&mut self, credit: Credit) -> CallResult<CommonRes> {
        self.client.reincarnation(credit).await.map(body)
    }
}
