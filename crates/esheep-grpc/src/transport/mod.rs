//! Transport seam between the facade and the RPC layer.
//!
//! [`AgentTransport`] has one method per remote operation. The facade only
//! talks to this trait, so tests and alternative transports can stand in for
//! the gRPC channel.

mod grpc;

pub use grpc::*;

use crate::proto::{
    ActionReq, ActionRes, ActionSpaceRes, CommonRes, CreateRoomReq, CreateRoomRes, Credit,
    InformRes, JoinRoomReq, ObservationRes,
};
use async_trait::async_trait;
use tonic::Status;

/// Outcome of one remote call.
///
/// `Ok(None)` means the call completed without a response body; a response
/// whose fields are all zero is still `Ok(Some(..))`.
pub type CallResult<T> = Result<Option<T>, Status>;

/// One method per esheep remote operation.
#[async_trait]
pub trait AgentTransport: Send {
    async fn create_room(&mut self, request: CreateRoomReq) -> CallResult<CreateRoomRes>;

    async fn join_room(&mut self, request: JoinRoomReq) -> CallResult<CommonRes>;

    async fn leave_room(&mut self, credit: Credit) -> CallResult<CommonRes>;

    async fn action_space(&mut self, credit: Credit) -> CallResult<ActionSpaceRes>;

    async fn action(&mut self, request: ActionReq) -> CallResult<ActionRes>;

    async fn observation(&mut self, credit: Credit) -> CallResult<ObservationRes>;

    async fn inform(&mut self, credit: Credit) -> CallResult<InformRes>;

    async fn reincarnation(&mut self, credit: Credit) -> CallResult<CommonRes>;
}
