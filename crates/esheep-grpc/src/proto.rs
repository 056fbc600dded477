//! Generated protobuf types for the esheep agent service.

#[allow(clippy::all, clippy::pedantic)]
pub mod esheep {
    tonic::include_proto!("esheep");
}

pub use esheep::esheep_agent_client::EsheepAgentClient;
pub use esheep::esheep_agent_server::{EsheepAgent, EsheepAgentServer};
pub use esheep::{
    ActionDimension, ActionReq, ActionRes, ActionSpaceRes, CommonRes, CreateRoomReq, CreateRoomRes,
    Credit, InformRes, JoinRoomReq, ObservationRes,
};

/// `err_code` the service uses for success.
pub const SUCCESS: i32 = 0;

/// Status fields carried by every response.
pub trait ResponseStatus {
    /// Service error code, [`SUCCESS`] on success.
    fn err_code(&self) -> i32;
    /// Human-readable message.
    fn msg(&self) -> &str;
    /// Service-side state of the agent.
    fn state(&self) -> i32;

    fn is_success(&self) -> bool {
        self.err_code() == SUCCESS
    }
}

macro_rules! impl_response_status {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ResponseStatus for $ty {
                fn err_code(&self) -> i32 {
                    self.err_code
                }

                fn msg(&self) -> &str {
                    &self.msg
                }

                fn state(&self) -> i32 {
                    self.state
                }
            }
        )*
    };
}

impl_response_status!(CommonRes, CreateRoomRes, ActionSpaceRes, ActionRes, ObservationRes, InformRes);

impl Credit {
    /// Wraps an API token.
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
        }
    }
}
