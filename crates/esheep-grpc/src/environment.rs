//! Blocking client facade for the esheep agent service.

use crate::diagnostics::{DiagnosticFields, DiagnosticsLog};
use crate::proto::{
    ActionReq, ActionRes, ActionSpaceRes, CommonRes, CreateRoomReq, CreateRoomRes, Credit,
    InformRes, JoinRoomReq, ObservationRes,
};
use crate::transport::{AgentTransport, GrpcTransport};
use esheep_config::ClientConfig;
use esheep_core::{EsheepError, EsheepResult};
use std::path::Path;
use tokio::runtime::{Builder, Runtime};
use tonic::Status;
use tracing::{debug, error, info, warn};

/// Message printed before the process exits on a failed connect.
pub const CONNECT_FAILURE_MESSAGE: &str = "Error connecting to server";

/// One step of the action vector submitted to the service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Action {
    pub movement: i32,
    pub swing: i32,
    pub fire: i32,
    pub apply: i32,
}

impl Action {
    pub const fn new(movement: i32, swing: i32, fire: i32, apply: i32) -> Self {
        Self {
            movement,
            swing,
            fire,
            apply,
        }
    }

    fn into_request(self, credit: Credit) -> ActionReq {
        ActionReq {
            credit: Some(credit),
            movement: self.movement,
            swing: self.swing,
            fire: self.fire,
            apply: self.apply,
        }
    }
}

/// Client facade: one blocking method per remote operation.
///
/// Every request carries the credential given at construction. Each method
/// returns `Ok(Some(response))` unchanged, `Ok(None)` when the call completed
/// without a response, or the raw RPC status as [`EsheepError::Rpc`].
///
/// The facade owns a current-thread tokio runtime and blocks on it, so it
/// must not be used or dropped from inside another async runtime.
pub struct Environment<T: AgentTransport = GrpcTransport> {
    runtime: Runtime,
    transport: T,
    credit: Credit,
    diagnostics: Option<DiagnosticsLog>,
}

impl Environment<GrpcTransport> {
    /// Opens the diagnostics log (if enabled) and connects to the service,
    /// waiting up to `config.connect_timeout()` for the channel.
    pub fn connect(config: &ClientConfig) -> EsheepResult<Self> {
        if config.connect_timeout().is_zero() {
            return Err(EsheepError::configuration("connect timeout must be non-zero"));
        }

        let runtime = build_runtime()?;

        let diagnostics = if config.debug {
            Some(DiagnosticsLog::create(&config.logfile_path)?)
        } else {
            None
        };

        let endpoint = config.endpoint();
        let transport = runtime.block_on(GrpcTransport::connect(&endpoint, config.connect_timeout()))?;
        info!("Connected to esheep agent service at {}", endpoint);

        Ok(Self {
            runtime,
            transport,
            credit: Credit::new(config.api_token.clone()),
            diagnostics,
        })
    }

    /// Like [`Environment::connect`], but terminates the process with status 1
    /// if the service cannot be reached.
    pub fn connect_or_exit(config: &ClientConfig) -> Self {
        match Self::connect(config) {
            Ok(environment) => environment,
            Err(e) => {
                error!("Failed to connect to {}: {}", config.addr(), e);
                let message = match &e {
                    EsheepError::ConnectTimeout { .. } => e.to_string(),
                    other => format!("{}: {}", CONNECT_FAILURE_MESSAGE, other),
                };
                eprintln!("{}", message);
                std::process::exit(1);
            }
        }
    }
}

impl<T: AgentTransport> Environment<T> {
    /// Builds a facade over an already connected transport.
    pub fn with_transport(
        transport: T,
        api_token: impl Into<String>,
        diagnostics: Option<DiagnosticsLog>,
    ) -> EsheepResult<Self> {
        Ok(Self {
            runtime: build_runtime()?,
            transport,
            credit: Credit::new(api_token),
            diagnostics,
        })
    }

    pub fn api_token(&self) -> &str {
        &self.credit.api_token
    }

    /// Path of the diagnostics log, if diagnostics are enabled.
    pub fn diagnostics_path(&self) -> Option<&Path> {
        self.diagnostics.as_ref().map(DiagnosticsLog::path)
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Creates a room protected by `password`.
    pub fn create_room(&mut self, password: &str) -> EsheepResult<Option<CreateRoomRes>> {
        let request = CreateRoomReq {
            credit: Some(self.credit.clone()),
            password: password.to_string(),
        };
        let response = self
            .runtime
            .block_on(self.transport.create_room(request))
            .map_err(|status| rpc_error("create_room", status))?;
        Ok(self.finish("create_room", response))
    }

    /// Joins an existing room.
    pub fn join_room(&mut self, room_id: &str, password: &str) -> EsheepResult<Option<CommonRes>> {
        let request = JoinRoomReq {
            credit: Some(self.credit.clone()),
            password: password.to_string(),
            room_id: room_id.to_string(),
        };
        let response = self
            .runtime
            .block_on(self.transport.join_room(request))
            .map_err(|status| rpc_error("join_room", status))?;
        Ok(self.finish("join_room", response))
    }

    pub fn leave_room(&mut self) -> EsheepResult<Option<CommonRes>> {
        let response = self
            .runtime
            .block_on(self.transport.leave_room(self.credit.clone()))
            .map_err(|status| rpc_error("leave_room", status))?;
        Ok(self.finish("leave_room", response))
    }

    /// Fetches the shape of the action vector.
    pub fn get_action_space(&mut self) -> EsheepResult<Option<ActionSpaceRes>> {
        let response = self
            .runtime
            .block_on(self.transport.action_space(self.credit.clone()))
            .map_err(|status| rpc_error("get_action_space", status))?;
        Ok(self.finish("get_action_space", response))
    }

    /// Submits one action. Values are passed through unvalidated.
    pub fn submit_action(&mut self, action: Action) -> EsheepResult<Option<ActionRes>> {
        let request = action.into_request(self.credit.clone());
        let response = self
            .runtime
            .block_on(self.transport.action(request))
            .map_err(|status| rpc_error("submit_action", status))?;
        Ok(self.finish("submit_action", response))
    }

    pub fn get_observation(&mut self) -> EsheepResult<Option<ObservationRes>> {
        let response = self
            .runtime
            .block_on(self.transport.observation(self.credit.clone()))
            .map_err(|status| rpc_error("get_observation", status))?;
        Ok(self.finish("get_observation", response))
    }

    /// Fetches score, kills, health and the current frame index.
    pub fn get_inform(&mut self) -> EsheepResult<Option<InformRes>> {
        let response = self
            .runtime
            .block_on(self.transport.inform(self.credit.clone()))
            .map_err(|status| rpc_error("get_inform", status))?;
        Ok(self.finish("get_inform", response))
    }

    pub fn submit_reincarnation(&mut self) -> EsheepResult<Option<CommonRes>> {
        let response = self
            .runtime
            .block_on(self.transport.reincarnation(self.credit.clone()))
            .map_err(|status| rpc_error("submit_reincarnation", status))?;
        Ok(self.finish("submit_reincarnation", response))
    }

    fn finish<R: DiagnosticFields>(&mut self, operation: &'static str, response: Option<R>) -> Option<R> {
        let written = match (&response, self.diagnostics.as_mut()) {
            (Some(res), Some(log)) => log.record_response(operation, res),
            (None, Some(log)) => log.record_missing(operation),
            (_, None) => Ok(()),
        };

        if let Err(e) = written {
            warn!(operation, "Failed to write diagnostics line: {}", e);
        }

        match &response {
            Some(res) => debug!(operation, err_code = res.err_code(), "esheep call completed"),
            None => warn!(operation, "esheep call returned no response"),
        }

        response
    }
}

fn build_runtime() -> EsheepResult<Runtime> {
    Ok(Builder::new_current_thread().enable_all().build()?)
}

fn rpc_error(operation: &'static str, status: Status) -> EsheepError {
    warn!(operation, code = ?status.code(), "esheep call failed: {}", status.message());
    EsheepError::Rpc(status)
}
