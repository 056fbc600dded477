//! In-process esheep agent server for integration tests.
//!
//! Implements just enough room bookkeeping to exercise the client end to end.

#![allow(dead_code)]

use esheep_grpc::proto::{
    ActionDimension, ActionReq, ActionRes, ActionSpaceRes, CommonRes, CreateRoomReq, CreateRoomRes,
    Credit, EsheepAgent, EsheepAgentServer, InformRes, JoinRoomReq, ObservationRes, SUCCESS,
};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicI64, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use tokio::sync::oneshot;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;
use tonic::{Request, Response, Status};

/// Token the fake service refuses with `UNAUTHENTICATED`.
pub const REJECTED_TOKEN: &str = "reject";

pub const ROOM_NOT_FOUND: i32 = 2;
pub const WRONG_PASSWORD: i32 = 3;

/// Shared state of the fake service.
#[derive(Debug, Default)]
pub struct FakeState {
    rooms: Mutex<HashMap<String, String>>,
    next_room: AtomicU32,
    frame_index: AtomicI64,
    tokens: Mutex<Vec<String>>,
}

impl FakeState {
    /// Every credential received, in call order.
    pub fn tokens(&self) -> Vec<String> {
        self.tokens.lock().unwrap().clone()
    }

    fn authenticate(&self, credit: Option<&Credit>) -> Result<(), Status> {
        let token = credit.map(|c| c.api_token.clone()).unwrap_or_default();
        self.tokens.lock().unwrap().push(token.clone());

        if token == REJECTED_TOKEN {
            return Err(Status::unauthenticated("unknown api token"));
        }
        Ok(())
    }
}

fn ok(msg: &str, state: i32) -> CommonRes {
    CommonRes {
        err_code: SUCCESS,
        msg: msg.to_string(),
        state,
    }
}

#[derive(Debug, Clone)]
pub struct FakeAgent {
    state: Arc<FakeState>,
}

#[tonic::async_trait]
impl EsheepAgent for FakeAgent {
    async fn create_room(&self, request: Request<CreateRoomReq>) -> Result<Response<CreateRoomRes>, Status> {
        let req = request.into_inner();
        self.state.authenticate(req.credit.as_ref())?;

        let id = self.state.next_room.fetch_add(1, Ordering::SeqCst) + 1;
        let room_id = format!("room-{}", id);
        self.state.rooms.lock().unwrap().insert(room_id.clone(), req.password);

        Ok(Response::new(CreateRoomRes {
            err_code: SUCCESS,
            msg: "room created".to_string(),
            state: 1,
            room_id,
        }))
    }

    async fn join_room(&self, request: Request<JoinRoomReq>) -> Result<Response<CommonRes>, Status> {
        let req = request.into_inner();
        self.state.authenticate(req.credit.as_ref())?;

        let rooms = self.state.rooms.lock().unwrap();
        let res = match rooms.get(&req.room_id) {
            None => CommonRes {
                err_code: ROOM_NOT_FOUND,
                msg: "room not found".to_string(),
                state: 0,
            },
            Some(password) if *password != req.password => CommonRes {
                err_code: WRONG_PASSWORD,
                msg: "wrong password".to_string(),
                state: 0,
            },
            Some(_) => ok("joined", 1),
        };

        Ok(Response::new(res))
    }

    async fn leave_room(&self, request: Request<Credit>) -> Result<Response<CommonRes>, Status> {
        self.state.authenticate(Some(request.get_ref()))?;
        Ok(Response::new(ok("left", 0)))
    }

    async fn action_space(&self, request: Request<Credit>) -> Result<Response<ActionSpaceRes>, Status> {
        self.state.authenticate(Some(request.get_ref()))?;

        let dimensions = [("movement", 9), ("swing", 2), ("fire", 2), ("apply", 2)]
            .into_iter()
            .map(|(name, size)| ActionDimension {
                name: name.to_string(),
                size,
            })
            .collect();

        Ok(Response::new(ActionSpaceRes {
            err_code: SUCCESS,
            msg: "ok".to_string(),
            state: 1,
            dimensions,
        }))
    }

    async fn action(&self, request: Request<ActionReq>) -> Result<Response<ActionRes>, Status> {
        let req = request.into_inner();
        self.state.authenticate(req.credit.as_ref())?;

        let frame_index = self.state.frame_index.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(Response::new(ActionRes {
            err_code: SUCCESS,
            msg: "ok".to_string(),
            state: 1,
            frame_index,
        }))
    }

    async fn observation(&self, request: Request<Credit>) -> Result<Response<ObservationRes>, Status> {
        self.state.authenticate(Some(request.get_ref()))?;

        Ok(Response::new(ObservationRes {
            err_code: SUCCESS,
            msg: "ok".to_string(),
            state: 1,
            frame_index: self.state.frame_index.load(Ordering::SeqCst),
            width: 2,
            height: 1,
            frame: vec![10, 20, 30, 40, 50, 60],
        }))
    }

    async fn inform(&self, request: Request<Credit>) -> Result<Response<InformRes>, Status> {
        self.state.authenticate(Some(request.get_ref()))?;

        Ok(Response::new(InformRes {
            err_code: SUCCESS,
            msg: "ok".to_string(),
            state: 1,
            score: 10,
            kills: 1,
            health: 100,
            frame_index: self.state.frame_index.load(Ordering::SeqCst),
        }))
    }

    async fn reincarnation(&self, request: Request<Credit>) -> Result<Response<CommonRes>, Status> {
        self.state.authenticate(Some(request.get_ref()))?;
        Ok(Response::new(ok("reborn", 1)))
    }
}

/// Fake service running on its own thread and runtime.
///
/// Shut down and joined on drop.
pub struct TestServer {
    pub addr: SocketAddr,
    pub state: Arc<FakeState>,
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl TestServer {
    pub fn spawn() -> Self {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind test listener");
        listener.set_nonblocking(true).expect("set nonblocking");
        let addr = listener.local_addr().expect("local addr");

        let state = Arc::new(FakeState::default());
        let agent = FakeAgent { state: state.clone() };
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let handle = std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .worker_threads(2)
                .enable_all()
                .build()
                .expect("server runtime");

            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::from_std(listener).expect("tokio listener");
                Server::builder()
                    .add_service(EsheepAgentServer::new(agent))
                    .serve_with_incoming_shutdown(TcpListenerStream::new(listener), async {
                        let _ = shutdown_rx.await;
                    })
                    .await
                    .expect("test server");
            });
        });

        Self {
            addr,
            state,
            shutdown: Some(shutdown_tx),
            handle: Some(handle),
        }
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// Returns a port nothing is listening on.
pub fn unused_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind listener");
    listener.local_addr().expect("local addr").port()
}
