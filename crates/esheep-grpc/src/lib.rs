//! # esheep gRPC
//!
//! Blocking client SDK for the esheep game-agent service.
//!
//! [`Environment`] owns the channel, the credential and the optional
//! diagnostics log, and exposes one method per remote operation:
//!
//! ```rust,no_run
//! use esheep_config::ClientConfig;
//! use esheep_grpc::{Action, Environment};
//!
//! # fn main() -> esheep_core::EsheepResult<()> {
//! let config = ClientConfig::new("127.0.0.1", 50051, "my-token").with_debug(true);
//! let mut env = Environment::connect(&config)?;
//!
//! if let Some(room) = env.create_room("secret")? {
//!     println!("created room {}", room.room_id);
//! }
//! env.submit_action(Action::new(1, 0, 1, 0))?;
//! let inform = env.get_inform()?;
//! # let _ = inform;
//! # Ok(())
//! # }
//! ```

pub mod diagnostics;
pub mod environment;
pub mod proto;
pub mod transport;

pub use diagnostics::{DiagnosticFields, DiagnosticsLog};
pub use environment::*;
pub use proto::{ResponseStatus, SUCCESS};
pub use transport::*;
