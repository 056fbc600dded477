//! # esheep Runner
//!
//! Connects to the esheep agent service using the layered configuration,
//! creates (or joins) a room, reads the action space and status, then leaves.
//!
//! Exits with status 1 when the configuration cannot be loaded or the
//! service is unreachable.

use esheep_config::ConfigLoader;
use esheep_core::init_logging;
use esheep_grpc::Environment;
use tracing::{error, info};

mod session;

fn main() {
    let config = match ConfigLoader::from_default_location() {
        Ok(loader) => loader.into_config(),
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = init_logging(&config.telemetry) {
        eprintln!("Logging disabled: {}", e);
    }

    info!("Starting esheep runner...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!("Endpoint: {}", config.client.addr());

    let mut env = Environment::connect_or_exit(&config.client);

    match session::run_session(&mut env, &config.session) {
        Ok(summary) => info!(?summary, "Session finished"),
        Err(e) => {
            error!("Session error: {}", e);
            std::process::exit(1);
        }
    }
}
