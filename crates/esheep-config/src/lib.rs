//! # esheep Config
//!
//! Configuration for the esheep SDK: connection and diagnostics settings for
//! the client facade, the session the runner plays, and logging.
//! Values are layered from TOML files and `ESHEEP__*` environment variables.

mod app_config;
mod loader;

pub use app_config::*;
pub use loader::*;
