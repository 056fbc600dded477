//! # esheep Core
//!
//! Core types shared by every esheep SDK crate: the unified error type,
//! the result alias and the `tracing` subscriber setup.

pub mod error;
pub mod result;
pub mod telemetry;

pub use error::*;
pub use result::*;
pub use telemetry::*;
