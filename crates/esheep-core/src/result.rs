//! Result type alias for the esheep SDK.

use crate::EsheepError;

/// A specialized `Result` type for esheep operations.
pub type EsheepResult<T> = Result<T, EsheepError>;
