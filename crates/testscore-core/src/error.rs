//! Core error types.
//!
//! Scoring and session operations never fail; they degrade to zero or empty
//! values. These errors only arise at the serialization and lookup edges.

use thiserror::Error;

/// Errors raised by testscore-core.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A session snapshot could not be decoded.
    #[error("invalid session snapshot: {0}")]
    InvalidSnapshot(#[source] serde_json::Error),

    /// A session snapshot could not be encoded.
    #[error("failed to encode session snapshot: {0}")]
    SnapshotEncode(#[source] serde_json::Error),

    /// The named scoring preset does not exist.
    #[error("unknown scoring preset: {0}")]
    UnknownPreset(String),
}
