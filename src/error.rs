//! Error types produced by the executor.
//!
//! All errors are typed, cloneable, and comparable so callers (and tests)
//! can match on the exact failure instead of scraping message strings.
//!
//! # Error categories
//!
//! | Error | Stage | Description |
//! |-------|-------|-------------|
//! | [`PayloadRead`](ExecutorError::PayloadRead) | Input | Payload file unreadable or not UTF-8 |
//! | [`UnrecognizedShape`](ExecutorError::UnrecognizedShape) | Classification | No known shape marker in the payload |
//! | [`InvalidPayload`](ExecutorError::InvalidPayload) | Deserialization | Marker matched but the typed event cannot be populated |
//! | [`HandlerNotFound`](ExecutorError::HandlerNotFound) | Resolution | Handler id absent from the registry |
//! | [`Invocation`](ExecutorError::Invocation) | Invocation | The handler itself failed |
//!
//! None of these are retried or recovered internally. The executor models a
//! single best-effort attempt per process; the supervisor owns retry policy.
use thiserror::Error;

/// Errors that can occur while executing one handler invocation.
///
/// The enum is marked `#[non_exhaustive]` to allow future additions without
/// breaking existing code. Callers should always include a catch-all arm
/// when matching.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExecutorError {
    /// The payload file could not be read into a UTF-8 string.
    #[error("cannot read payload file {path}: {reason}")]
    PayloadRead { path: String, reason: String },

    /// No known shape marker was found in the raw payload.
    ///
    /// Carries a bounded preview of the unmatched payload for diagnostics.
    /// There is no fallback shape; this is fatal.
    #[error("unrecognized event shape, payload starts with: {preview}")]
    UnrecognizedShape { preview: String },

    /// A marker matched but the payload could not populate the typed event
    /// (malformed JSON, wrong structure, bad base64, bad timestamp).
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    /// The handler id does not resolve to any registered factory.
    #[error("handler not found: {0}")]
    HandlerNotFound(String),

    /// The handler raised during execution. The message is the handler's
    /// own, propagated verbatim so the caller sees the true cause.
    #[error("handler invocation failed: {0}")]
    Invocation(String),
}

impl ExecutorError {
    /// Returns true when the failure happened before any handler code ran.
    ///
    /// Useful for supervisors that distinguish harness faults from user
    /// code faults.
    pub fn is_pre_invocation(&self) -> bool {
        !matches!(self, ExecutorError::Invocation(_))
    }
}
