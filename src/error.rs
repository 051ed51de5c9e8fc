//! # Errors
//!
//! Typed errors for store operations.
//!
//! Not-found is a distinct variant rather than an `Option` return because
//! several callers (deletion, the lifecycle waiter) treat it as a fatal
//! condition that must not be retried.

use thiserror::Error;

/// Errors returned by secret-store and configuration-store operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// The addressed secret or configuration does not exist
    #[error("resource not found: {id}")]
    NotFound { id: String },

    /// The service rejected the request
    #[error("Secrets Manager API error: {message} (status: {status})")]
    Api { status: u16, message: String },

    /// IAM token exchange failed
    #[error("IAM authentication failed: {message}")]
    Auth { message: String },

    /// Request never produced a usable response
    ///
    /// Transport-level retry policy, if any, belongs to the HTTP layer,
    /// not to callers of this crate.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// A message body could not be encoded or decoded
    #[error("failed to encode or decode message body: {0}")]
    Json(#[from] serde_json::Error),
}
