use std::time::Duration;

use thiserror::Error;

/// Error for credential and grant store lookups.
///
/// Always surfaced to the caller; never read as "not found" or "denied".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Store lookup timed out after {0:?}")]
    Timeout(Duration),
}

/// Error kinds exposed at the service boundary.
///
/// Inner causes map onto these four kinds; the HTTP edge turns each kind into
/// a status code without inspecting the cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed login fields
    InvalidInput,
    /// Unknown email, wrong password or inactive account
    InvalidCredentials,
    /// Missing, invalid or expired token, or a missing grant
    Unauthorized,
    /// Store unavailable or timed out, or a server misconfiguration
    InternalError,
}
