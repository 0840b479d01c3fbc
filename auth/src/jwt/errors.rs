use thiserror::Error;

/// Error type for token operations.
///
/// Verification failures keep their distinct kind so callers can log them;
/// outward responses collapse all of them into a single "unauthorized".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Token is malformed")]
    Malformed,

    #[error("Token signature does not match")]
    SignatureMismatch,

    #[error("Token is expired")]
    Expired,

    #[error("Token is not yet valid")]
    NotYetValid,

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),
}
