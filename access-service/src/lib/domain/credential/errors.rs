use auth::ValidationError;
use thiserror::Error;

use crate::domain::errors::ErrorKind;
use crate::domain::errors::StoreError;

/// Error for token issuance.
///
/// Unknown email, inactive account and wrong password all collapse into
/// `InvalidCredentials`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValidationError),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Credential store error: {0}")]
    Store(#[from] StoreError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidInput(_) => ErrorKind::InvalidInput,
            AuthError::InvalidCredentials => ErrorKind::InvalidCredentials,
            AuthError::Store(_) | AuthError::Internal(_) => ErrorKind::InternalError,
        }
    }
}
