use thiserror::Error;

/// Error type for login input validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} cannot be empty")]
    EmptyField(&'static str),

    #[error("email is not a valid email")]
    InvalidEmailFormat,
}
