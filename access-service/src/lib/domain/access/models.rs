use std::fmt;

use auth::TokenError;

use crate::domain::credential::models::UserId;
use crate::domain::errors::ErrorKind;
use crate::domain::errors::StoreError;

/// Outcome of a gate check.
///
/// `allowed` holds iff a valid token was presented and the grant exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessDecision {
    pub allowed: bool,
    pub subject_id: Option<UserId>,
    pub reason: DecisionReason,
}

impl AccessDecision {
    pub fn granted(subject: UserId) -> Self {
        Self {
            allowed: true,
            subject_id: Some(subject),
            reason: DecisionReason::Granted,
        }
    }

    pub fn denied(subject_id: Option<UserId>, reason: DecisionReason) -> Self {
        Self {
            allowed: false,
            subject_id,
            reason,
        }
    }

    /// Subject to continue with, if the request may proceed.
    pub fn granted_subject(&self) -> Option<UserId> {
        if self.allowed {
            self.subject_id
        } else {
            None
        }
    }

    /// Boundary error kind for a rejected request; `None` when allowed.
    pub fn rejection(&self) -> Option<ErrorKind> {
        if self.allowed {
            None
        } else {
            self.reason.kind()
        }
    }
}

/// Why a gate check ended the way it did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecisionReason {
    Granted,
    /// No header, wrong scheme or not exactly one token
    NoToken,
    TokenInvalid(TokenError),
    PermissionDenied,
    /// Route has no bound action code
    UnmappedRoute,
    StoreUnavailable(StoreError),
}

impl DecisionReason {
    /// Boundary error kind; `None` for `Granted`.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            DecisionReason::Granted => None,
            DecisionReason::NoToken
            | DecisionReason::TokenInvalid(_)
            | DecisionReason::PermissionDenied => Some(ErrorKind::Unauthorized),
            DecisionReason::UnmappedRoute | DecisionReason::StoreUnavailable(_) => {
                Some(ErrorKind::InternalError)
            }
        }
    }
}

impl fmt::Display for DecisionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecisionReason::Granted => f.write_str("granted"),
            DecisionReason::NoToken => f.write_str("no bearer token"),
            DecisionReason::TokenInvalid(e) => write!(f, "token rejected: {}", e),
            DecisionReason::PermissionDenied => f.write_str("permission denied"),
            DecisionReason::UnmappedRoute => f.write_str("route has no action code"),
            DecisionReason::StoreUnavailable(e) => write!(f, "grant store unavailable: {}", e),
        }
    }
}
