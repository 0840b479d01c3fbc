use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Payload carried by an access token.
///
/// Timestamps are whole seconds since the Unix epoch.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenClaims {
    /// Subject (authenticated user identifier)
    pub user_id: i64,

    /// Issued at, also used as the not-before bound
    pub iat: i64,

    /// Expiration time
    pub exp: i64,
}

impl TokenClaims {
    /// Create claims for a subject valid from `issued_at` for `ttl`.
    ///
    /// # Arguments
    /// * `user_id` - Subject identifier
    /// * `issued_at` - Start of the validity window
    /// * `ttl` - Length of the validity window
    pub fn new(user_id: i64, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        let iat = issued_at.timestamp();
        Self {
            user_id,
            iat,
            exp: iat + ttl.num_seconds(),
        }
    }

    /// Check if the token is expired at `current_timestamp`.
    ///
    /// A token is still valid at exactly its expiration second.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp > self.exp
    }

    /// Check if `current_timestamp` is earlier than the issue time.
    pub fn is_premature(&self, current_timestamp: i64) -> bool {
        current_timestamp < self.iat
    }
}
