use std::fmt;

use chrono::DateTime;
use chrono::Utc;

/// A signed access token.
///
/// Immutable once issued; the only invalidation is its expiration time.
#[derive(Clone, PartialEq, Eq)]
pub struct Token {
    pub(crate) encoded: String,
    pub(crate) subject_id: i64,
    pub(crate) issued_at: DateTime<Utc>,
    pub(crate) expires_at: DateTime<Utc>,
    pub(crate) signature: Vec<u8>,
}

impl Token {
    /// Compact wire form: `header.payload.signature`.
    pub fn as_str(&self) -> &str {
        &self.encoded
    }

    pub fn subject_id(&self) -> i64 {
        self.subject_id
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Raw HMAC bytes of the signature segment.
    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    pub fn into_string(self) -> String {
        self.encoded
    }
}

// Bearer material stays out of logs.
impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("subject_id", &self.subject_id)
            .field("issued_at", &self.issued_at)
            .field("expires_at", &self.expires_at)
            .finish_non_exhaustive()
    }
}
