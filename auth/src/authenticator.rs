use std::sync::Arc;

use chrono::DateTime;
use chrono::Utc;

use crate::jwt::Token;
use crate::jwt::TokenCodec;
use crate::jwt::TokenError;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Matched against when no account exists, so every login pays for one full
/// password verification.
const DECOY_PASSWORD: &str = "decoy-password-never-issued";

/// Authentication coordinator combining password matching and token signing.
///
/// The codec is shared: the same instance verifies tokens on protected
/// requests.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_codec: Arc<TokenCodec>,
    decoy_hash: String,
}

/// Stored account data a login is checked against.
#[derive(Clone, Copy)]
pub struct Candidate<'a> {
    pub subject_id: i64,
    pub password_hash: &'a str,
    pub active: bool,
}

/// Authentication operation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token error: {0}")]
    Token(#[from] TokenError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `token_codec` - Codec holding the process-wide signing key
    ///
    /// # Errors
    /// * `PasswordError` - Decoy hash could not be computed
    pub fn new(token_codec: Arc<TokenCodec>) -> Result<Self, PasswordError> {
        let password_hasher = PasswordHasher::new();
        let decoy_hash = password_hasher.hash(DECOY_PASSWORD)?;

        Ok(Self {
            password_hasher,
            token_codec,
            decoy_hash,
        })
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a login and sign a token for the candidate's subject.
    ///
    /// Exactly one full password verification runs whatever the outcome:
    /// against the stored hash, or against the decoy hash when there is no
    /// candidate. The `active` flag and the match result are applied together
    /// afterwards.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to check
    /// * `candidate` - Account found for the login email, if any
    /// * `now` - Issue instant
    ///
    /// # Errors
    /// * `InvalidCredentials` - No account, inactive account, wrong password or unusable hash
    /// * `Token` - Token signing failed
    pub fn authenticate(
        &self,
        password: &str,
        candidate: Option<Candidate<'_>>,
        now: DateTime<Utc>,
    ) -> Result<Token, AuthenticationError> {
        let stored_hash = candidate.map_or(self.decoy_hash.as_str(), |c| c.password_hash);
        let matched = self.password_hasher.matches(password, stored_hash);

        match candidate {
            Some(candidate) if candidate.active && matched => {
                Ok(self.token_codec.sign(candidate.subject_id, now)?)
            }
            _ => Err(AuthenticationError::InvalidCredentials),
        }
    }

    /// Verify a token and return its subject.
    ///
    /// # Errors
    /// * `TokenError` - Token is malformed, forged, expired or not yet valid
    pub fn verify_token(&self, token: &str, now: DateTime<Utc>) -> Result<i64, TokenError> {
        self.token_codec.verify(token, now)
    }
}
