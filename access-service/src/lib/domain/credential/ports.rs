use async_trait::async_trait;
use auth::Token;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::credential::errors::AuthError;
use crate::domain::credential::models::User;
use crate::domain::credential::models::UserId;
use crate::domain::errors::StoreError;

/// Port for login operations.
#[async_trait]
pub trait AuthenticationPort: Send + Sync + 'static {
    /// Check login credentials and issue a signed token.
    ///
    /// # Arguments
    /// * `email` - Login email
    /// * `password` - Plaintext password
    /// * `now` - Issue instant
    ///
    /// # Returns
    /// Token for the user's id, valid for the configured lifetime
    ///
    /// # Errors
    /// * `InvalidInput` - Email or password fails shape validation
    /// * `InvalidCredentials` - Unknown email, inactive account or wrong password
    /// * `Store` - Credential store failed or timed out
    /// * `Internal` - Token signing or password matching could not run
    async fn issue_token(
        &self,
        email: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<Token, AuthError>;

    /// Retrieve the user behind an authenticated subject.
    ///
    /// # Returns
    /// Optional user (None if the record no longer exists)
    ///
    /// # Errors
    /// * `StoreError` - Credential store failed or timed out
    async fn find_subject(&self, id: UserId) -> Result<Option<User>, StoreError>;
}

/// Read access to user credentials.
///
/// Implementations must be safe to call concurrently; each method is a
/// single read.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Retrieve user by login email.
    ///
    /// # Returns
    /// Optional user (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError>;
}
