use async_trait::async_trait;

use crate::domain::credential::models::UserId;
use crate::domain::errors::StoreError;
use crate::domain::permission::models::ActionCode;
use crate::domain::permission::models::Permission;

/// Port for authorization decisions.
#[async_trait]
pub trait AuthorizationPort: Send + Sync + 'static {
    /// Decide whether a subject may perform an action.
    ///
    /// # Returns
    /// `true` iff a grant exists; a missing grant is `false`, not an error
    ///
    /// # Errors
    /// * `StoreError` - Grant store failed or timed out; the answer is undetermined
    async fn has_access(&self, subject: UserId, action: &ActionCode) -> Result<bool, StoreError>;

    /// List the permissions granted to a subject.
    ///
    /// # Errors
    /// * `StoreError` - Grant store failed or timed out
    async fn permissions_of(&self, subject: UserId) -> Result<Vec<Permission>, StoreError>;
}

/// Read access to permission grants.
///
/// Implementations must be safe to call concurrently; each method is a
/// single read.
#[async_trait]
pub trait GrantStore: Send + Sync + 'static {
    /// Check whether a grant row exists for `(user_id, action)`.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn has_grant(&self, user_id: UserId, action: &ActionCode) -> Result<bool, StoreError>;

    /// Retrieve all permissions granted to a user.
    ///
    /// # Returns
    /// Permissions ordered by catalogue position (empty if none)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn permissions_for(&self, user_id: UserId) -> Result<Vec<Permission>, StoreError>;
}
