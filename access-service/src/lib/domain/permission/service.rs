use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::credential::models::UserId;
use crate::domain::errors::StoreError;
use crate::domain::lookup::bounded;
use crate::domain::permission::models::ActionCode;
use crate::domain::permission::models::Permission;
use crate::domain::permission::ports::AuthorizationPort;
use crate::domain::permission::ports::GrantStore;

/// Domain service answering permission questions from the grant store.
///
/// No caching: every call is a fresh store read.
pub struct PermissionResolver<GS>
where
    GS: GrantStore,
{
    store: Arc<GS>,
    lookup_timeout: Duration,
}

impl<GS> PermissionResolver<GS>
where
    GS: GrantStore,
{
    /// Create a new resolver.
    ///
    /// # Arguments
    /// * `store` - Grant lookup implementation
    /// * `lookup_timeout` - Upper bound for each store lookup
    pub fn new(store: Arc<GS>, lookup_timeout: Duration) -> Self {
        Self {
            store,
            lookup_timeout,
        }
    }
}

#[async_trait]
impl<GS> AuthorizationPort for PermissionResolver<GS>
where
    GS: GrantStore,
{
    async fn has_access(&self, subject: UserId, action: &ActionCode) -> Result<bool, StoreError> {
        bounded(self.lookup_timeout, self.store.has_grant(subject, action))
            .await
            .map_err(|e| {
                tracing::error!(
                    user_id = %subject,
                    action = %action,
                    error = %e,
                    "Grant lookup failed"
                );
                e
            })
    }

    async fn permissions_of(&self, subject: UserId) -> Result<Vec<Permission>, StoreError> {
        bounded(self.lookup_timeout, self.store.permissions_for(subject)).await
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::domain::permission::models::actions;

    mock! {
        pub TestGrantStore {}

        #[async_trait]
        impl GrantStore for TestGrantStore {
            async fn has_grant(&self, user_id: UserId, action: &ActionCode) -> Result<bool, StoreError>;
            async fn permissions_for(&self, user_id: UserId) -> Result<Vec<Permission>, StoreError>;
        }
    }

    const TIMEOUT: Duration = Duration::from_secs(2);

    #[tokio::test]
    async fn test_has_access_granted_and_absent() {
        let mut store = MockTestGrantStore::new();
        store
            .expect_has_grant()
            .with(eq(UserId(1)), eq(actions::GET_USER))
            .returning(|_, _| Ok(true));
        store
            .expect_has_grant()
            .with(eq(UserId(1)), eq(actions::REMOVE_USER))
            .returning(|_, _| Ok(false));

        let resolver = PermissionResolver::new(Arc::new(store), TIMEOUT);

        assert_eq!(resolver.has_access(UserId(1), &actions::GET_USER).await, Ok(true));
        assert_eq!(
            resolver.has_access(UserId(1), &actions::REMOVE_USER).await,
            Ok(false)
        );
    }

    #[tokio::test]
    async fn test_has_access_surfaces_store_error() {
        let mut store = MockTestGrantStore::new();
        store
            .expect_has_grant()
            .times(1)
            .returning(|_, _| Err(StoreError::DatabaseError("connection reset".to_string())));

        let resolver = PermissionResolver::new(Arc::new(store), TIMEOUT);

        assert_eq!(
            resolver.has_access(UserId(1), &actions::GET_USER).await,
            Err(StoreError::DatabaseError("connection reset".to_string()))
        );
    }

    struct StalledStore;

    #[async_trait]
    impl GrantStore for StalledStore {
        async fn has_grant(&self, _user_id: UserId, _action: &ActionCode) -> Result<bool, StoreError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(true)
        }

        async fn permissions_for(&self, _user_id: UserId) -> Result<Vec<Permission>, StoreError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(Vec::new())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_has_access_times_out() {
        let limit = Duration::from_millis(100);
        let resolver = PermissionResolver::new(Arc::new(StalledStore), limit);

        assert_eq!(
            resolver.has_access(UserId(1), &actions::GET_USER).await,
            Err(StoreError::Timeout(limit))
        );
        assert_eq!(
            resolver.permissions_of(UserId(1)).await,
            Err(StoreError::Timeout(limit))
        );
    }

    #[tokio::test]
    async fn test_permissions_of() {
        let mut store = MockTestGrantStore::new();
        store
            .expect_permissions_for()
            .with(eq(UserId(1)))
            .times(1)
            .returning(|_| {
                Ok(vec![
                    Permission::new(actions::GET_ALL_USERS, "Get All Users"),
                    Permission::new(actions::GET_USER, "Get User"),
                ])
            });

        let resolver = PermissionResolver::new(Arc::new(store), TIMEOUT);
        let permissions = resolver.permissions_of(UserId(1)).await.unwrap();

        assert_eq!(permissions.len(), 2);
        assert_eq!(permissions[0].code, actions::GET_ALL_USERS);
        assert_eq!(permissions[1].name, "Get User");
    }
}
