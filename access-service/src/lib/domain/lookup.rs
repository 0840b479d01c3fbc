use std::future::Future;
use std::time::Duration;

use crate::domain::errors::StoreError;

/// Run a single store lookup, giving up after `limit`.
///
/// The lookup future is dropped on timeout, which cancels the pending query.
pub async fn bounded<T, F>(limit: Duration, lookup: F) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, StoreError>>,
{
    tokio::time::timeout(limit, lookup)
        .await
        .map_err(|_| StoreError::Timeout(limit))?
}
