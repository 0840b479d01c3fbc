use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::Candidate;
use auth::CredentialValidator;
use auth::Token;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::credential::errors::AuthError;
use crate::domain::credential::models::User;
use crate::domain::credential::models::UserId;
use crate::domain::credential::ports::AuthenticationPort;
use crate::domain::credential::ports::CredentialStore;
use crate::domain::errors::StoreError;
use crate::domain::lookup::bounded;

/// Domain service issuing tokens for valid logins.
///
/// Concrete implementation of AuthenticationPort with dependency injection.
pub struct TokenIssuer<CS>
where
    CS: CredentialStore,
{
    store: Arc<CS>,
    authenticator: Arc<Authenticator>,
    validator: CredentialValidator,
    lookup_timeout: Duration,
}

impl<CS> TokenIssuer<CS>
where
    CS: CredentialStore,
{
    /// Create a new token issuer with injected dependencies.
    ///
    /// # Arguments
    /// * `store` - Credential lookup implementation
    /// * `authenticator` - Password matcher and token signer
    /// * `lookup_timeout` - Upper bound for each store lookup
    pub fn new(store: Arc<CS>, authenticator: Arc<Authenticator>, lookup_timeout: Duration) -> Self {
        Self {
            store,
            authenticator,
            validator: CredentialValidator::new(),
            lookup_timeout,
        }
    }
}

#[async_trait]
impl<CS> AuthenticationPort for TokenIssuer<CS>
where
    CS: CredentialStore,
{
    async fn issue_token(
        &self,
        email: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<Token, AuthError> {
        self.validator.validate(email, password)?;

        let user = bounded(self.lookup_timeout, self.store.find_by_email(email))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Credential lookup failed");
                AuthError::Store(e)
            })?;

        let subject = user.as_ref().map(|user| user.id);

        // Argon2 is CPU-bound; keep it off the async workers. Unknown and
        // inactive accounts go through the same single verification.
        let authenticator = Arc::clone(&self.authenticator);
        let password = password.to_owned();
        let outcome = tokio::task::spawn_blocking(move || {
            let candidate = user.as_ref().map(|user| Candidate {
                subject_id: user.id.as_i64(),
                password_hash: &user.password_hash,
                active: user.active,
            });
            authenticator.authenticate(&password, candidate, now)
        })
        .await
        .map_err(|e| AuthError::Internal(format!("Password check aborted: {}", e)))?;

        match outcome {
            Ok(token) => {
                tracing::info!(
                    user_id = token.subject_id(),
                    expires_at = %token.expires_at(),
                    "Token issued"
                );
                Ok(token)
            }
            Err(AuthenticationError::InvalidCredentials) => {
                tracing::debug!(
                    user_id = ?subject.map(|id| id.as_i64()),
                    "Login rejected"
                );
                Err(AuthError::InvalidCredentials)
            }
            Err(AuthenticationError::Token(e)) => Err(AuthError::Internal(e.to_string())),
        }
    }

    async fn find_subject(&self, id: UserId) -> Result<Option<User>, StoreError> {
        bounded(self.lookup_timeout, self.store.find_by_id(id)).await
    }
}
