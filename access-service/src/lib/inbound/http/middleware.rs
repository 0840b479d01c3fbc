use axum::extract::MatchedPath;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use chrono::Utc;

use crate::domain::access::gate::GateRequest;
use crate::domain::credential::models::UserId;
use crate::domain::errors::ErrorKind;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension type carrying the subject of an allowed request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedSubject {
    pub user_id: UserId,
}

/// Middleware that runs the access gate on a protected route
pub async fn access_gate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    // Owned copies; the request itself is moved into `next`
    let authorization = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let method = req.method().clone();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_owned())
        .unwrap_or_else(|| req.uri().path().to_owned());

    let decision = state
        .gate
        .check(
            GateRequest {
                authorization: authorization.as_deref(),
                method: &method,
                route: &route,
            },
            Utc::now(),
        )
        .await;

    match (decision.granted_subject(), decision.rejection()) {
        (Some(user_id), _) => {
            req.extensions_mut()
                .insert(AuthenticatedSubject { user_id });
            Ok(next.run(req).await)
        }
        (None, Some(ErrorKind::InternalError)) => {
            tracing::error!(
                method = %method,
                route = %route,
                reason = %decision.reason,
                "Access check failed"
            );
            Err(ErrorKind::InternalError.into())
        }
        (None, kind) => {
            tracing::warn!(
                method = %method,
                route = %route,
                user_id = ?decision.subject_id.map(|id| id.as_i64()),
                reason = %decision.reason,
                "Access denied"
            );
            Err(kind.unwrap_or(ErrorKind::Unauthorized).into())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use async_trait::async_trait;
    use auth::SigningKey;
    use auth::Token;
    use auth::TokenCodec;
    use axum::body::Body;
    use axum::http::Method;
    use axum::http::StatusCode;
    use axum::routing::delete;
    use axum::routing::get;
    use axum::Extension;
    use axum::Router;
    use chrono::DateTime;
    use tower::ServiceExt;

    use super::*;
    use crate::domain::credential::errors::AuthError;
    use crate::domain::credential::models::User;
    use crate::domain::credential::ports::AuthenticationPort;
    use crate::domain::errors::StoreError;
    use crate::domain::permission::models::actions;
    use crate::domain::permission::models::ActionCode;
    use crate::domain::permission::models::Permission;
    use crate::domain::permission::ports::AuthorizationPort;
    use crate::inbound::http::router::create_router;
    use crate::inbound::http::router::ProtectedRoutes;

    struct NoLogins;

    #[async_trait]
    impl AuthenticationPort for NoLogins {
        async fn issue_token(
            &self,
            _email: &str,
            _password: &str,
            _now: DateTime<Utc>,
        ) -> Result<Token, AuthError> {
            Err(AuthError::InvalidCredentials)
        }

        async fn find_subject(&self, _id: UserId) -> Result<Option<User>, StoreError> {
            Ok(None)
        }
    }

    struct StaticGrants(HashSet<(UserId, ActionCode)>);

    #[async_trait]
    impl AuthorizationPort for StaticGrants {
        async fn has_access(&self, subject: UserId, action: &ActionCode) -> Result<bool, StoreError> {
            Ok(self.0.contains(&(subject, action.clone())))
        }

        async fn permissions_of(&self, _subject: UserId) -> Result<Vec<Permission>, StoreError> {
            Ok(Vec::new())
        }
    }

    async fn whoami(Extension(subject): Extension<AuthenticatedSubject>) -> String {
        subject.user_id.to_string()
    }

    fn app() -> (Router, Arc<TokenCodec>) {
        let codec = Arc::new(TokenCodec::with_default_ttl(&SigningKey::from_secret(
            "test_secret_key_at_least_32_bytes!",
        )));
        let grants = StaticGrants([(UserId(1), actions::GET_USER)].into_iter().collect());
        let resources = ProtectedRoutes::new()
            .route(Method::GET, "/v1/users/:id", actions::GET_USER, get(whoami))
            .route(Method::DELETE, "/v1/users/:id", actions::REMOVE_USER, delete(whoami));

        let router = create_router(
            Arc::new(NoLogins),
            Arc::new(grants),
            Arc::clone(&codec),
            resources,
        );
        (router, codec)
    }

    fn request(method: Method, token: Option<&str>) -> Request {
        let mut builder = Request::builder().method(method).uri("/v1/users/7");
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_granted_request_reaches_handler_with_subject() {
        let (app, codec) = app();
        let token = codec.sign(1, Utc::now()).unwrap();

        let response = app
            .oneshot(request(Method::GET, Some(token.as_str())))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"1");
    }

    #[tokio::test]
    async fn test_head_request_is_gated_like_get() {
        let (app, codec) = app();
        let token = codec.sign(1, Utc::now()).unwrap();

        let response = app
            .clone()
            .oneshot(request(Method::HEAD, Some(token.as_str())))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app.oneshot(request(Method::HEAD, None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_denied_request_is_unauthorized() {
        let (app, codec) = app();
        let token = codec.sign(1, Utc::now()).unwrap();

        let response = app
            .oneshot(request(Method::DELETE, Some(token.as_str())))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"status_code": 401, "data": {"message": "Unauthorized"}})
        );
    }

    #[tokio::test]
    async fn test_missing_token_is_unauthorized() {
        let (app, _) = app();

        let response = app.oneshot(request(Method::GET, None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
