use std::sync::Arc;

use auth::TokenCodec;
use chrono::DateTime;
use chrono::Utc;
use http::Method;

use crate::domain::access::models::AccessDecision;
use crate::domain::access::models::DecisionReason;
use crate::domain::access::routes::RouteActions;
use crate::domain::credential::models::UserId;
use crate::domain::permission::ports::AuthorizationPort;

/// What the gate needs to know about a request.
#[derive(Debug, Clone, Copy)]
pub struct GateRequest<'a> {
    /// Raw `Authorization` header value, if present and valid UTF-8
    pub authorization: Option<&'a str>,
    pub method: &'a Method,
    /// Matched route pattern, e.g. `/v1/users/:id`
    pub route: &'a str,
}

/// Decides whether a protected request may reach its handler.
///
/// Holds only read-only state; every check is independent of the others.
#[derive(Clone)]
pub struct AccessGate {
    codec: Arc<TokenCodec>,
    authorization: Arc<dyn AuthorizationPort>,
    routes: RouteActions,
}

impl AccessGate {
    pub fn new(
        codec: Arc<TokenCodec>,
        authorization: Arc<dyn AuthorizationPort>,
        routes: RouteActions,
    ) -> Self {
        Self {
            codec,
            authorization,
            routes,
        }
    }

    pub async fn check(&self, request: GateRequest<'_>, now: DateTime<Utc>) -> AccessDecision {
        let Some(token) = request.authorization.and_then(extract_bearer_token) else {
            return AccessDecision::denied(None, DecisionReason::NoToken);
        };

        let subject = match self.codec.verify(token, now) {
            Ok(subject) => UserId(subject),
            Err(e) => return AccessDecision::denied(None, DecisionReason::TokenInvalid(e)),
        };

        let Some(action) = self.routes.resolve(request.method, request.route) else {
            return AccessDecision::denied(Some(subject), DecisionReason::UnmappedRoute);
        };

        match self.authorization.has_access(subject, action).await {
            Ok(true) => AccessDecision::granted(subject),
            Ok(false) => AccessDecision::denied(Some(subject), DecisionReason::PermissionDenied),
            Err(e) => AccessDecision::denied(Some(subject), DecisionReason::StoreUnavailable(e)),
        }
    }
}

/// Extract the token from a `Bearer <token>` header value.
///
/// The scheme is case-sensitive and must be followed by whitespace and exactly
/// one token.
pub fn extract_bearer_token(header: &str) -> Option<&str> {
    let rest = header.strip_prefix("Bearer")?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }

    let mut parts = rest.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some(token), None) => Some(token),
        _ => None,
    }
}
