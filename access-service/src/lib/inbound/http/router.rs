use std::sync::Arc;
use std::time::Duration;

use auth::TokenCodec;
use axum::body::Body;
use axum::http::Method;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::routing::MethodRouter;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::get_authenticated_user::get_authenticated_user;
use super::handlers::issue_token::issue_token;
use super::middleware::access_gate;
use crate::domain::access::gate::AccessGate;
use crate::domain::access::routes::RouteActions;
use crate::domain::credential::ports::AuthenticationPort;
use crate::domain::permission::models::actions;
use crate::domain::permission::models::ActionCode;
use crate::domain::permission::ports::AuthorizationPort;

const AUTH_PATH: &str = "/v1/auth";
const AUTH_ME_PATH: &str = "/v1/auth/me";

#[derive(Clone)]
pub struct AppState {
    pub authentication: Arc<dyn AuthenticationPort>,
    pub authorization: Arc<dyn AuthorizationPort>,
    pub gate: Arc<AccessGate>,
}

/// Resource routes placed behind the access gate, each bound to an action code.
///
/// `handler` is expected to serve `method` only; the binding is keyed by
/// `(method, path)`.
pub struct ProtectedRoutes {
    router: Router<AppState>,
    actions: RouteActions,
}

impl ProtectedRoutes {
    pub fn new() -> Self {
        Self {
            router: Router::new(),
            actions: RouteActions::new(),
        }
    }

    pub fn route(
        mut self,
        method: Method,
        path: &str,
        action: ActionCode,
        handler: MethodRouter<AppState>,
    ) -> Self {
        self.actions.insert(method, path, action);
        self.router = self.router.route(path, handler);
        self
    }

    pub fn merge(mut self, other: ProtectedRoutes) -> Self {
        self.actions.merge(other.actions);
        self.router = self.router.merge(other.router);
        self
    }
}

impl Default for ProtectedRoutes {
    fn default() -> Self {
        Self::new()
    }
}

pub fn create_router(
    authentication: Arc<dyn AuthenticationPort>,
    authorization: Arc<dyn AuthorizationPort>,
    codec: Arc<TokenCodec>,
    resources: ProtectedRoutes,
) -> Router {
    let ProtectedRoutes {
        router: resource_routes,
        actions: mut route_actions,
    } = resources;
    route_actions.insert(Method::GET, AUTH_ME_PATH, actions::USER_ME);

    tracing::debug!(routes = route_actions.len(), "Protected routes registered");

    let state = AppState {
        authentication,
        gate: Arc::new(AccessGate::new(
            codec,
            Arc::clone(&authorization),
            route_actions,
        )),
        authorization,
    };

    let public_routes = Router::new().route(AUTH_PATH, post(issue_token));

    let protected_routes = Router::new()
        .route(AUTH_ME_PATH, get(get_authenticated_user))
        .merge(resource_routes)
        .route_layer(middleware::from_fn_with_state(state.clone(), access_gate));

    // Headers stay out of the span: they carry bearer tokens
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
