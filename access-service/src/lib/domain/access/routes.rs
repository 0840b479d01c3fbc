use std::collections::HashMap;

use http::Method;

use crate::domain::permission::models::ActionCode;

/// Static binding of `(method, route pattern)` to an action code.
///
/// Route patterns are matched verbatim (`/v1/users/:id`, not `/v1/users/7`).
/// HEAD resolves through the GET binding, as the router serves HEAD with the
/// GET handler.
#[derive(Debug, Clone, Default)]
pub struct RouteActions {
    bindings: HashMap<Method, HashMap<String, ActionCode>>,
}

impl RouteActions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a route to an action, replacing any previous binding.
    pub fn insert(&mut self, method: Method, route: impl Into<String>, action: ActionCode) {
        self.bindings
            .entry(method)
            .or_default()
            .insert(route.into(), action);
    }

    pub fn with(mut self, method: Method, route: impl Into<String>, action: ActionCode) -> Self {
        self.insert(method, route, action);
        self
    }

    pub fn resolve(&self, method: &Method, route: &str) -> Option<&ActionCode> {
        let routes = if *method == Method::HEAD {
            self.bindings.get(&Method::GET)
        } else {
            self.bindings.get(method)
        };

        routes?.get(route)
    }

    pub fn merge(&mut self, other: RouteActions) {
        for (method, routes) in other.bindings {
            self.bindings.entry(method).or_default().extend(routes);
        }
    }

    pub fn len(&self) -> usize {
        self.bindings.values().map(HashMap::len).sum()
    }
}
