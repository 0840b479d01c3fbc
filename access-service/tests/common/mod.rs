use std::collections::HashMap;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use access_service::domain::credential::models::User;
use access_service::domain::credential::models::UserId;
use access_service::domain::credential::ports::CredentialStore;
use access_service::domain::credential::service::TokenIssuer;
use access_service::domain::errors::StoreError;
use access_service::domain::permission::models::actions;
use access_service::domain::permission::models::ActionCode;
use access_service::domain::permission::models::Permission;
use access_service::domain::permission::ports::GrantStore;
use access_service::domain::permission::service::PermissionResolver;
use access_service::inbound::http::middleware::AuthenticatedSubject;
use access_service::inbound::http::router::create_router;
use access_service::inbound::http::router::ProtectedRoutes;
use async_trait::async_trait;
use auth::PasswordHasher;
use auth::SigningKey;
use auth::TokenCodec;
use axum::extract::Path;
use axum::http::Method;
use axum::routing::delete;
use axum::routing::get;
use axum::Extension;
use axum::Json;
use serde_json::json;

pub const TEST_SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Route examples placed behind the gate
pub const USER_ROUTE: &str = "/v1/users/:id";

/// Active user with `get_user` and `user_me`
pub const ALICE_ID: i64 = 42;
pub const ALICE_EMAIL: &str = "a@x.com";
pub const ALICE_PASSWORD: &str = "secret";

/// Inactive user with every grant
pub const INACTIVE_ID: i64 = 7;
pub const INACTIVE_EMAIL: &str = "inactive@x.com";
pub const INACTIVE_PASSWORD: &str = "secret";

/// In-memory credential store seeded at spawn
pub struct InMemoryCredentialStore {
    users: Vec<User>,
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError> {
        Ok(self.users.iter().find(|u| u.id == id).cloned())
    }
}

/// In-memory grant store seeded at spawn
pub struct InMemoryGrantStore {
    catalogue: Vec<Permission>,
    grants: HashMap<UserId, HashSet<ActionCode>>,
}

impl InMemoryGrantStore {
    pub fn new(grants: &[(i64, ActionCode)]) -> Self {
        let catalogue = vec![
            Permission::new(actions::GET_ALL_USERS, "Get All Users"),
            Permission::new(actions::GET_USER, "Get User"),
            Permission::new(actions::STORE_USER, "Store User"),
            Permission::new(actions::UPDATE_USER, "Update User"),
            Permission::new(actions::REMOVE_USER, "Remove User"),
            Permission::new(actions::USER_ME, "User Me"),
        ];

        let mut by_user: HashMap<UserId, HashSet<ActionCode>> = HashMap::new();
        for (user_id, action) in grants {
            by_user
                .entry(UserId(*user_id))
                .or_default()
                .insert(action.clone());
        }

        Self {
            catalogue,
            grants: by_user,
        }
    }
}

#[async_trait]
impl GrantStore for InMemoryGrantStore {
    async fn has_grant(&self, user_id: UserId, action: &ActionCode) -> Result<bool, StoreError> {
        Ok(self
            .grants
            .get(&user_id)
            .is_some_and(|granted| granted.contains(action)))
    }

    async fn permissions_for(&self, user_id: UserId) -> Result<Vec<Permission>, StoreError> {
        let Some(granted) = self.grants.get(&user_id) else {
            return Ok(Vec::new());
        };

        Ok(self
            .catalogue
            .iter()
            .filter(|permission| granted.contains(&permission.code))
            .cloned()
            .collect())
    }
}

/// Grant store whose backend is down
pub struct UnavailableGrantStore;

#[async_trait]
impl GrantStore for UnavailableGrantStore {
    async fn has_grant(&self, _user_id: UserId, _action: &ActionCode) -> Result<bool, StoreError> {
        Err(StoreError::DatabaseError("connection refused".to_string()))
    }

    async fn permissions_for(&self, _user_id: UserId) -> Result<Vec<Permission>, StoreError> {
        Err(StoreError::DatabaseError("connection refused".to_string()))
    }
}

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub token_codec: Arc<TokenCodec>,
}

impl TestApp {
    /// Spawn the application with the default seeded grants
    pub async fn spawn() -> Self {
        Self::spawn_with_grants(InMemoryGrantStore::new(&[
            (ALICE_ID, actions::GET_USER),
            (ALICE_ID, actions::USER_ME),
            (INACTIVE_ID, actions::GET_USER),
            (INACTIVE_ID, actions::REMOVE_USER),
            (INACTIVE_ID, actions::USER_ME),
        ]))
        .await
    }

    /// Spawn the application in a background task with the given grant store
    pub async fn spawn_with_grants<GS: GrantStore>(grant_store: GS) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let hasher = PasswordHasher::new();
        let credential_store = InMemoryCredentialStore {
            users: vec![
                User {
                    id: UserId(ALICE_ID),
                    email: ALICE_EMAIL.to_string(),
                    password_hash: hasher.hash(ALICE_PASSWORD).unwrap(),
                    active: true,
                },
                User {
                    id: UserId(INACTIVE_ID),
                    email: INACTIVE_EMAIL.to_string(),
                    password_hash: hasher.hash(INACTIVE_PASSWORD).unwrap(),
                    active: false,
                },
            ],
        };

        let token_codec = Arc::new(TokenCodec::with_default_ttl(&SigningKey::from_secret(
            TEST_SECRET,
        )));
        let authenticator = Arc::new(
            auth::Authenticator::new(Arc::clone(&token_codec))
                .expect("Failed to build authenticator"),
        );
        let lookup_timeout = Duration::from_secs(2);

        let token_issuer = Arc::new(TokenIssuer::new(
            Arc::new(credential_store),
            authenticator,
            lookup_timeout,
        ));
        let permission_resolver = Arc::new(PermissionResolver::new(
            Arc::new(grant_store),
            lookup_timeout,
        ));

        let resources = ProtectedRoutes::new()
            .route(Method::GET, USER_ROUTE, actions::GET_USER, get(show_user))
            .route(
                Method::DELETE,
                USER_ROUTE,
                actions::REMOVE_USER,
                delete(remove_user),
            );

        let router = create_router(
            token_issuer,
            permission_resolver,
            Arc::clone(&token_codec),
            resources,
        );

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            token_codec,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(&format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(&format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(&format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Log in and return the issued token string
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .post("/v1/auth")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"]["token"]
            .as_str()
            .expect("Missing token")
            .to_string()
    }
}

async fn show_user(
    Extension(subject): Extension<AuthenticatedSubject>,
    Path(id): Path<i64>,
) -> Json<serde_json::Value> {
    Json(json!({ "requested": id, "subject": subject.user_id.as_i64() }))
}

async fn remove_user(
    Extension(subject): Extension<AuthenticatedSubject>,
    Path(id): Path<i64>,
) -> Json<serde_json::Value> {
    Json(json!({ "removed": id, "subject": subject.user_id.as_i64() }))
}
