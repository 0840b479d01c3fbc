use std::sync::Arc;

use access_service::config::Config;
use access_service::domain::credential::service::TokenIssuer;
use access_service::domain::permission::service::PermissionResolver;
use access_service::inbound::http::router::create_router;
use access_service::inbound::http::router::ProtectedRoutes;
use access_service::outbound::repositories::PostgresCredentialStore;
use access_service::outbound::repositories::PostgresGrantStore;
use auth::Authenticator;
use auth::SigningKey;
use auth::TokenCodec;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "access_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "access-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        max_connections = config.database.max_connections,
        token_ttl_seconds = config.jwt.ttl_seconds,
        store_timeout_ms = config.access.store_timeout_ms,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let signing_key = SigningKey::from_secret(&config.jwt.secret);
    let token_codec = Arc::new(TokenCodec::new(&signing_key, config.jwt.ttl()));
    let authenticator = Arc::new(Authenticator::new(Arc::clone(&token_codec))?);

    let lookup_timeout = config.access.store_timeout();
    let credential_store = Arc::new(PostgresCredentialStore::new(pg_pool.clone()));
    let grant_store = Arc::new(PostgresGrantStore::new(pg_pool));

    let token_issuer = Arc::new(TokenIssuer::new(
        credential_store,
        authenticator,
        lookup_timeout,
    ));
    let permission_resolver = Arc::new(PermissionResolver::new(grant_store, lookup_timeout));

    // Resource services register their gated routes here
    let http_application = create_router(
        token_issuer,
        permission_resolver,
        token_codec,
        ProtectedRoutes::new(),
    );

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited");

    Ok(())
}
