use std::sync::Arc;

use auth::TokenManager;
use sqlx::postgres::PgPoolOptions;
use superuser_service::config::Config;
use superuser_service::domain::superuser::service::SuperuserService;
use superuser_service::inbound::http::router::create_router;
use superuser_service::outbound::repositories::PostgresSuperuserRepository;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "superuser_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "superuser-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        database_url = %config.database.url,
        http_port = config.server.http_port,
        token_backend = ?config.token.backend,
        access_token_lifetime = %config.token.access_token_lifetime,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    // A bad token section (unknown backend, short key, unparseable
    // lifetime) must stop the process before it serves a request.
    let token_manager = Arc::new(TokenManager::from_config(&config.token_config()?)?);

    let superuser_repository = Arc::new(PostgresSuperuserRepository::new(pg_pool));
    let superuser_service = Arc::new(SuperuserService::new(superuser_repository));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(superuser_service, token_manager);
    axum::serve(http_listener, http_application).await?;

    Ok(())
}
