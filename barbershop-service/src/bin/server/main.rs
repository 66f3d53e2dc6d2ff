use std::sync::Arc;

use auth::Authenticator;
use auth::PasswordHasher;
use barbershop_service::config::Config;
use barbershop_service::domain::account::service::AccountService;
use barbershop_service::domain::auth::service::AuthService;
use barbershop_service::domain::barbershop::service::BarbershopService;
use barbershop_service::domain::client::service::ClientService;
use barbershop_service::domain::dashboard::service::DashboardService;
use barbershop_service::domain::offering::service::OfferingService;
use barbershop_service::inbound::http::router::create_router;
use barbershop_service::inbound::http::router::AppState;
use barbershop_service::outbound::repositories::PostgresAccountRepository;
use barbershop_service::outbound::repositories::PostgresBarbershopRepository;
use barbershop_service::outbound::repositories::PostgresClientRepository;
use barbershop_service::outbound::repositories::PostgresDashboardRepository;
use barbershop_service::outbound::repositories::PostgresOfferingRepository;
use chrono::Duration;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "barbershop_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "barbershop-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        max_connections = config.database.max_connections,
        token_ttl_hours = config.jwt.expiration_hours,
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

    let password_hasher = PasswordHasher::with_cost(config.password.hashing_cost())?;
    let authenticator = Arc::new(
        Authenticator::new(
            config.jwt.secret.as_bytes(),
            Duration::hours(config.jwt.expiration_hours),
        )
        .with_password_hasher(password_hasher.clone()),
    );

    let account_repository = Arc::new(PostgresAccountRepository::new(pg_pool.clone()));
    let barbershop_repository = Arc::new(PostgresBarbershopRepository::new(pg_pool.clone()));
    let client_repository = Arc::new(PostgresClientRepository::new(pg_pool.clone()));
    let offering_repository = Arc::new(PostgresOfferingRepository::new(pg_pool.clone()));
    let dashboard_repository = Arc::new(PostgresDashboardRepository::new(pg_pool));

    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&account_repository),
        authenticator,
    ));

    let state = AppState {
        auth_service: auth_service.clone(),
        account_service: Arc::new(AccountService::new(account_repository, password_hasher)),
        barbershop_service: Arc::new(BarbershopService::new(barbershop_repository, auth_service)),
        client_service: Arc::new(ClientService::new(client_repository)),
        offering_service: Arc::new(OfferingService::new(offering_repository)),
        dashboard_service: Arc::new(DashboardService::new(dashboard_repository)),
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    if let Err(e) = axum::serve(http_listener, create_router(state)).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");

    Ok(())
}
