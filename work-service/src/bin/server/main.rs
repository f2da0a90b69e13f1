use std::sync::Arc;

use auth::Authenticator;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use work_service::authentication::ports::AuthServicePort;
use work_service::authentication::service::AuthService;
use work_service::config::Config;
use work_service::inbound::http::router::create_router;
use work_service::outbound::repositories::InMemoryStore;
use work_service::outbound::repositories::PostgresUserRepository;
use work_service::outbound::repositories::PostgresWorkRepository;
use work_service::user::ports::UserRepository;
use work_service::user::ports::UserServicePort;
use work_service::user::service::UserService;
use work_service::work::ports::WorkRepository;
use work_service::work::ports::WorkServicePort;
use work_service::work::service::WorkService;

struct Services {
    auth: Arc<dyn AuthServicePort>,
    user: Arc<dyn UserServicePort>,
    work: Arc<dyn WorkServicePort>,
}

fn build_services<UR, WR>(
    user_repository: Arc<UR>,
    work_repository: Arc<WR>,
    authenticator: Arc<Authenticator>,
) -> Services
where
    UR: UserRepository,
    WR: WorkRepository,
{
    Services {
        auth: Arc::new(AuthService::new(
            Arc::clone(&user_repository),
            Arc::clone(&authenticator),
        )),
        user: Arc::new(UserService::new(user_repository, authenticator)),
        work: Arc::new(WorkService::new(work_repository)),
    }
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "work_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "work-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        token_ttl_minutes = config.jwt.access_token_expire_minutes,
        persistent = config.database.url.is_some(),
        "Configuration loaded"
    );

    let authenticator = Arc::new(Authenticator::new(
        config.jwt.secret.as_bytes(),
        config.jwt.token_ttl(),
    ));

    let services = match &config.database.url {
        Some(url) => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(url)
                .await?;
            tracing::info!(
                max_connections = config.database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            build_services(
                Arc::new(PostgresUserRepository::new(pg_pool.clone())),
                Arc::new(PostgresWorkRepository::new(pg_pool)),
                authenticator,
            )
        }
        None => {
            tracing::warn!("database.url not set, records are kept in memory only");
            let store = Arc::new(InMemoryStore::new());
            build_services(Arc::clone(&store), store, authenticator)
        }
    };

    if let Some(admin) = services
        .user
        .ensure_admin(config.bootstrap.admin()?)
        .await?
    {
        tracing::info!(
            user_id = %admin.id,
            employee_number = %admin.employee_number,
            "Bootstrap administrator created"
        );
    }

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(services.auth, services.user, services.work);
    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited");

    Ok(())
}
