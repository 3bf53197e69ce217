use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use common::database::{self, DatabaseConfig};
use workout_api::{AppState, config::ServerConfig, routes};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    info!("Starting workout API service");

    let server_config = ServerConfig::from_env()?;

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = database::init_pool(&db_config).await?;
    database::run_migrations(&pool).await?;

    // Check database connectivity
    if database::health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    // Start the web server
    let app = routes::create_router(AppState::new(pool));

    let address = server_config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("Workout API service listening on {}", address);

    axum::serve(listener, app).await?;

    Ok(())
}
