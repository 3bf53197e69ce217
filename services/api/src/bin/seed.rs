//! Reset the database to the sample data set

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use common::database::{self, DatabaseConfig};
use workout_api::seed::seed_database;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let db_config = DatabaseConfig::from_env()?;
    let pool = database::init_pool(&db_config).await?;
    database::run_migrations(&pool).await?;

    let summary = seed_database(&pool).await?;
    info!(
        "Seeded {} exercises, {} workouts and {} workout exercises",
        summary.exercises, summary.workouts, summary.workout_exercises
    );

    pool.close().await;
    Ok(())
}
