use authdns_infrastructure::database::create_pool;
use sqlx::SqlitePool;
use tracing::{error, info};

pub async fn init_database(database_path: &str) -> anyhow::Result<SqlitePool> {
    info!("Initializing database: {}", database_path);

    let pool = create_pool(database_path).await.map_err(|e| {
        error!("Failed to initialize database pool: {}", e);
        anyhow::anyhow!(e)
    })?;

    info!("Database initialized successfully");
    Ok(pool)
}
