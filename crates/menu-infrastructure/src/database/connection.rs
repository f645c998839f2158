//! Database connection pool

use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use std::time::Duration;
use tracing::{error, info};

use menu_shared::config::DatabaseSettings;

pub fn connect_options(settings: &DatabaseSettings) -> MySqlConnectOptions {
    MySqlConnectOptions::new()
        .host(&settings.host)
        .port(settings.port)
        .username(&settings.user)
        .password(&settings.password)
        .database(&settings.name)
}

/// Builds the pool lazily and pings it once. A failed ping is logged, not
/// returned: connections are retried on each acquire.
pub async fn create_pool(settings: &DatabaseSettings) -> MySqlPool {
    info!(
        host = %settings.host,
        port = settings.port,
        user = %settings.user,
        database = %settings.name,
        max_connections = settings.max_connections,
        connect_timeout_secs = settings.connect_timeout_secs,
        "Initializing database pool"
    );

    let pool = MySqlPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .acquire_timeout(Duration::from_secs(settings.connect_timeout_secs))
        .connect_lazy_with(connect_options(settings));

    match sqlx::query("SELECT 1").execute(&pool).await {
        Ok(_) => info!("Database pool ping successful"),
        Err(e) => error!("Database pool ping failed: {}", e),
    }

    pool
}

pub async fn run_migrations(pool: &MySqlPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Applying database migrations");
    sqlx::migrate!().run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}
