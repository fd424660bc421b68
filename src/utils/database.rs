//! Database connection management, pooling, and insert chunking helpers.

use anyhow::{Context, Result};
use diesel::Connection;
use diesel_async::{
    async_connection_wrapper::AsyncConnectionWrapper,
    pooled_connection::{bb8::Pool, AsyncDieselConnectionManager},
    AsyncPgConnection,
};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use field_count::FieldCount;
use std::sync::Arc;
use tracing::info;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

pub const DEFAULT_POOL_SIZE: u32 = 10;

/// Postgres caps bind parameters per statement at u16::MAX; batch inserts are
/// chunked to stay under it.
pub const MAX_DIESEL_PARAM_SIZE: usize = u16::MAX as usize;

pub type ArcDbPool = Arc<Pool<AsyncPgConnection>>;

/// Create a bb8-backed async connection pool.
pub async fn new_db_pool(database_url: &str, pool_size: Option<u32>) -> Result<ArcDbPool> {
    let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(database_url);
    let pool = Pool::builder()
        .max_size(pool_size.unwrap_or(DEFAULT_POOL_SIZE))
        .build(manager)
        .await
        .context("Failed to build database connection pool")?;
    Ok(Arc::new(pool))
}

/// Run all pending migrations against the given database.
///
/// Diesel migrations are synchronous, so this hops onto a blocking thread
/// with a wrapped async connection.
pub async fn run_migrations(database_url: String) {
    info!("🔄 Running database migrations");
    tokio::task::spawn_blocking(move || {
        let mut conn: AsyncConnectionWrapper<AsyncPgConnection> =
            AsyncConnectionWrapper::establish(&database_url)
                .expect("Failed to connect to database for migrations");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("Failed to run database migrations");
    })
    .await
    .expect("Migration task panicked");
    info!("✅ Database migrations complete");
}

/// Largest number of rows of `T` that fit in one insert statement.
pub fn max_insert_chunk_size<T: FieldCount>() -> usize {
    MAX_DIESEL_PARAM_SIZE / T::field_count()
}
