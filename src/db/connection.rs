use crate::Result;
use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::SqliteConnection;
use redis::aio::MultiplexedConnection;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use crate::errors::ApiError;

const DEFAULT_POOL_SIZE: u32 = 8;
const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
const DEFAULT_CACHE_TTL_SECONDS: u64 = 1200;

pub type SqlitePool = Pool<ConnectionManager<SqliteConnection>>;

#[derive(Clone)]
pub struct DbClient {
    pub db_pool: SqlitePool,
    pub async_redis_conn: Arc<Mutex<Option<MultiplexedConnection>>>,
    redis_url: Option<String>,
    cache_ttl: u64,
}

impl DbClient {
    pub fn new(database_url: &str, redis_url: Option<&str>) -> Result<Self> {
        Self::with_config(
            database_url,
            redis_url,
            DEFAULT_POOL_SIZE,
            DEFAULT_TIMEOUT_SECONDS,
            DEFAULT_CACHE_TTL_SECONDS,
        )
    }

    pub fn with_config(
        database_url: &str,
        redis_url: Option<&str>,
        pool_size: u32,
        timeout_seconds: u64,
        cache_ttl: u64,
    ) -> Result<Self> {
        let manager = ConnectionManager::<SqliteConnection>::new(read_only_uri(database_url));
        let sqlite_pool = Pool::builder()
            .max_size(pool_size.max(1))
            .connection_timeout(Duration::from_secs(timeout_seconds))
            .test_on_check_out(true)
            .build(manager)?;

        tracing::info!("Opened analytics database {} (read-only)", database_url);

        Ok(Self {
            db_pool: sqlite_pool,
            async_redis_conn: Arc::new(Mutex::new(None)),
            redis_url: redis_url.map(str::to_string),
            cache_ttl,
        })
    }

    /// Runs `f` with a pooled connection on the blocking thread pool
    pub async fn with_conn<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
    {
        let pool = self.db_pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            f(&mut conn)
        })
        .await?
    }

    /// Cheap liveness check against the database
    pub async fn ping(&self) -> Result<()> {
        self.with_conn(|conn| conn.batch_execute("SELECT 1").map_err(Into::into))
            .await
    }

    pub fn cache_enabled(&self) -> bool {
        self.redis_url.is_some()
    }

    pub fn cache_ttl(&self) -> u64 {
        self.cache_ttl
    }

    /// Get async Redis connection (creates one if it doesn't exist)
    pub async fn get_async_redis_conn(&self) -> Result<MultiplexedConnection> {
        let redis_url = self.redis_url.as_deref().ok_or(ApiError::CacheDisabled)?;
        let mut conn_guard = self.async_redis_conn.lock().await;

        if let Some(conn) = conn_guard.as_ref() {
            // Clone the connection (it's designed to be cloned)
            return Ok(conn.clone());
        }

        let client = redis::Client::open(redis_url)?;
        let multiplexed_conn = client.get_multiplexed_async_connection().await?;
        *conn_guard = Some(multiplexed_conn.clone());

        Ok(multiplexed_conn)
    }
}

/// Turns a plain database path into a SQLite URI that refuses writes and
/// refuses to create a missing file.
fn read_only_uri(database_url: &str) -> String {
    if database_url.starts_with("file:") {
        return database_url.to_string();
    }
    let escaped = database_url
        .replace('%', "%25")
        .replace('?', "%3f")
        .replace('#', "%23");
    format!("file:{escaped}?mode=ro")
}
