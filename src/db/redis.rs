use redis::AsyncCommands;
use serde::{de::DeserializeOwned, Serialize};

use super::DbClient;
use crate::errors::ApiError;
use crate::Result;

impl DbClient {
    pub async fn set_cache(&self, key: &str, value: &str) -> Result<()> {
        let mut redis_conn = self.get_async_redis_conn().await?;
        redis_conn
            .set_ex::<_, _, ()>(key, value, self.cache_ttl())
            .await
            .map_err(|err| {
                tracing::error!("Redis SET failed: {}", err);
                ApiError::from(err)
            })?;
        tracing::debug!("Cache set for key: {}", key);
        Ok(())
    }

    pub async fn get_cache(&self, key: &str) -> Result<String> {
        let mut redis_conn = self.get_async_redis_conn().await?;

        let value: Option<String> = redis_conn.get(key).await.map_err(|err| {
            tracing::error!("Redis GET failed: {}", err);
            ApiError::from(err)
        })?;

        value.ok_or_else(|| ApiError::NotFound(key.to_string()))
    }

    /// Reads a cached JSON document. Any cache failure is reported as a miss.
    pub async fn get_cached_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        if !self.cache_enabled() {
            return None;
        }
        match self.get_cache(key).await {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(value) => {
                    tracing::info!("Cache hit for key: {}", key);
                    Some(value)
                }
                Err(err) => {
                    tracing::warn!("Discarding unreadable cache entry {}: {}", key, err);
                    None
                }
            },
            Err(ApiError::NotFound(_)) => {
                tracing::debug!("Cache miss for key: {}", key);
                None
            }
            Err(err) => {
                tracing::warn!("Cache lookup failed for key {}: {}", key, err);
                None
            }
        }
    }

    /// Stores a JSON document in the cache, logging instead of failing.
    /// Returns whether the entry was written.
    pub async fn put_cached_json<T: Serialize>(&self, key: &str, value: &T) -> bool {
        if !self.cache_enabled() {
            return false;
        }
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::error!("Failed to serialise cache entry {}: {}", key, err);
                return false;
            }
        };
        match self.set_cache(key, &raw).await {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!("Cache write failed for key {}: {}", key, err);
                false
            }
        }
    }
}
