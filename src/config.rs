use serde::Deserialize;

/// Configuration for the dashboard server
#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    /// Path to the SQLite analytics database, opened read-only
    pub database_url: String,
    /// Redis URL, page caching is disabled when unset
    pub redis_url: Option<String>,
    /// Port to run the server on
    #[serde(default = "default_port")]
    pub port: u16,
    /// Lifetime of cached dashboard pages, should outlive the refresh interval
    #[serde(default = "default_cache_ttl_seconds")]
    pub cache_ttl_seconds: u64,
    /// How often the background job rebuilds the cached pages
    #[serde(default = "default_refresh_interval_seconds")]
    pub refresh_interval_seconds: u64,
    /// Maximum number of pooled SQLite connections
    #[serde(default = "default_db_pool_size")]
    pub db_pool_size: u32,
    /// `pretty` or `json`
    #[serde(default)]
    pub log_format: LogFormat,
}

impl Config {
    /// Cached pages must survive until the next refresh, else requests fall through to SQLite
    pub fn cache_outlives_refresh(&self) -> bool {
        self.cache_ttl_seconds >= self.refresh_interval_seconds
    }
}

#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

fn default_port() -> u16 {
    8080
}

fn default_cache_ttl_seconds() -> u64 {
    2 * default_refresh_interval_seconds()
}

fn default_refresh_interval_seconds() -> u64 {
    600
}

fn default_db_pool_size() -> u32 {
    8
}
