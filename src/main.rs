use anyhow::Context;
use axum::Server;
use config::Config;
use std::net::SocketAddr;
use std::time::Duration;

mod api;
mod config;
mod db;
mod errors;
mod logging;
mod schema;
mod services;
mod state;
mod validation;

/// Result type for API
pub type Result<T> = std::result::Result<T, errors::ApiError>;

/// Static configuration instance for the dashboard
static CONFIG: once_cell::sync::Lazy<Config> = once_cell::sync::Lazy::new(|| {
    dotenv::dotenv().ok();
    envy::from_env::<Config>().expect("Failed to load configuration")
});

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::setup_logging(CONFIG.log_format)?;

    // Open the analytics database and the optional page cache
    let db_client = db::DbClient::with_config(
        &CONFIG.database_url,
        CONFIG.redis_url.as_deref(),
        CONFIG.db_pool_size,
        30,
        CONFIG.cache_ttl_seconds,
    )
    .context("Failed to open the analytics database")?;

    let refresh_interval = Duration::from_secs(CONFIG.refresh_interval_seconds);
    if CONFIG.redis_url.is_some() && !CONFIG.cache_outlives_refresh() {
        tracing::warn!(
            "CACHE_TTL_SECONDS ({}) is shorter than REFRESH_INTERVAL_SECONDS ({}), cached pages will expire between refreshes",
            CONFIG.cache_ttl_seconds,
            CONFIG.refresh_interval_seconds
        );
    }

    // Start background jobs
    let bg_job_manager =
        services::background_jobs::BackgroundJobManager::new(db_client.clone(), refresh_interval);
    let initial_health = bg_job_manager.get_health_status().await;
    tracing::info!("Background job initial status: {:?}", initial_health);
    bg_job_manager.start_all_jobs();

    // Setup API router and start server
    let app = api::initialize_router(state::AppState::new(db_client, refresh_interval));
    let addr = SocketAddr::from(([0, 0, 0, 0], CONFIG.port));
    tracing::info!("Server starting on {}", addr);

    Server::bind(&addr)
        .serve(app.into_make_service_with_connect_info::<SocketAddr>())
        .await
        .context("Server error")?;

    Ok(())
}
