use crate::{db::models::RefreshJobHealth, db::DbClient, errors::ApiError, Result};
use chrono::{NaiveDateTime, Utc};
use std::time::Duration;
use tokio::time;
use tracing::{error, info, warn};

use super::Dashboard;

const LAST_REFRESH_KEY: &str = "background_job:last_refresh";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";
const MAX_CONSECUTIVE_ERRORS: u32 = 5;
const BACKOFF: Duration = Duration::from_secs(300);

/// Background job manager for the periodic page refresh
pub struct BackgroundJobManager {
    db_client: DbClient,
    refresh_interval: Duration,
}

impl BackgroundJobManager {
    pub fn new(db_client: DbClient, refresh_interval: Duration) -> Self {
        Self {
            db_client,
            // tokio intervals must be non-zero
            refresh_interval: refresh_interval.max(Duration::from_secs(1)),
        }
    }

    /// Get background job health status
    pub async fn get_health_status(&self) -> RefreshJobHealth {
        if !self.db_client.cache_enabled() {
            return RefreshJobHealth {
                status: "unknown".to_string(),
                last_refresh: None,
                message: "Page cache is disabled, pages are built on every request".to_string(),
            };
        }

        match self.get_last_refresh_time().await {
            Ok(last_refresh) => {
                refresh_health(last_refresh, Utc::now().naive_utc(), self.refresh_interval)
            }
            Err(_) => RefreshJobHealth {
                status: "unknown".to_string(),
                last_refresh: None,
                message: "Unable to determine when pages were last refreshed".to_string(),
            },
        }
    }

    /// Store the timestamp when the background job last executed
    async fn store_refresh_time(&self, execution_time: NaiveDateTime) -> Result<()> {
        let timestamp_str = execution_time.format(TIMESTAMP_FORMAT).to_string();
        self.db_client
            .set_cache(LAST_REFRESH_KEY, &timestamp_str)
            .await
    }

    /// Get the timestamp when the background job last executed
    async fn get_last_refresh_time(&self) -> Result<NaiveDateTime> {
        let timestamp_str = self.db_client.get_cache(LAST_REFRESH_KEY).await?;

        NaiveDateTime::parse_from_str(&timestamp_str, TIMESTAMP_FORMAT)
            .map_err(|e| ApiError::Custom(format!("Failed to parse timestamp: {e}")))
    }

    /// Start the refresh job. Without a page cache there is nothing to refresh.
    pub fn start_all_jobs(self) {
        if !self.db_client.cache_enabled() {
            info!("Page cache disabled, background refresh not started");
            return;
        }

        info!("Starting background job manager");
        tokio::spawn(async move {
            self.page_refresh_job().await;
        });
    }

    /// Periodically rebuilds the cached dashboard pages
    async fn page_refresh_job(self) {
        let mut interval = time::interval(self.refresh_interval);
        let dashboard = Dashboard::new(self.db_client.clone());
        let mut consecutive_errors = 0u32;

        info!(
            "Page refresh job started with interval: {} seconds",
            self.refresh_interval.as_secs()
        );

        loop {
            interval.tick().await;

            let start_time = std::time::Instant::now();
            match dashboard.refresh_cache().await {
                Ok(pages) => {
                    info!(
                        "Page refresh completed: {} pages in {:?}",
                        pages,
                        start_time.elapsed()
                    );
                    consecutive_errors = 0;
                    if let Err(e) = self.store_refresh_time(Utc::now().naive_utc()).await {
                        warn!("Failed to store refresh time: {:?}", e);
                    }
                }
                Err(e) => {
                    consecutive_errors += 1;
                    error!(
                        "Page refresh failed (attempt {}/{}): {:?}",
                        consecutive_errors, MAX_CONSECUTIVE_ERRORS, e
                    );

                    if consecutive_errors >= MAX_CONSECUTIVE_ERRORS {
                        error!(
                            "Too many consecutive failures ({}), backing off for {:?}",
                            consecutive_errors, BACKOFF
                        );
                        time::sleep(BACKOFF).await;
                        consecutive_errors = 0;
                    }
                }
            }
        }
    }
}

/// Active while the last refresh is at most two intervals old
fn refresh_health(
    last_refresh: NaiveDateTime,
    now: NaiveDateTime,
    refresh_interval: Duration,
) -> RefreshJobHealth {
    let since = now - last_refresh;
    let expected = chrono::Duration::seconds(refresh_interval.as_secs() as i64);

    if since > expected * 2 {
        RefreshJobHealth {
            status: "Inactive".to_string(),
            last_refresh: Some(last_refresh),
            message: format!(
                "Last refresh was {} seconds ago, expected interval is {} seconds",
                since.num_seconds(),
                refresh_interval.as_secs()
            ),
        }
    } else {
        RefreshJobHealth {
            status: "Active".to_string(),
            last_refresh: Some(last_refresh),
            message: "Background jobs are running normally".to_string(),
        }
    }
}
