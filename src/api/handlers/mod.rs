//! API request handlers for the dashboard service.
//! Each module corresponds to one dashboard page or service endpoint.

pub mod analysis; // Required analysis page
pub mod health; // Database, cache and refresh job status
pub mod insights; // Additional BI page
pub mod overview; // Overview page

// Re-export handlers for easier access
pub(crate) use analysis::get_analysis;
pub(crate) use health::health_check;
pub(crate) use insights::get_insights;
pub(crate) use overview::get_overview;

use crate::db::models::ErrorResponse;
use crate::errors::ApiError;
use axum::{http::StatusCode, Json};
use tracing::error;

pub(crate) type HandlerError = (StatusCode, Json<ErrorResponse>);

/// Logs the full error and answers with a message safe to show users
pub(crate) fn internal_error(context: &str, err: ApiError) -> HandlerError {
    error!("{}: {}", context, err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(err.public_message().to_string())),
    )
}

pub(crate) fn bad_request(message: impl Into<String>) -> HandlerError {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(message)))
}

#[cfg(test)]
pub(crate) mod tests {
    use crate::db::connection::tests::seeded_database;
    use crate::db::DbClient;
    use crate::state::AppState;
    use std::time::Duration;
    use tempfile::TempDir;

    /// State over a seeded database; keep the directory guard alive for the test
    pub(crate) fn test_state() -> (TempDir, AppState) {
        let (dir, path) = seeded_database();
        let db = DbClient::new(&path, None).unwrap();
        (dir, AppState::new(db, Duration::from_secs(600)))
    }
}
