use crate::{services::background_jobs::BackgroundJobManager, state::AppState};
use axum::{extract::State, http::StatusCode, Json};

/// Health check endpoint that includes cache and refresh job status
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<serde_json::Value>) {
    let bg_manager = BackgroundJobManager::new(state.db.clone(), state.refresh_interval);
    let bg_health = bg_manager.get_health_status().await;

    let (status_code, database_status) = match state.db.ping().await {
        Ok(()) => (StatusCode::OK, serde_json::json!("connected")),
        Err(e) => {
            tracing::error!("Database health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                serde_json::json!({
                    "status": "error",
                    "message": e.public_message().to_string()
                }),
            )
        }
    };

    let redis_status = if !state.db.cache_enabled() {
        serde_json::json!("disabled")
    } else {
        match state.db.get_async_redis_conn().await {
            Err(e) => serde_json::json!({
                "status": "error",
                "message": e.to_string()
            }),
            Ok(_) => serde_json::json!("connected"),
        }
    };

    let overall = if status_code == StatusCode::OK {
        "ok"
    } else {
        "degraded"
    };

    let health_status = serde_json::json!({
        "status": overall,
        "database": database_status,
        "redis": redis_status,
        "background_jobs": bg_health,
        "timestamp": chrono::Utc::now()
    });

    (status_code, Json(health_status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::handlers::tests::test_state;

    #[tokio::test]
    async fn test_health_check() {
        let (_dir, state) = test_state();

        let (status, Json(body)) = health_check(State(state)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["database"], "connected");
        assert_eq!(body["redis"], "disabled");
        assert_eq!(body["background_jobs"]["status"], "unknown");
    }
}
