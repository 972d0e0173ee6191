use crate::db::models::InsightsPage;
use crate::state::AppState;
use axum::{extract::State, Json};
use tracing::info;

use super::{internal_error, HandlerError};

/// Handler for the additional BI page: customer value, categories, product revenue
///
/// # Endpoint: GET /insights
pub(crate) async fn get_insights(
    State(state): State<AppState>,
) -> Result<Json<InsightsPage>, HandlerError> {
    info!("Building insights page");

    state
        .dashboard
        .insights()
        .await
        .map(Json)
        .map_err(|err| internal_error("Failed to build insights page", err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::handlers::tests::test_state;
    use crate::db::DbClient;
    use crate::state::AppState;
    use axum::http::StatusCode;
    use diesel::connection::SimpleConnection;
    use diesel::{Connection, SqliteConnection};
    use std::time::Duration;

    #[tokio::test]
    async fn test_get_insights() {
        let (_dir, state) = test_state();

        let Json(page) = get_insights(State(state)).await.unwrap();
        assert_eq!(page.header, "Additional BI");
        assert_eq!(page.categories.metrics.len(), 3);
    }

    #[tokio::test]
    async fn test_get_insights_hides_database_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.db");
        let path = path.to_str().unwrap().to_string();
        SqliteConnection::establish(&path)
            .unwrap()
            .batch_execute("CREATE TABLE unrelated (id INTEGER PRIMARY KEY);")
            .unwrap();
        let state = AppState::new(DbClient::new(&path, None).unwrap(), Duration::from_secs(60));

        let (status, Json(body)) = get_insights(State(state)).await.unwrap_err();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.error.contains("Customers"));
    }
}
