use crate::db::models::OverviewPage;
use crate::state::AppState;
use axum::{extract::State, Json};
use tracing::info;

use super::{internal_error, HandlerError};

/// Handler for the overview page: KPIs, dataset coverage and a data sample
///
/// # Endpoint: GET /overview
pub(crate) async fn get_overview(
    State(state): State<AppState>,
) -> Result<Json<OverviewPage>, HandlerError> {
    info!("Building overview page");

    state
        .dashboard
        .overview()
        .await
        .map(Json)
        .map_err(|err| internal_error("Failed to build overview page", err))
}
