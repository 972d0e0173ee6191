use crate::db::models::{AnalysisPage, AnalysisParams};
use crate::state::AppState;
use crate::validation::validate_top_n;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use tracing::{info, warn};

use super::{bad_request, internal_error, HandlerError};

/// Handler for the required analysis page: order trends and product frequency
///
/// # Endpoint: GET /analysis?top_n=10
///
/// # Arguments
/// * `top_n` - number of products on the order count chart, 5 to 30
pub(crate) async fn get_analysis(
    State(state): State<AppState>,
    params: Result<Query<AnalysisParams>, QueryRejection>,
) -> Result<Json<AnalysisPage>, HandlerError> {
    let Query(params) = params.map_err(|rejection| {
        warn!("Rejected analysis query: {}", rejection);
        bad_request(rejection.body_text())
    })?;
    let top_n = validate_top_n(&params).map_err(bad_request)?;

    info!("Building analysis page for top {} products", top_n);

    state
        .dashboard
        .analysis(top_n)
        .await
        .map(Json)
        .map_err(|err| internal_error("Failed to build analysis page", err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::handlers::tests::test_state;
    use crate::db::models::Status;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_get_analysis_default_top_n() {
        let (_dir, state) = test_state();

        let Json(page) = get_analysis(State(state), Ok(Query(AnalysisParams::default())))
            .await
            .unwrap();
        assert_eq!(page.top_n, 10);
        assert_eq!(page.top_products.chart.unwrap().points.len(), 3);
    }

    #[tokio::test]
    async fn test_get_analysis_rejects_out_of_range_top_n() {
        let (_dir, state) = test_state();

        let (status, Json(body)) = get_analysis(
            State(state),
            Ok(Query(AnalysisParams { top_n: Some(50) })),
        )
        .await
        .unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.status, Status::Error);
        assert!(body.error.contains("between 5 and 30"));
    }
}
