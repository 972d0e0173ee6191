use axum::Json;
use serde_json::{json, Value};
use std::sync::OnceLock;

use crate::services::dashboard::DASHBOARD_TITLE;

/// Static JSON response for the index endpoint
static INDEX_JSON: OnceLock<Value> = OnceLock::new();

/// Handler for the index endpoint that provides API documentation
///
/// # Endpoint: GET /
///
/// # Returns
/// * `Json<Value>` - JSON response containing API endpoint documentation
pub fn index() -> Json<Value> {
    let value = INDEX_JSON.get_or_init(|| {
        json!({
            "title": DASHBOARD_TITLE,
            "navigation": [
                { "page": "Overview", "path": "/overview" },
                { "page": "Required Analysis", "path": "/analysis" },
                { "page": "Additional Analysis", "path": "/insights" }
            ],
            "endpoints": [
                {
                    "path": "/",
                    "method": "GET",
                    "description": "API endpoint documentation",
                    "params": {}
                },
                {
                    "path": "/health",
                    "method": "GET",
                    "description": "Database, cache and page refresh status",
                    "params": {}
                },
                {
                    "path": "/overview",
                    "method": "GET",
                    "description": "Headline KPIs, dataset date range and a sample of the joined sales data",
                    "params": {}
                },
                {
                    "path": "/analysis",
                    "method": "GET",
                    "description": "Weekly and monthly order volume, most frequently ordered products",
                    "params": {
                        "top_n": {
                            "type": "integer",
                            "required": false,
                            "description": "Number of products on the order count chart, 5 to 30 [default: 10]"
                        }
                    }
                },
                {
                    "path": "/insights",
                    "method": "GET",
                    "description": "Customer value, revenue by category and top products by revenue",
                    "params": {}
                }
            ]
        })
    });

    Json(value.clone())
}
