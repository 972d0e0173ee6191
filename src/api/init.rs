use crate::state::AppState;
use axum::{
    error_handling::HandleErrorLayer,
    http::{Method, StatusCode},
    routing::get,
    BoxError, Router,
};
use std::time::Duration;
use tower::{buffer::BufferLayer, limit::RateLimitLayer, ServiceBuilder};
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorLayer,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use super::{handlers::*, index::index};

/// Requests per second across all clients for the dashboard pages.
/// Every page request may load the whole dataset from SQLite.
const PAGES_GLOBAL_RATE_PER_SEC: u64 = 200;
/// Seconds for one per-IP token to replenish on the dashboard pages
const PAGES_PER_IP_PERIOD_SECS: u64 = 1;
/// Requests a single IP may burst before the per-IP limit applies
const PAGES_PER_IP_BURST: u32 = 30;

pub fn initialize_router(state: AppState) -> Router {
    let error_handler = || {
        ServiceBuilder::new().layer(HandleErrorLayer::new(|err: BoxError| async move {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Unhandled error: {}", err),
            )
        }))
    };

    let global_rate_limit = |req_per_sec: u64| {
        ServiceBuilder::new()
            .layer(error_handler())
            .layer(BufferLayer::new(1024))
            .layer(RateLimitLayer::new(req_per_sec, Duration::from_secs(1)))
    };

    let rate_limit_per_ip = |period: u64, limit: u32| {
        let config = Box::new(
            GovernorConfigBuilder::default()
                .per_second(period)
                .burst_size(limit)
                .use_headers()
                .key_extractor(SmartIpKeyExtractor)
                .finish()
                .expect("per-ip rate limit needs a non-zero period and burst size"),
        );

        ServiceBuilder::new()
            .layer(error_handler())
            .layer(GovernorLayer {
                config: Box::leak(config),
            })
    };

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().include_headers(true))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/overview", get(get_overview))
        .route("/analysis", get(get_analysis))
        .route("/insights", get(get_insights))
        .layer(
            global_rate_limit(PAGES_GLOBAL_RATE_PER_SEC)
                .layer(rate_limit_per_ip(PAGES_PER_IP_PERIOD_SECS, PAGES_PER_IP_BURST))
                .layer(CorsLayer::new().allow_methods(Method::GET).allow_origin(Any))
                .layer(CompressionLayer::new().zstd(true)),
        )
        .route("/", get(|| async { index() }))
        .route("/health", get(health_check))
        .layer(trace_layer)
        .with_state(state)
}
