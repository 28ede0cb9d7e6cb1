//! Axum router wiring.

use std::time::Duration;

use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::{api, app_state::AppState, ops};

pub fn build_router(state: AppState) -> Router {
    let cors = build_cors_layer(&state.cfg().gateway.cors_origins);
    Router::new()
        .route("/", get(api::root))
        .route("/metrics", get(api::snapshot))
        .route("/v1/dashboard", get(api::dashboard))
        .route("/v1/widgets/gauge.svg", get(api::gauge_svg))
        .route("/v1/widgets/trees.svg", get(api::trees_svg))
        .route("/v1/widgets/drainage.svg", get(api::drainage_svg))
        .route("/v1/map", get(api::map))
        .route("/v1/alerts/ack", post(api::ack_alerts))
        .route("/healthz", get(ops::healthz))
        .route("/readyz", get(ops::readyz))
        .route("/ops/metrics", get(ops::metrics))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS for the browser dashboard. Origins were checked at config load;
/// anything unparseable here is skipped.
pub fn build_cors_layer(origins: &[String]) -> CorsLayer {
    let allow = if origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(
            origins
                .iter()
                .filter_map(|o| HeaderValue::from_str(o).ok())
                .collect::<Vec<_>>(),
        )
    };

    CorsLayer::new()
        .allow_origin(allow)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(3600))
}
