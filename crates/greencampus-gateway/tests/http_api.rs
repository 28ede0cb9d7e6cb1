#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use greencampus_gateway::app_state::AppState;
use greencampus_gateway::source::FixtureSource;
use greencampus_gateway::{config, refresh, router};

const CFG: &str = "version: 1\nmap:\n  api_key_env: GREENCAMPUS_TEST_UNSET_KEY\n";

async fn app(cfg: &str, load: bool) -> (AppState, Router) {
    let state = AppState::with_source(config::load_from_str(cfg).unwrap(), Arc::new(FixtureSource::new()));
    if load {
        refresh::refresh_once(&state).await.unwrap();
    }
    let router = router::build_router(state.clone());
    (state, router)
}

async fn call(router: &Router, method: Method, uri: &str) -> (StatusCode, String) {
    let req = Request::builder().method(method).uri(uri).body(Body::empty()).unwrap();
    let res = router.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn get_json(router: &Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = call(router, Method::GET, uri).await;
    (status, serde_json::from_str(&body).unwrap())
}

#[tokio::test]
async fn root_reports_service() {
    let (_, r) = app(CFG, false).await;
    let (status, body) = get_json(&r, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["service"], "green-campus");
}

#[tokio::test]
async fn dashboard_before_first_snapshot_is_unavailable() {
    let (_, r) = app(CFG, false).await;
    let (status, body) = get_json(&r, "/v1/dashboard").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "FETCH_FAILED");

    let (status, _) = call(&r, Method::GET, "/readyz").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn dashboard_projects_sample_snapshot() {
    let (_, r) = app(CFG, true).await;
    let (status, body) = get_json(&r, "/v1/dashboard").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["generation"], 1);
    assert_eq!(body["stale"], false);
    assert_eq!(body["gauge"]["score"], 741);
    assert_eq!(body["gauge"]["severity"], "Moderate");
    assert_eq!(body["tree_health"][1]["name"], "Unhealthy");
    assert_eq!(body["drainage"][0]["color"], "#6366f1");
    assert_eq!(body["events"].as_array().unwrap().len(), 4);
    assert!(body["map"]["tiles"].is_null());
    assert_eq!(body["map"]["markers"][0]["label"], "Campus Center");
}

#[tokio::test]
async fn dashboard_filters_event_kinds() {
    let (_, r) = app(CFG, true).await;
    let (_, body) = get_json(&r, "/v1/dashboard?kinds=tree").await;
    let names: Vec<&str> = body["events"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Neem-22", "Pipal-12"]);

    let (_, body) = get_json(&r, "/v1/dashboard?kinds=").await;
    assert!(body["events"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn dashboard_rejects_bad_query() {
    let (_, r) = app(CFG, true).await;
    let (status, body) = get_json(&r, "/v1/dashboard?kinds=footfall").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BAD_REQUEST");

    let (status, _) = get_json(&r, "/v1/dashboard?order=oldest").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn dashboard_newest_first_order() {
    let (_, r) = app(CFG, true).await;
    let (_, body) = get_json(&r, "/v1/dashboard?kinds=drain&order=newest").await;
    assert_eq!(body["events"][0]["name"], "D-07");
    assert_eq!(body["events"][1]["name"], "D-01");
}

#[tokio::test]
async fn acknowledge_all_empties_alerts() {
    let (state, r) = app(CFG, true).await;
    let (status, body) = call(&r, Method::POST, "/v1/alerts/ack").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("\"acknowledged\":3"));

    let (_, body) = get_json(&r, "/v1/dashboard").await;
    assert!(body["alerts"].as_array().unwrap().is_empty());
    assert_eq!(state.metrics().alerts_acknowledged.get(&[]), 3);
}

#[tokio::test]
async fn raw_snapshot_is_served() {
    let (_, r) = app(CFG, true).await;
    let (status, body) = get_json(&r, "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["trees"]["total"], 150);
    assert_eq!(body["utilities"]["footfall"], 2341);
}

#[tokio::test]
async fn widgets_render_svg() {
    let (_, r) = app(CFG, true).await;
    for uri in ["/v1/widgets/gauge.svg", "/v1/widgets/trees.svg", "/v1/widgets/drainage.svg"] {
        let (status, body) = call(&r, Method::GET, uri).await;
        assert_eq!(status, StatusCode::OK, "uri={uri}");
        assert!(body.starts_with("<svg"), "uri={uri}");
    }
}

#[tokio::test]
async fn ops_metrics_count_renders() {
    let (_, r) = app(CFG, true).await;
    let _ = call(&r, Method::GET, "/v1/dashboard").await;
    let (status, body) = call(&r, Method::GET, "/ops/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("greencampus_renders_total{outcome=\"ok\",route=\"dashboard\"} 1"));
    assert!(body.contains("greencampus_refreshes_total{outcome=\"ok\",source=\"fixture\"} 1"));
    assert!(body.contains("greencampus_draining 0"));
}

#[tokio::test]
async fn readyz_and_healthz() {
    let (state, r) = app(CFG, true).await;
    assert_eq!(call(&r, Method::GET, "/healthz").await.0, StatusCode::OK);
    assert_eq!(call(&r, Method::GET, "/readyz").await.0, StatusCode::OK);
    state.metrics().set_draining();
    assert_eq!(call(&r, Method::GET, "/readyz").await.0, StatusCode::SERVICE_UNAVAILABLE);
}

/// Sample campus with an empty risk scale.
struct DegenerateRiskSource;

#[async_trait::async_trait]
impl greencampus_gateway::source::MetricsSource for DegenerateRiskSource {
    fn name(&self) -> &'static str {
        "degenerate"
    }

    async fn fetch_metrics(&self) -> greencampus_core::Result<greencampus_core::model::Snapshot> {
        let mut snap = greencampus_core::fixtures::sample_snapshot();
        snap.risk.min = 10;
        snap.risk.max = 10;
        Ok(snap)
    }
}

#[tokio::test]
async fn projection_error_surfaces_as_server_error() {
    let state = AppState::with_source(config::load_from_str(CFG).unwrap(), Arc::new(DegenerateRiskSource));
    refresh::refresh_once(&state).await.unwrap();
    let r = router::build_router(state.clone());

    let (status, body) = get_json(&r, "/v1/dashboard").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "DEGENERATE_RANGE");

    // The breakdown widgets do not depend on the risk scale.
    assert_eq!(call(&r, Method::GET, "/v1/widgets/trees.svg").await.0, StatusCode::OK);
    assert_eq!(call(&r, Method::GET, "/v1/widgets/gauge.svg").await.0, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(state.metrics().projection_errors.get(&[("code", "DEGENERATE_RANGE")]), 2);
}

async fn call_with_origin(
    router: &Router,
    method: Method,
    uri: &str,
    origin: &str,
) -> axum::http::Response<Body> {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::ORIGIN, origin)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
        .body(Body::empty())
        .unwrap();
    router.clone().oneshot(req).await.unwrap()
}

#[tokio::test]
async fn cors_allows_any_origin_by_default() {
    let (_, r) = app(CFG, true).await;
    let res = call_with_origin(&r, Method::GET, "/metrics", "http://localhost:5173").await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}

#[tokio::test]
async fn cors_preflight_is_answered() {
    let (_, r) = app(CFG, true).await;
    let res = call_with_origin(&r, Method::OPTIONS, "/metrics", "http://localhost:5173").await;
    assert_ne!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert!(res.status().is_success());
    assert_eq!(res.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    let methods = res.headers()[header::ACCESS_CONTROL_ALLOW_METHODS].to_str().unwrap();
    assert!(methods.contains("GET"));
}

#[tokio::test]
async fn cors_echoes_configured_origin_only() {
    let cfg = r#"
version: 1
gateway:
  cors_origins: ["http://dash.campus.local"]
map:
  api_key_env: GREENCAMPUS_TEST_UNSET_KEY
"#;
    let (_, r) = app(cfg, true).await;

    let res = call_with_origin(&r, Method::GET, "/metrics", "http://dash.campus.local").await;
    assert_eq!(
        res.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://dash.campus.local"
    );

    let res = call_with_origin(&r, Method::GET, "/metrics", "http://evil.example").await;
    assert!(res.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}

#[tokio::test]
async fn dashboard_includes_utility_cards() {
    let (_, r) = app(CFG, true).await;
    let (_, body) = get_json(&r, "/v1/dashboard").await;
    assert_eq!(body["utilities"][0]["label"], "Energy");
    assert_eq!(body["utilities"][0]["value"], "128.4 kWh");
    assert_eq!(body["utilities"][2]["value"], "2341");
}
