//! Dashboard HTTP endpoints.
//!
//! - `/`                        : service status
//! - `/metrics`                 : current raw snapshot
//! - `/v1/dashboard`            : projected view-model (`?kinds=tree,drain&order=newest`)
//! - `/v1/widgets/{gauge,trees,drainage}.svg` : rendered charts
//! - `/v1/map`                  : map widget descriptor
//! - `/v1/alerts/ack`           : acknowledge all current alerts

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use greencampus_core::dashboard::{project_dashboard, project_gauge, DashboardView};
use greencampus_core::error::{GreenCampusError, Result};
use greencampus_core::model::{EventKind, Snapshot};
use greencampus_core::projector::{
    palette_for, project_category_breakdown, EventFilter, EventOrder,
};
use greencampus_core::render::MapWidget;

use crate::app_state::AppState;
use crate::error::ApiResult;
use crate::snapshot::StoreView;

pub async fn root() -> impl IntoResponse {
    Json(json!({ "status": "ok", "service": "green-campus" }))
}

fn require_snapshot(view: &StoreView) -> Result<Arc<Snapshot>> {
    view.snapshot.clone().ok_or_else(|| {
        GreenCampusError::Fetch(
            view.last_error
                .clone()
                .unwrap_or_else(|| "no snapshot loaded yet".into()),
        )
    })
}

/// Count a render and, on failure, the projection error behind it.
fn track<T>(state: &AppState, route: &str, res: Result<T>) -> Result<T> {
    let m = state.metrics();
    match &res {
        Ok(_) => m.renders.inc(&[("route", route), ("outcome", "ok")]),
        Err(e) => {
            m.renders.inc(&[("route", route), ("outcome", "error")]);
            if e.is_projection_error() {
                m.projection_errors.inc(&[("code", e.client_code().as_str())]);
            }
        }
    }
    res
}

pub async fn snapshot(State(state): State<AppState>) -> ApiResult<Json<Snapshot>> {
    let view = state.store().view()?;
    let snap = require_snapshot(&view)?;
    Ok(Json(snap.as_ref().clone()))
}

#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    /// Comma-separated event kinds; absent means all, empty means none.
    #[serde(default)]
    pub kinds: Option<String>,
    /// `insertion` (default) or `newest`.
    #[serde(default)]
    pub order: Option<String>,
}

impl DashboardQuery {
    pub fn to_filter(&self) -> Result<EventFilter> {
        let kinds = match self.kinds.as_deref() {
            None => None,
            Some(s) => Some(
                s.split(',')
                    .filter(|k| !k.trim().is_empty())
                    .map(EventKind::parse)
                    .collect::<Result<_>>()?,
            ),
        };
        let order = match self.order.as_deref() {
            None | Some("insertion") => EventOrder::Insertion,
            Some("newest") => EventOrder::NewestFirst,
            Some(other) => {
                return Err(GreenCampusError::BadRequest(format!(
                    "unknown order: {other}"
                )))
            }
        };
        Ok(EventFilter { kinds, order })
    }
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub generation: u64,
    /// Set when the latest refresh failed and an older snapshot is shown.
    pub stale: bool,
    pub last_error: Option<String>,
    #[serde(flatten)]
    pub view: DashboardView,
    pub map: MapWidget,
}

pub async fn dashboard(
    State(state): State<AppState>,
    Query(q): Query<DashboardQuery>,
) -> ApiResult<Json<DashboardResponse>> {
    let filter = q.to_filter()?;
    let store = state.store().view()?;
    let snap = require_snapshot(&store)?;

    let view = track(
        &state,
        "dashboard",
        project_dashboard(&snap, &state.cfg().dashboard, &filter, &store.acknowledged),
    )?;

    Ok(Json(DashboardResponse {
        generation: store.generation,
        stale: store.last_error.is_some(),
        last_error: store.last_error,
        view,
        map: state.map().widget(&state.cfg().map),
    }))
}

fn svg(content_type: &'static str, body: String) -> Response {
    (StatusCode::OK, [(header::CONTENT_TYPE, content_type)], body).into_response()
}

pub async fn gauge_svg(State(state): State<AppState>) -> ApiResult<Response> {
    let snap = require_snapshot(&state.store().view()?)?;
    let gauge = track(&state, "gauge", project_gauge(&snap, &state.cfg().dashboard))?;
    let chart = state.chart();
    Ok(svg(chart.content_type(), chart.render_gauge(&gauge)))
}

pub async fn trees_svg(State(state): State<AppState>) -> ApiResult<Response> {
    let snap = require_snapshot(&state.store().view()?)?;
    let spec = &state.cfg().dashboard;
    let slices = track(
        &state,
        "trees",
        project_category_breakdown(&snap.trees, &spec.tree_fields)
            .and_then(|b| palette_for(&b, &spec.palette, spec.tree_palette_offset)),
    )?;
    let chart = state.chart();
    Ok(svg(chart.content_type(), chart.render_breakdown("Tree Health", &slices)))
}

pub async fn drainage_svg(State(state): State<AppState>) -> ApiResult<Response> {
    let snap = require_snapshot(&state.store().view()?)?;
    let spec = &state.cfg().dashboard;
    let slices = track(
        &state,
        "drainage",
        project_category_breakdown(&snap.drainages, &spec.drainage_fields)
            .and_then(|b| palette_for(&b, &spec.palette, spec.drainage_palette_offset)),
    )?;
    let chart = state.chart();
    Ok(svg(chart.content_type(), chart.render_breakdown("Drainage Cleaning", &slices)))
}

pub async fn map(State(state): State<AppState>) -> Json<MapWidget> {
    Json(state.map().widget(&state.cfg().map))
}

pub async fn ack_alerts(State(state): State<AppState>) -> ApiResult<Json<serde_json::Value>> {
    let n = state.store().acknowledge_all()?;
    state
        .metrics()
        .alerts_acknowledged
        .add(&[], u64::try_from(n).unwrap_or(u64::MAX));
    tracing::info!(acknowledged = n, "alerts acknowledged");
    Ok(Json(json!({ "acknowledged": n })))
}
