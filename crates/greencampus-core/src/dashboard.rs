//! Dashboard view-model assembly.
//!
//! Composes the projector operations into the single structure the page
//! renders from.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{Alert, EventRecord, Snapshot, TrendPoint, UtilityReadings};
use crate::projector::{
    build_event_table, classify_gauge_severity, default_severity_bands, normalize_gauge,
    palette_for, project_category_breakdown, ColoredSlice, EventFilter, FieldSpec,
    GaugeFraction, SeverityBand,
};

/// How a snapshot is projected: field lists, severity bands and colours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DashboardSpec {
    #[serde(default = "default_tree_fields")]
    pub tree_fields: Vec<FieldSpec>,
    #[serde(default = "default_drainage_fields")]
    pub drainage_fields: Vec<FieldSpec>,
    #[serde(default = "default_severity_bands")]
    pub severity: Vec<SeverityBand>,
    #[serde(default = "default_palette")]
    pub palette: Vec<String>,
    #[serde(default)]
    pub tree_palette_offset: usize,
    #[serde(default = "default_drainage_palette_offset")]
    pub drainage_palette_offset: usize,
}

impl Default for DashboardSpec {
    fn default() -> Self {
        Self {
            tree_fields: default_tree_fields(),
            drainage_fields: default_drainage_fields(),
            severity: default_severity_bands(),
            palette: default_palette(),
            tree_palette_offset: 0,
            drainage_palette_offset: default_drainage_palette_offset(),
        }
    }
}

fn default_tree_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::new("Healthy", "healthy"),
        FieldSpec::new("Unhealthy", "unhealthy"),
    ]
}
fn default_drainage_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::new("Cleaned", "cleaned"),
        FieldSpec::new("Not Cleaned", "uncleared"),
    ]
}
fn default_palette() -> Vec<String> {
    ["#22c55e", "#ef4444", "#6366f1", "#f59e0b"]
        .iter()
        .map(|c| c.to_string())
        .collect()
}
fn default_drainage_palette_offset() -> usize {
    2
}

/// KPI card on the stats row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatCard {
    pub label: String,
    pub value: u64,
    pub sub: String,
}

impl StatCard {
    fn new(label: &str, value: u64, sub: String) -> Self {
        Self {
            label: label.to_string(),
            value,
            sub,
        }
    }
}

/// The five KPI cards: tree totals, then drainage totals.
pub fn stat_cards(snapshot: &Snapshot) -> Vec<StatCard> {
    let t = &snapshot.trees;
    let d = &snapshot.drainages;
    vec![
        StatCard::new("Total Trees", t.total, format!("{} healthy", t.healthy)),
        StatCard::new("Healthy Trees", t.healthy, format!("{} unhealthy", t.unhealthy)),
        StatCard::new("Unhealthy Trees", t.unhealthy, "Needs inspection".into()),
        StatCard::new("Drainages Total", d.total, format!("{} cleaned", d.cleaned)),
        StatCard::new("To Clean", d.uncleared, "Pending today".into()),
    ]
}

/// Label/value card for utility readings; values are preformatted with units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiCard {
    pub label: String,
    pub value: String,
}

/// Energy, water, footfall and CO2 cards. Empty when the snapshot carries no
/// readings.
pub fn utility_cards(readings: Option<&UtilityReadings>) -> Vec<KpiCard> {
    let Some(u) = readings else {
        return Vec::new();
    };
    [
        ("Energy", format!("{} kWh", u.energy_kwh)),
        ("Water", format!("{} kL", u.water_kl)),
        ("Footfall", u.footfall.to_string()),
        ("CO2 Saved", format!("{} kg", u.co2_saved)),
    ]
    .into_iter()
    .map(|(label, value)| KpiCard {
        label: label.to_string(),
        value,
    })
    .collect()
}

/// Risk card contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaugeView {
    pub score: i64,
    pub fraction: GaugeFraction,
    pub severity: String,
}

/// Everything the dashboard page renders for one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub stats: Vec<StatCard>,
    pub utilities: Vec<KpiCard>,
    pub tree_health: Vec<ColoredSlice>,
    pub drainage: Vec<ColoredSlice>,
    pub gauge: GaugeView,
    pub trend: Vec<TrendPoint>,
    pub alerts: Vec<Alert>,
    pub events: Vec<EventRecord>,
}

/// Project the risk score into the gauge card.
pub fn project_gauge(snapshot: &Snapshot, spec: &DashboardSpec) -> Result<GaugeView> {
    let fraction = normalize_gauge(&snapshot.risk)?;
    let severity = classify_gauge_severity(fraction, &spec.severity)?.to_string();
    Ok(GaugeView {
        score: snapshot.risk.raw,
        fraction,
        severity,
    })
}

/// Project a whole snapshot. Alerts whose ids are in `acknowledged` are hidden.
pub fn project_dashboard(
    snapshot: &Snapshot,
    spec: &DashboardSpec,
    filter: &EventFilter,
    acknowledged: &HashSet<u32>,
) -> Result<DashboardView> {
    let trees = project_category_breakdown(&snapshot.trees, &spec.tree_fields)?;
    let drains = project_category_breakdown(&snapshot.drainages, &spec.drainage_fields)?;

    let view = DashboardView {
        stats: stat_cards(snapshot),
        utilities: utility_cards(snapshot.utilities.as_ref()),
        tree_health: palette_for(&trees, &spec.palette, spec.tree_palette_offset)?,
        drainage: palette_for(&drains, &spec.palette, spec.drainage_palette_offset)?,
        gauge: project_gauge(snapshot, spec)?,
        trend: snapshot.trend.clone(),
        alerts: snapshot
            .alerts
            .iter()
            .filter(|a| !acknowledged.contains(&a.id))
            .cloned()
            .collect(),
        events: build_event_table(&snapshot.events, filter)?,
    };

    tracing::debug!(
        events = view.events.len(),
        alerts = view.alerts.len(),
        severity = %view.gauge.severity,
        "dashboard projected"
    );
    Ok(view)
}
