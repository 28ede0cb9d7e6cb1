use axum::http::HeaderValue;
use serde::Deserialize;

use greencampus_core::dashboard::DashboardSpec;
use greencampus_core::error::{GreenCampusError, Result};
use greencampus_core::model::{AssetCounts, DrainageCounts};
use greencampus_core::projector::project_category_breakdown;
use greencampus_core::render::MapSettings;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    pub version: u32,

    #[serde(default)]
    pub gateway: GatewaySection,

    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub dashboard: DashboardSpec,

    #[serde(default)]
    pub map: MapSettings,
}

impl GatewayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(GreenCampusError::UnsupportedVersion);
        }

        self.gateway.validate()?;
        self.source.validate()?;
        validate_dashboard(&self.dashboard)?;
        self.map.validate()?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewaySection {
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default = "default_refresh_interval_ms")]
    pub refresh_interval_ms: u64,

    /// Browser origins allowed to read the API. `["*"]` allows any origin.
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

impl Default for GatewaySection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            refresh_interval_ms: default_refresh_interval_ms(),
            cors_origins: default_cors_origins(),
        }
    }
}

impl GatewaySection {
    pub fn validate(&self) -> Result<()> {
        if !(1000..=3_600_000).contains(&self.refresh_interval_ms) {
            return Err(GreenCampusError::BadRequest(
                "gateway.refresh_interval_ms must be between 1000 and 3600000".into(),
            ));
        }
        if self.cors_origins.iter().any(|o| o == "*") && self.cors_origins.len() > 1 {
            return Err(GreenCampusError::BadRequest(
                "gateway.cors_origins: \"*\" cannot be combined with explicit origins".into(),
            ));
        }
        for origin in self.cors_origins.iter().filter(|o| o.as_str() != "*") {
            let scheme_ok = origin.starts_with("http://") || origin.starts_with("https://");
            if !scheme_ok || HeaderValue::from_str(origin).is_err() {
                return Err(GreenCampusError::BadRequest(format!(
                    "gateway.cors_origins: invalid origin {origin}"
                )));
            }
        }
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:8000".into()
}
fn default_refresh_interval_ms() -> u64 {
    30000
}
fn default_cors_origins() -> Vec<String> {
    vec!["*".into()]
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Built-in sample campus.
    #[default]
    Fixture,
    /// JSON snapshot file, re-read every refresh.
    File,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    #[serde(default)]
    pub kind: SourceKind,
    #[serde(default)]
    pub path: Option<String>,
}

impl SourceConfig {
    pub fn validate(&self) -> Result<()> {
        match (self.kind, self.path.as_deref()) {
            (SourceKind::File, None) | (SourceKind::File, Some("")) => Err(
                GreenCampusError::BadRequest("source.path is required for kind=file".into()),
            ),
            (SourceKind::Fixture, Some(_)) => Err(GreenCampusError::BadRequest(
                "source.path is only valid for kind=file".into(),
            )),
            _ => Ok(()),
        }
    }
}

/// Catch dashboard mistakes at boot instead of on the first render.
fn validate_dashboard(spec: &DashboardSpec) -> Result<()> {
    let bands = &spec.severity;
    if bands.is_empty() {
        return Err(GreenCampusError::BadRequest(
            "dashboard.severity must not be empty".into(),
        ));
    }
    if bands.iter().any(|b| !b.upper.is_finite()) {
        return Err(GreenCampusError::BadRequest(
            "dashboard.severity upper bounds must be finite".into(),
        ));
    }
    if bands.windows(2).any(|w| w[0].upper >= w[1].upper) {
        return Err(GreenCampusError::BadRequest(
            "dashboard.severity must be strictly ascending".into(),
        ));
    }
    if bands.last().map_or(true, |b| b.upper < 1.0) {
        return Err(GreenCampusError::BadRequest(
            "dashboard.severity must cover fractions up to 1.0".into(),
        ));
    }
    if spec.palette.is_empty() {
        return Err(GreenCampusError::BadRequest(
            "dashboard.palette must not be empty".into(),
        ));
    }

    // Field names are checked against empty records of the right shape.
    let trees = AssetCounts {
        total: 0,
        healthy: 0,
        unhealthy: 0,
    };
    let drains = DrainageCounts {
        total: 0,
        cleaned: 0,
        uncleared: 0,
    };
    project_category_breakdown(&trees, &spec.tree_fields)
        .map_err(|e| GreenCampusError::BadRequest(format!("dashboard.tree_fields: {e}")))?;
    project_category_breakdown(&drains, &spec.drainage_fields)
        .map_err(|e| GreenCampusError::BadRequest(format!("dashboard.drainage_fields: {e}")))?;

    Ok(())
}
