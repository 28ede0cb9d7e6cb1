//! Domain snapshot types.
//!
//! A [`Snapshot`] is one complete, internally consistent set of campus data.
//! Everything the dashboard shows is projected from it; nothing here is
//! persisted.

use serde::{Deserialize, Serialize};

use crate::error::{GreenCampusError, Result};

/// Named lookup over the sub-fields of a counts record.
///
/// Breakdowns select fields by name so the display order and labels can live
/// in configuration instead of code.
pub trait CountFields {
    /// Value of the named field, or `None` when the record has no such field.
    fn field(&self, name: &str) -> Option<u64>;
}

/// Tree inventory state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssetCounts {
    pub total: u64,
    pub healthy: u64,
    pub unhealthy: u64,
}

impl AssetCounts {
    /// Check `healthy + unhealthy == total`.
    pub fn validate(&self) -> Result<()> {
        check_sum("trees", self.total, self.healthy, self.unhealthy)
    }
}

impl CountFields for AssetCounts {
    fn field(&self, name: &str) -> Option<u64> {
        match name {
            "total" => Some(self.total),
            "healthy" => Some(self.healthy),
            "unhealthy" => Some(self.unhealthy),
            _ => None,
        }
    }
}

/// Drainage cleaning state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DrainageCounts {
    pub total: u64,
    pub cleaned: u64,
    pub uncleared: u64,
}

impl DrainageCounts {
    /// Check `cleaned + uncleared == total`.
    pub fn validate(&self) -> Result<()> {
        check_sum("drainages", self.total, self.cleaned, self.uncleared)
    }
}

impl CountFields for DrainageCounts {
    fn field(&self, name: &str) -> Option<u64> {
        match name {
            "total" => Some(self.total),
            "cleaned" => Some(self.cleaned),
            "uncleared" => Some(self.uncleared),
            _ => None,
        }
    }
}

fn check_sum(what: &str, total: u64, a: u64, b: u64) -> Result<()> {
    match a.checked_add(b) {
        Some(sum) if sum == total => Ok(()),
        _ => Err(GreenCampusError::InconsistentCounts(format!(
            "{what}: {a} + {b} != {total}"
        ))),
    }
}

/// Raw risk score with its scale. `raw` may fall outside `min..=max`; it is
/// clamped when normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RiskScore {
    pub raw: i64,
    #[serde(default)]
    pub min: i64,
    #[serde(default = "default_risk_max")]
    pub max: i64,
}

fn default_risk_max() -> i64 {
    1000
}

/// Kind of asset an event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    Tree,
    Drain,
}

impl EventKind {
    /// Parse the lowercase query form (`tree`, `drain`).
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tree" => Ok(EventKind::Tree),
            "drain" => Ok(EventKind::Drain),
            other => Err(GreenCampusError::BadRequest(format!(
                "unknown event kind: {other}"
            ))),
        }
    }
}

/// Status recorded by an inspection event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventStatus {
    Healthy,
    Unhealthy,
    Cleaned,
    Uncleaned,
}

/// One row of the details table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EventRecord {
    /// `DD-MM-YYYY`.
    pub date: String,
    pub kind: EventKind,
    pub name: String,
    pub status: EventStatus,
}

impl EventRecord {
    /// Date format used by event records.
    pub const DATE_FORMAT: &'static str = "%d-%m-%Y";

    pub fn new(date: &str, kind: EventKind, name: &str, status: EventStatus) -> Self {
        Self {
            date: date.to_string(),
            kind,
            name: name.to_string(),
            status,
        }
    }

    /// Parse `date` as a calendar date.
    pub fn parsed_date(&self) -> Result<chrono::NaiveDate> {
        chrono::NaiveDate::parse_from_str(&self.date, Self::DATE_FORMAT).map_err(|e| {
            GreenCampusError::InvalidDate(format!("{} ({}): {e}", self.date, self.name))
        })
    }
}

/// Alert severity, as shown by the alert card colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Danger,
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Alert {
    pub id: u32,
    pub level: AlertLevel,
    pub message: String,
}

/// One point of the sustainability trend line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrendPoint {
    pub label: String,
    pub value: u64,
}

/// Utility readings reported by the campus backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UtilityReadings {
    pub energy_kwh: f64,
    pub water_kl: f64,
    pub footfall: u64,
    pub co2_saved: u64,
}

/// Complete dashboard input at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Snapshot {
    pub trees: AssetCounts,
    pub drainages: DrainageCounts,
    pub risk: RiskScore,
    #[serde(default)]
    pub events: Vec<EventRecord>,
    #[serde(default)]
    pub alerts: Vec<Alert>,
    #[serde(default)]
    pub trend: Vec<TrendPoint>,
    #[serde(default)]
    pub utilities: Option<UtilityReadings>,
}

impl Snapshot {
    /// Reject snapshots whose counts break their sum invariants.
    pub fn validate(&self) -> Result<()> {
        self.trees.validate()?;
        self.drainages.validate()?;
        Ok(())
    }
}
