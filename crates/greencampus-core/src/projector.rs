//! Metrics projector (pure, panic-free).
//!
//! Turns snapshot counters into chart-ready shapes. Every function here
//! borrows its inputs, performs no I/O, and keeps no state between calls.
//! Errors are returned to the caller untouched; deciding on a fallback
//! display is the caller's job.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{GreenCampusError, Result};
use crate::model::{CountFields, EventKind, EventRecord, RiskScore};

/// Which sub-field to extract and how to label it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldSpec {
    pub label: String,
    pub field: String,
}

impl FieldSpec {
    pub fn new(label: &str, field: &str) -> Self {
        Self {
            label: label.to_string(),
            field: field.to_string(),
        }
    }
}

/// One labelled part of a breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slice {
    pub name: String,
    pub value: u64,
}

/// Ordered breakdown; order drives legend and colour assignment.
pub type CategoryBreakdown = Vec<Slice>;

/// Extract the requested fields from `counts`, in the order given.
///
/// Fails on the first unknown field without returning partial output.
pub fn project_category_breakdown<C: CountFields + ?Sized>(
    counts: &C,
    fields: &[FieldSpec],
) -> Result<CategoryBreakdown> {
    fields
        .iter()
        .map(|spec| {
            counts
                .field(&spec.field)
                .map(|value| Slice {
                    name: spec.label.clone(),
                    value,
                })
                .ok_or_else(|| GreenCampusError::MissingField {
                    field: spec.field.clone(),
                })
        })
        .collect()
}

/// Risk score normalized into `[0.0, 1.0]`. Deserialized values are clamped
/// like any other.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct GaugeFraction(f64);

impl From<f64> for GaugeFraction {
    fn from(v: f64) -> Self {
        Self::new(v)
    }
}

impl From<GaugeFraction> for f64 {
    fn from(f: GaugeFraction) -> Self {
        f.0
    }
}

impl GaugeFraction {
    /// Clamp an arbitrary value into the gauge range. NaN maps to 0.0.
    pub fn new(v: f64) -> Self {
        if v.is_nan() {
            Self(0.0)
        } else {
            Self(v.clamp(0.0, 1.0))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

/// `clamp((raw - min) / (max - min), 0, 1)`.
///
/// An empty (`max == min`) or inverted (`max < min`) range is reported as
/// `DegenerateRange` rather than guessed at.
pub fn normalize_gauge(score: &RiskScore) -> Result<GaugeFraction> {
    if score.max <= score.min {
        return Err(GreenCampusError::DegenerateRange {
            min: score.min,
            max: score.max,
        });
    }
    // i128 keeps the subtraction exact for any pair of i64.
    let span = (score.max as i128 - score.min as i128) as f64;
    let offset = (score.raw as i128 - score.min as i128) as f64;
    Ok(GaugeFraction::new(offset / span))
}

/// Severity bucket: matches fractions up to and including `upper`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeverityBand {
    pub upper: f64,
    pub label: String,
}

impl SeverityBand {
    pub fn new(upper: f64, label: &str) -> Self {
        Self {
            upper,
            label: label.to_string(),
        }
    }
}

/// Low / Moderate / High, as on the campus risk card.
pub fn default_severity_bands() -> Vec<SeverityBand> {
    vec![
        SeverityBand::new(0.4, "Low"),
        SeverityBand::new(0.75, "Moderate"),
        SeverityBand::new(1.0, "High"),
    ]
}

/// Label of the first band whose `upper >= fraction`.
pub fn classify_gauge_severity(fraction: GaugeFraction, bands: &[SeverityBand]) -> Result<&str> {
    let f = fraction.value();
    bands
        .iter()
        .find(|b| b.upper >= f)
        .map(|b| b.label.as_str())
        .ok_or(GreenCampusError::UnmatchedSeverity { fraction: f })
}

/// Row ordering for the event table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventOrder {
    /// Keep the source order.
    #[default]
    Insertion,
    /// Stable sort by date, newest first.
    NewestFirst,
}

/// Filter for the event table. `kinds == None` admits every kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    pub kinds: Option<HashSet<EventKind>>,
    pub order: EventOrder,
}

impl EventFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn only(kinds: &[EventKind]) -> Self {
        Self {
            kinds: Some(kinds.iter().copied().collect()),
            order: EventOrder::Insertion,
        }
    }

    pub fn with_order(mut self, order: EventOrder) -> Self {
        self.order = order;
        self
    }

    fn admits(&self, rec: &EventRecord) -> bool {
        self.kinds.as_ref().map_or(true, |k| k.contains(&rec.kind))
    }
}

/// Filtered copy of `records` for display. The input is left untouched.
pub fn build_event_table(records: &[EventRecord], filter: &EventFilter) -> Result<Vec<EventRecord>> {
    let rows: Vec<EventRecord> = records.iter().filter(|r| filter.admits(r)).cloned().collect();

    match filter.order {
        EventOrder::Insertion => Ok(rows),
        EventOrder::NewestFirst => {
            let mut dated = rows
                .into_iter()
                .map(|r| r.parsed_date().map(|d| (d, r)))
                .collect::<Result<Vec<_>>>()?;
            dated.sort_by(|a, b| b.0.cmp(&a.0));
            Ok(dated.into_iter().map(|(_, r)| r).collect())
        }
    }
}

/// Slice with its chart colour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColoredSlice {
    pub name: String,
    pub value: u64,
    pub color: String,
}

/// Assign colours cyclically: slice `i` takes `palette[(i + offset) % len]`.
pub fn palette_for(breakdown: &[Slice], palette: &[String], offset: usize) -> Result<Vec<ColoredSlice>> {
    if palette.is_empty() {
        return Err(GreenCampusError::BadRequest("palette must not be empty".into()));
    }
    let colors = palette.iter().cycle().skip(offset % palette.len());
    Ok(breakdown
        .iter()
        .zip(colors)
        .map(|(s, color)| ColoredSlice {
            name: s.name.clone(),
            value: s.value,
            color: color.clone(),
        })
        .collect())
}
