//! SVG chart rendering: semicircle risk gauge and donut breakdowns.

use std::fmt::Write;

use crate::dashboard::GaugeView;
use crate::projector::{ColoredSlice, GaugeFraction};

const GAUGE_R: f64 = 80.0;
const GAUGE_CX: f64 = 100.0;
const GAUGE_CY: f64 = 100.0;

const DONUT_C: f64 = 110.0;
const DONUT_OUTER: f64 = 80.0;
const DONUT_INNER: f64 = 50.0;

/// Draws charts from projected view data.
pub trait ChartRenderer: Send + Sync {
    /// Content type of the rendered output.
    fn content_type(&self) -> &'static str;
    fn render_gauge(&self, gauge: &GaugeView) -> String;
    fn render_breakdown(&self, title: &str, slices: &[ColoredSlice]) -> String;
}

/// Point on the gauge circle; degrees counter-clockwise from 3 o'clock,
/// screen coordinates (y grows downward).
fn gauge_point(deg: f64) -> (f64, f64) {
    let rad = deg.to_radians();
    (GAUGE_CX + GAUGE_R * rad.cos(), GAUGE_CY - GAUGE_R * rad.sin())
}

/// SVG path of the filled part of the gauge: sweeps `180 * fraction` degrees
/// over the top, starting from the left end of the track.
pub fn gauge_arc(fraction: GaugeFraction) -> String {
    let angle = 180.0 * fraction.value();
    let (sx, sy) = gauge_point(180.0);
    let (ex, ey) = gauge_point(180.0 - angle);
    format!("M {sx:.2} {sy:.2} A {GAUGE_R} {GAUGE_R} 0 0 1 {ex:.2} {ey:.2}")
}

/// Point on a donut ring; degrees clockwise from 12 o'clock.
fn ring_point(r: f64, deg: f64) -> (f64, f64) {
    let rad = deg.to_radians();
    (DONUT_C + r * rad.sin(), DONUT_C - r * rad.cos())
}

fn donut_segment(from: f64, to: f64) -> String {
    // A full-circle arc has identical endpoints and would not draw.
    let to = to.min(from + 359.99);
    let large = if to - from > 180.0 { 1 } else { 0 };
    let (ox0, oy0) = ring_point(DONUT_OUTER, from);
    let (ox1, oy1) = ring_point(DONUT_OUTER, to);
    let (ix1, iy1) = ring_point(DONUT_INNER, to);
    let (ix0, iy0) = ring_point(DONUT_INNER, from);
    format!(
        "M {ox0:.2} {oy0:.2} A {DONUT_OUTER} {DONUT_OUTER} 0 {large} 1 {ox1:.2} {oy1:.2} \
         L {ix1:.2} {iy1:.2} A {DONUT_INNER} {DONUT_INNER} 0 {large} 0 {ix0:.2} {iy0:.2} Z"
    )
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Standalone SVG documents, green-to-red gauge gradient.
#[derive(Debug, Default, Clone, Copy)]
pub struct SvgChartRenderer;

impl ChartRenderer for SvgChartRenderer {
    fn content_type(&self) -> &'static str {
        "image/svg+xml"
    }

    fn render_gauge(&self, gauge: &GaugeView) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="200" height="160" viewBox="0 0 200 160">"#
        );
        let _ = writeln!(
            out,
            r##"<defs><linearGradient id="grad" x1="0" y1="0" x2="1" y2="0"><stop offset="0%" stop-color="#22c55e"/><stop offset="50%" stop-color="#f59e0b"/><stop offset="100%" stop-color="#ef4444"/></linearGradient></defs>"##
        );
        let _ = writeln!(
            out,
            r##"<path d="M20 100 A80 80 0 0 1 180 100" stroke="#0f172a" stroke-width="16" fill="none"/>"##
        );
        if gauge.fraction.value() > 0.0 {
            let _ = writeln!(
                out,
                r#"<path d="{}" stroke="url(#grad)" stroke-width="16" stroke-linecap="round" fill="none"/>"#,
                gauge_arc(gauge.fraction)
            );
        }
        let _ = writeln!(
            out,
            r#"<text x="100" y="130" text-anchor="middle" font-size="28">{}</text>"#,
            gauge.score
        );
        let _ = writeln!(
            out,
            r#"<text x="100" y="152" text-anchor="middle" font-size="12">{}</text>"#,
            escape_xml(&gauge.severity)
        );
        out.push_str("</svg>\n");
        out
    }

    fn render_breakdown(&self, title: &str, slices: &[ColoredSlice]) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="220" height="260" viewBox="0 0 220 260">"#
        );
        let _ = writeln!(out, "<title>{}</title>", escape_xml(title));

        // Summed in f64: slice values may add up past u64::MAX.
        let total: f64 = slices.iter().map(|s| s.value as f64).sum();
        if total == 0.0 {
            let _ = writeln!(
                out,
                r#"<text x="110" y="115" text-anchor="middle">No data</text>"#
            );
        } else {
            let mut from = 0.0;
            for s in slices.iter().filter(|s| s.value > 0) {
                let sweep = 360.0 * s.value as f64 / total;
                let _ = writeln!(
                    out,
                    r#"<path d="{}" fill="{}"><title>{}: {}</title></path>"#,
                    donut_segment(from, from + sweep),
                    escape_xml(&s.color),
                    escape_xml(&s.name),
                    s.value
                );
                from += sweep;
            }
        }

        for (i, s) in slices.iter().enumerate() {
            let y = 230 + 14 * i;
            let _ = writeln!(
                out,
                r#"<rect x="20" y="{}" width="10" height="10" fill="{}"/><text x="36" y="{}" font-size="11">{}</text>"#,
                y - 9,
                escape_xml(&s.color),
                y,
                escape_xml(&s.name)
            );
        }
        out.push_str("</svg>\n");
        out
    }
}
