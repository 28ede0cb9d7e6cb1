#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use greencampus_core::dashboard::GaugeView;
use greencampus_core::projector::{ColoredSlice, GaugeFraction};
use greencampus_core::render::{
    gauge_arc, ChartRenderer, DisabledMapRenderer, MapRenderer, MapSettings, SvgChartRenderer,
    TileMapRenderer,
};

fn slice(name: &str, value: u64, color: &str) -> ColoredSlice {
    ColoredSlice {
        name: name.into(),
        value,
        color: color.into(),
    }
}

#[test]
fn gauge_arc_sweeps_over_the_top() {
    assert_eq!(gauge_arc(GaugeFraction::new(1.0)), "M 20.00 100.00 A 80 80 0 0 1 180.00 100.00");
    assert!(gauge_arc(GaugeFraction::new(0.5)).ends_with("100.00 20.00"));
    assert!(gauge_arc(GaugeFraction::new(0.0)).ends_with("20.00 100.00"));
}

#[test]
fn svg_gauge_shows_score_and_severity() {
    let svg = SvgChartRenderer.render_gauge(&GaugeView {
        score: 741,
        fraction: GaugeFraction::new(0.741),
        severity: "Moderate".into(),
    });
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains(">741</text>"));
    assert!(svg.contains(">Moderate</text>"));
    assert!(svg.contains("url(#grad)"));
}

#[test]
fn svg_gauge_at_zero_draws_track_only() {
    let svg = SvgChartRenderer.render_gauge(&GaugeView {
        score: 0,
        fraction: GaugeFraction::new(0.0),
        severity: "Low".into(),
    });
    assert!(!svg.contains("url(#grad)\""));
}

#[test]
fn svg_breakdown_draws_one_segment_per_nonzero_slice() {
    let slices = vec![
        slice("Healthy", 120, "#22c55e"),
        slice("Unhealthy", 30, "#ef4444"),
        slice("Dead", 0, "#6366f1"),
    ];
    let svg = SvgChartRenderer.render_breakdown("Tree <Health>", &slices);
    assert_eq!(svg.matches("<path ").count(), 2);
    assert!(svg.contains("<title>Tree &lt;Health&gt;</title>"));
    assert!(svg.contains(">Dead</text>"));
}

#[test]
fn svg_breakdown_with_huge_counts() {
    let slices = vec![
        slice("Cleaned", u64::MAX, "#6366f1"),
        slice("Not Cleaned", u64::MAX, "#f59e0b"),
    ];
    let svg = SvgChartRenderer.render_breakdown("Drainage", &slices);
    assert_eq!(svg.matches("<path ").count(), 2);
    assert!(!svg.contains("No data"));
    assert!(!svg.contains("NaN"));
}

#[test]
fn svg_breakdown_without_data() {
    let svg = SvgChartRenderer.render_breakdown("Empty", &[]);
    assert!(svg.contains("No data"));
}

#[test]
fn tile_map_substitutes_key() {
    let w = TileMapRenderer::new("k123").widget(&MapSettings::default());
    let tiles = w.tiles.unwrap();
    assert!(tiles.contains("/k123/map_tile/256/{z}/{x}/{y}.png"));
    assert_eq!(w.markers[0].label, "Campus Center");
    assert_eq!(w.zoom, 15);
}

#[test]
fn disabled_map_still_marks_center() {
    let w = DisabledMapRenderer.widget(&MapSettings::default());
    assert!(w.tiles.is_none());
    assert_eq!(w.markers[0].position, [17.385, 78.4867]);
}

#[test]
fn map_settings_validate_ranges() {
    assert!(MapSettings::default().validate().is_ok());
    let bad = MapSettings {
        zoom: 0,
        ..MapSettings::default()
    };
    assert!(bad.validate().is_err());
    let bad = MapSettings {
        center: [91.0, 0.0],
        ..MapSettings::default()
    };
    assert!(bad.validate().is_err());
}
