//! Renderer capabilities.
//!
//! Chart drawing and map tiles are vendor concerns; the dashboard only talks
//! to them through [`ChartRenderer`] and [`MapRenderer`] so implementations can
//! be swapped per target.

pub mod chart;
pub mod map;

pub use chart::{gauge_arc, ChartRenderer, SvgChartRenderer};
pub use map::{DisabledMapRenderer, MapRenderer, MapSettings, MapWidget, Marker, TileMapRenderer};
