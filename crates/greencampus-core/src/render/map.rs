//! Campus map widget descriptors.

use serde::{Deserialize, Serialize};

use crate::error::{GreenCampusError, Result};

/// Where the map is centred and which env var holds the tile API key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MapSettings {
    /// `[lat, lon]`.
    #[serde(default = "default_center")]
    pub center: [f64; 2],
    #[serde(default = "default_zoom")]
    pub zoom: u8,
    #[serde(default = "default_marker_label")]
    pub marker_label: String,
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            center: default_center(),
            zoom: default_zoom(),
            marker_label: default_marker_label(),
            api_key_env: default_api_key_env(),
        }
    }
}

impl MapSettings {
    pub fn validate(&self) -> Result<()> {
        let [lat, lon] = self.center;
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Err(GreenCampusError::BadRequest(
                "map.center must be [lat, lon] within [-90, 90] x [-180, 180]".into(),
            ));
        }
        if !(1..=20).contains(&self.zoom) {
            return Err(GreenCampusError::BadRequest(
                "map.zoom must be between 1 and 20".into(),
            ));
        }
        Ok(())
    }
}

fn default_center() -> [f64; 2] {
    [17.385, 78.4867]
}
fn default_zoom() -> u8 {
    15
}
fn default_marker_label() -> String {
    "Campus Center".into()
}
fn default_api_key_env() -> String {
    "MAPMYINDIA_KEY".into()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub position: [f64; 2],
    pub label: String,
}

/// What the page needs to mount the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapWidget {
    pub center: [f64; 2],
    pub zoom: u8,
    /// Tile URL template with `{z}/{x}/{y}` placeholders; `None` when tiles
    /// are unavailable.
    pub tiles: Option<String>,
    pub attribution: Option<String>,
    pub markers: Vec<Marker>,
}

pub trait MapRenderer: Send + Sync {
    fn widget(&self, settings: &MapSettings) -> MapWidget;
}

fn center_marker(settings: &MapSettings) -> Marker {
    Marker {
        position: settings.center,
        label: settings.marker_label.clone(),
    }
}

/// MapmyIndia raster tiles.
#[derive(Debug, Clone)]
pub struct TileMapRenderer {
    api_key: String,
}

impl TileMapRenderer {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }
}

impl MapRenderer for TileMapRenderer {
    fn widget(&self, settings: &MapSettings) -> MapWidget {
        MapWidget {
            center: settings.center,
            zoom: settings.zoom,
            tiles: Some(format!(
                "https://apis.mapmyindia.com/advancedmaps/v1/{}/map_tile/256/{{z}}/{{x}}/{{y}}.png",
                self.api_key
            )),
            attribution: Some("© MapmyIndia".into()),
            markers: vec![center_marker(settings)],
        }
    }
}

/// Used when no tile key is configured: the marker is still reported.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledMapRenderer;

impl MapRenderer for DisabledMapRenderer {
    fn widget(&self, settings: &MapSettings) -> MapWidget {
        MapWidget {
            center: settings.center,
            zoom: settings.zoom,
            tiles: None,
            attribution: None,
            markers: vec![center_marker(settings)],
        }
    }
}
