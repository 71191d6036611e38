use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::io::EXPORT_FILE_NAME;

/// Initial view of the base map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapView {
    /// `[lat, lng]`
    pub center: [f64; 2],
    pub zoom: u8,
    pub tile_url: String,
}

impl Default for MapView {
    fn default() -> Self {
        MapView {
            center: [51.505, -0.09],
            zoom: 13,
            tile_url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
        }
    }
}

/// Drawing tools offered by the map surface's toolbar.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawTools {
    pub polygon: bool,
    pub marker: bool,
    pub polyline: bool,
    pub rectangle: bool,
    pub circle: bool,
    pub circlemarker: bool,
}

impl Default for DrawTools {
    fn default() -> Self {
        DrawTools {
            polygon: true,
            marker: true,
            polyline: false,
            rectangle: false,
            circle: false,
            circlemarker: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub export_file_name: String,
    /// Value of the import input's `accept` attribute.
    pub import_accept: String,
    pub log_level: String,
    pub map: MapView,
    pub draw: DrawTools,
}

impl Default for EditorConfig {
    fn default() -> Self {
        EditorConfig {
            export_file_name: EXPORT_FILE_NAME.to_string(),
            import_accept: ".geojson,.kml".to_string(),
            log_level: "info".to_string(),
            map: MapView::default(),
            draw: DrawTools::default(),
        }
    }
}

impl EditorConfig {
    /// Apply overrides from a page query string such as `?zoom=10&log=debug`.
    /// Unparseable values are ignored.
    pub fn with_query(mut self, search: &str) -> Self {
        if let Some(name) = get_query_param(search, "file")
            && !name.trim().is_empty()
        {
            self.export_file_name = name.trim().to_string();
        }
        if let Some(lat) = get_query_param(search, "lat").and_then(|v| v.parse().ok()) {
            self.map.center[0] = lat;
        }
        if let Some(lng) = get_query_param(search, "lng").and_then(|v| v.parse().ok()) {
            self.map.center[1] = lng;
        }
        if let Some(zoom) = get_query_param(search, "zoom").and_then(|v| v.parse().ok()) {
            self.map.zoom = zoom;
        }
        if let Some(level) = get_query_param(search, "log")
            && log::Level::from_str(&level).is_ok()
        {
            self.log_level = level.to_lowercase();
        }
        self
    }

    pub fn level(&self) -> log::Level {
        log::Level::from_str(&self.log_level).unwrap_or(log::Level::Info)
    }
}

/// Simple query string parser used at start-up.
pub fn get_query_param(search: &str, key: &str) -> Option<String> {
    let s = search.trim_start_matches('?');
    for pair in s.split('&') {
        let mut it = pair.splitn(2, '=');
        let k = it.next()?;
        let v = it.next().unwrap_or("");
        if k == key {
            return Some(url_decode(v));
        }
    }
    None
}

fn url_decode(s: &str) -> String {
    percent_encoding::percent_decode_str(s)
        .decode_utf8()
        .unwrap_or_else(|_| s.into())
        .to_string()
}
