//! Map Renderer - single-marker Leaflet document for the latest alert

use std::path::PathBuf;

use crate::models::LogRow;
use super::{ensure_parent, StoreError};

const DEFAULT_ZOOM: u8 = 15;

/// Placeholder served before any alert has been accepted
pub const NO_MAP_PLACEHOLDER: &str = "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>No map yet</title></head>\
<body><h3>No alerts have been received yet.</h3></body></html>\n";

#[derive(Debug, Clone)]
pub struct MapRenderer {
    path: PathBuf,
}

impl MapRenderer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Render the map for a logged alert and overwrite the map document
    pub fn render(&self, row: &LogRow) -> Result<String, StoreError> {
        let document = render_document(row.latitude, row.longitude, &popup_html(row));

        ensure_parent(&self.path)?;
        std::fs::write(&self.path, &document).map_err(|e| StoreError::io(&self.path, e))?;

        tracing::debug!("Map written to {}", self.path.display());
        Ok(document)
    }

    /// Current map document, `None` before the first alert
    pub fn current(&self) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(doc) => Ok(Some(doc)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::io(&self.path, e)),
        }
    }
}

/// Popup body for the marker, user text is escaped
pub fn popup_html(row: &LogRow) -> String {
    format!(
        "<b>Incident:</b> {}<br><b>Time:</b> {}<br><b>Predicted Outcome:</b> {}<br><b>Probability:</b> {}",
        escape_html(&row.incident_type),
        escape_html(&row.timestamp),
        row.predicted_outcome,
        row.probability,
    )
}

/// Full HTML document with one marker centered on (lat, lon)
pub fn render_document(lat: f64, lon: f64, popup: &str) -> String {
    // JSON string literal is a valid JS string literal
    let popup_js = serde_json::to_string(popup).unwrap_or_else(|_| "\"\"".to_string());

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Latest Panic Alert</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css">
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<style>html, body, #map {{ height: 100%; margin: 0; }}</style>
</head>
<body>
<div id="map"></div>
<script>
var map = L.map("map").setView([{lat}, {lon}], {zoom});
L.tileLayer("https://{{s}}.tile.openstreetmap.org/{{z}}/{{x}}/{{y}}.png", {{
    maxZoom: 19,
    attribution: "&copy; OpenStreetMap contributors"
}}).addTo(map);
L.marker([{lat}, {lon}]).addTo(map).bindPopup({popup_js}).openPopup();
</script>
</body>
</html>
"#,
        lat = lat,
        lon = lon,
        zoom = DEFAULT_ZOOM,
        popup_js = popup_js,
    )
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}
