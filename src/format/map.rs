//! Interactive map output formatter
//!
//! Renders a self-contained Leaflet page: the origin plus one colored
//! marker per place, each with a popup linking to transit directions.

use crate::error::Result;
use crate::format::{escape_markup, OutputFormatter};
use crate::places::{NearbyPlacesResult, PointOfInterest};
use serde::Serialize;

const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";
const TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
const ZOOM: u8 = 15;

/// Marker data handed to the page script
#[derive(Serialize)]
struct Marker {
    lat: f64,
    lng: f64,
    color: String,
    popup: String,
}

/// Map formatter - outputs a Leaflet HTML page
pub struct MapFormatter;

impl MapFormatter {
    fn popup(poi: &PointOfInterest) -> String {
        format!(
            "<b>{}</b><br>Type: {}<br>Address: {}<br>Distance: {:.2} km<br>\
             <a href=\"{}\" target=\"_blank\" rel=\"noopener\">Get Directions</a>",
            escape_markup(&poi.name),
            poi.category,
            escape_markup(poi.address.as_deref().unwrap_or("")),
            poi.distance_km,
            escape_markup(&poi.navigation_url)
        )
    }

    /// JSON that is safe to inline in a `<script>` element
    fn script_json<T: Serialize>(value: &T) -> Result<String> {
        Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
    }
}

impl OutputFormatter for MapFormatter {
    fn name(&self) -> &str {
        "map"
    }

    fn description(&self) -> &str {
        "Interactive Leaflet map (HTML)"
    }

    fn format(&self, result: &NearbyPlacesResult, title: Option<&str>) -> Result<String> {
        let markers: Vec<Marker> = result
            .places
            .iter()
            .map(|poi| Marker {
                lat: poi.location.lat,
                lng: poi.location.lng,
                color: poi.marker_color.clone(),
                popup: Self::popup(poi),
            })
            .collect();

        let heading = title.unwrap_or("You are here");
        let origin_popup = format!("<b>{}</b>", escape_markup(heading));

        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
        html.push_str("<meta charset=\"utf-8\">\n");
        html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
        html.push_str(&format!("<title>{}</title>\n", escape_markup(heading)));
        html.push_str(&format!("<link rel=\"stylesheet\" href=\"{}\">\n", LEAFLET_CSS));
        html.push_str(&format!("<script src=\"{}\"></script>\n", LEAFLET_JS));
        html.push_str("<style>html, body, #map { height: 100%; margin: 0; }</style>\n");
        html.push_str("</head>\n<body>\n<div id=\"map\"></div>\n<script>\n");

        html.push_str(&format!(
            "const origin = [{}, {}];\n",
            result.origin.lat, result.origin.lng
        ));
        html.push_str(&format!("const markers = {};\n", Self::script_json(&markers)?));
        html.push_str(&format!(
            "const map = L.map('map').setView(origin, {});\n",
            ZOOM
        ));
        html.push_str(&format!(
            "L.tileLayer('{}', {{ maxZoom: 19, attribution: '&copy; OpenStreetMap contributors' }}).addTo(map);\n",
            TILE_URL
        ));
        html.push_str(&format!(
            "L.marker(origin).addTo(map).bindPopup({});\n",
            Self::script_json(&origin_popup)?
        ));
        html.push_str(&format!(
            "L.circle(origin, {{ radius: {}, color: 'gray', fill: false }}).addTo(map);\n",
            result.radius_m
        ));
        html.push_str(
            "for (const m of markers) {\n  \
             L.circleMarker([m.lat, m.lng], { radius: 8, color: m.color, fillColor: m.color, fillOpacity: 0.8 })\n    \
             .addTo(map).bindPopup(m.popup, { maxWidth: 250 });\n}\n",
        );
        html.push_str("</script>\n</body>\n</html>\n");

        Ok(html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::sample_result;

    #[test]
    fn test_map_format() {
        let output = MapFormatter.format(&sample_result(), Some("Taj Mahal")).unwrap();

        assert!(output.starts_with("<!DOCTYPE html>"));
        assert!(output.contains("<title>Taj Mahal</title>"));
        assert!(output.contains("const origin = [27.1751, 78.0421];"));
        assert!(output.contains(LEAFLET_JS));
        assert!(output.contains(r#""color":"red""#));
        assert!(output.contains(r#""color":"purple""#));
        assert!(output.contains("Get Directions"));
        assert!(output.contains("radius: 3000"));
    }

    #[test]
    fn test_map_escapes_markup() {
        let output = MapFormatter.format(&sample_result(), Some("<script>alert(1)</script>")).unwrap();

        assert!(!output.contains("<script>alert(1)"));
        assert!(output.contains("Mehtab Bagh &lt;Garden&gt;"));
        // No raw closing tag can appear inside inlined JSON
        let script = output.split("<script>\n").nth(1).unwrap();
        assert_eq!(script.matches("</script>").count(), 1);
    }

    #[test]
    fn test_popup_contents() {
        let result = sample_result();
        let popup = MapFormatter::popup(&result.places[0]);

        assert!(popup.contains("<b>Pinch of Spice</b>"));
        assert!(popup.contains("Type: restaurant"));
        assert!(popup.contains("Address: Fatehabad Rd, Agra"));
        assert!(popup.contains(&format!("Distance: {:.2} km", result.places[0].distance_km)));
    }

    #[test]
    fn test_map_formatter_info() {
        assert_eq!(MapFormatter.name(), "map");
        assert!(!MapFormatter.description().is_empty());
    }
}
