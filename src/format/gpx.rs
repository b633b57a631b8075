//! GPX output formatter

use crate::error::Result;
use crate::format::{escape_markup, OutputFormatter};
use crate::places::NearbyPlacesResult;

/// GPX formatter - origin plus one waypoint per place
pub struct GpxFormatter;

impl OutputFormatter for GpxFormatter {
    fn name(&self) -> &str {
        "gpx"
    }

    fn description(&self) -> &str {
        "GPX waypoint file"
    }

    fn format(&self, result: &NearbyPlacesResult, title: Option<&str>) -> Result<String> {
        let mut gpx = String::new();

        // XML header
        gpx.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        gpx.push('\n');
        gpx.push_str(r#"<gpx version="1.1" creator="histoury">"#);
        gpx.push('\n');

        // Metadata
        let origin_name = escape_markup(title.unwrap_or("Origin"));
        gpx.push_str("  <metadata>\n");
        gpx.push_str(&format!("    <name>Places near {}</name>\n", origin_name));
        gpx.push_str(&format!("    <time>{}</time>\n", chrono::Utc::now().to_rfc3339()));
        gpx.push_str("  </metadata>\n");

        // Origin waypoint
        gpx.push_str(&format!(
            r#"  <wpt lat="{}" lon="{}">"#,
            result.origin.lat, result.origin.lng
        ));
        gpx.push('\n');
        gpx.push_str(&format!("    <name>{}</name>\n", origin_name));
        gpx.push_str(&format!("    <desc>Search radius: {}m</desc>\n", result.radius_m));
        gpx.push_str("    <sym>flag</sym>\n");
        gpx.push_str("  </wpt>\n");

        for poi in &result.places {
            gpx.push_str(&format!(
                r#"  <wpt lat="{}" lon="{}">"#,
                poi.location.lat, poi.location.lng
            ));
            gpx.push('\n');
            gpx.push_str(&format!("    <name>{}</name>\n", escape_markup(&poi.name)));

            let mut desc = format!("{:.2} km", poi.distance_km);
            if let Some(address) = &poi.address {
                desc.push_str(&format!(", {}", address));
            }
            gpx.push_str(&format!("    <desc>{}</desc>\n", escape_markup(&desc)));
            gpx.push_str(&format!(
                "    <link href=\"{}\"><text>Directions</text></link>\n",
                escape_markup(&poi.navigation_url)
            ));
            gpx.push_str(&format!("    <type>{}</type>\n", poi.category));
            gpx.push_str("  </wpt>\n");
        }

        gpx.push_str("</gpx>\n");
        Ok(gpx)
    }
}
