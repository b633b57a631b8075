//! Output formatters
//!
//! Provides trait-based rendering of nearby-places results.

pub mod gpx;
pub mod json;
pub mod map;
pub mod text;

use crate::error::Result;
use crate::places::NearbyPlacesResult;
use serde::{Deserialize, Serialize};

/// Information about an output format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatInfo {
    /// Format name
    pub name: String,
    /// Format description
    pub description: String,
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Get the format name
    fn name(&self) -> &str;

    /// Get the format description
    fn description(&self) -> &str;

    /// Format a nearby-places result
    ///
    /// # Arguments
    /// * `result` - The places to render
    /// * `title` - What the origin is (a landmark name), if known
    fn format(&self, result: &NearbyPlacesResult, title: Option<&str>) -> Result<String>;
}

/// Get a formatter by name
pub fn get_formatter(name: &str) -> Option<Box<dyn OutputFormatter>> {
    match name.to_lowercase().as_str() {
        "json" => Some(Box::new(json::JsonFormatter)),
        "text" => Some(Box::new(text::TextFormatter)),
        "gpx" => Some(Box::new(gpx::GpxFormatter)),
        "map" | "html" => Some(Box::new(map::MapFormatter)),
        _ => None,
    }
}

/// List all available formatters
pub fn available_formats() -> Vec<FormatInfo> {
    let formatters: [&dyn OutputFormatter; 4] = [
        &json::JsonFormatter,
        &text::TextFormatter,
        &gpx::GpxFormatter,
        &map::MapFormatter,
    ];
    formatters
        .iter()
        .map(|f| FormatInfo {
            name: f.name().to_string(),
            description: f.description().to_string(),
        })
        .collect()
}

/// Escape text for inclusion in XML or HTML
pub(crate) fn escape_markup(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
pub(crate) fn sample_result() -> NearbyPlacesResult {
    use crate::geo::Coordinates;
    use crate::places::{PlaceCategory, PointOfInterest, Venue};

    let origin = Coordinates::new(27.1751, 78.0421);
    let places = vec![
        PointOfInterest::from_venue(
            origin,
            PlaceCategory::Restaurant,
            Venue {
                name: "Pinch of Spice".to_string(),
                location: Coordinates::new(27.1650, 78.0400),
                rating: Some(4.3),
                price_level: Some(2),
                address: Some("Fatehabad Rd, Agra".to_string()),
            },
        ),
        PointOfInterest::from_venue(
            origin,
            PlaceCategory::TouristAttraction,
            Venue {
                name: "Mehtab Bagh <Garden>".to_string(),
                location: Coordinates::new(27.1795, 78.0436),
                rating: None,
                price_level: None,
                address: None,
            },
        ),
    ];

    NearbyPlacesResult {
        origin,
        radius_m: 3000,
        places,
    }
}
