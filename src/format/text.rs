//! Human-readable text output formatter

use crate::error::Result;
use crate::format::OutputFormatter;
use crate::places::NearbyPlacesResult;

/// Text formatter - one line per place
pub struct TextFormatter;

impl OutputFormatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Human-readable text"
    }

    fn format(&self, result: &NearbyPlacesResult, title: Option<&str>) -> Result<String> {
        let mut output = String::new();

        // Header
        match title {
            Some(title) => output.push_str(&format!("Places near {}\n", title)),
            None => output.push_str("Nearby places\n"),
        }
        output.push_str(&format!("Origin: {}\n", result.origin));
        output.push_str(&format!("Radius: {}m\n\n", result.radius_m));

        if result.places.is_empty() {
            output.push_str("No places found.\n");
            return Ok(output);
        }

        for poi in &result.places {
            output.push_str(&format!(
                "  [{}] {} - {:.2} km ({})\n",
                poi.category, poi.name, poi.distance_km, poi.marker_color
            ));
            if let Some(address) = &poi.address {
                output.push_str(&format!("      {}\n", address));
            }
            if let Some(rating) = poi.rating {
                output.push_str(&format!("      Rating: {:.1}\n", rating));
            }
        }

        output.push_str(&format!("\n{} places\n", result.places.len()));
        Ok(output)
    }
}
