//! JSON output formatter

use crate::error::Result;
use crate::format::OutputFormatter;
use crate::places::NearbyPlacesResult;

/// JSON formatter - outputs the full result as pretty-printed JSON
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Full JSON response"
    }

    fn format(&self, result: &NearbyPlacesResult, _title: Option<&str>) -> Result<String> {
        Ok(serde_json::to_string_pretty(result)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::sample_result;

    #[test]
    fn test_json_format() {
        let output = JsonFormatter.format(&sample_result(), None).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["origin"]["lat"], 27.1751);
        assert_eq!(parsed["radius_m"], 3000);
        assert_eq!(parsed["places"].as_array().unwrap().len(), 2);
        assert_eq!(parsed["places"][0]["category"], "restaurant");
        assert_eq!(parsed["places"][0]["marker_color"], "red");
        assert!(parsed["places"][1].get("rating").is_none());
    }

    #[test]
    fn test_json_formatter_info() {
        assert_eq!(JsonFormatter.name(), "json");
        assert!(!JsonFormatter.description().is_empty());
    }
}
