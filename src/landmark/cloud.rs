//! Cloud landmark detection
//!
//! `VisionProvider` is the seam for any remote landmark detector; the
//! shipped implementation talks to the Google Cloud Vision REST API.
//! API documentation: https://cloud.google.com/vision/docs/detecting-landmarks

use crate::constants::api::VISION_URL;
use crate::error::{Error, Result};
use crate::geo::Coordinates;
use crate::landmark::{LandmarkCandidate, LandmarkResolution, LandmarkStrategy, ResolutionSource};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

/// Maximum number of landmark annotations requested per image
const MAX_RESULTS: u32 = 5;

/// Remote landmark detector
#[async_trait]
pub trait VisionProvider: Send + Sync {
    /// Detect landmarks in an image, best match first
    async fn detect(&self, image: &[u8]) -> Result<Vec<LandmarkCandidate>>;
}

/// Strategy that trusts the vision provider's top-ranked candidate
pub struct CloudStrategy<V> {
    provider: V,
}

impl<V: VisionProvider> CloudStrategy<V> {
    pub fn new(provider: V) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl<V: VisionProvider> LandmarkStrategy for CloudStrategy<V> {
    fn name(&self) -> &'static str {
        "cloud"
    }

    async fn resolve(&self, image: &[u8]) -> Result<Option<LandmarkResolution>> {
        let candidates = self.provider.detect(image).await?;
        debug!("Vision provider returned {} candidates", candidates.len());

        Ok(candidates.into_iter().next().map(|c| LandmarkResolution {
            name: c.name,
            location: c.location,
            source: ResolutionSource::Cloud,
        }))
    }
}

/// Google Cloud Vision client
#[derive(Debug, Clone)]
pub struct GoogleVisionProvider {
    client: reqwest::Client,
    api_key: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnnotateResponse {
    #[serde(default)]
    responses: Vec<ImageResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImageResponse {
    #[serde(default)]
    landmark_annotations: Vec<LandmarkAnnotation>,
    #[serde(default)]
    error: Option<StatusMessage>,
}

#[derive(Debug, Deserialize)]
struct StatusMessage {
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LandmarkAnnotation {
    description: String,
    #[serde(default)]
    locations: Vec<LocationInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LocationInfo {
    lat_lng: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    #[serde(default)]
    latitude: f64,
    #[serde(default)]
    longitude: f64,
}

impl GoogleVisionProvider {
    /// Create a client with the given API key and request timeout
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
        })
    }

    /// Build the annotate request body
    fn request_body(image: &[u8]) -> serde_json::Value {
        json!({
            "requests": [{
                "image": { "content": STANDARD.encode(image) },
                "features": [{ "type": "LANDMARK_DETECTION", "maxResults": MAX_RESULTS }]
            }]
        })
    }

    /// Convert an annotate response into ranked candidates
    ///
    /// Annotations without a usable location are skipped; ranking is kept
    /// as the provider returned it.
    fn parse_candidates(response: AnnotateResponse) -> Result<Vec<LandmarkCandidate>> {
        let Some(first) = response.responses.into_iter().next() else {
            return Ok(Vec::new());
        };

        if let Some(error) = first.error {
            return Err(Error::Provider(format!("Vision API error: {}", error.message)));
        }

        Ok(first
            .landmark_annotations
            .into_iter()
            .filter_map(|annotation| {
                let info = annotation.locations.into_iter().next()?;
                let location = Coordinates::checked(info.lat_lng.latitude, info.lat_lng.longitude).ok()?;
                Some(LandmarkCandidate {
                    name: annotation.description,
                    location,
                })
            })
            .collect())
    }
}

#[async_trait]
impl VisionProvider for GoogleVisionProvider {
    async fn detect(&self, image: &[u8]) -> Result<Vec<LandmarkCandidate>> {
        let response = self
            .client
            .post(VISION_URL)
            .query(&[("key", &self.api_key)])
            .json(&Self::request_body(image))
            .send()
            .await
            .map_err(|e| Error::Provider(format!("Vision API request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Provider(format!(
                "Vision API returned status: {}",
                response.status()
            )));
        }

        let body: AnnotateResponse = response
            .json()
            .await
            .map_err(|e| Error::Provider(format!("Failed to parse Vision API response: {}", e)))?;

        Self::parse_candidates(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> Result<Vec<LandmarkCandidate>> {
        let response: AnnotateResponse = serde_json::from_str(body).unwrap();
        GoogleVisionProvider::parse_candidates(response)
    }

    #[test]
    fn test_parse_landmarks_keeps_provider_order() {
        let candidates = parse(
            r#"{"responses": [{"landmarkAnnotations": [
                {"mid": "/m/0l3nr", "description": "Hawa Mahal", "score": 0.71,
                 "locations": [{"latLng": {"latitude": 26.9239, "longitude": 75.8267}}]},
                {"description": "City Palace", "score": 0.92,
                 "locations": [{"latLng": {"latitude": 26.9258, "longitude": 75.8237}}]}
            ]}]}"#,
        )
        .unwrap();

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].name, "Hawa Mahal");
        assert_eq!(candidates[0].location, Coordinates::new(26.9239, 75.8267));
        assert_eq!(candidates[1].name, "City Palace");
    }

    #[test]
    fn test_parse_skips_annotations_without_location() {
        let candidates = parse(
            r#"{"responses": [{"landmarkAnnotations": [
                {"description": "Somewhere", "locations": []},
                {"description": "India Gate",
                 "locations": [{"latLng": {"latitude": 28.6129, "longitude": 77.2295}}]}
            ]}]}"#,
        )
        .unwrap();

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].name, "India Gate");
    }

    #[test]
    fn test_parse_empty_response() {
        assert!(parse(r#"{"responses": [{}]}"#).unwrap().is_empty());
        assert!(parse(r#"{}"#).unwrap().is_empty());
    }

    #[test]
    fn test_parse_error_response() {
        let result = parse(r#"{"responses": [{"error": {"code": 3, "message": "Bad image data."}}]}"#);
        assert!(matches!(result, Err(Error::Provider(msg)) if msg.contains("Bad image data")));
    }

    #[test]
    fn test_request_body() {
        let body = GoogleVisionProvider::request_body(b"abc");
        assert_eq!(body["requests"][0]["image"]["content"], "YWJj");
        assert_eq!(body["requests"][0]["features"][0]["type"], "LANDMARK_DETECTION");
    }
}
