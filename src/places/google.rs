//! Google Places nearby search provider
//!
//! API documentation: https://developers.google.com/maps/documentation/places/web-service/search-nearby

use crate::constants::api::PLACES_URL;
use crate::error::{Error, Result};
use crate::geo::Coordinates;
use crate::places::{PlaceCategory, PlacesProvider, Venue};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// Google Places client
#[derive(Debug, Clone)]
pub struct GooglePlacesProvider {
    client: reqwest::Client,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct NearbySearchResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    results: Vec<PlaceResult>,
}

#[derive(Debug, Deserialize)]
struct PlaceResult {
    name: String,
    geometry: Geometry,
    #[serde(default)]
    rating: Option<f64>,
    #[serde(default)]
    price_level: Option<u8>,
    #[serde(default)]
    vicinity: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: Coordinates,
}

impl GooglePlacesProvider {
    /// Create a client with the given API key and request timeout
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
        })
    }

    /// Convert a nearby search response into venues
    ///
    /// `ZERO_RESULTS` is an empty success; every other non-`OK` status is
    /// an error.
    fn parse_venues(response: NearbySearchResponse) -> Result<Vec<Venue>> {
        match response.status.as_str() {
            "OK" | "ZERO_RESULTS" => {}
            status => {
                let detail = response.error_message.unwrap_or_default();
                return Err(Error::Provider(format!(
                    "Places API returned {}: {}",
                    status, detail
                )));
            }
        }

        Ok(response
            .results
            .into_iter()
            .map(|place| Venue {
                name: place.name,
                location: place.geometry.location,
                rating: place.rating,
                price_level: place.price_level,
                address: place.vicinity,
            })
            .collect())
    }
}

#[async_trait]
impl PlacesProvider for GooglePlacesProvider {
    async fn search(
        &self,
        origin: Coordinates,
        radius_m: u32,
        category: PlaceCategory,
    ) -> Result<Vec<Venue>> {
        let location = format!("{},{}", origin.lat, origin.lng);
        let radius = radius_m.to_string();

        let response = self
            .client
            .get(PLACES_URL)
            .query(&[
                ("location", location.as_str()),
                ("radius", radius.as_str()),
                ("type", category.as_str()),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| Error::Provider(format!("Places API request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Provider(format!(
                "Places API returned status: {}",
                response.status()
            )));
        }

        let body: NearbySearchResponse = response
            .json()
            .await
            .map_err(|e| Error::Provider(format!("Failed to parse Places API response: {}", e)))?;

        Self::parse_venues(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> Result<Vec<Venue>> {
        let response: NearbySearchResponse = serde_json::from_str(body).unwrap();
        GooglePlacesProvider::parse_venues(response)
    }

    #[test]
    fn test_parse_results() {
        let venues = parse(
            r#"{
                "status": "OK",
                "results": [
                    {
                        "name": "Hotel Kailas",
                        "geometry": {"location": {"lat": 20.0247, "lng": 75.1790}},
                        "rating": 4.0,
                        "price_level": 2,
                        "vicinity": "Ellora Caves Road, Ellora",
                        "place_id": "abc"
                    },
                    {
                        "name": "Roadside Dhaba",
                        "geometry": {"location": {"lat": 20.0301, "lng": 75.1702}}
                    }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(venues.len(), 2);
        assert_eq!(venues[0].name, "Hotel Kailas");
        assert_eq!(venues[0].location, Coordinates::new(20.0247, 75.1790));
        assert_eq!(venues[0].rating, Some(4.0));
        assert_eq!(venues[0].price_level, Some(2));
        assert_eq!(venues[0].address.as_deref(), Some("Ellora Caves Road, Ellora"));
        assert_eq!(venues[1].rating, None);
        assert_eq!(venues[1].address, None);
    }

    #[test]
    fn test_zero_results() {
        let venues = parse(r#"{"status": "ZERO_RESULTS", "results": []}"#).unwrap();
        assert!(venues.is_empty());
    }

    #[test]
    fn test_error_status() {
        let result = parse(r#"{"status": "REQUEST_DENIED", "error_message": "The provided API key is invalid."}"#);
        assert!(matches!(result, Err(Error::Provider(msg)) if msg.contains("REQUEST_DENIED")));
    }

    #[test]
    fn test_malformed_row_fails_whole_response() {
        let result: std::result::Result<NearbySearchResponse, _> =
            serde_json::from_str(r#"{"status": "OK", "results": [{"name": "No geometry"}]}"#);
        assert!(result.is_err());
    }
}
