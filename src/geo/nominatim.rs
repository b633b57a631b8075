//! Nominatim geocoder (OpenStreetMap)
//!
//! Turns a place name into coordinates so nearby searches can start from
//! "Taj Mahal" instead of raw latitude/longitude.
//! Rate limit: 1 request per second (enforced by User-Agent requirement)

use crate::constants::api::NOMINATIM_URL;
use crate::constants::USER_AGENT;
use crate::error::{Error, Result};
use crate::geo::{Coordinates, GeocodedPlace};
use serde::Deserialize;
use std::time::Duration;

/// Nominatim geocoding client
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    client: reqwest::Client,
    base_url: String,
}

/// Nominatim search response item
#[derive(Debug, Deserialize)]
struct NominatimResult {
    lat: String,
    lon: String,
    display_name: String,
}

impl NominatimGeocoder {
    /// Create a geocoder with the given request timeout
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: NOMINATIM_URL.to_string(),
        })
    }

    /// Parse Nominatim's string coordinates
    fn parse_coords(lat: &str, lng: &str) -> Result<Coordinates> {
        let lat: f64 = lat
            .parse()
            .map_err(|_| Error::Provider(format!("Invalid latitude: {}", lat)))?;
        let lng: f64 = lng
            .parse()
            .map_err(|_| Error::Provider(format!("Invalid longitude: {}", lng)))?;
        Coordinates::checked(lat, lng)
    }

    /// Geocode a place name
    ///
    /// Returns the best match, or None if nothing matched
    pub async fn geocode(&self, query: &str) -> Result<Option<GeocodedPlace>> {
        let url = format!(
            "{}/search?q={}&format=json&limit=1",
            self.base_url,
            urlencoding::encode(query)
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Provider(format!("Nominatim request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Provider(format!(
                "Nominatim returned status: {}",
                response.status()
            )));
        }

        let results: Vec<NominatimResult> = response
            .json()
            .await
            .map_err(|e| Error::Provider(format!("Failed to parse Nominatim response: {}", e)))?;

        match results.into_iter().next() {
            Some(result) => Ok(Some(GeocodedPlace {
                location: Self::parse_coords(&result.lat, &result.lon)?,
                display_name: result.display_name,
            })),
            None => Ok(None),
        }
    }
}
