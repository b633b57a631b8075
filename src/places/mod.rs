//! Nearby points of interest
//!
//! `PlaceFinder` fans out one provider query per `PlaceCategory`, annotates
//! every venue with its great-circle distance from the origin, a transit
//! directions link and a marker color, and returns the venues grouped in
//! the fixed category order.

pub mod google;

use crate::constants::api::DIRECTIONS_URL;
use crate::error::{Error, Result};
use crate::geo::{distance_km, round_km, Coordinates};
use async_trait::async_trait;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Marker color for categories outside the fixed table
pub const DEFAULT_MARKER_COLOR: &str = "gray";

/// Venue categories searched around an origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceCategory {
    Restaurant,
    Lodging,
    Cafe,
    TouristAttraction,
    Hotel,
    Bank,
    Atm,
}

impl PlaceCategory {
    /// All categories, in output order
    pub const ALL: [PlaceCategory; 7] = [
        Self::Restaurant,
        Self::Lodging,
        Self::Cafe,
        Self::TouristAttraction,
        Self::Hotel,
        Self::Bank,
        Self::Atm,
    ];

    /// Provider type name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Restaurant => "restaurant",
            Self::Lodging => "lodging",
            Self::Cafe => "cafe",
            Self::TouristAttraction => "tourist_attraction",
            Self::Hotel => "hotel",
            Self::Bank => "bank",
            Self::Atm => "atm",
        }
    }

    /// Map marker color
    pub fn marker_color(&self) -> &'static str {
        match self {
            Self::Restaurant | Self::Cafe => "red",
            Self::Lodging | Self::Hotel => "green",
            Self::TouristAttraction => "purple",
            Self::Bank | Self::Atm => "blue",
        }
    }
}

impl std::fmt::Display for PlaceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PlaceCategory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("Unknown place category: {}", s))
    }
}

/// Marker color for any category name, `gray` when unknown
pub fn color_of(category: &str) -> &'static str {
    category
        .parse::<PlaceCategory>()
        .map(|c| c.marker_color())
        .unwrap_or(DEFAULT_MARKER_COLOR)
}

/// Transit directions link from `origin` to `destination`
pub fn navigation_url(origin: Coordinates, destination: Coordinates) -> String {
    DIRECTIONS_URL
        .replace("{olat}", &origin.lat.to_string())
        .replace("{olng}", &origin.lng.to_string())
        .replace("{dlat}", &destination.lat.to_string())
        .replace("{dlng}", &destination.lng.to_string())
}

/// Largest search radius the places provider accepts, in meters
pub const MAX_RADIUS_M: u32 = 50_000;

/// Check a search radius is within `1..=MAX_RADIUS_M`
pub fn validate_radius(radius_m: u32) -> Result<u32> {
    if radius_m == 0 || radius_m > MAX_RADIUS_M {
        return Err(Error::InvalidRadius(format!(
            "{} m is outside 1..={} m",
            radius_m, MAX_RADIUS_M
        )));
    }
    Ok(radius_m)
}

/// A venue as returned by a places provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub name: String,
    pub location: Coordinates,
    pub rating: Option<f64>,
    pub price_level: Option<u8>,
    pub address: Option<String>,
}

/// A venue annotated for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointOfInterest {
    pub name: String,
    pub category: PlaceCategory,
    pub location: Coordinates,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_level: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Great-circle distance from the origin, two decimals
    pub distance_km: f64,
    pub navigation_url: String,
    pub marker_color: String,
}

impl PointOfInterest {
    /// Annotate a provider venue relative to `origin`
    pub fn from_venue(origin: Coordinates, category: PlaceCategory, venue: Venue) -> Self {
        Self {
            distance_km: round_km(distance_km(origin, venue.location)),
            navigation_url: navigation_url(origin, venue.location),
            marker_color: category.marker_color().to_string(),
            name: venue.name,
            category,
            location: venue.location,
            rating: venue.rating,
            price_level: venue.price_level,
            address: venue.address,
        }
    }
}

/// Points of interest around an origin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyPlacesResult {
    pub origin: Coordinates,
    pub radius_m: u32,
    /// Category order, then provider order within a category
    pub places: Vec<PointOfInterest>,
}

/// External places search
#[async_trait]
pub trait PlacesProvider: Send + Sync {
    /// Venues of one category within `radius_m` meters of `origin`
    async fn search(
        &self,
        origin: Coordinates,
        radius_m: u32,
        category: PlaceCategory,
    ) -> Result<Vec<Venue>>;
}

/// Best-effort aggregation of nearby places across all categories
#[derive(Clone)]
pub struct PlaceFinder {
    provider: Arc<dyn PlacesProvider>,
    timeout: Duration,
}

impl PlaceFinder {
    /// Create a finder; each category query is bounded by `timeout`
    pub fn new(provider: Arc<dyn PlacesProvider>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    /// Search one category, turning failures and timeouts into no venues
    async fn search_category(
        &self,
        origin: Coordinates,
        radius_m: u32,
        category: PlaceCategory,
    ) -> Vec<PointOfInterest> {
        let search = self.provider.search(origin, radius_m, category);
        let venues = match tokio::time::timeout(self.timeout, search).await {
            Ok(Ok(venues)) => venues,
            Ok(Err(e)) => {
                warn!("Places search for {} failed: {}", category, e);
                return Vec::new();
            }
            Err(_) => {
                warn!("Places search for {} timed out after {:?}", category, self.timeout);
                return Vec::new();
            }
        };

        debug!("{} venues for {}", venues.len(), category);
        venues
            .into_iter()
            .map(|venue| PointOfInterest::from_venue(origin, category, venue))
            .collect()
    }

    /// Find points of interest around `origin`
    ///
    /// Never fails: a category whose query fails contributes nothing.
    /// Callers validate `origin` beforehand.
    pub async fn find_nearby(&self, origin: Coordinates, radius_m: u32) -> NearbyPlacesResult {
        let searches = PlaceCategory::ALL
            .into_iter()
            .map(|category| self.search_category(origin, radius_m, category));

        // join_all yields results in input order, i.e. category order
        let places = join_all(searches).await.into_iter().flatten().collect();

        NearbyPlacesResult {
            origin,
            radius_m,
            places,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{venue, StubPlaces};
    use approx::assert_abs_diff_eq;

    const AJANTA: Coordinates = Coordinates { lat: 20.5513, lng: 75.7069 };

    fn finder(provider: StubPlaces) -> PlaceFinder {
        PlaceFinder::new(Arc::new(provider), Duration::from_secs(5))
    }

    #[test]
    fn test_color_table() {
        assert_eq!(color_of("restaurant"), "red");
        assert_eq!(color_of("cafe"), "red");
        assert_eq!(color_of("lodging"), "green");
        assert_eq!(color_of("hotel"), "green");
        assert_eq!(color_of("tourist_attraction"), "purple");
        assert_eq!(color_of("bank"), "blue");
        assert_eq!(color_of("atm"), "blue");
        assert_eq!(color_of("unknown_type"), "gray");
        assert_eq!(color_of(""), "gray");
    }

    #[test]
    fn test_category_order_and_names() {
        let names: Vec<&str> = PlaceCategory::ALL.iter().map(|c| c.as_str()).collect();
        assert_eq!(
            names,
            ["restaurant", "lodging", "cafe", "tourist_attraction", "hotel", "bank", "atm"]
        );
        assert_eq!("tourist_attraction".parse::<PlaceCategory>(), Ok(PlaceCategory::TouristAttraction));
        assert!("museum".parse::<PlaceCategory>().is_err());
    }

    #[test]
    fn test_category_serialization() {
        let json = serde_json::to_string(&PlaceCategory::TouristAttraction).unwrap();
        assert_eq!(json, "\"tourist_attraction\"");
    }

    #[test]
    fn test_navigation_url() {
        let url = navigation_url(Coordinates::new(20.5513, 75.7069), Coordinates::new(20.56, 75.7));
        assert_eq!(
            url,
            "https://www.google.com/maps/dir/?api=1&origin=20.5513,75.7069&destination=20.56,75.7&travelmode=transit"
        );
    }

    #[test]
    fn test_validate_radius() {
        assert_eq!(validate_radius(3000).unwrap(), 3000);
        assert_eq!(validate_radius(MAX_RADIUS_M).unwrap(), MAX_RADIUS_M);
        assert!(matches!(validate_radius(0), Err(Error::InvalidRadius(_))));
        assert!(matches!(validate_radius(MAX_RADIUS_M + 1), Err(Error::InvalidRadius(_))));
    }

    #[tokio::test]
    async fn test_empty_provider_yields_empty_result() {
        let result = finder(StubPlaces::empty()).find_nearby(AJANTA, 3000).await;
        assert_eq!(result.origin, AJANTA);
        assert_eq!(result.radius_m, 3000);
        assert!(result.places.is_empty());
    }

    #[tokio::test]
    async fn test_cave_view_cafe_scenario() {
        // ~1 km due north of the caves
        let provider = StubPlaces::empty().with_venues(
            PlaceCategory::Restaurant,
            vec![venue("Cave View Cafe", 20.5513 + 1.0 / 111.195, 75.7069)],
        );

        let result = finder(provider).find_nearby(AJANTA, 3000).await;

        assert_eq!(result.places.len(), 1);
        let poi = &result.places[0];
        assert_eq!(poi.name, "Cave View Cafe");
        assert_eq!(poi.category, PlaceCategory::Restaurant);
        assert_eq!(poi.marker_color, "red");
        assert_abs_diff_eq!(poi.distance_km, 1.0, epsilon = 0.01);
        assert!(poi.navigation_url.contains("origin=20.5513,75.7069"));
        assert!(poi.navigation_url.ends_with("travelmode=transit"));
    }

    #[tokio::test]
    async fn test_failed_category_keeps_order() {
        let provider = StubPlaces::empty()
            .with_venues(PlaceCategory::Restaurant, vec![venue("Thali House", 20.552, 75.707)])
            .with_venues(PlaceCategory::Lodging, vec![venue("MTDC Resort", 20.553, 75.708)])
            .failing(PlaceCategory::Cafe)
            .with_venues(
                PlaceCategory::TouristAttraction,
                vec![venue("Viewpoint", 20.554, 75.703), venue("Visitor Centre", 20.550, 75.705)],
            )
            .with_venues(PlaceCategory::Atm, vec![venue("SBI ATM", 20.549, 75.709)]);

        let result = finder(provider).find_nearby(AJANTA, 3000).await;

        let names: Vec<&str> = result.places.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            ["Thali House", "MTDC Resort", "Viewpoint", "Visitor Centre", "SBI ATM"]
        );
        let colors: Vec<&str> = result.places.iter().map(|p| p.marker_color.as_str()).collect();
        assert_eq!(colors, ["red", "green", "purple", "purple", "blue"]);
    }

    #[tokio::test]
    async fn test_timed_out_category_is_empty() {
        let provider = StubPlaces::empty()
            .hanging(PlaceCategory::Restaurant)
            .with_venues(PlaceCategory::Bank, vec![venue("Bank of India", 20.552, 75.707)]);
        let finder = PlaceFinder::new(Arc::new(provider), Duration::from_millis(20));

        let result = finder.find_nearby(AJANTA, 3000).await;

        assert_eq!(result.places.len(), 1);
        assert_eq!(result.places[0].category, PlaceCategory::Bank);
    }

    #[tokio::test]
    async fn test_no_distance_sorting() {
        let provider = StubPlaces::empty().with_venues(
            PlaceCategory::Hotel,
            vec![venue("Far Hotel", 20.57, 75.72), venue("Near Hotel", 20.5514, 75.7069)],
        );

        let result = finder(provider).find_nearby(AJANTA, 3000).await;

        assert_eq!(result.places[0].name, "Far Hotel");
        assert_eq!(result.places[1].name, "Near Hotel");
        assert!(result.places[0].distance_km > result.places[1].distance_km);
    }

    #[test]
    fn test_poi_copies_venue_fields() {
        let venue = Venue {
            name: "Kailash Hotel".to_string(),
            location: Coordinates::new(20.0268, 75.1771),
            rating: Some(4.1),
            price_level: Some(2),
            address: Some("Ellora".to_string()),
        };

        let poi = PointOfInterest::from_venue(Coordinates::new(20.0268, 75.1771), PlaceCategory::Lodging, venue);

        assert_eq!(poi.rating, Some(4.1));
        assert_eq!(poi.price_level, Some(2));
        assert_eq!(poi.address.as_deref(), Some("Ellora"));
        assert_eq!(poi.distance_km, 0.0);
        assert_eq!(poi.marker_color, "green");
    }
}
