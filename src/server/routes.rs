//! HTTP API routes
//!
//! Defines all REST API endpoints for the server.

use crate::error::Error;
use crate::format::map::MapFormatter;
use crate::format::OutputFormatter;
use crate::geo::Coordinates;
use crate::landmark::table::LandmarkEntry;
use crate::landmark::LandmarkResolution;
use crate::places::{validate_radius, NearbyPlacesResult, PlaceCategory, PlaceFinder};
use crate::server::state::AppState;
use crate::summary::{validate_language, Summary};

use axum::{
    extract::{DefaultBodyLimit, Multipart, Query, State},
    http::StatusCode,
    response::Html,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

/// Largest accepted image upload
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Multipart field holding the photo
const IMAGE_FIELD: &str = "image";

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    let audio_dir = state.config.audio_dir();

    Router::new()
        .route(
            "/api/detect_landmark",
            post(detect_landmark_handler).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/api/nearby_places", get(nearby_places_handler))
        .route("/api/map", get(map_handler))
        .route("/api/summary", post(summary_handler))
        .route("/api/categories", get(categories_handler))
        .route("/api/landmarks", get(landmarks_handler))
        .route("/api/status", get(status_handler))
        .nest_service("/audio", ServeDir::new(audio_dir))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

type ApiResult<T> = Result<T, (StatusCode, Json<ApiError>)>;

impl ApiError {
    fn new(error: impl Into<String>, code: &str) -> Self {
        Self {
            error: error.into(),
            code: code.to_string(),
        }
    }
}

/// Map a crate error to its HTTP status and error code
fn api_error(err: Error) -> (StatusCode, Json<ApiError>) {
    let (status, code) = match &err {
        Error::InvalidCoordinates(_) => (StatusCode::BAD_REQUEST, "INVALID_COORDINATES"),
        Error::InvalidRadius(_) => (StatusCode::BAD_REQUEST, "INVALID_RADIUS"),
        Error::InvalidImage(_) => (StatusCode::BAD_REQUEST, "INVALID_IMAGE"),
        Error::InvalidLanguage(_) => (StatusCode::BAD_REQUEST, "INVALID_LANGUAGE"),
        Error::NoCandidateFound => (StatusCode::NOT_FOUND, "NO_CANDIDATE"),
        Error::Summary(_) => (StatusCode::SERVICE_UNAVAILABLE, "SUMMARY_UNAVAILABLE"),
        Error::Provider(_) | Error::Http(_) => (StatusCode::BAD_GATEWAY, "PROVIDER_ERROR"),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
    };
    (status, Json(ApiError::new(err.to_string(), code)))
}

/// Identify the landmark in an uploaded photo
///
/// POST /api/detect_landmark (multipart, field `image`)
async fn detect_landmark_handler(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> ApiResult<Json<LandmarkResolution>> {
    let mut image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| api_error(Error::InvalidImage(format!("Malformed upload: {}", e))))?
    {
        if field.name() == Some(IMAGE_FIELD) {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| api_error(Error::InvalidImage(format!("Failed to read upload: {}", e))))?;
            image = Some(bytes);
            break;
        }
    }

    let image = image.ok_or_else(|| {
        api_error(Error::InvalidImage(format!("Missing '{}' field", IMAGE_FIELD)))
    })?;

    let resolution = state.gateway.resolve(&image).await.map_err(api_error)?;
    Ok(Json(resolution))
}

/// Nearby search query
///
/// Numeric fields arrive as raw strings so that missing or malformed
/// values produce a JSON error.
#[derive(Debug, Deserialize)]
pub struct NearbyQuery {
    pub lat: Option<String>,
    pub lng: Option<String>,
    /// Search radius in meters
    pub radius: Option<String>,
    /// Label for the origin marker
    pub title: Option<String>,
}

impl NearbyQuery {
    fn origin(&self) -> crate::error::Result<Coordinates> {
        match (self.lat.as_deref(), self.lng.as_deref()) {
            (Some(lat), Some(lng)) => Coordinates::checked(parse_degrees(lat)?, parse_degrees(lng)?),
            _ => Err(Error::InvalidCoordinates(
                "Both lat and lng are required".to_string(),
            )),
        }
    }

    fn radius(&self, default: u32) -> crate::error::Result<u32> {
        match self.radius.as_deref() {
            None => validate_radius(default),
            Some(raw) => {
                let radius: i64 = raw
                    .trim()
                    .parse()
                    .map_err(|_| Error::InvalidRadius(format!("{:?} is not a whole number of meters", raw)))?;
                let radius = u32::try_from(radius)
                    .map_err(|_| Error::InvalidRadius(format!("{} m is out of range", radius)))?;
                validate_radius(radius)
            }
        }
    }
}

fn parse_degrees(raw: &str) -> crate::error::Result<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| Error::InvalidCoordinates(format!("{:?} is not a number", raw)))
}

fn finder(state: &AppState) -> ApiResult<&PlaceFinder> {
    state.finder.as_ref().ok_or_else(|| {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ApiError::new("Nearby search is not configured", "PROVIDER_ERROR")),
        )
    })
}

async fn find_nearby(state: &AppState, query: &NearbyQuery) -> ApiResult<NearbyPlacesResult> {
    let origin = query.origin().map_err(api_error)?;
    let radius = query.radius(state.config.defaults.radius).map_err(api_error)?;
    Ok(finder(state)?.find_nearby(origin, radius).await)
}

/// Points of interest around a location
///
/// GET /api/nearby_places?lat=..&lng=..&radius=..
async fn nearby_places_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NearbyQuery>,
) -> ApiResult<Json<NearbyPlacesResult>> {
    find_nearby(&state, &query).await.map(Json)
}

/// Interactive map of the points of interest around a location
///
/// GET /api/map?lat=..&lng=..&radius=..&title=..
async fn map_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NearbyQuery>,
) -> ApiResult<Html<String>> {
    let result = find_nearby(&state, &query).await?;
    let html = MapFormatter
        .format(&result, query.title.as_deref())
        .map_err(api_error)?;
    Ok(Html(html))
}

/// Summary request body
#[derive(Debug, Deserialize)]
pub struct SummaryRequest {
    pub landmark: String,
    /// Language code, defaults to the configured language
    pub language: Option<String>,
}

/// Summary plus a link to its narration
#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryResponse {
    #[serde(flatten)]
    pub summary: Summary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
}

/// Narrated history of a landmark
///
/// POST /api/summary
async fn summary_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SummaryRequest>,
) -> ApiResult<Json<SummaryResponse>> {
    let landmark = req.landmark.trim();
    if landmark.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiError::new("Landmark name is required", "INVALID_LANDMARK")),
        ));
    }

    let language = req
        .language
        .unwrap_or_else(|| state.config.defaults.language.clone());
    validate_language(&language).map_err(api_error)?;

    let service = state
        .summary
        .as_ref()
        .ok_or_else(|| api_error(Error::Summary("Summaries are not configured".to_string())))?;

    let summary = service.summarize(landmark, &language).await.map_err(api_error)?;
    let audio_url = summary.audio_file.as_ref().map(|file| format!("/audio/{}", file));

    Ok(Json(SummaryResponse { summary, audio_url }))
}

/// A place category with its marker color
#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryInfo {
    pub name: String,
    pub color: String,
}

/// Categories list response
#[derive(Debug, Serialize, Deserialize)]
pub struct CategoriesResponse {
    pub categories: Vec<CategoryInfo>,
}

/// List searched categories in output order
///
/// GET /api/categories
async fn categories_handler() -> Json<CategoriesResponse> {
    let categories = PlaceCategory::ALL
        .into_iter()
        .map(|c| CategoryInfo {
            name: c.as_str().to_string(),
            color: c.marker_color().to_string(),
        })
        .collect();

    Json(CategoriesResponse { categories })
}

/// Landmarks list response
#[derive(Debug, Serialize, Deserialize)]
pub struct LandmarksResponse {
    pub landmarks: Vec<LandmarkEntry>,
}

/// List the landmarks the local classifier can name
///
/// GET /api/landmarks
async fn landmarks_handler(State(state): State<Arc<AppState>>) -> Json<LandmarksResponse> {
    Json(LandmarksResponse {
        landmarks: state.landmarks.entries().to_vec(),
    })
}

/// Status response
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Server is running
    pub running: bool,
    /// Server version
    pub version: String,
    /// Landmark strategies in the order they are tried
    pub strategies: Vec<String>,
    pub nearby_enabled: bool,
    pub summary_enabled: bool,
}

/// Server status endpoint
///
/// GET /api/status
async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        running: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        strategies: state
            .gateway
            .strategy_names()
            .into_iter()
            .map(String::from)
            .collect(),
        nearby_enabled: state.finder.is_some(),
        summary_enabled: state.summary.is_some(),
    })
}
