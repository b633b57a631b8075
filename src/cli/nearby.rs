//! Nearby command handler
//!
//! Lists points of interest around coordinates or a named place.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::format::{available_formats, get_formatter};
use crate::geo::nominatim::NominatimGeocoder;
use crate::geo::Coordinates;
use crate::places::validate_radius;
use crate::server::state::build_finder;
use clap::Args;

/// Nearby command arguments
#[derive(Args)]
pub struct NearbyArgs {
    /// Latitude
    #[arg(long, requires = "lng", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lng: Option<f64>,

    /// Named location (geocoded)
    #[arg(long, conflicts_with_all = ["lat", "lng"])]
    pub location: Option<String>,

    /// Search radius in meters
    #[arg(long, short = 'r')]
    pub radius: Option<u32>,

    /// Output format
    #[arg(long, short = 'f')]
    pub format: Option<String>,

    /// Write output to file
    #[arg(long, short = 'o')]
    pub output: Option<String>,

    /// List available formats
    #[arg(short = 'F', long = "list-formats")]
    pub list_formats: bool,
}

/// Run the nearby command
pub async fn run(args: NearbyArgs) -> Result<()> {
    if args.list_formats {
        list_formats();
        return Ok(());
    }

    let config = Config::load()?;

    let (origin, title) = if let Some(query) = &args.location {
        let geocoder = NominatimGeocoder::new(config.provider_timeout())?;
        let place = geocoder.geocode(query).await?.ok_or_else(|| {
            Error::InvalidCoordinates(format!("Could not geocode '{}'", query))
        })?;
        eprintln!("Geocoded to: {}", place.display_name);
        (place.location, Some(query.clone()))
    } else if let (Some(lat), Some(lng)) = (args.lat, args.lng) {
        (Coordinates::checked(lat, lng)?, None)
    } else {
        return Err(Error::InvalidCoordinates(
            "No location specified. Use --lat/--lng or --location".to_string(),
        ));
    };

    let radius = validate_radius(args.radius.unwrap_or(config.defaults.radius))?;
    let format = args.format.unwrap_or_else(|| config.defaults.format.clone());
    let formatter = get_formatter(&format)
        .ok_or_else(|| Error::Config(format!("Unknown format: {}", format)))?;

    let finder = build_finder(&config)?.ok_or_else(|| {
        Error::Config("Nearby search needs api_keys.places or GOOGLE_PLACES_API_KEY".to_string())
    })?;

    let result = finder.find_nearby(origin, radius).await;
    let output = formatter.format(&result, title.as_deref())?;
    super::write_output(&output, args.output.as_deref())
}

/// Print available output formats
fn list_formats() {
    println!("Available output formats:");
    for format in available_formats() {
        println!("  {:6} - {}", format.name, format.description);
    }
}
