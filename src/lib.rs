//! histoury: landmark recognition and nearby places tour guide
//!
//! A library and CLI tool that identifies a landmark from a photo, finds
//! points of interest around it and narrates its history.
//!
//! ## Features
//!
//! - Landmark resolution: cloud vision first, local classifier fallback
//! - Nearby places per category with distance, marker color and directions
//! - Narrated multilingual summaries (LLM text + text-to-speech)
//! - JSON, text, GPX and Leaflet map output
//! - HTTP API + CLI interface
//!
//! ## Quick Start
//!
//! ```rust
//! use histoury::geo::{distance_km, Coordinates};
//! use histoury::places::color_of;
//!
//! let taj_mahal = Coordinates::new(27.1751, 78.0421);
//! let agra_fort = Coordinates::new(27.1795, 78.0211);
//!
//! let km = distance_km(taj_mahal, agra_fort);
//! assert!(km > 2.0 && km < 2.3);
//! assert_eq!(color_of("tourist_attraction"), "purple");
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod format;
pub mod geo;
pub mod landmark;
pub mod places;
pub mod server;
pub mod summary;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, Result};
pub use geo::Coordinates;
pub use landmark::{ClassifierGateway, LandmarkResolution, ResolutionSource};
pub use places::{NearbyPlacesResult, PlaceCategory, PlaceFinder, PointOfInterest};
