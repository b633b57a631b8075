//! Centralized constants for the histoury crate
//!
//! Constants that are used across multiple modules live here so the
//! endpoints and magic numbers are defined exactly once.

/// Geographic constants
pub mod geo {
    /// Mean Earth radius in kilometers
    pub const EARTH_RADIUS_KM: f64 = 6371.0;
}

/// External API endpoints
pub mod api {
    /// Google Cloud Vision annotate endpoint
    pub const VISION_URL: &str = "https://vision.googleapis.com/v1/images:annotate";

    /// Google Places nearby search endpoint
    pub const PLACES_URL: &str = "https://maps.googleapis.com/maps/api/place/nearbysearch/json";

    /// OpenAI chat completions endpoint
    pub const OPENAI_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";

    /// Google Translate text-to-speech endpoint
    pub const TTS_URL: &str = "https://translate.google.com/translate_tts";

    /// OpenStreetMap Nominatim geocoding API
    pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

    /// Google Maps directions link, `{olat},{olng}` to `{dlat},{dlng}`
    pub const DIRECTIONS_URL: &str = "https://www.google.com/maps/dir/?api=1&origin={olat},{olng}&destination={dlat},{dlng}&travelmode=transit";
}

/// Image preprocessing for the local classifier
pub mod model {
    /// Side of the square the classifier input is resized to
    pub const INPUT_SIZE: u32 = 224;

    /// Per-channel mean (RGB) of the training set
    pub const CHANNEL_MEAN: [f32; 3] = [0.485, 0.456, 0.406];

    /// Per-channel standard deviation (RGB) of the training set
    pub const CHANNEL_STD: [f32; 3] = [0.229, 0.224, 0.225];
}

/// User agent sent to services that require one
pub const USER_AGENT: &str = concat!("histoury/", env!("CARGO_PKG_VERSION"));
