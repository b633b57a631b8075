//! Default configuration values
//!
//! Named constants for all tunable parameters

/// Default search radius in meters
pub const DEFAULT_RADIUS: u32 = 3000;

/// Default output format
pub const DEFAULT_FORMAT: &str = "json";

/// Default summary language
pub const DEFAULT_LANGUAGE: &str = "en";

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 8000;

/// Default directory for generated narration audio
pub const DEFAULT_AUDIO_DIR: &str = "uploads";

/// Default timeout for each external provider call, in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default chat model for summaries
pub const DEFAULT_SUMMARY_MODEL: &str = "gpt-3.5-turbo";

/// Environment fallback for the Cloud Vision key
pub const VISION_KEY_ENV: &str = "GOOGLE_VISION_API_KEY";

/// Environment fallback for the Places key
pub const PLACES_KEY_ENV: &str = "GOOGLE_PLACES_API_KEY";

/// Environment fallback for the OpenAI key
pub const OPENAI_KEY_ENV: &str = "OPENAI_API_KEY";

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "histoury";
