//! Server shared state
//!
//! Everything here is built once at startup and never mutated, so handlers
//! share it through an `Arc` without locks.

use crate::config::Config;
use crate::error::Result;
use crate::landmark::centroid::CentroidClassifier;
use crate::landmark::cloud::{CloudStrategy, GoogleVisionProvider};
use crate::landmark::local::LocalModelStrategy;
use crate::landmark::table::LandmarkTable;
use crate::landmark::ClassifierGateway;
use crate::places::google::GooglePlacesProvider;
use crate::places::PlaceFinder;
use crate::summary::openai::OpenAiClient;
use crate::summary::tts::TtsClient;
use crate::summary::{Narrator, SummaryService};
use std::sync::Arc;
use tracing::{info, warn};

/// Shared state for the HTTP server
pub struct AppState {
    /// Configuration
    pub config: Config,

    /// Label -> landmark lookup table
    pub landmarks: LandmarkTable,

    /// Landmark resolution chain
    pub gateway: ClassifierGateway,

    /// Nearby search, absent without a places key
    pub finder: Option<PlaceFinder>,

    /// Narrated summaries, absent without an OpenAI key
    pub summary: Option<Arc<dyn SummaryService>>,
}

impl AppState {
    /// Build every service the configuration enables
    ///
    /// Fails if the classifier artifacts are unreadable or disagree with
    /// the landmark table.
    pub fn from_config(config: Config) -> Result<Self> {
        let landmarks = load_landmarks(&config)?;
        let gateway = build_gateway(&config, &landmarks)?;
        let finder = build_finder(&config)?;
        let summary = build_summary(&config)?;

        Ok(Self {
            config,
            landmarks,
            gateway,
            finder,
            summary,
        })
    }
}

/// The configured landmark table, or the built-in one
pub fn load_landmarks(config: &Config) -> Result<LandmarkTable> {
    match config.landmarks_path() {
        Some(path) => {
            let table = LandmarkTable::load(&path)?;
            info!("Loaded {} landmarks from {}", table.len(), path.display());
            Ok(table)
        }
        None => Ok(LandmarkTable::builtin()),
    }
}

/// Cloud strategy first, then the local classifier, each only if configured
pub fn build_gateway(config: &Config, landmarks: &LandmarkTable) -> Result<ClassifierGateway> {
    let timeout = config.provider_timeout();
    let mut gateway = ClassifierGateway::new(timeout);

    match config.vision_key() {
        Some(key) => {
            gateway = gateway.with_strategy(CloudStrategy::new(GoogleVisionProvider::new(key, timeout)?));
        }
        None => warn!("No Cloud Vision key configured, cloud landmark detection disabled"),
    }

    match config.model_path() {
        Some(path) => {
            let classifier = CentroidClassifier::load(&path)?;
            let strategy = LocalModelStrategy::new(Arc::new(classifier), landmarks.clone())?;
            info!("Loaded local classifier from {}", path.display());
            gateway = gateway.with_strategy(strategy);
        }
        None => warn!("No classifier model configured, local fallback disabled"),
    }

    Ok(gateway)
}

pub fn build_finder(config: &Config) -> Result<Option<PlaceFinder>> {
    let Some(key) = config.places_key() else {
        warn!("No Places key configured, nearby search disabled");
        return Ok(None);
    };

    let timeout = config.provider_timeout();
    let provider = GooglePlacesProvider::new(key, timeout)?;
    Ok(Some(PlaceFinder::new(Arc::new(provider), timeout)))
}

pub fn build_summary(config: &Config) -> Result<Option<Arc<dyn SummaryService>>> {
    let Some(key) = config.openai_key() else {
        warn!("No OpenAI key configured, summaries disabled");
        return Ok(None);
    };

    let timeout = config.provider_timeout();
    let llm = OpenAiClient::new(key, config.providers.summary_model.clone(), timeout)?;
    let tts = TtsClient::new(timeout)?;
    let narrator = Narrator::new(llm, tts, config.audio_dir());
    Ok(Some(Arc::new(narrator)))
}
