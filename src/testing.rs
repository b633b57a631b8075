//! Stub providers shared by unit tests

use crate::error::{Error, Result};
use crate::geo::Coordinates;
use crate::landmark::cloud::VisionProvider;
use crate::landmark::local::ImageClassifier;
use crate::landmark::preprocess::ImageTensor;
use crate::landmark::LandmarkCandidate;
use crate::places::{PlaceCategory, PlacesProvider, Venue};
use crate::summary::{SpeechSynthesizer, Summary, SummaryService, TextGenerator};
use async_trait::async_trait;
use image::{ImageBuffer, ImageFormat, Rgb};
use std::collections::HashMap;
use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// PNG bytes of a single-colored image
pub fn solid_png(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
    let img = ImageBuffer::from_pixel(width, height, Rgb(rgb));
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

/// A small valid PNG
pub fn tiny_png() -> Vec<u8> {
    solid_png(4, 4, [120, 90, 60])
}

enum VisionBehavior {
    Candidates(Vec<LandmarkCandidate>),
    Fail,
    Hang,
}

/// Vision provider with canned behavior
pub struct StubVision {
    behavior: VisionBehavior,
}

impl StubVision {
    pub fn returning(candidates: Vec<LandmarkCandidate>) -> Self {
        Self {
            behavior: VisionBehavior::Candidates(candidates),
        }
    }

    pub fn failing() -> Self {
        Self {
            behavior: VisionBehavior::Fail,
        }
    }

    pub fn hanging() -> Self {
        Self {
            behavior: VisionBehavior::Hang,
        }
    }
}

#[async_trait]
impl VisionProvider for StubVision {
    async fn detect(&self, _image: &[u8]) -> Result<Vec<LandmarkCandidate>> {
        match &self.behavior {
            VisionBehavior::Candidates(candidates) => Ok(candidates.clone()),
            VisionBehavior::Fail => Err(Error::Provider("vision service unavailable".to_string())),
            VisionBehavior::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(Vec::new())
            }
        }
    }
}

/// Classifier that always predicts one label and counts its calls
pub struct StubClassifier {
    prediction: String,
    classes: Vec<String>,
    delay: Duration,
    calls: AtomicUsize,
}

impl StubClassifier {
    pub fn predicting(label: &str) -> Self {
        Self::with_classes(label, &[label])
    }

    pub fn with_classes(prediction: &str, classes: &[&str]) -> Self {
        Self {
            prediction: prediction.to_string(),
            classes: classes.iter().map(|c| c.to_string()).collect(),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    /// Block for `delay` on every prediction
    pub fn slow(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ImageClassifier for StubClassifier {
    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn predict(&self, _input: &ImageTensor) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        Ok(self.prediction.clone())
    }
}

enum CategoryBehavior {
    Venues(Vec<Venue>),
    Fail,
    Hang,
}

/// Places provider with per-category canned behavior
///
/// Categories without an explicit behavior return no venues.
#[derive(Default)]
pub struct StubPlaces {
    behaviors: HashMap<PlaceCategory, CategoryBehavior>,
}

impl StubPlaces {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_venues(mut self, category: PlaceCategory, venues: Vec<Venue>) -> Self {
        self.behaviors.insert(category, CategoryBehavior::Venues(venues));
        self
    }

    pub fn failing(mut self, category: PlaceCategory) -> Self {
        self.behaviors.insert(category, CategoryBehavior::Fail);
        self
    }

    pub fn hanging(mut self, category: PlaceCategory) -> Self {
        self.behaviors.insert(category, CategoryBehavior::Hang);
        self
    }
}

#[async_trait]
impl PlacesProvider for StubPlaces {
    async fn search(
        &self,
        _origin: Coordinates,
        _radius_m: u32,
        category: PlaceCategory,
    ) -> Result<Vec<Venue>> {
        match self.behaviors.get(&category) {
            Some(CategoryBehavior::Venues(venues)) => Ok(venues.clone()),
            Some(CategoryBehavior::Fail) => {
                Err(Error::Provider(format!("{} search failed", category)))
            }
            Some(CategoryBehavior::Hang) => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(Vec::new())
            }
            None => Ok(Vec::new()),
        }
    }
}

/// A venue with only a name and location
pub fn venue(name: &str, lat: f64, lng: f64) -> Venue {
    Venue {
        name: name.to_string(),
        location: Coordinates::new(lat, lng),
        rating: None,
        price_level: None,
        address: None,
    }
}

/// Summary service that echoes its input
pub struct StubSummary;

#[async_trait]
impl SummaryService for StubSummary {
    async fn summarize(&self, landmark: &str, language: &str) -> Result<Summary> {
        Ok(Summary {
            landmark: landmark.to_string(),
            language: language.to_string(),
            text: format!("{} is a historic landmark.", landmark),
            audio_file: None,
            generated_at: "2024-01-01T00:00:00Z".to_string(),
        })
    }
}

/// Text generator with a canned answer, or a provider failure
pub struct StubText(Option<String>);

impl StubText {
    pub fn answering(text: &str) -> Self {
        Self(Some(text.to_string()))
    }

    pub fn failing() -> Self {
        Self(None)
    }
}

#[async_trait]
impl TextGenerator for StubText {
    async fn landmark_summary(&self, _landmark: &str, _language: &str) -> Result<String> {
        self.0
            .clone()
            .ok_or_else(|| Error::Provider("stub text generator failed".to_string()))
    }
}

/// Speech synthesizer with canned audio, or a provider failure
pub struct StubSpeech(Option<Vec<u8>>);

impl StubSpeech {
    pub fn speaking(audio: &[u8]) -> Self {
        Self(Some(audio.to_vec()))
    }

    pub fn failing() -> Self {
        Self(None)
    }
}

#[async_trait]
impl SpeechSynthesizer for StubSpeech {
    async fn synthesize(&self, _text: &str, _language: &str) -> Result<Vec<u8>> {
        self.0
            .clone()
            .ok_or_else(|| Error::Provider("stub speech synthesizer failed".to_string()))
    }
}
