//! Landmark resolution
//!
//! Turns an uploaded photo into a named landmark with coordinates. The
//! `ClassifierGateway` walks an ordered list of strategies:
//! - `cloud`: Google Cloud Vision landmark detection
//! - `local`: an on-box image classifier plus a label -> landmark table
//!
//! The first strategy that produces a landmark wins. Provider failures fall
//! through to the next strategy; bad images and configuration mismatches
//! stop the chain.

pub mod centroid;
pub mod cloud;
pub mod local;
pub mod preprocess;
pub mod table;

use crate::error::{Error, Result};
use crate::geo::Coordinates;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Which strategy identified the landmark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionSource {
    /// Cloud vision landmark detection
    Cloud,
    /// Local image classifier
    LocalModel,
}

impl std::fmt::Display for ResolutionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cloud => write!(f, "cloud"),
            Self::LocalModel => write!(f, "local_model"),
        }
    }
}

/// A resolved landmark
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandmarkResolution {
    pub name: String,
    pub location: Coordinates,
    pub source: ResolutionSource,
}

/// A landmark candidate as reported by a vision provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandmarkCandidate {
    pub name: String,
    pub location: Coordinates,
}

/// One way of identifying a landmark from image bytes
///
/// `Ok(None)` means the strategy ran but found nothing.
#[async_trait]
pub trait LandmarkStrategy: Send + Sync {
    /// Strategy name for logs and status output
    fn name(&self) -> &'static str;

    /// Attempt to resolve the image
    async fn resolve(&self, image: &[u8]) -> Result<Option<LandmarkResolution>>;
}

/// Ordered fallback chain over landmark strategies
pub struct ClassifierGateway {
    strategies: Vec<Box<dyn LandmarkStrategy>>,
    timeout: Duration,
}

impl ClassifierGateway {
    /// Create an empty gateway; every call bounded by `timeout`
    pub fn new(timeout: Duration) -> Self {
        Self {
            strategies: Vec::new(),
            timeout,
        }
    }

    /// Append a strategy to the end of the chain
    pub fn with_strategy(mut self, strategy: impl LandmarkStrategy + 'static) -> Self {
        self.strategies.push(Box::new(strategy));
        self
    }

    /// Names of the registered strategies, in the order they are tried
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Resolve a landmark from raw image bytes
    ///
    /// Each strategy is attempted at most once, in registration order.
    pub async fn resolve(&self, image: &[u8]) -> Result<LandmarkResolution> {
        if image.is_empty() {
            return Err(Error::InvalidImage("Image is empty".to_string()));
        }
        let (width, height) = preprocess::image_dimensions(image)?;
        debug!("Resolving {}x{} image", width, height);

        for strategy in &self.strategies {
            let outcome = match tokio::time::timeout(self.timeout, strategy.resolve(image)).await {
                Ok(outcome) => outcome,
                Err(_) => Err(Error::Provider(format!(
                    "{} strategy timed out after {:?}",
                    strategy.name(),
                    self.timeout
                ))),
            };

            match outcome {
                Ok(Some(resolution)) => {
                    info!(
                        "Resolved landmark '{}' at {} via {}",
                        resolution.name, resolution.location, resolution.source
                    );
                    return Ok(resolution);
                }
                Ok(None) => {
                    debug!("{} strategy found no landmark", strategy.name());
                }
                Err(e) if e.is_recoverable() => {
                    warn!("{} strategy failed, falling back: {}", strategy.name(), e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(Error::NoCandidateFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmark::cloud::CloudStrategy;
    use crate::landmark::local::LocalModelStrategy;
    use crate::landmark::table::LandmarkTable;
    use crate::testing::{tiny_png, StubClassifier, StubVision};
    use std::sync::Arc;

    fn local_strategy(classifier: Arc<StubClassifier>) -> LocalModelStrategy {
        LocalModelStrategy::new(classifier, LandmarkTable::builtin()).unwrap()
    }

    #[tokio::test]
    async fn test_cloud_candidate_skips_local_model() {
        let classifier = Arc::new(StubClassifier::predicting("tajmahal"));
        let gateway = ClassifierGateway::new(Duration::from_secs(5))
            .with_strategy(CloudStrategy::new(StubVision::returning(vec![
                LandmarkCandidate {
                    name: "Gateway of India".to_string(),
                    location: Coordinates::new(18.9220, 72.8347),
                },
                LandmarkCandidate {
                    name: "Taj Mahal Palace".to_string(),
                    location: Coordinates::new(18.9217, 72.8332),
                },
            ])))
            .with_strategy(local_strategy(classifier.clone()));

        let resolution = gateway.resolve(&tiny_png()).await.unwrap();

        assert_eq!(resolution.source, ResolutionSource::Cloud);
        assert_eq!(resolution.name, "Gateway of India");
        assert_eq!(classifier.calls(), 0);
    }

    #[tokio::test]
    async fn test_falls_back_to_local_model() {
        let classifier = Arc::new(StubClassifier::predicting("Ajanta Caves"));
        let gateway = ClassifierGateway::new(Duration::from_secs(5))
            .with_strategy(CloudStrategy::new(StubVision::returning(Vec::new())))
            .with_strategy(local_strategy(classifier.clone()));

        let resolution = gateway.resolve(&tiny_png()).await.unwrap();

        assert_eq!(resolution.source, ResolutionSource::LocalModel);
        assert_eq!(resolution.name, "Ajanta Caves");
        assert_eq!(resolution.location, Coordinates::new(20.5513, 75.7069));
        assert_eq!(classifier.calls(), 1);
    }

    #[tokio::test]
    async fn test_vision_error_falls_back() {
        let classifier = Arc::new(StubClassifier::predicting("charminar"));
        let gateway = ClassifierGateway::new(Duration::from_secs(5))
            .with_strategy(CloudStrategy::new(StubVision::failing()))
            .with_strategy(local_strategy(classifier));

        let resolution = gateway.resolve(&tiny_png()).await.unwrap();

        assert_eq!(resolution.source, ResolutionSource::LocalModel);
        assert_eq!(resolution.name, "Charminar");
    }

    #[tokio::test]
    async fn test_vision_timeout_falls_back() {
        let classifier = Arc::new(StubClassifier::predicting("tajmahal"));
        let gateway = ClassifierGateway::new(Duration::from_millis(250))
            .with_strategy(CloudStrategy::new(StubVision::hanging()))
            .with_strategy(local_strategy(classifier));

        let resolution = gateway.resolve(&tiny_png()).await.unwrap();

        assert_eq!(resolution.source, ResolutionSource::LocalModel);
        assert_eq!(resolution.name, "Taj Mahal");
    }

    #[tokio::test]
    async fn test_no_candidate_found() {
        let gateway = ClassifierGateway::new(Duration::from_secs(5))
            .with_strategy(CloudStrategy::new(StubVision::returning(Vec::new())));

        let result = gateway.resolve(&tiny_png()).await;
        assert!(matches!(result, Err(Error::NoCandidateFound)));
    }

    #[tokio::test]
    async fn test_empty_gateway_has_no_candidate() {
        let gateway = ClassifierGateway::new(Duration::from_secs(5));
        assert!(gateway.strategy_names().is_empty());
        assert!(matches!(
            gateway.resolve(&tiny_png()).await,
            Err(Error::NoCandidateFound)
        ));
    }

    #[tokio::test]
    async fn test_undecodable_image_is_surfaced() {
        let classifier = Arc::new(StubClassifier::predicting("tajmahal"));
        let gateway = ClassifierGateway::new(Duration::from_secs(5))
            .with_strategy(CloudStrategy::new(StubVision::returning(Vec::new())))
            .with_strategy(local_strategy(classifier.clone()));

        let result = gateway.resolve(b"definitely not an image").await;

        assert!(matches!(result, Err(Error::InvalidImage(_))));
        assert_eq!(classifier.calls(), 0);
    }

    #[tokio::test]
    async fn test_undecodable_image_rejected_before_cloud() {
        let gateway = ClassifierGateway::new(Duration::from_secs(5))
            .with_strategy(CloudStrategy::new(StubVision::returning(vec![LandmarkCandidate {
                name: "India Gate".to_string(),
                location: Coordinates::new(28.6129, 77.2295),
            }])));

        let result = gateway.resolve(b"definitely not an image").await;
        assert!(matches!(result, Err(Error::InvalidImage(_))));
    }

    #[tokio::test]
    async fn test_slow_local_model_is_bounded_by_timeout() {
        let classifier =
            Arc::new(StubClassifier::predicting("tajmahal").slow(Duration::from_millis(800)));
        let gateway = ClassifierGateway::new(Duration::from_millis(50))
            .with_strategy(local_strategy(classifier));

        let started = std::time::Instant::now();
        let result = gateway.resolve(&tiny_png()).await;

        assert!(started.elapsed() < Duration::from_millis(600));
        assert!(matches!(result, Err(Error::NoCandidateFound)));
    }

    #[tokio::test]
    async fn test_empty_image_rejected() {
        let gateway = ClassifierGateway::new(Duration::from_secs(5))
            .with_strategy(CloudStrategy::new(StubVision::returning(Vec::new())));
        assert!(matches!(gateway.resolve(&[]).await, Err(Error::InvalidImage(_))));
    }

    #[test]
    fn test_strategy_order() {
        let classifier = Arc::new(StubClassifier::predicting("tajmahal"));
        let gateway = ClassifierGateway::new(Duration::from_secs(5))
            .with_strategy(CloudStrategy::new(StubVision::returning(Vec::new())))
            .with_strategy(local_strategy(classifier));
        assert_eq!(gateway.strategy_names(), vec!["cloud", "local"]);
    }

    #[test]
    fn test_resolution_serialization() {
        let resolution = LandmarkResolution {
            name: "Charminar".to_string(),
            location: Coordinates::new(17.3616, 78.4747),
            source: ResolutionSource::LocalModel,
        };
        let json = serde_json::to_value(&resolution).unwrap();
        assert_eq!(json["source"], "local_model");
        assert_eq!(json["location"]["lat"], 17.3616);
    }
}
