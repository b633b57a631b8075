//! Local classifier fallback
//!
//! Runs the image through an on-box classifier and maps the predicted
//! label through the `LandmarkTable`.

use crate::error::{Error, Result};
use crate::landmark::preprocess::{preprocess, ImageTensor};
use crate::landmark::table::LandmarkTable;
use crate::landmark::{LandmarkResolution, LandmarkStrategy, ResolutionSource};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// A pretrained multi-class image classifier
///
/// Implementations are loaded once at startup and shared; `predict` must
/// be a pure function of its input.
pub trait ImageClassifier: Send + Sync {
    /// Every label the classifier can emit
    fn classes(&self) -> &[String];

    /// Arg-max label for a preprocessed image
    fn predict(&self, input: &ImageTensor) -> Result<String>;
}

/// Strategy backed by a local classifier and a label table
pub struct LocalModelStrategy {
    classifier: Arc<dyn ImageClassifier>,
    table: LandmarkTable,
}

impl LocalModelStrategy {
    /// Pair a classifier with its lookup table
    ///
    /// Fails with `Error::Config` if any class has no table entry.
    pub fn new(classifier: Arc<dyn ImageClassifier>, table: LandmarkTable) -> Result<Self> {
        table.validate_classes(classifier.classes())?;
        Ok(Self { classifier, table })
    }
}

#[async_trait]
impl LandmarkStrategy for LocalModelStrategy {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn resolve(&self, image: &[u8]) -> Result<Option<LandmarkResolution>> {
        let classifier = Arc::clone(&self.classifier);
        let image = image.to_vec();
        let label = tokio::task::spawn_blocking(move || {
            let input = preprocess(&image)?;
            classifier.predict(&input)
        })
        .await
        .map_err(|e| Error::Provider(format!("Local classifier task failed: {}", e)))??;
        debug!("Local classifier predicted '{}'", label);

        let entry = self.table.get(&label).ok_or_else(|| {
            Error::Config(format!("Predicted label '{}' has no landmark entry", label))
        })?;

        Ok(Some(LandmarkResolution {
            name: entry.name.clone(),
            location: entry.location,
            source: ResolutionSource::LocalModel,
        }))
    }
}
