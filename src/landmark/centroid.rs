//! Nearest-centroid image classifier
//!
//! The built-in `ImageClassifier` implementation. No model ships with the
//! crate; the local fallback stays disabled until `classifier.model_path`
//! points at a JSON artifact of this shape:
//!
//! ```json
//! { "grid": 8, "classes": [ { "label": "tajmahal", "centroid": [0.12, ...] } ] }
//! ```
//!
//! Each centroid holds `3 * grid * grid` values: the per-channel mean of the
//! normalized input over a `grid x grid` cell layout, red cells first. The
//! grid may not exceed the input size.

use crate::constants::model::INPUT_SIZE;
use crate::error::{Error, Result};
use crate::landmark::local::ImageClassifier;
use crate::landmark::preprocess::ImageTensor;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct ModelFile {
    grid: u32,
    classes: Vec<ClassCentroid>,
}

#[derive(Debug, Deserialize)]
struct ClassCentroid {
    label: String,
    centroid: Vec<f32>,
}

/// Classifier that picks the class whose centroid is closest to the
/// image's pooled features
#[derive(Debug)]
pub struct CentroidClassifier {
    grid: u32,
    labels: Vec<String>,
    centroids: Vec<Vec<f32>>,
}

impl CentroidClassifier {
    /// Parse a model artifact
    pub fn from_json(content: &str) -> Result<Self> {
        let model: ModelFile = serde_json::from_str(content)
            .map_err(|e| Error::Config(format!("Failed to parse classifier model: {}", e)))?;

        if model.grid == 0 || model.grid > INPUT_SIZE {
            return Err(Error::Config(format!(
                "Classifier grid must be in 1..={}, got {}",
                INPUT_SIZE, model.grid
            )));
        }
        if model.classes.is_empty() {
            return Err(Error::Config("Classifier model has no classes".to_string()));
        }

        let expected = feature_len(model.grid);
        let mut labels = Vec::with_capacity(model.classes.len());
        let mut centroids = Vec::with_capacity(model.classes.len());
        for class in model.classes {
            if class.centroid.len() != expected {
                return Err(Error::Config(format!(
                    "Centroid for '{}' has {} values, expected {}",
                    class.label,
                    class.centroid.len(),
                    expected
                )));
            }
            labels.push(class.label);
            centroids.push(class.centroid);
        }

        Ok(Self {
            grid: model.grid,
            labels,
            centroids,
        })
    }

    /// Load a model artifact from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "Failed to read classifier model {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json(&content)
    }

    /// Average-pool each channel into `grid x grid` cells
    fn features(&self, input: &ImageTensor) -> Vec<f32> {
        let grid = self.grid.min(input.size).max(1);
        let mut features = vec![0.0f32; feature_len(self.grid)];
        let mut counts = vec![0u32; feature_len(self.grid)];

        for channel in 0..input.channels() {
            for y in 0..input.size {
                let cy = (y * grid / input.size) as usize;
                for x in 0..input.size {
                    let cx = (x * grid / input.size) as usize;
                    let cell = channel * (self.grid * self.grid) as usize + cy * self.grid as usize + cx;
                    features[cell] += input.at(channel, y, x);
                    counts[cell] += 1;
                }
            }
        }

        for (value, count) in features.iter_mut().zip(counts) {
            if count > 0 {
                *value /= count as f32;
            }
        }
        features
    }
}

fn feature_len(grid: u32) -> usize {
    3 * (grid * grid) as usize
}

fn squared_distance(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

impl ImageClassifier for CentroidClassifier {
    fn classes(&self) -> &[String] {
        &self.labels
    }

    fn predict(&self, input: &ImageTensor) -> Result<String> {
        let features = self.features(input);

        let best = self
            .centroids
            .iter()
            .map(|centroid| squared_distance(&features, centroid))
            .enumerate()
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(idx, _)| idx)
            .ok_or_else(|| Error::Config("Classifier model has no classes".to_string()))?;

        Ok(self.labels[best].clone())
    }
}
