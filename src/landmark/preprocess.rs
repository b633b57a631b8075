//! Image preprocessing for the local classifier
//!
//! Decode -> RGB -> bilinear resize to a fixed square -> scale to [0, 1]
//! -> per-channel normalization. Output is channel-major (CHW).

use crate::constants::model::{CHANNEL_MEAN, CHANNEL_STD, INPUT_SIZE};
use crate::error::{Error, Result};
use image::imageops::FilterType;
use image::ImageReader;
use std::io::Cursor;

/// A normalized image in channel-major layout
#[derive(Debug, Clone, PartialEq)]
pub struct ImageTensor {
    /// Width and height of each channel plane
    pub size: u32,
    /// `3 * size * size` values, red plane first
    pub data: Vec<f32>,
}

impl ImageTensor {
    /// Value at (channel, y, x)
    pub fn at(&self, channel: usize, y: u32, x: u32) -> f32 {
        let size = self.size as usize;
        self.data[channel * size * size + y as usize * size + x as usize]
    }

    /// Number of channels
    pub fn channels(&self) -> usize {
        3
    }
}

/// Width and height of an encoded image, read from its header only
///
/// Fails with `Error::InvalidImage` for unknown or unsupported formats and
/// unreadable headers.
pub fn image_dimensions(image: &[u8]) -> Result<(u32, u32)> {
    let reader = ImageReader::new(Cursor::new(image))
        .with_guessed_format()
        .map_err(|e| Error::InvalidImage(format!("Failed to read image: {}", e)))?;

    if reader.format().is_none() {
        return Err(Error::InvalidImage("Unrecognized image format".to_string()));
    }

    reader
        .into_dimensions()
        .map_err(|e| Error::InvalidImage(format!("Failed to read image header: {}", e)))
}

/// Decode and normalize image bytes to the classifier's canonical input
pub fn preprocess(image: &[u8]) -> Result<ImageTensor> {
    preprocess_to(image, INPUT_SIZE)
}

/// Decode and normalize image bytes to a `size x size` tensor
pub fn preprocess_to(image: &[u8], size: u32) -> Result<ImageTensor> {
    let decoded = image::load_from_memory(image)
        .map_err(|e| Error::InvalidImage(format!("Failed to decode image: {}", e)))?;

    let resized = image::imageops::resize(&decoded.to_rgb8(), size, size, FilterType::Triangle);

    let plane = (size * size) as usize;
    let mut data = vec![0.0f32; 3 * plane];
    for (x, y, pixel) in resized.enumerate_pixels() {
        let offset = (y * size + x) as usize;
        for channel in 0..3 {
            let scaled = pixel.0[channel] as f32 / 255.0;
            data[channel * plane + offset] = (scaled - CHANNEL_MEAN[channel]) / CHANNEL_STD[channel];
        }
    }

    Ok(ImageTensor { size, data })
}
