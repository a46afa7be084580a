//! Image preparation before upload
//!
//! Captured photos can be huge (a modern phone camera easily produces
//! 4000x3000 frames); uploading them raw wastes the user's data plan and
//! slows analysis down. Every image is downscaled so neither dimension
//! exceeds [`MAX_DIMENSION`] and re-encoded as JPEG at a fixed,
//! role-dependent quality before it enters the multipart payload.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::GenericImageView;

use crate::error::{MealSnapError, Result};

/// Neither output dimension may exceed this, aspect ratio preserved.
pub const MAX_DIMENSION: u32 = 2048;

/// What the image will be used for, which fixes its JPEG quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageRole {
    /// Single fridge/pantry shot for ingredient detection
    Ingredient,
    /// Higher-fidelity shot for dual-image analysis
    Analysis,
}

impl ImageRole {
    /// JPEG quality (0-100) used when re-encoding
    pub fn jpeg_quality(&self) -> u8 {
        match self {
            ImageRole::Ingredient => 80,
            ImageRole::Analysis => 90,
        }
    }
}

/// A resized, re-encoded image ready for multipart framing
#[derive(Debug, Clone)]
pub struct PreparedImage {
    pub jpeg: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Decode, downscale and re-encode an image for upload.
///
/// This is a pure transformation; its only side effect is logging size
/// metrics. Undecodable or unencodable input is a caller error and is
/// surfaced as a non-retryable validation failure.
pub fn prepare_image(bytes: &[u8], role: ImageRole) -> Result<PreparedImage> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| MealSnapError::image_encoding(format!("Failed to decode image: {}", e)))?;

    let (original_width, original_height) = img.dimensions();

    let img = if original_width > MAX_DIMENSION || original_height > MAX_DIMENSION {
        img.resize(MAX_DIMENSION, MAX_DIMENSION, FilterType::Triangle)
    } else {
        img
    };

    let (width, height) = img.dimensions();

    // JPEG has no alpha channel; flatten before encoding.
    let rgb = img.to_rgb8();
    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(&mut Cursor::new(&mut jpeg), role.jpeg_quality())
        .encode_image(&rgb)
        .map_err(|e| MealSnapError::image_encoding(format!("Failed to encode JPEG: {}", e)))?;

    tracing::debug!(
        original_width,
        original_height,
        width,
        height,
        input_bytes = bytes.len(),
        output_bytes = jpeg.len(),
        quality = role.jpeg_quality(),
        "prepared image for upload"
    );

    Ok(PreparedImage {
        jpeg,
        width,
        height,
    })
}
