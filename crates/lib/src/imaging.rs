//! # Image Preparation
//!
//! Decoding, downscaling and transport encoding of the sleeve photo.

use crate::constants::JPEG_QUALITY;
use crate::errors::ScanError;
use base64::{engine::general_purpose, Engine as _};
use image::{codecs::jpeg::JpegEncoder, imageops::FilterType, DynamicImage, GenericImageView};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A decoded sleeve photo together with its upload-ready encoding.
#[derive(Debug, Clone)]
pub struct PreparedImage {
    /// The image as decoded from disk, before any resizing.
    pub original: DynamicImage,
    /// The dimensions of the encoded (possibly downscaled) image.
    pub encoded_dimensions: (u32, u32),
    /// Base64 of the JPEG encoding.
    pub base64: String,
}

/// Opens an image file.
pub fn open_image(path: &Path) -> Result<DynamicImage, ScanError> {
    image::open(path).map_err(|source| ScanError::ImageOpen {
        path: path.to_path_buf(),
        source,
    })
}

/// Computes the target size for an image whose larger side may exceed `max_dimension`.
///
/// Both sides are scaled by `max_dimension / larger_side` and truncated to whole
/// pixels. Images already within bounds keep their size.
pub fn scaled_dimensions(width: u32, height: u32, max_dimension: u32) -> (u32, u32) {
    let largest = width.max(height);
    if largest <= max_dimension {
        return (width, height);
    }
    let factor = f64::from(max_dimension) / f64::from(largest);
    let scale = |side: u32| ((f64::from(side) * factor) as u32).max(1);
    (scale(width), scale(height))
}

/// Encodes an image as JPEG. Alpha is dropped since JPEG cannot carry it.
pub fn encode_jpeg(image: &DynamicImage) -> Result<Vec<u8>, ScanError> {
    let rgb = image.to_rgb8();
    let mut buffer = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buffer, JPEG_QUALITY).encode_image(&rgb)?;
    Ok(buffer.into_inner())
}

/// Downscales an image if needed and encodes it for transport.
pub fn prepare_image(
    original: DynamicImage,
    max_dimension: u32,
) -> Result<PreparedImage, ScanError> {
    let (width, height) = original.dimensions();
    let (target_width, target_height) = scaled_dimensions(width, height, max_dimension);

    let jpeg = if (target_width, target_height) == (width, height) {
        encode_jpeg(&original)?
    } else {
        info!("Resizing image from {width}x{height} to {target_width}x{target_height}");
        let resized = original.resize_exact(target_width, target_height, FilterType::CatmullRom);
        encode_jpeg(&resized)?
    };

    debug!("Encoded image to {} JPEG bytes", jpeg.len());

    Ok(PreparedImage {
        original,
        encoded_dimensions: (target_width, target_height),
        base64: general_purpose::STANDARD.encode(jpeg),
    })
}

impl PreparedImage {
    /// Writes the original image to the temp directory and opens it in the
    /// platform's default viewer.
    pub fn show(&self) -> Result<PathBuf, ScanError> {
        let path = std::env::temp_dir().join("vinylvision-preview.png");
        self.original.save(&path)?;
        open::that(&path)?;
        Ok(path)
    }
}
