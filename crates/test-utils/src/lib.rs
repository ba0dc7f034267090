use anyhow::Result;
use async_trait::async_trait;
use image::{DynamicImage, ImageBuffer, Rgb};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use vinylvision::errors::{OcrError, VisionError};
use vinylvision::providers::ai::{VisionProvider, VisionRequest};
use vinylvision::providers::marketplace::PriceSource;
use vinylvision::types::{Metadata, Outcome};

// --- Mock OCR Engine ---

/// An OCR engine that returns canned text, or fails on demand.
#[derive(Clone, Debug)]
pub struct MockOcrEngine {
    text: Option<String>,
    calls: Arc<Mutex<Vec<PathBuf>>>,
}

impl MockOcrEngine {
    pub fn with_text(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// An engine whose every call fails, as a missing `tesseract` binary would.
    pub fn failing() -> Self {
        Self {
            text: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn get_calls(&self) -> Vec<PathBuf> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl vinylvision::ocr::OcrEngine for MockOcrEngine {
    async fn recognize(&self, image_path: &Path) -> Result<String, OcrError> {
        self.calls.lock().unwrap().push(image_path.to_path_buf());
        match &self.text {
            Some(text) => Ok(text.clone()),
            None => Err(OcrError::Failed {
                status: "exit status: 1".to_string(),
                stderr: "MockOcrEngine: programmed failure".to_string(),
            }),
        }
    }
}

// --- Mock Vision Provider ---

#[derive(Clone, Debug)]
pub struct MockVisionProvider {
    reply: Arc<Mutex<Option<String>>>,
    calls: Arc<Mutex<Vec<VisionRequest>>>,
}

impl MockVisionProvider {
    pub fn new() -> Self {
        Self {
            reply: Arc::new(Mutex::new(None)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Pre-programs the assistant reply for every subsequent call.
    pub fn set_reply(&self, reply: &str) {
        *self.reply.lock().unwrap() = Some(reply.to_string());
    }

    /// Retrieves the recorded requests for assertion.
    pub fn get_calls(&self) -> Vec<VisionRequest> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockVisionProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VisionProvider for MockVisionProvider {
    async fn ask(&self, request: &VisionRequest) -> Result<String, VisionError> {
        self.calls.lock().unwrap().push(request.clone());
        match self.reply.lock().unwrap().clone() {
            Some(reply) => Ok(reply),
            None => Err(VisionError::Api {
                status: 503,
                body: "MockVisionProvider: No reply programmed.".to_string(),
            }),
        }
    }
}

// --- Mock Price Source ---

/// A price source that records the token it was given and returns a fixed outcome.
#[derive(Clone, Debug)]
pub struct MockPriceSource {
    outcome: Outcome<f64>,
    calls: Arc<Mutex<Vec<(Metadata, Option<String>)>>>,
}

impl MockPriceSource {
    pub fn new(outcome: Outcome<f64>) -> Self {
        Self {
            outcome,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn get_calls(&self) -> Vec<(Metadata, Option<String>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PriceSource for MockPriceSource {
    async fn lookup_price(&self, metadata: &Metadata, token: Option<&str>) -> Outcome<f64> {
        self.calls
            .lock()
            .unwrap()
            .push((metadata.clone(), token.map(str::to_string)));
        self.outcome.clone()
    }
}

// --- Test-Specific Helpers ---

pub mod helpers {
    use super::*;

    /// Writes a solid-color PNG of the given size and returns its path.
    pub fn write_test_image(dir: &Path, width: u32, height: u32) -> Result<PathBuf> {
        let path = dir.join(format!("sleeve_{width}x{height}.png"));
        let buffer = ImageBuffer::from_pixel(width, height, Rgb([200u8, 40, 40]));
        DynamicImage::ImageRgb8(buffer).save(&path)?;
        Ok(path)
    }
}
