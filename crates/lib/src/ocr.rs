//! # OCR
//!
//! Text recognition over the sleeve photo. The engine sits behind a trait so the
//! pipeline can run against a stub in tests; the default implementation shells
//! out to the `tesseract` command-line tool.

use crate::{config::OcrConfig, errors::OcrError};
use async_trait::async_trait;
use std::fmt::Debug;
use std::path::Path;
use tokio::process::Command;
use tracing::debug;

/// A trait for engines that turn an image into text.
#[async_trait]
pub trait OcrEngine: Send + Sync + Debug {
    /// Returns the raw text recognized in the image at `image_path`.
    async fn recognize(&self, image_path: &Path) -> Result<String, OcrError>;
}

/// Runs the Tesseract command-line tool, reading its result from stdout.
#[derive(Clone, Debug)]
pub struct TesseractCli {
    command: String,
    language: Option<String>,
}

impl TesseractCli {
    pub fn new(command: impl Into<String>, language: Option<String>) -> Self {
        Self {
            command: command.into(),
            language,
        }
    }

    pub fn from_config(config: &OcrConfig) -> Self {
        Self::new(config.command.clone(), config.language.clone())
    }
}

#[async_trait]
impl OcrEngine for TesseractCli {
    async fn recognize(&self, image_path: &Path) -> Result<String, OcrError> {
        let mut command = Command::new(&self.command);
        command.arg(image_path).arg("stdout");
        if let Some(language) = &self.language {
            command.args(["-l", language]);
        }

        debug!(command = %self.command, image = %image_path.display(), "Running OCR");

        let output = command.output().await.map_err(|source| OcrError::Spawn {
            command: self.command.clone(),
            source,
        })?;

        if !output.status.success() {
            return Err(OcrError::Failed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Removes every empty or whitespace-only line from OCR output.
///
/// Remaining lines keep their order and their own whitespace.
pub fn clean_ocr_text(text: &str) -> String {
    text.split('\n')
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
