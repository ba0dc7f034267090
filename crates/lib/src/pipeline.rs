//! # Sleeve Scanning Pipeline
//!
//! Sequences one scan: OCR and image preparation, the vision query, an optional
//! price lookup and optional persistence. Every step runs to completion before
//! the next starts.

use crate::{
    constants::MAX_IMAGE_DIMENSION,
    errors::ScanError,
    imaging::{open_image, prepare_image, PreparedImage},
    ocr::{clean_ocr_text, OcrEngine},
    providers::{ai::VisionProvider, marketplace::PriceSource},
    types::{Metadata, Outcome, ProcessOptions, PRICE_FIELD},
    vision::{build_request, query_vision},
};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Runs scans against a fixed set of collaborators.
#[derive(Debug)]
pub struct SleeveScanner<'a> {
    ocr: &'a dyn OcrEngine,
    vision: &'a dyn VisionProvider,
    prices: Option<&'a dyn PriceSource>,
    prompt_template: String,
    discogs_token: Option<String>,
}

/// Everything produced while scanning one image.
#[derive(Debug)]
pub struct ProcessingSession {
    pub image_path: PathBuf,
    /// The cleaned OCR text; empty when OCR failed.
    pub ocr_text: String,
    pub image: PreparedImage,
    /// How the vision step ended.
    pub vision_outcome: Outcome<Metadata>,
    /// How the price step ended; `None` when it was not requested.
    pub price_outcome: Option<Outcome<f64>>,
}

impl<'a> SleeveScanner<'a> {
    pub fn new(
        ocr: &'a dyn OcrEngine,
        vision: &'a dyn VisionProvider,
        prompt_template: impl Into<String>,
    ) -> Self {
        Self {
            ocr,
            vision,
            prices: None,
            prompt_template: prompt_template.into(),
            discogs_token: None,
        }
    }

    /// Enables price lookups through `prices`, authenticated with `token`.
    pub fn with_price_source(mut self, prices: &'a dyn PriceSource, token: Option<String>) -> Self {
        self.prices = Some(prices);
        self.discogs_token = token;
        self
    }

    /// Scans one sleeve photo.
    ///
    /// Only an unreadable image is an error. OCR, vision and price failures are
    /// logged and leave the corresponding result unset.
    pub async fn process(
        &self,
        image_path: &Path,
        options: ProcessOptions,
    ) -> Result<ProcessingSession, ScanError> {
        info!("Processing '{}'", image_path.display());

        let (ocr_text, image) = self.preprocess_image(image_path).await?;

        let request = build_request(
            &self.prompt_template,
            &ocr_text,
            Some(&image.base64),
            options.send_image,
        );
        let vision_outcome = query_vision(self.vision, &request).await;

        let mut session = ProcessingSession {
            image_path: image_path.to_path_buf(),
            ocr_text,
            image,
            vision_outcome,
            price_outcome: None,
        };

        if options.lookup_price {
            session.price_outcome = Some(self.lookup_price(&mut session).await);
        }

        Ok(session)
    }

    async fn preprocess_image(
        &self,
        image_path: &Path,
    ) -> Result<(String, PreparedImage), ScanError> {
        let original = open_image(image_path)?;

        let ocr_text = match self.ocr.recognize(image_path).await {
            Ok(text) => clean_ocr_text(&text),
            Err(e) => {
                error!("Error during OCR: {e}");
                String::new()
            }
        };

        let image = prepare_image(original, MAX_IMAGE_DIMENSION)?;
        Ok((ocr_text, image))
    }

    async fn lookup_price(&self, session: &mut ProcessingSession) -> Outcome<f64> {
        let Some(prices) = self.prices else {
            warn!("Price lookup requested but no price source is configured.");
            return Outcome::NotFound;
        };
        let Outcome::Found(metadata) = &mut session.vision_outcome else {
            info!("No metadata extracted; skipping price lookup.");
            return Outcome::NotFound;
        };

        let outcome = prices
            .lookup_price(metadata, self.discogs_token.as_deref())
            .await;
        if let Outcome::Found(price) = outcome {
            info!("Lowest suggested price: {price}");
            metadata.insert(PRICE_FIELD.to_string(), Value::from(price));
        }
        outcome
    }
}

impl ProcessingSession {
    /// The extracted metadata, including the price when one was found.
    pub fn metadata(&self) -> Option<&Metadata> {
        match &self.vision_outcome {
            Outcome::Found(metadata) => Some(metadata),
            _ => None,
        }
    }

    /// The looked-up price, if the lookup ran and succeeded.
    pub fn price(&self) -> Option<f64> {
        match self.price_outcome {
            Some(Outcome::Found(price)) => Some(price),
            _ => None,
        }
    }

    /// Writes the metadata to `output_path` as indented UTF-8 JSON.
    ///
    /// Returns `false` without touching the file when there is nothing to save.
    pub fn save_response(&self, output_path: &Path) -> Result<bool, ScanError> {
        let Some(metadata) = self.metadata() else {
            println!("Nothing to save.");
            return Ok(false);
        };
        let json = serde_json::to_string_pretty(metadata)?;
        fs::write(output_path, json)?;
        info!("Saved metadata to '{}'", output_path.display());
        Ok(true)
    }

    /// Opens the original, unresized photo in the platform viewer.
    pub fn show_image(&self) -> Result<PathBuf, ScanError> {
        self.image.show()
    }
}
