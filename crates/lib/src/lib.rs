//! # Vinyl Sleeve Metadata Extraction
//!
//! This crate reads a photo of a record sleeve and returns what it can about the
//! release: artist, album title, year, country and catalog number. It runs OCR
//! locally, asks a multimodal language model to fill in a JSON object, decodes
//! that object from the free-form reply, and can add a marketplace price.

pub mod config;
pub mod constants;
pub mod errors;
pub mod extract;
pub mod imaging;
pub mod ocr;
pub mod pipeline;
pub mod prompts;
pub mod providers;
pub mod types;
pub mod vision;

pub use config::{load_config, AppConfig, ConfigOverrides, Settings};
pub use errors::{ConfigError, OcrError, ScanError, VisionError};
pub use extract::parse_response;
pub use ocr::clean_ocr_text;
pub use pipeline::{ProcessingSession, SleeveScanner};
pub use types::{Metadata, Outcome, ProcessOptions, PRICE_FIELD};
