//! # Provider Factory
//!
//! Builds the concrete collaborators from resolved `Settings`, so every consumer
//! (the CLI, tests, embedding applications) wires the pipeline the same way.

use crate::{
    config::Settings,
    errors::ScanError,
    ocr::TesseractCli,
    providers::{ai::openai::OpenAiVisionProvider, marketplace::discogs::DiscogsClient},
};
use tracing::info;

/// The production collaborators for one scan.
#[derive(Debug, Clone)]
pub struct Providers {
    pub ocr: TesseractCli,
    pub vision: OpenAiVisionProvider,
    pub prices: DiscogsClient,
}

/// Creates the OCR engine, vision provider and price source described by `settings`.
pub fn create_providers(settings: &Settings) -> Result<Providers, ScanError> {
    info!(
        "Using vision model '{}' at '{}'",
        settings.model, settings.api_url
    );
    Ok(Providers {
        ocr: TesseractCli::from_config(&settings.ocr),
        vision: OpenAiVisionProvider::new(
            settings.api_url.clone(),
            settings.api_key.clone(),
            settings.model.clone(),
        )?,
        prices: DiscogsClient::new(settings.discogs_url.clone())?,
    })
}
