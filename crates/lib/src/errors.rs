use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading the TOML configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Errors raised by an OCR engine.
#[derive(Error, Debug)]
pub enum OcrError {
    #[error("Failed to launch OCR command '{command}': {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },
    #[error("OCR command exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },
}

/// Errors raised while talking to the vision language-model API.
#[derive(Error, Debug)]
pub enum VisionError {
    #[error("Failed to build Reqwest client: {0}")]
    ReqwestClientBuild(reqwest::Error),
    #[error("Failed to send request to vision API: {0}")]
    Request(reqwest::Error),
    #[error("Vision API returned status {status}: {body}")]
    Api { status: u16, body: String },
    #[error("Failed to deserialize vision API response: {0}")]
    Deserialization(reqwest::Error),
    #[error("Vision API response contained no choices")]
    EmptyResponse,
}

/// Fatal errors that stop a processing session.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Failed to open image '{path}': {source}")]
    ImageOpen {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("Failed to encode image: {0}")]
    ImageEncode(#[from] image::ImageError),
    #[error("Failed to build HTTP client: {0}")]
    HttpClientBuild(reqwest::Error),
    #[error(transparent)]
    Vision(#[from] VisionError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to serialize metadata: {0}")]
    Json(#[from] serde_json::Error),
}
