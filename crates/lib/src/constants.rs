//! # Shared Constants
//!
//! Defaults and fixed limits used across the pipeline.

/// Images whose larger side exceeds this many pixels are scaled down before upload.
pub const MAX_IMAGE_DIMENSION: u32 = 1000;

/// JPEG quality used when encoding the sleeve photo for transport.
pub const JPEG_QUALITY: u8 = 75;

/// Per-request timeout for every remote call, in seconds.
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Upper bound on tokens the vision model may generate.
pub const MAX_OUTPUT_TOKENS: u32 = 300;

/// The default chat-completions endpoint.
pub const DEFAULT_VISION_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// The default vision model.
pub const DEFAULT_VISION_MODEL: &str = "gpt-4o";

/// The environment variable consulted when no API key is configured.
pub const API_KEY_ENV_VAR: &str = "OPENAI_API_KEY";

/// The default Discogs API base URL.
pub const DEFAULT_DISCOGS_API_URL: &str = "https://api.discogs.com";

/// The user agent sent to Discogs, which rejects anonymous clients.
pub const USER_AGENT: &str = concat!("vinylvision/", env!("CARGO_PKG_VERSION"));

/// The default OCR command.
pub const DEFAULT_OCR_COMMAND: &str = "tesseract";
