//! # Default Prompt Templates
//!
//! This module contains the default prompt sent to the vision model. It can be
//! overridden from `[api] prompt_template` in the config file or on the command line.

/// The placeholder replaced with the cleaned OCR text.
pub const OCR_TEXT_PLACEHOLDER: &str = "{ocr_text}";

/// The default prompt for reading a record sleeve.
///
/// Placeholders: `{ocr_text}`
pub const DEFAULT_SLEEVE_PROMPT: &str = r#"Please fill the following JSON object with the information from the image and the OCR data, without further information or comments and without markdown notation.
{
    "interpret": null,
    "album_title": null,
    "release_year": null,
    "country_printed": null,
    "catalog_number": null
}
Here is also the result of an OCR:
{ocr_text}"#;

/// Substitutes the OCR text into a prompt template.
///
/// A template without the placeholder is sent unchanged.
pub fn render_prompt(template: &str, ocr_text: &str) -> String {
    template.replace(OCR_TEXT_PLACEHOLDER, ocr_text)
}
