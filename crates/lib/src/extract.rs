//! # Response Extraction
//!
//! Pulls the metadata object out of a free-form model reply.
//!
//! The reply may wrap the object in prose or markdown fences. The span taken is
//! everything from the first `{` to the last `}`; this is a greedy match, not a
//! brace-balancing parse, so a reply carrying several objects (or stray braces
//! outside the intended one) yields either an over-wide span or a decode error.
//! The prompt asks for exactly one object.

use crate::types::{Metadata, Outcome};
use regex::Regex;
use tracing::{error, info};

/// Matches from the first `{` to the last `}`, across newlines.
const JSON_SPAN_PATTERN: &str = r"(?s)\{.*\}";

/// Returns the first-`{`-to-last-`}` span of `text`, if any.
pub fn find_json_span(text: &str) -> Result<Option<&str>, regex::Error> {
    let re = Regex::new(JSON_SPAN_PATTERN)?;
    Ok(re.find(text).map(|m| m.as_str()))
}

/// Decodes the JSON object embedded in a model reply.
///
/// - No span: `NotFound`.
/// - A span that is not a valid JSON object: `DecodeError` with the parser detail.
/// - Otherwise the decoded object, as-is.
pub fn parse_response(response: &str) -> Outcome<Metadata> {
    let json_str = match find_json_span(response) {
        Ok(Some(span)) => span,
        Ok(None) => {
            info!("No JSON string found.");
            return Outcome::NotFound;
        }
        Err(e) => {
            error!("Invalid JSON span pattern: {e}");
            return Outcome::DecodeError(e.to_string());
        }
    };

    match serde_json::from_str::<Metadata>(json_str) {
        Ok(metadata) => Outcome::Found(metadata),
        Err(e) => {
            error!("Error parsing JSON: {e}");
            Outcome::DecodeError(e.to_string())
        }
    }
}
