//! # Vision Query
//!
//! Asks the vision model to fill in the sleeve metadata and decodes its reply.

use crate::{
    extract::parse_response,
    prompts::render_prompt,
    providers::ai::{VisionProvider, VisionRequest},
    types::{Metadata, Outcome},
};
use tracing::{debug, error, info};

/// Builds the request for one sleeve.
///
/// The image is attached only when `send_image` is set and an encoding exists.
pub fn build_request(
    prompt_template: &str,
    ocr_text: &str,
    image_base64: Option<&str>,
    send_image: bool,
) -> VisionRequest {
    VisionRequest {
        prompt: render_prompt(prompt_template, ocr_text),
        image_base64: image_base64.filter(|_| send_image).map(str::to_string),
    }
}

/// Sends the request and runs the reply through the response extractor.
///
/// A failed call is logged and reported as `TransportError`; it never aborts
/// the caller.
pub async fn query_vision(
    provider: &dyn VisionProvider,
    request: &VisionRequest,
) -> Outcome<Metadata> {
    info!(
        with_image = request.image_base64.is_some(),
        "Querying vision model for sleeve metadata"
    );
    debug!(prompt = %request.prompt, "--> Vision prompt");

    let reply = match provider.ask(request).await {
        Ok(reply) => reply,
        Err(e) => {
            error!("HTTP error: {e}");
            return Outcome::TransportError(e.to_string());
        }
    };

    println!("{reply}");
    parse_response(&reply)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_request_omits_image_unless_requested() {
        let request = build_request("OCR: {ocr_text}", "ABBA", Some("QUJD"), false);
        assert_eq!(request.prompt, "OCR: ABBA");
        assert_eq!(request.image_base64, None);

        let request = build_request("OCR: {ocr_text}", "ABBA", Some("QUJD"), true);
        assert_eq!(request.image_base64.as_deref(), Some("QUJD"));

        let request = build_request("OCR: {ocr_text}", "ABBA", None, true);
        assert_eq!(request.image_base64, None);
    }
}
