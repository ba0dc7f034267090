pub mod openai;

use crate::errors::VisionError;
use async_trait::async_trait;
use dyn_clone::DynClone;
use std::fmt::Debug;

/// A single question for a multimodal model.
#[derive(Debug, Clone, PartialEq)]
pub struct VisionRequest {
    /// The rendered prompt text.
    pub prompt: String,
    /// Base64 JPEG data to attach, if any.
    pub image_base64: Option<String>,
}

/// A trait for interacting with a multimodal language model.
///
/// Implementations send one user message made of a text part and, when
/// `image_base64` is set, an image part, and return the assistant's text.
#[async_trait]
pub trait VisionProvider: Send + Sync + Debug + DynClone {
    async fn ask(&self, request: &VisionRequest) -> Result<String, VisionError>;
}

dyn_clone::clone_trait_object!(VisionProvider);
