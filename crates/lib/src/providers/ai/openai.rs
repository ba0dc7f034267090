use crate::{
    constants::{MAX_OUTPUT_TOKENS, REQUEST_TIMEOUT_SECS},
    errors::VisionError,
    providers::ai::{VisionProvider, VisionRequest},
};
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::time::Duration;
use tracing::debug;

// --- OpenAI chat-completions request and response structures ---

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: Vec<ContentPart>,
}

#[derive(Serialize, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Serialize, Debug, PartialEq)]
struct ImageUrl {
    url: String,
}

#[derive(Deserialize, Debug)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize, Debug)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize, Debug)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

fn content_parts(request: &VisionRequest) -> Vec<ContentPart> {
    let mut parts = vec![ContentPart::Text {
        text: request.prompt.clone(),
    }];
    if let Some(b64) = &request.image_base64 {
        parts.push(ContentPart::ImageUrl {
            image_url: ImageUrl {
                url: format!("data:image/jpeg;base64,{b64}"),
            },
        });
    }
    parts
}

// --- OpenAI Provider implementation ---

/// A provider for the OpenAI chat-completions API, or any compatible endpoint.
#[derive(Clone, Debug)]
pub struct OpenAiVisionProvider {
    client: ReqwestClient,
    api_url: String,
    api_key: Option<String>,
    model: String,
}

impl OpenAiVisionProvider {
    /// Creates a new `OpenAiVisionProvider` with the standard request timeout.
    pub fn new(
        api_url: String,
        api_key: Option<String>,
        model: String,
    ) -> Result<Self, VisionError> {
        let client = ReqwestClient::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(VisionError::ReqwestClientBuild)?;
        Ok(Self {
            client,
            api_url,
            api_key,
            model,
        })
    }
}

#[async_trait]
impl VisionProvider for OpenAiVisionProvider {
    async fn ask(&self, request: &VisionRequest) -> Result<String, VisionError> {
        let request_body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: content_parts(request),
            }],
            max_tokens: MAX_OUTPUT_TOKENS,
        };

        debug!(
            model = %self.model,
            with_image = request.image_base64.is_some(),
            "--> Sending request to vision API"
        );

        let mut request_builder = self.client.post(&self.api_url);
        if let Some(key) = &self.api_key {
            request_builder = request_builder.bearer_auth(key);
        }

        let response = request_builder
            .json(&request_body)
            .send()
            .await
            .map_err(VisionError::Request)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(VisionError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(VisionError::Deserialization)?;

        let choice = chat_response
            .choices
            .into_iter()
            .next()
            .ok_or(VisionError::EmptyResponse)?;

        Ok(choice.message.content.unwrap_or_default())
    }
}
