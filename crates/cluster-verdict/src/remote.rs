//! Verdicts from a hosted multimodal chat-completion model.

use std::fmt;
use std::time::Duration;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::capture::{encode_png_base64, png_data_url, Raster};
use crate::prompt::SizeClass;
use crate::types::{Verdict, VerdictError, VerdictResult};

/// Default chat-completion endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.mistral.ai/v1/chat/completions";

/// Default vision model.
pub const DEFAULT_MODEL: &str = "pixtral-large-2411";

/// Immutable settings for a [`RemoteComparator`].
#[derive(Clone)]
pub struct RemoteConfig {
    api_key: String,
    endpoint: String,
    model: String,
}

impl RemoteConfig {
    /// Settings for the default endpoint and model.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl fmt::Debug for RemoteConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteConfig")
            .field("api_key", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .finish()
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: Vec<ContentPart>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: String },
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Build the request body: one user message holding the instructions, then
/// the actual image, then the reference image.
pub(crate) fn build_request<'a>(
    model: &'a str,
    class: SizeClass,
    actual: &dyn Raster,
    reference: &dyn Raster,
) -> VerdictResult<ChatRequest<'a>> {
    let actual_b64 = encode_png_base64(actual)?;
    let reference_b64 = encode_png_base64(reference)?;
    tracing::debug!(
        "Encoded images: actual {} bytes, reference {} bytes (base64)",
        actual_b64.len(),
        reference_b64.len()
    );

    Ok(ChatRequest {
        model,
        messages: vec![ChatMessage {
            role: "user",
            content: vec![
                ContentPart::Text {
                    text: class.instructions(),
                },
                ContentPart::ImageUrl {
                    image_url: png_data_url(&actual_b64),
                },
                ContentPart::ImageUrl {
                    image_url: png_data_url(&reference_b64),
                },
            ],
        }],
    })
}

fn parse_answer(body: &str) -> VerdictResult<String> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| VerdictError::MalformedResponse(format!("Invalid JSON: {e}")))?;

    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or_else(|| {
            VerdictError::MalformedResponse("missing choices[0].message.content".to_string())
        })
}

/// Asks a hosted vision model to judge a capture against its reference.
///
/// Each call makes exactly one blocking request: no retries, and no timeout,
/// so a slow endpoint blocks the caller for as long as it takes. Only
/// transport failures surface as `Err`; a non-200 reply is returned as
/// [`Verdict::Unavailable`].
pub struct RemoteComparator {
    config: RemoteConfig,
    client: reqwest::blocking::Client,
}

impl RemoteComparator {
    pub fn new(config: RemoteConfig) -> VerdictResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Option::<Duration>::None)
            .build()?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &RemoteConfig {
        &self.config
    }

    /// Compare `actual` against `reference`.
    pub fn compare(&self, actual: &dyn Raster, reference: &dyn Raster) -> VerdictResult<Verdict> {
        let class = SizeClass::classify(actual, reference);
        tracing::debug!(
            "Actual {}x{}, reference {}x{}: using {} instructions",
            actual.width(),
            actual.height(),
            reference.width(),
            reference.height(),
            class.as_str()
        );

        let request = build_request(&self.config.model, class, actual, reference)?;

        tracing::info!(
            "Requesting verdict from {} ({})",
            self.config.endpoint,
            self.config.model
        );
        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()?;

        let status = response.status();
        let body = response.text()?;

        if status == StatusCode::OK {
            tracing::info!("Verdict received ({} bytes)", body.len());
            return Ok(Verdict::Judged(parse_answer(&body)?));
        }

        tracing::warn!("Verdict endpoint returned {status}; manual review needed");
        Ok(Verdict::Unavailable {
            status: status.as_u16(),
            body,
        })
    }
}
