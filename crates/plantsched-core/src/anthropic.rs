//! Anthropic Messages API client and wire types.
//!
//! One operation: send a base64 PDF plus the extraction instruction as a
//! single user message, return the provider's JSON body untouched. No retries,
//! no response-shape validation.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use serde::Serialize;

use crate::backend::ExtractionBackend;
use crate::prompt::PromptVariant;
use crate::ExtractError;

pub const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";
pub const ANTHROPIC_VERSION: &str = "2023-06-01";
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

/// Historical execution ceiling of the hosting platform; the outbound call
/// gets the same budget so it cannot outlive the invocation.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

// ── Wire types ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct MessagesRequest {
    pub model: String,
    pub max_tokens: u32,
    pub messages: Vec<Message>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub role: String,
    pub content: Vec<ContentBlock>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Document { source: DocumentSource },
    Text { text: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentSource {
    #[serde(rename = "type")]
    pub source_type: String,
    pub media_type: String,
    pub data: String,
}

impl ContentBlock {
    /// A base64 PDF attachment block.
    pub fn pdf(data: impl Into<String>) -> Self {
        ContentBlock::Document {
            source: DocumentSource {
                source_type: "base64".to_string(),
                media_type: "application/pdf".to_string(),
                data: data.into(),
            },
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        ContentBlock::Text { text: text.into() }
    }
}

impl MessagesRequest {
    /// The fixed request shape: one user message carrying the PDF and the
    /// instruction for the chosen prompt variant.
    pub fn for_pdf(model: &str, variant: PromptVariant, pdf_base64: &str) -> Self {
        MessagesRequest {
            model: model.to_string(),
            max_tokens: variant.max_tokens(),
            messages: vec![Message {
                role: "user".to_string(),
                content: vec![
                    ContentBlock::pdf(pdf_base64),
                    ContentBlock::text(variant.instruction()),
                ],
            }],
        }
    }
}

// ── Client ──────────────────────────────────────────────────────────────

/// Client for the Messages endpoint.
pub struct AnthropicClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    variant: PromptVariant,
    timeout: Duration,
}

impl AnthropicClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: ANTHROPIC_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            variant: PromptVariant::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Point the client at a different endpoint (used by tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_variant(mut self, variant: PromptVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Send the PDF upstream and return the raw response body.
    pub async fn extract(&self, pdf_base64: &str) -> Result<serde_json::Value, ExtractError> {
        let body = MessagesRequest::for_pdf(&self.model, self.variant, pdf_base64);
        let url = format!("{}/v1/messages", self.base_url);

        tracing::debug!(model = %self.model, variant = ?self.variant, "sending extraction request");

        let resp = self
            .http
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(ExtractError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        Ok(resp.json::<serde_json::Value>().await?)
    }
}

impl ExtractionBackend for AnthropicClient {
    fn extract<'a>(
        &'a self,
        pdf_base64: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<serde_json::Value, ExtractError>> + Send + 'a>> {
        Box::pin(self.extract(pdf_base64))
    }
}
