//! Upstream extraction client for landscape plant schedules.
//!
//! Wraps the Anthropic Messages API: a base64 PDF plus a fixed instruction
//! prompt go up, the raw provider response comes back. The response is relayed
//! verbatim; this crate performs no parsing or validation of the extracted
//! plant list.

use thiserror::Error;

pub mod anthropic;
pub mod backend;
pub mod mock;
pub mod prompt;

// Re-export for convenience
pub use anthropic::{ANTHROPIC_BASE_URL, ANTHROPIC_VERSION, AnthropicClient, DEFAULT_MODEL};
pub use backend::ExtractionBackend;
pub use prompt::PromptVariant;

#[derive(Error, Debug)]
pub enum ExtractError {
    /// The upstream API answered with a non-success status. The message is
    /// the upstream response body text, relayed to the caller as-is.
    #[error("Claude API error: {message}")]
    Upstream { status: u16, message: String },
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{0}")]
    Other(String),
}
