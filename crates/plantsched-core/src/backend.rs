use std::future::Future;
use std::pin::Pin;

use crate::ExtractError;

/// A document-understanding backend that can extract a plant schedule from a
/// base64-encoded PDF.
///
/// The production implementor is [`AnthropicClient`](crate::AnthropicClient);
/// handlers take the trait so tests can substitute a
/// [`MockBackend`](crate::mock::MockBackend) without any network access.
pub trait ExtractionBackend: Send + Sync {
    /// Forward the PDF upstream and return the provider's raw JSON body.
    fn extract<'a>(
        &'a self,
        pdf_base64: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<serde_json::Value, ExtractError>> + Send + 'a>>;
}
