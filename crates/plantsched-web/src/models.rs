use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

/// Inbound extraction request body.
#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    #[serde(rename = "pdfBase64", default)]
    pub pdf_base64: Option<String>,
}

/// The `{"error": "<message>"}` object every failure path returns.
pub fn error_body(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}
