use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use plantsched_core::ExtractError;

use crate::models::{ExtractRequest, error_body};
use crate::state::AppState;

/// Bare OPTIONS requests. Preflights are answered by the CORS layer before
/// they reach the router; this keeps plain OPTIONS at 200 as well.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

pub async fn method_not_allowed() -> Response {
    error_body(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}

pub async fn extract(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ExtractRequest>, JsonRejection>,
) -> Response {
    // The credential check comes first: a missing key fails every request,
    // whatever the body looks like.
    let Some(backend) = state.backend.as_ref() else {
        return error_body(StatusCode::INTERNAL_SERVER_ERROR, "API key not configured");
    };

    let Json(req) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            return error_body(StatusCode::BAD_REQUEST, &rejection.body_text());
        }
    };

    let Some(pdf_base64) = req.pdf_base64.filter(|data| !data.is_empty()) else {
        return error_body(StatusCode::BAD_REQUEST, "No PDF data provided");
    };

    match backend.extract(&pdf_base64).await {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(err @ ExtractError::Upstream { status, .. }) => {
            tracing::warn!(status, "upstream rejected extraction");
            let code = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
            error_body(code, &err.to_string())
        }
        Err(err) => {
            tracing::error!(error = %err, "extraction failed");
            error_body(StatusCode::INTERNAL_SERVER_ERROR, &err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::router;

    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, header};
    use http_body_util::BodyExt;
    use plantsched_core::ExtractionBackend;
    use plantsched_core::mock::{MockBackend, MockResponse};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn app_with(backend: Option<Arc<MockBackend>>) -> Router {
        let backend = backend.map(|b| b as Arc<dyn ExtractionBackend>);
        router(Arc::new(AppState { backend }))
    }

    fn post_json(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/extract")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn options_is_200_empty_with_cors_headers() {
        let app = app_with(None);
        let response = app
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/api/extract")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "*"
        );
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn preflight_advertises_post() {
        let app = app_with(None);
        let response = app
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/api/extract")
                    .header(header::ORIGIN, "https://example.com")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let methods = response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_METHODS)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(methods.contains("POST"));
    }

    #[tokio::test]
    async fn disallowed_methods_are_405() {
        for method in ["GET", "PUT", "DELETE", "PATCH"] {
            let app = app_with(None);
            let response = app
                .oneshot(
                    Request::builder()
                        .method(method)
                        .uri("/api/extract")
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
            assert_eq!(
                body_json(response).await,
                json!({ "error": "Method not allowed" })
            );
        }
    }

    #[tokio::test]
    async fn missing_key_is_500_regardless_of_body() {
        let app = app_with(None);
        let response = app
            .oneshot(post_json(json!({ "pdfBase64": "JVBERi0=" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "API key not configured" })
        );
    }

    #[tokio::test]
    async fn missing_pdf_field_is_400() {
        let backend = Arc::new(MockBackend::new(MockResponse::Success(json!({}))));
        let app = app_with(Some(backend.clone()));

        let response = app.oneshot(post_json(json!({}))).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "No PDF data provided" })
        );
        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn empty_pdf_field_is_400() {
        let backend = Arc::new(MockBackend::new(MockResponse::Success(json!({}))));
        let app = app_with(Some(backend));

        let response = app
            .oneshot(post_json(json!({ "pdfBase64": "" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn malformed_json_is_400_with_error_body() {
        let backend = Arc::new(MockBackend::new(MockResponse::Success(json!({}))));
        let app = app_with(Some(backend));

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/extract")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(response).await.get("error").is_some());
    }

    #[tokio::test]
    async fn success_relays_upstream_body_unchanged() {
        let upstream_body = json!({
            "id": "msg_01",
            "role": "assistant",
            "content": [{"type": "text", "text": "[{\"code\":\"QV\",\"qty\":5}]"}]
        });
        let backend = Arc::new(MockBackend::new(MockResponse::Success(
            upstream_body.clone(),
        )));
        let app = app_with(Some(backend.clone()));

        let response = app
            .oneshot(post_json(json!({ "pdfBase64": "JVBERi0=" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, upstream_body);
        assert_eq!(backend.call_count(), 1);
    }

    #[tokio::test]
    async fn upstream_failure_relays_status_and_wrapped_text() {
        let backend = Arc::new(MockBackend::new(MockResponse::Upstream {
            status: 429,
            message: "rate limited".to_string(),
        }));
        let app = app_with(Some(backend));

        let response = app
            .oneshot(post_json(json!({ "pdfBase64": "JVBERi0=" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Claude API error: rate limited" })
        );
    }

    #[tokio::test]
    async fn transport_failure_is_500_with_message() {
        let backend = Arc::new(MockBackend::new(MockResponse::Error(
            "connection reset".to_string(),
        )));
        let app = app_with(Some(backend));

        let response = app
            .oneshot(post_json(json!({ "pdfBase64": "JVBERi0=" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "connection reset" })
        );
    }

    #[tokio::test]
    async fn repeated_requests_each_reach_the_backend() {
        let backend = Arc::new(MockBackend::new(MockResponse::Success(json!({"ok": true}))));
        let app = app_with(Some(backend.clone()));

        for _ in 0..2 {
            let response = app
                .clone()
                .oneshot(post_json(json!({ "pdfBase64": "JVBERi0=" })))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        // No caching of repeated uploads
        assert_eq!(backend.call_count(), 2);
    }
}
