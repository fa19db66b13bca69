pub mod extract;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::{Method, header};
use axum::routing::post;
use tower_http::cors::{Any, CorsLayer};

use crate::state::AppState;

/// Largest accepted request body; matches the historical platform limit.
const MAX_BODY_BYTES: usize = 20 * 1024 * 1024;

pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route(
            "/api/extract",
            post(extract::extract)
                .options(extract::preflight)
                .fallback(extract::method_not_allowed),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors)
        .with_state(state)
}
