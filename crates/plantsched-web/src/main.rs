use std::net::SocketAddr;
use std::sync::Arc;

mod handlers;
mod models;
mod state;

use plantsched_core::{AnthropicClient, ExtractionBackend, PromptVariant};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let variant = match std::env::var("EXTRACT_PROMPT") {
        Ok(value) => value.parse::<PromptVariant>().map_err(anyhow::Error::msg)?,
        Err(_) => PromptVariant::default(),
    };

    // The server starts without a key; every extraction request then fails
    // with a configuration error until one is provided.
    let backend = match std::env::var("CLAUDE_API_KEY") {
        Ok(key) if !key.is_empty() => {
            let mut client = AnthropicClient::new(key).with_variant(variant);
            if let Ok(model) = std::env::var("CLAUDE_MODEL") {
                client = client.with_model(model);
            }
            Some(Arc::new(client) as Arc<dyn ExtractionBackend>)
        }
        _ => {
            eprintln!("Warning: CLAUDE_API_KEY is not set; extraction requests will fail");
            None
        }
    };

    let state = Arc::new(AppState { backend });
    let app = handlers::router(state);

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    println!("Listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
