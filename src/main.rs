mod backend;
mod cache;
mod config;
mod dispatch;
mod error;
mod gemini;
mod models;
mod openai;
mod prompt;
mod routes;
mod session;
mod share;

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::routing::{get, post};
use axum::Router;
use parking_lot::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::{fmt, EnvFilter};

use crate::backend::backend_from_config;
use crate::config::AppConfig;
use crate::dispatch::Dispatcher;
use crate::models::BusinessContext;
use crate::routes::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Init tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let config = AppConfig::from_env();
    if config.gemini_api_key.is_empty() {
        tracing::warn!("GEMINI_API_KEY is not set; text and vision requests will fail");
    }
    if config.openai_api_key.is_empty() {
        tracing::warn!("OPENAI_API_KEY is not set; image generation requests will fail");
    }

    let state = AppState {
        sessions: Arc::new(RwLock::new(HashMap::new())),
        dispatcher: Arc::new(Dispatcher::from_config(&config)),
        backend: backend_from_config(&config),
        business: Arc::new(BusinessContext::default()),
    };

    let app = Router::new()
        .route("/api/session", post(routes::create_session))
        .route("/api/session/:id", get(routes::get_session))
        .route("/api/session/:id/text", post(routes::generate_text))
        .route("/api/session/:id/format", post(routes::format_for_platform))
        .route("/api/session/:id/interpret", post(routes::interpret_image))
        .route("/api/session/:id/image", post(routes::generate_image))
        .route("/api/session/:id/image/download", get(routes::download_image))
        .route("/api/session/:id/youtube-idea", post(routes::generate_youtube_idea))
        .route("/api/session/:id/use-idea-for-video", post(routes::use_idea_for_video))
        .route("/api/session/:id/video", post(routes::generate_video))
        .route("/api/social_stats", get(routes::social_stats))
        .route("/auth/:platform", get(routes::oauth_redirect))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!(%addr, "Starting social content assistant");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("binding listener")?;
    axum::serve(listener, app).await.context("serving")?;
    Ok(())
}
