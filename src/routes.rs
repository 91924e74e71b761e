use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use base64::Engine;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, sync::Arc};
use uuid::Uuid;

use crate::backend::MediaBackend;
use crate::dispatch::Dispatcher;
use crate::error::AssistantError;
use crate::models::{BusinessContext, ImageArtifact, PlatformProfile, SocialStats, VideoJob};
use crate::prompt;
use crate::session::SessionState;
use crate::share::{build_share_links, ShareLink};

#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<RwLock<HashMap<Uuid, Session>>>,
    pub dispatcher: Arc<Dispatcher>,
    pub backend: Arc<dyn MediaBackend>,
    pub business: Arc<BusinessContext>,
}

/// One user's working memory plus the downloadable image artifact.
#[derive(Debug, Clone)]
pub struct Session {
    pub state: SessionState,
    pub last_image: Option<ImageArtifact>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    fn new() -> Self {
        Self {
            state: SessionState::default(),
            last_image: None,
            created_at: Utc::now(),
        }
    }
}

fn default_language() -> String {
    "Türkçe".to_string()
}

fn default_mime() -> String {
    "image/png".to_string()
}

fn read_session<R>(
    state: &AppState,
    id: Uuid,
    f: impl FnOnce(&Session) -> R,
) -> Result<R, AssistantError> {
    let guard = state.sessions.read();
    let session = guard.get(&id).ok_or(AssistantError::UnknownSession(id))?;
    Ok(f(session))
}

fn with_session<R>(
    state: &AppState,
    id: Uuid,
    f: impl FnOnce(&mut Session) -> R,
) -> Result<R, AssistantError> {
    let mut guard = state.sessions.write();
    let session = guard.get_mut(&id).ok_or(AssistantError::UnknownSession(id))?;
    Ok(f(session))
}

// --- Session lifecycle ---

#[derive(Debug, Serialize)]
pub struct SessionCreated {
    pub id: Uuid,
}

pub async fn create_session(State(state): State<AppState>) -> Json<SessionCreated> {
    let id = Uuid::new_v4();
    state.sessions.write().insert(id, Session::new());
    tracing::info!("🆕 Created session {id}");
    Json(SessionCreated { id })
}

#[derive(Debug, Serialize)]
pub struct SessionSnapshot {
    pub id: Uuid,
    pub last_text: Option<String>,
    pub last_language: Option<String>,
    pub last_youtube_idea: Option<String>,
    pub video_prompt_override: Option<String>,
    pub has_image: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

pub async fn get_session(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<SessionSnapshot>, AssistantError> {
    read_session(&state, id, |session| {
        Json(SessionSnapshot {
            id,
            last_text: session.state.last_text.as_ref().map(|t| t.text.clone()),
            last_language: session.state.last_text.as_ref().map(|t| t.language.clone()),
            last_youtube_idea: session.state.last_youtube_idea.clone(),
            video_prompt_override: session.state.video_prompt_override.clone(),
            has_image: session.last_image.is_some(),
            created_at: session.created_at,
            updated_at: session.state.updated_at,
        })
    })
}

// --- Text generation ---

#[derive(Debug, Deserialize)]
pub struct TextRequest {
    pub prompt: String,
    #[serde(default = "default_language")]
    pub language: String,
}

#[derive(Debug, Serialize)]
pub struct TextResponse {
    pub text: String,
    pub language: String,
}

pub async fn generate_text(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    Json(body): Json<TextRequest>,
) -> Result<Json<TextResponse>, AssistantError> {
    read_session(&state, id, |_| ())?;

    let composed = prompt::compose_free_text(&state.business, &body.prompt, &body.language);
    tracing::info!("📝 Session {id}: generating text in {}", body.language);

    let text = state.dispatcher.generate_text(&composed).await?;
    with_session(&state, id, |session| {
        session.state.record_text(text.clone(), body.language.clone());
    })?;

    Ok(Json(TextResponse {
        text,
        language: body.language,
    }))
}

// --- Platform formatting + share links ---

#[derive(Debug, Deserialize)]
pub struct FormatRequest {
    pub platform: String,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FormatResponse {
    pub platform: String,
    pub text: String,
    pub share_links: Vec<ShareLink>,
}

pub async fn format_for_platform(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    Json(body): Json<FormatRequest>,
) -> Result<Json<FormatResponse>, AssistantError> {
    let last = read_session(&state, id, |session| session.state.last_text.clone())?
        .ok_or_else(|| {
            AssistantError::MissingInput("generate a text before formatting it for a platform".into())
        })?;

    let language = body.language.unwrap_or_else(|| last.language.clone());
    let profile = PlatformProfile::from_tag(&body.platform);
    let composed = prompt::compose_platform_format(&state.business, &last.text, profile, &language);
    tracing::info!("🪄 Session {id}: formatting for {}", body.platform);

    // Formatting reads the last-text slot without overwriting it.
    let text = state.dispatcher.generate_text(&composed).await?;
    let share_links = build_share_links(&state.business, &text);

    Ok(Json(FormatResponse {
        platform: body.platform,
        text,
        share_links,
    }))
}

// --- Image interpretation ---

#[derive(Debug, Deserialize)]
pub struct InterpretRequest {
    pub image_base64: String,
    #[serde(default = "default_mime")]
    pub mime_type: String,
    #[serde(default)]
    pub question: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct InterpretResponse {
    pub interpretation: String,
}

pub async fn interpret_image(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    Json(body): Json<InterpretRequest>,
) -> Result<Json<InterpretResponse>, AssistantError> {
    read_session(&state, id, |_| ())?;

    let data = body.image_base64.trim();
    if data.is_empty() {
        return Err(AssistantError::MissingInput("upload an image to interpret".into()));
    }
    base64::engine::general_purpose::STANDARD
        .decode(data)
        .map_err(|_| AssistantError::MissingInput("image_base64 is not valid base64 data".into()))?;

    let question = body
        .question
        .filter(|q| !q.trim().is_empty())
        .unwrap_or_else(|| prompt::DEFAULT_VISION_QUESTION.to_string());

    tracing::info!("🔍 Session {id}: interpreting uploaded image");
    let interpretation = state
        .dispatcher
        .interpret_image(data, &body.mime_type, &question)
        .await?;

    Ok(Json(InterpretResponse { interpretation }))
}

// --- Image generation + download ---

#[derive(Debug, Deserialize)]
pub struct ImageRequest {
    #[serde(default)]
    pub prompt: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ImageResponse {
    pub prompt: String,
    pub image_base64: String,
    pub file_name: &'static str,
    pub mime_type: &'static str,
    pub download_path: String,
    pub used_last_text: bool,
}

pub async fn generate_image(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    Json(body): Json<ImageRequest>,
) -> Result<Json<ImageResponse>, AssistantError> {
    let explicit = body.prompt.unwrap_or_default();
    let resolved =
        read_session(&state, id, |session| session.state.resolve_image_prompt(&explicit))??;
    let used_last_text = explicit.trim().is_empty();

    tracing::info!("🎨 Session {id}: generating image");
    let artifact = state.dispatcher.generate_image(&resolved).await?;
    let encoded = base64::engine::general_purpose::STANDARD.encode(&artifact.data);

    let (file_name, mime_type) = (artifact.file_name, artifact.mime_type);
    with_session(&state, id, |session| {
        session.last_image = Some(artifact.clone());
    })?;

    Ok(Json(ImageResponse {
        prompt: resolved,
        image_base64: encoded,
        file_name,
        mime_type,
        download_path: format!("/api/session/{id}/image/download"),
        used_last_text,
    }))
}

pub async fn download_image(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Response, AssistantError> {
    let artifact = read_session(&state, id, |session| session.last_image.clone())?
        .ok_or_else(|| AssistantError::MissingInput("no generated image to download yet".into()))?;

    let headers = [
        (header::CONTENT_TYPE, artifact.mime_type.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", artifact.file_name),
        ),
    ];
    Ok((StatusCode::OK, headers, artifact.data).into_response())
}

// --- YouTube ideas and video hand-off ---

#[derive(Debug, Deserialize)]
pub struct IdeaRequest {
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default = "default_language")]
    pub language: String,
}

#[derive(Debug, Serialize)]
pub struct IdeaResponse {
    pub idea: String,
    pub topic: String,
}

pub async fn generate_youtube_idea(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    Json(body): Json<IdeaRequest>,
) -> Result<Json<IdeaResponse>, AssistantError> {
    let explicit = body.prompt.unwrap_or_default();
    let topic = read_session(&state, id, |session| session.state.resolve_idea_topic(&explicit))??;

    let composed = prompt::compose_youtube_idea(&state.business, &topic, &body.language);
    tracing::info!("🎬 Session {id}: generating YouTube idea");

    let idea = state.dispatcher.generate_youtube_idea(&composed).await?;
    with_session(&state, id, |session| {
        session.state.record_youtube_idea(idea.clone());
    })?;

    Ok(Json(IdeaResponse { idea, topic }))
}

#[derive(Debug, Serialize)]
pub struct VideoPromptStaged {
    pub video_prompt: String,
}

pub async fn use_idea_for_video(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<VideoPromptStaged>, AssistantError> {
    let video_prompt = with_session(&state, id, |session| session.state.stage_idea_for_video())??;
    Ok(Json(VideoPromptStaged { video_prompt }))
}

#[derive(Debug, Deserialize)]
pub struct VideoRequest {
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default = "default_language")]
    pub language: String,
}

pub async fn generate_video(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    Json(body): Json<VideoRequest>,
) -> Result<Json<VideoJob>, AssistantError> {
    let explicit = body.prompt.unwrap_or_default();
    let resolved =
        read_session(&state, id, |session| session.state.resolve_video_prompt(&explicit))??;

    tracing::info!("📽️ Session {id}: requesting video generation");
    let job = state.backend.generate_video(&resolved, &body.language).await?;
    Ok(Json(job))
}

// --- Backend passthroughs ---

pub async fn social_stats(
    State(state): State<AppState>,
) -> Result<Json<SocialStats>, AssistantError> {
    Ok(Json(state.backend.social_stats().await?))
}

pub async fn oauth_redirect(
    Path(platform): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect, AssistantError> {
    match state.backend.oauth_entry_url(&platform) {
        Some(url) => Ok(Redirect::temporary(&url)),
        None => Err(AssistantError::BackendUnavailable(format!(
            "OAuth sign-in for '{platform}' requires the companion backend; set BACKEND_BASE_URL"
        ))),
    }
}
