//! Video generation, social statistics and OAuth entry points. One trait,
//! two implementations: the companion backend service when configured, and a
//! local stand-in that reports the integrations as not yet available.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::info;

use crate::config::AppConfig;
use crate::error::AssistantError;
use crate::models::{SocialStats, VideoJob};

#[async_trait]
pub trait MediaBackend: Send + Sync {
    async fn generate_video(
        &self,
        video_prompt_text: &str,
        target_language: &str,
    ) -> Result<VideoJob, AssistantError>;

    async fn social_stats(&self) -> Result<SocialStats, AssistantError>;

    fn oauth_entry_url(&self, platform: &str) -> Option<String>;
}

pub fn backend_from_config(config: &AppConfig) -> Arc<dyn MediaBackend> {
    match &config.backend_base_url {
        Some(base) => {
            info!("🔌 Delegating video and statistics to backend at {}", base);
            Arc::new(RemoteBackend::new(base.clone()))
        }
        None => {
            info!("Video and statistics backend not configured; using local stand-in");
            Arc::new(UnconfiguredBackend)
        }
    }
}

pub struct RemoteBackend {
    client: Client,
    base_url: String,
}

impl RemoteBackend {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }
}

#[async_trait]
impl MediaBackend for RemoteBackend {
    async fn generate_video(
        &self,
        video_prompt_text: &str,
        target_language: &str,
    ) -> Result<VideoJob, AssistantError> {
        let url = format!("{}/api/generate_video", self.base_url);
        let payload = json!({
            "video_prompt_text": video_prompt_text,
            "target_language": target_language
        });

        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AssistantError::BackendUnavailable(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AssistantError::BackendUnavailable(e.to_string()))?;

        if !status.is_success() {
            return Err(AssistantError::BackendUnavailable(format!(
                "HTTP {status}: {body}"
            )));
        }

        serde_json::from_str(&body)
            .map_err(|e| AssistantError::MalformedBackendResponse(e.to_string()))
    }

    async fn social_stats(&self) -> Result<SocialStats, AssistantError> {
        let url = format!("{}/api/social_stats", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AssistantError::BackendUnavailable(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AssistantError::BackendUnavailable(e.to_string()))?;

        if !status.is_success() {
            return Err(AssistantError::BackendUnavailable(format!(
                "HTTP {status}: {body}"
            )));
        }

        serde_json::from_str(&body)
            .map_err(|e| AssistantError::MalformedBackendResponse(e.to_string()))
    }

    fn oauth_entry_url(&self, platform: &str) -> Option<String> {
        match platform {
            "facebook" | "youtube" => Some(format!("{}/auth/{}", self.base_url, platform)),
            _ => None,
        }
    }
}

/// Answers with the development-status texts instead of calling anything.
pub struct UnconfiguredBackend;

#[async_trait]
impl MediaBackend for UnconfiguredBackend {
    async fn generate_video(
        &self,
        video_prompt_text: &str,
        target_language: &str,
    ) -> Result<VideoJob, AssistantError> {
        Ok(VideoJob {
            message: format!(
                "Video generation is not wired up yet. Producing a video about '{video_prompt_text}' \
                 in {target_language} needs an external video API such as RunwayML, Pictory or \
                 Synthesys; expect real cost and processing time once enabled."
            ),
            status_url: None,
            estimated_time: None,
            video_id: None,
        })
    }

    async fn social_stats(&self) -> Result<SocialStats, AssistantError> {
        let note = "Social media statistics are still under development. Once the platform \
                    integrations are complete this will show followers, engagement and view counts \
                    across Facebook, Instagram, LinkedIn and YouTube; each platform requires its \
                    own permissions and authentication.";
        Ok(SocialStats {
            facebook_instagram_stats: json!({ "status": note }),
            youtube_stats: json!({ "status": note }),
        })
    }

    fn oauth_entry_url(&self, _platform: &str) -> Option<String> {
        None
    }
}
