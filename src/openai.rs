use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use crate::error::{classify_provider_error, AssistantError};
use crate::models::ImageArtifact;

const IMAGE_MODEL: &str = "dall-e-3";
const IMAGE_SIZE: &str = "1024x1024";

/// Client for the OpenAI image generation API. The provider answers with a
/// hosted URL; the image is fetched and carried forward as raw bytes so the
/// caller can re-encode or stream it without another round trip.
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAiClient {
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url,
        }
    }

    pub async fn generate_image(&self, prompt: &str) -> Result<ImageArtifact, AssistantError> {
        if self.api_key.is_empty() {
            return Err(AssistantError::AuthInvalid("OPENAI_API_KEY is not set".into()));
        }

        let payload = json!({
            "model": IMAGE_MODEL,
            "prompt": prompt,
            "n": 1,
            "size": IMAGE_SIZE
        });

        let url = format!("{}/images/generations", self.base_url);
        info!("🎨 Requesting {} image", IMAGE_MODEL);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| classify_provider_error(&e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| classify_provider_error(&e.to_string()))?;

        if !status.is_success() {
            error!("❌ Image generation returned HTTP {}", status);
            return Err(classify_provider_error(&format!("HTTP {}: {}", status, body)));
        }

        let parsed: ImagesResponse = serde_json::from_str(&body)
            .map_err(|e| AssistantError::Provider(format!("response parse error: {e}")))?;

        let image_url = parsed
            .data
            .into_iter()
            .next()
            .and_then(|d| d.url)
            .ok_or(AssistantError::EmptyResponse)?;

        let download = self
            .client
            .get(&image_url)
            .send()
            .await
            .map_err(|e| AssistantError::Provider(format!("image fetch failed: {e}")))?;

        let download_status = download.status();
        if !download_status.is_success() {
            return Err(AssistantError::Provider(format!(
                "image fetch returned HTTP {download_status}"
            )));
        }

        let data = download
            .bytes()
            .await
            .map_err(|e| AssistantError::Provider(format!("image fetch failed: {e}")))?;

        info!("✅ Generated image ({} bytes)", data.len());
        Ok(ImageArtifact::png(data))
    }
}

#[derive(Debug, Deserialize)]
struct ImagesResponse {
    #[serde(default)]
    data: Vec<ImageDatum>,
}

#[derive(Debug, Deserialize)]
struct ImageDatum {
    url: Option<String>,
}
