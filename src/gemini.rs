use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{error, info};

use crate::error::{classify_provider_error, AssistantError};

const TEXT_MODEL: &str = "gemini-2.0-flash";
const VISION_MODEL: &str = "gemini-1.5-flash";

/// Client for the Gemini generateContent API, used for both plain text
/// generation and image understanding.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url,
        }
    }

    pub async fn generate_text(&self, prompt: &str) -> Result<String, AssistantError> {
        let payload = json!({
            "contents": [{
                "parts": [{ "text": prompt }]
            }],
            "generationConfig": {
                "temperature": 0.7,
                "topK": 40,
                "topP": 0.95
            }
        });
        self.generate_content(TEXT_MODEL, payload).await
    }

    /// Asks the vision model a question about an image. The image travels as
    /// inline base64 data next to the question.
    pub async fn interpret_image(
        &self,
        image_base64: &str,
        mime_type: &str,
        question: &str,
    ) -> Result<String, AssistantError> {
        let payload = json!({
            "contents": [{
                "parts": [
                    { "text": question },
                    { "inlineData": { "mimeType": mime_type, "data": image_base64 } }
                ]
            }]
        });
        self.generate_content(VISION_MODEL, payload).await
    }

    async fn generate_content(&self, model: &str, payload: Value) -> Result<String, AssistantError> {
        if self.api_key.is_empty() {
            return Err(AssistantError::AuthInvalid("GEMINI_API_KEY is not set".into()));
        }

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, model, self.api_key
        );
        info!("🔗 Calling Gemini model {}", model);

        let response = self
            .client
            .post(&url)
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
            error!("❌ Gemini {} returned HTTP {}", model, status);
            return Err(classify_provider_error(&format!("HTTP {}: {}", status, body)));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)
            .map_err(|e| AssistantError::Provider(format!("response parse error: {e}")))?;

        match first_text(&parsed) {
            Some(text) => {
                info!("✅ Gemini {} returned {} chars", model, text.len());
                Ok(text)
            }
            None => Err(AssistantError::EmptyResponse),
        }
    }
}

// --- Response parsing helpers ---

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

#[derive(Debug, Deserialize, Default)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    Other(Value),
}

fn first_text(resp: &GenerateContentResponse) -> Option<String> {
    for candidate in &resp.candidates {
        for part in &candidate.content.parts {
            if let Part::Text { text } = part {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
            }
        }
    }
    None
}
