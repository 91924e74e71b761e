//! Routes composed prompts to the right provider and applies the opt-in
//! memoization policy. One attempt per invocation: failures are returned to
//! the caller, never retried here.

use std::future::Future;

use tracing::debug;

use crate::cache::PromptCache;
use crate::config::AppConfig;
use crate::error::AssistantError;
use crate::gemini::GeminiClient;
use crate::models::ImageArtifact;
use crate::openai::OpenAiClient;

pub struct Dispatcher {
    gemini: GeminiClient,
    openai: OpenAiClient,
    text_cache: Option<PromptCache>,
}

impl Dispatcher {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            gemini: GeminiClient::new(config.gemini_api_key.clone(), config.gemini_api_base.clone()),
            openai: OpenAiClient::new(config.openai_api_key.clone(), config.openai_api_base.clone()),
            text_cache: config.cache_text_generation.then(PromptCache::new),
        }
    }

    pub async fn generate_text(&self, prompt: &str) -> Result<String, AssistantError> {
        let key = PromptCache::key(&["text", prompt]);
        self.run_cached(key, self.gemini.generate_text(prompt)).await
    }

    pub async fn generate_youtube_idea(&self, prompt: &str) -> Result<String, AssistantError> {
        let key = PromptCache::key(&["youtube", prompt]);
        self.run_cached(key, self.gemini.generate_text(prompt)).await
    }

    pub async fn interpret_image(
        &self,
        image_base64: &str,
        mime_type: &str,
        question: &str,
    ) -> Result<String, AssistantError> {
        let key = PromptCache::key(&["vision", mime_type, question, image_base64]);
        self.run_cached(key, self.gemini.interpret_image(image_base64, mime_type, question))
            .await
    }

    /// Never memoized: a repeated prompt is expected to produce a new image.
    pub async fn generate_image(&self, prompt: &str) -> Result<ImageArtifact, AssistantError> {
        self.openai.generate_image(prompt).await
    }

    async fn run_cached<F>(&self, key: u64, call: F) -> Result<String, AssistantError>
    where
        F: Future<Output = Result<String, AssistantError>>,
    {
        if let Some(cache) = &self.text_cache {
            if let Some(hit) = cache.get(key) {
                debug!("memo cache hit, skipping provider call");
                return Ok(hit);
            }
        }
        let text = call.await?;
        if let Some(cache) = &self.text_cache {
            cache.insert(key, text.clone());
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dispatcher(cache_enabled: bool) -> Dispatcher {
        let config = AppConfig {
            gemini_api_key: String::new(),
            gemini_api_base: "http://localhost".into(),
            openai_api_key: String::new(),
            openai_api_base: "http://localhost".into(),
            backend_base_url: None,
            cache_text_generation: cache_enabled,
            port: 0,
        };
        Dispatcher::from_config(&config)
    }

    #[tokio::test]
    async fn a_second_identical_request_skips_the_provider() {
        let d = dispatcher(true);
        let key = PromptCache::key(&["text", "hello"]);

        let first = d.run_cached(key, async { Ok("first answer".to_string()) }).await.unwrap();
        assert_eq!(first, "first answer");

        // On a hit the passed future is dropped unawaited, so an Err here
        // proves the provider was never consulted.
        let second = d
            .run_cached(key, async { Err(AssistantError::Provider("must not be called".into())) })
            .await
            .unwrap();
        assert_eq!(second, "first answer");
    }

    #[tokio::test]
    async fn failures_are_not_cached() {
        let d = dispatcher(true);
        let key = PromptCache::key(&["text", "retry me"]);

        let err = d.run_cached(key, async { Err(AssistantError::EmptyResponse) }).await.unwrap_err();
        assert_eq!(err.kind(), "empty_response");

        let ok = d.run_cached(key, async { Ok("fresh".to_string()) }).await.unwrap();
        assert_eq!(ok, "fresh");
    }

    #[tokio::test]
    async fn a_disabled_cache_always_calls_through() {
        let d = dispatcher(false);
        let key = PromptCache::key(&["text", "hello"]);

        let first = d.run_cached(key, async { Ok("one".to_string()) }).await.unwrap();
        let second = d.run_cached(key, async { Ok("two".to_string()) }).await.unwrap();
        assert_eq!(first, "one");
        assert_eq!(second, "two");
    }
}
