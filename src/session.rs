//! Last-result slots for one user session. The route layer owns the map of
//! sessions; operations here never touch the network, so default-input
//! failures are reported before any provider call is dispatched.

use chrono::{DateTime, Utc};

use crate::error::AssistantError;
use crate::prompt::SOCIAL_IMAGE_QUALIFIER;

#[derive(Debug, Clone)]
pub struct GeneratedText {
    pub text: String,
    pub language: String,
}

/// Only a successful generation writes a slot; failed calls leave the
/// previous value untouched.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub last_text: Option<GeneratedText>,
    pub last_youtube_idea: Option<String>,
    pub video_prompt_override: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl SessionState {
    pub fn record_text(&mut self, text: String, language: String) {
        self.last_text = Some(GeneratedText { text, language });
        self.updated_at = Some(Utc::now());
    }

    pub fn record_youtube_idea(&mut self, idea: String) {
        self.last_youtube_idea = Some(idea);
        self.updated_at = Some(Utc::now());
    }

    /// Copies the last YouTube idea into the pending video prompt and
    /// returns it, so the caller can show what was staged.
    pub fn stage_idea_for_video(&mut self) -> Result<String, AssistantError> {
        let idea = self.last_youtube_idea.clone().ok_or_else(|| {
            AssistantError::MissingInput(
                "generate a YouTube idea before staging it for a video".into(),
            )
        })?;
        self.video_prompt_override = Some(idea.clone());
        self.updated_at = Some(Utc::now());
        Ok(idea)
    }

    /// Prompt for image generation: the explicit prompt verbatim, otherwise
    /// the last generated text with a social-post qualifier appended.
    pub fn resolve_image_prompt(&self, explicit: &str) -> Result<String, AssistantError> {
        if !explicit.trim().is_empty() {
            return Ok(explicit.to_string());
        }
        match &self.last_text {
            Some(last) => Ok(format!("{} {}", last.text, SOCIAL_IMAGE_QUALIFIER)),
            None => Err(AssistantError::MissingInput(
                "enter an image description or generate a text first".into(),
            )),
        }
    }

    /// Topic for a YouTube idea: explicit input, else the last generated text.
    pub fn resolve_idea_topic(&self, explicit: &str) -> Result<String, AssistantError> {
        if !explicit.trim().is_empty() {
            return Ok(explicit.to_string());
        }
        match &self.last_text {
            Some(last) => Ok(last.text.clone()),
            None => Err(AssistantError::MissingInput(
                "enter a video idea topic or generate a text first".into(),
            )),
        }
    }

    /// Prompt for video generation: explicit input, else the staged override,
    /// else the last YouTube idea.
    pub fn resolve_video_prompt(&self, explicit: &str) -> Result<String, AssistantError> {
        if !explicit.trim().is_empty() {
            return Ok(explicit.to_string());
        }
        if let Some(staged) = &self.video_prompt_override {
            return Ok(staged.clone());
        }
        match &self.last_youtube_idea {
            Some(idea) => Ok(idea.clone()),
            None => Err(AssistantError::MissingInput(
                "enter a video prompt or generate a YouTube idea first".into(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_prompt_fails_fast_without_any_input() {
        let state = SessionState::default();
        let err = state.resolve_image_prompt("").unwrap_err();
        assert_eq!(err.kind(), "missing_input");
    }

    #[test]
    fn image_prompt_falls_back_to_last_text_with_qualifier() {
        let mut state = SessionState::default();
        state.record_text("Tiny House avantajları hakkında bir yazı".into(), "Türkçe".into());

        let prompt = state.resolve_image_prompt("").unwrap();
        assert!(prompt.contains("Tiny House avantajları hakkında bir yazı"));
        assert!(prompt.ends_with(SOCIAL_IMAGE_QUALIFIER));
    }

    #[test]
    fn explicit_image_prompt_is_used_verbatim() {
        let mut state = SessionState::default();
        state.record_text("ignored".into(), "English".into());

        let prompt = state.resolve_image_prompt("A tiny house at sunset").unwrap();
        assert_eq!(prompt, "A tiny house at sunset");
    }

    #[test]
    fn successful_generation_overwrites_the_slot() {
        let mut state = SessionState::default();
        state.record_text("first".into(), "English".into());
        state.record_text("second".into(), "Türkçe".into());

        let last = state.last_text.as_ref().unwrap();
        assert_eq!(last.text, "second");
        assert_eq!(last.language, "Türkçe");
    }

    #[test]
    fn resolving_does_not_mutate_slots() {
        let mut state = SessionState::default();
        state.record_text("kept".into(), "English".into());

        let _ = state.resolve_image_prompt("");
        let _ = state.resolve_idea_topic("");
        assert_eq!(state.last_text.as_ref().unwrap().text, "kept");
        assert!(state.last_youtube_idea.is_none());
    }

    #[test]
    fn video_prompt_prefers_explicit_then_override_then_idea() {
        let mut state = SessionState::default();
        assert_eq!(state.resolve_video_prompt("").unwrap_err().kind(), "missing_input");

        state.record_youtube_idea("idea from earlier".into());
        assert_eq!(state.resolve_video_prompt("").unwrap(), "idea from earlier");

        let staged = state.stage_idea_for_video().unwrap();
        assert_eq!(staged, "idea from earlier");
        state.video_prompt_override = Some("staged override".into());
        assert_eq!(state.resolve_video_prompt("").unwrap(), "staged override");

        assert_eq!(state.resolve_video_prompt("explicit wins").unwrap(), "explicit wins");
    }

    #[test]
    fn staging_requires_a_prior_idea() {
        let mut state = SessionState::default();
        let err = state.stage_idea_for_video().unwrap_err();
        assert_eq!(err.kind(), "missing_input");
        assert!(state.video_prompt_override.is_none());
    }
}
