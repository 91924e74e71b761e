use std::env;

const GEMINI_DEFAULT_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const OPENAI_DEFAULT_BASE: &str = "https://api.openai.com/v1";

/// Runtime configuration, read once at startup. Missing provider keys still
/// boot the server; the affected operations then fail with `AuthInvalid`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub gemini_api_key: String,
    pub gemini_api_base: String,
    pub openai_api_key: String,
    pub openai_api_base: String,
    /// When set, video generation, social statistics and OAuth are delegated
    /// to the companion backend; otherwise a local stand-in answers.
    pub backend_base_url: Option<String>,
    pub cache_text_generation: bool,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            gemini_api_key: env::var("GEMINI_API_KEY").unwrap_or_default(),
            gemini_api_base: env::var("GEMINI_API_BASE")
                .unwrap_or_else(|_| GEMINI_DEFAULT_BASE.to_string()),
            openai_api_key: env::var("OPENAI_API_KEY").unwrap_or_default(),
            openai_api_base: env::var("OPENAI_API_BASE")
                .unwrap_or_else(|_| OPENAI_DEFAULT_BASE.to_string()),
            backend_base_url: env::var("BACKEND_BASE_URL")
                .ok()
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .filter(|v| !v.is_empty()),
            cache_text_generation: env::var("CACHE_TEXT_GENERATION")
                .map(|v| parse_bool_flag(&v))
                .unwrap_or(true),
            port: env::var("PORT").ok().and_then(|v| v.parse().ok()).unwrap_or(8080),
        }
    }
}

fn parse_bool_flag(raw: &str) -> bool {
    !matches!(raw.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no" | "off")
}
