use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use uuid::Uuid;

/// Every provider, backend and local validation failure is folded into this
/// taxonomy at the call site; nothing propagates to the HTTP layer untyped.
#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("quota exceeded: {0}")]
    QuotaExceeded(String),
    #[error("invalid provider credentials: {0}")]
    AuthInvalid(String),
    #[error("provider error: {0}")]
    Provider(String),
    #[error("no content returned")]
    EmptyResponse,
    #[error("missing input: {0}")]
    MissingInput(String),
    #[error("backend unavailable: {0}")]
    BackendUnavailable(String),
    #[error("malformed backend response: {0}")]
    MalformedBackendResponse(String),
    #[error("unknown session: {0}")]
    UnknownSession(Uuid),
}

impl AssistantError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::QuotaExceeded(_) => "quota_exceeded",
            Self::AuthInvalid(_) => "auth_invalid",
            Self::Provider(_) => "provider_error",
            Self::EmptyResponse => "empty_response",
            Self::MissingInput(_) => "missing_input",
            Self::BackendUnavailable(_) => "backend_unavailable",
            Self::MalformedBackendResponse(_) => "malformed_backend_response",
            Self::UnknownSession(_) => "unknown_session",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::QuotaExceeded(_) => StatusCode::TOO_MANY_REQUESTS,
            Self::AuthInvalid(_) => StatusCode::UNAUTHORIZED,
            Self::Provider(_) | Self::EmptyResponse => StatusCode::BAD_GATEWAY,
            Self::MissingInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::BackendUnavailable(_) | Self::MalformedBackendResponse(_) => StatusCode::BAD_GATEWAY,
            Self::UnknownSession(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for AssistantError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({
            "error_kind": self.kind(),
            "message": self.to_string(),
        }));
        (self.status(), body).into_response()
    }
}

const QUOTA_MARKERS: &[&str] = &[
    "quota",
    "429",
    "toomanyrequests",
    "billing_not_active",
    "insufficient_quota",
];

const AUTH_MARKERS: &[&str] = &[
    "api key not valid",
    "authentication error",
    "invalid_api_key",
    "unauthorized",
];

/// Maps an opaque provider error string onto the taxonomy. Rules are an
/// ordered list evaluated once; the first matching group wins, so a message
/// mentioning both quota and authentication classifies as quota.
pub fn classify_provider_error(raw: &str) -> AssistantError {
    let lowered = raw.to_lowercase();
    let rules: &[(&[&str], fn(String) -> AssistantError)] = &[
        (QUOTA_MARKERS, AssistantError::QuotaExceeded),
        (AUTH_MARKERS, AssistantError::AuthInvalid),
    ];
    for (markers, wrap) in rules {
        if markers.iter().any(|m| lowered.contains(m)) {
            return wrap(raw.to_string());
        }
    }
    AssistantError::Provider(raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quota_markers_classify_regardless_of_case() {
        assert_eq!(classify_provider_error("Quota exceeded for project").kind(), "quota_exceeded");
        assert_eq!(classify_provider_error("HTTP 429: slow down").kind(), "quota_exceeded");
        assert_eq!(classify_provider_error("TooManyRequests").kind(), "quota_exceeded");
        assert_eq!(classify_provider_error("billing_not_active on account").kind(), "quota_exceeded");
        assert_eq!(classify_provider_error("insufficient_quota").kind(), "quota_exceeded");
    }

    #[test]
    fn auth_markers_classify_regardless_of_case() {
        assert_eq!(classify_provider_error("API key not valid. Pass a valid key.").kind(), "auth_invalid");
        assert_eq!(classify_provider_error("Authentication Error").kind(), "auth_invalid");
        assert_eq!(classify_provider_error("invalid_api_key").kind(), "auth_invalid");
    }

    #[test]
    fn quota_rule_wins_when_both_groups_match() {
        let err = classify_provider_error("quota blown after authentication error");
        assert_eq!(err.kind(), "quota_exceeded");
    }

    #[test]
    fn unmatched_messages_keep_the_raw_text() {
        let err = classify_provider_error("connection reset by peer");
        assert_eq!(err.kind(), "provider_error");
        assert!(err.to_string().contains("connection reset by peer"));
    }

    #[test]
    fn empty_response_carries_fixed_message() {
        assert_eq!(AssistantError::EmptyResponse.to_string(), "no content returned");
    }
}
