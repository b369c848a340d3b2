use axum::{http::StatusCode, Json};
use serde_json::json;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<ValidationFailure> for AppError {
    fn from(err: ValidationFailure) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl From<ExportError> for AppError {
    fn from(err: ExportError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

/// Rejected "save mood" input. The journal is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationFailure {
    #[error("Please select a mood before saving")]
    MissingMood,

    #[error("Please add a note about your mood")]
    EmptyNote,

    #[error("Unknown mood '{0}'")]
    UnknownMood(String),
}

#[derive(Debug, thiserror::Error)]
pub enum LookupFailure {
    #[error("no weather API key configured")]
    MissingApiKey,

    #[error("weather request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("weather service answered {0}")]
    Status(reqwest::StatusCode),

    #[error("malformed weather response: {0}")]
    Malformed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExportError {
    #[error("No entries to export")]
    NothingToExport,
}
