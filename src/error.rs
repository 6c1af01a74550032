use chrono::{DateTime, Utc};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Missing credential: {0}")]
    MissingCredential(&'static str),

    #[error("Failed to fetch {url}: {reason}")]
    FetchError {
        url: String,
        status: Option<u16>,
        reason: String,
        at: DateTime<Utc>,
    },

    #[error("Message send failed (status {status:?}): {reason}")]
    NotifyError { status: Option<u16>, reason: String },

    #[error("Address lookup failed: {0}")]
    LookupError(String),

    #[error("Token request failed: {0}")]
    TokenError(String),

    #[error("API returned {status}: {body}")]
    ApiError { status: u16, body: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl AppError {
    pub fn fetch(url: &str, status: Option<u16>, reason: impl Into<String>) -> Self {
        AppError::FetchError {
            url: url.to_string(),
            status,
            reason: reason.into(),
            at: Utc::now(),
        }
    }
}

impl From<std::env::VarError> for AppError {
    fn from(err: std::env::VarError) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
