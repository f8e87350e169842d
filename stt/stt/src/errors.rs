use serde::Deserialize;

/// Every failure the fetch, transcode and recognize steps can report.
#[derive(Debug, thiserror::Error)]
pub enum SttError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid audio: {0}")]
    InvalidAudio(String),
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("access denied: {0}")]
    AccessDenied(String),
    #[error("rate limited, retry after {0}s")]
    RateLimited(u32),
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),
    #[error("network error: {0}")]
    NetworkError(String),
    #[error("transcoder unavailable: {0}")]
    TranscoderUnavailable(String),
    #[error("transcoding failed: {0}")]
    TranscodeFailed(String),
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
    #[error("internal error: {0}")]
    InternalError(String),
}

pub type SttResult<T> = Result<T, SttError>;

impl SttError {
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        SttError::InvalidInput(msg.into())
    }
    pub fn invalid_audio<S: Into<String>>(msg: S) -> Self {
        SttError::InvalidAudio(msg.into())
    }
    pub fn unsupported_language<S: Into<String>>(msg: S) -> Self {
        SttError::UnsupportedLanguage(msg.into())
    }
    pub fn unauthorized<S: Into<String>>(msg: S) -> Self {
        SttError::Unauthorized(msg.into())
    }
    pub fn access_denied<S: Into<String>>(msg: S) -> Self {
        SttError::AccessDenied(msg.into())
    }
    pub fn rate_limited(after_secs: u32) -> Self {
        SttError::RateLimited(after_secs)
    }
    pub fn service_unavailable<S: Into<String>>(msg: S) -> Self {
        SttError::ServiceUnavailable(msg.into())
    }
    pub fn network<S: Into<String>>(msg: S) -> Self {
        SttError::NetworkError(msg.into())
    }
    pub fn transcoder_unavailable<S: Into<String>>(msg: S) -> Self {
        SttError::TranscoderUnavailable(msg.into())
    }
    pub fn transcode_failed<S: Into<String>>(msg: S) -> Self {
        SttError::TranscodeFailed(msg.into())
    }
    pub fn io<S: Into<String>>(context: S, source: std::io::Error) -> Self {
        SttError::Io {
            context: context.into(),
            source,
        }
    }
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        SttError::InternalError(msg.into())
    }

    /// Whether a fresh attempt of the same request could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            SttError::NetworkError(_) | SttError::ServiceUnavailable(_) | SttError::RateLimited(_)
        )
    }
}

/// Minimal Google error payloads.
#[derive(Debug, Deserialize)]
pub struct GoogleErrorResponse {
    pub error: GoogleError,
}

#[derive(Debug, Deserialize)]
pub struct GoogleError {
    pub message: String,
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub status: String,
}

pub fn extract_google_error_message(body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<GoogleErrorResponse>(body) {
        parsed.error.message
    } else {
        body.to_string()
    }
}

/// OAuth token endpoints answer with a flat `{"error", "error_description"}` object.
#[derive(Debug, Deserialize)]
pub struct OAuthErrorResponse {
    pub error: String,
    #[serde(default)]
    pub error_description: Option<String>,
}

pub fn extract_oauth_error_message(body: &str) -> String {
    match serde_json::from_str::<OAuthErrorResponse>(body) {
        Ok(parsed) => match parsed.error_description {
            Some(desc) => format!("{}: {desc}", parsed.error),
            None => parsed.error,
        },
        Err(_) => body.to_string(),
    }
}
