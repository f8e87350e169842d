use crate::errors::{extract_google_error_message, SttError};
use reqwest::StatusCode;

pub fn from_reqwest_error(details: impl AsRef<str>, err: reqwest::Error) -> SttError {
    if err.is_timeout() {
        SttError::NetworkError(format!("{}: timeout", details.as_ref()))
    } else if err.is_connect() || err.is_request() {
        SttError::NetworkError(format!("{}: request failed: {err}", details.as_ref()))
    } else if err.is_body() || err.is_decode() {
        SttError::NetworkError(format!("{}: reading body failed: {err}", details.as_ref()))
    } else {
        SttError::InternalError(format!("{}: {err}", details.as_ref()))
    }
}

/// Maps a non-success status of a Google API call to an error, keeping the
/// message Google put in the body when there is one.
pub fn error_from_status(status: StatusCode, body: &str) -> SttError {
    let message = extract_google_error_message(body);
    match status {
        StatusCode::TOO_MANY_REQUESTS => SttError::RateLimited(0),
        StatusCode::BAD_REQUEST => SttError::InvalidAudio(message),
        StatusCode::UNAUTHORIZED => SttError::Unauthorized(message),
        StatusCode::FORBIDDEN => SttError::AccessDenied(message),
        StatusCode::NOT_FOUND => SttError::UnsupportedLanguage(message),
        status if status.is_server_error() => {
            SttError::ServiceUnavailable(format!("{status}: {message}"))
        }
        status => SttError::InternalError(format!("unexpected status {status}: {message}")),
    }
}

pub fn language_not_supported(language: &str) -> SttError {
    SttError::UnsupportedLanguage(format!(
        "Language '{language}' is not supported by this provider"
    ))
}
