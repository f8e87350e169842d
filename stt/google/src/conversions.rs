use base64::prelude::*;
use serde::Serialize;
use stt_core::error::language_not_supported;
use stt_core::{AudioParams, SttError};

/// Request body of `speech:recognize`.
/// Reference: https://cloud.google.com/speech-to-text/docs/reference/rest/v1/speech/recognize
#[derive(Debug, Serialize)]
pub struct RecognizeRequest {
    pub config: RecognitionConfig,
    pub audio: RecognitionAudio,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecognitionConfig {
    pub encoding: AudioEncoding,
    pub sample_rate_hertz: u32,
    pub audio_channel_count: u32,
    pub language_code: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AudioEncoding {
    Flac,
}

#[derive(Debug, Serialize)]
pub struct RecognitionAudio {
    pub content: String,
}

fn validate_language(language: &str) -> Result<String, SttError> {
    let language = language.trim();
    let well_formed = !language.is_empty()
        && language
            .split('-')
            .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_alphanumeric()));
    if well_formed {
        Ok(language.to_string())
    } else {
        Err(language_not_supported(language))
    }
}

pub fn create_recognize_request(
    flac: &[u8],
    params: &AudioParams,
    language: &str,
) -> Result<RecognizeRequest, SttError> {
    if flac.is_empty() {
        return Err(SttError::invalid_audio("no audio to recognize"));
    }
    params.validate()?;
    let language_code = validate_language(language)?;

    Ok(RecognizeRequest {
        config: RecognitionConfig {
            encoding: AudioEncoding::Flac,
            sample_rate_hertz: params.sample_rate_hertz,
            audio_channel_count: params.channel_count,
            language_code,
        },
        audio: RecognitionAudio {
            content: BASE64_STANDARD.encode(flac),
        },
    })
}
