use crate::errors::SttError;
use serde::Deserialize;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_SAMPLE_RATE_HERTZ: u32 = 44_100;
pub const DEFAULT_CHANNEL_COUNT: u32 = 2;

fn env_parsed<T: FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse::<T>().ok())
}

fn env_flag(key: &str) -> bool {
    std::env::var(key)
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(false)
}

/// Settings shared by every step of the pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct CommonConfig {
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub log_level: Option<String>,
    pub max_audio_size_mb: u32,
    pub keep_temp_files: bool,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            max_retries: 3,
            log_level: None,
            // synchronous recognize rejects inline content above 10MB
            max_audio_size_mb: 10,
            keep_temp_files: false,
        }
    }
}

impl CommonConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            timeout_secs: env_parsed("STT_PROVIDER_TIMEOUT").unwrap_or(defaults.timeout_secs),
            max_retries: env_parsed("STT_PROVIDER_MAX_RETRIES").unwrap_or(defaults.max_retries),
            log_level: std::env::var("STT_PROVIDER_LOG_LEVEL").ok(),
            max_audio_size_mb: env_parsed("STT_MAX_AUDIO_SIZE_MB")
                .unwrap_or(defaults.max_audio_size_mb),
            keep_temp_files: env_flag("STT_KEEP_TEMP_FILES"),
        }
    }

    pub fn validate_audio_size(&self, audio: &[u8]) -> Result<(), SttError> {
        let size_mb = audio.len() as f64 / (1024.0 * 1024.0);
        if size_mb > self.max_audio_size_mb as f64 {
            return Err(SttError::InvalidAudio(format!(
                "Audio file too large: {:.1}MB exceeds limit of {}MB",
                size_mb, self.max_audio_size_mb
            )));
        }
        Ok(())
    }
}

/// Sample rate and channel count declared to the recognizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct AudioParams {
    pub sample_rate_hertz: u32,
    pub channel_count: u32,
}

impl Default for AudioParams {
    fn default() -> Self {
        Self {
            sample_rate_hertz: DEFAULT_SAMPLE_RATE_HERTZ,
            channel_count: DEFAULT_CHANNEL_COUNT,
        }
    }
}

impl AudioParams {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            sample_rate_hertz: env_parsed("STT_SAMPLE_RATE_HERTZ")
                .unwrap_or(defaults.sample_rate_hertz),
            channel_count: env_parsed("STT_AUDIO_CHANNEL_COUNT").unwrap_or(defaults.channel_count),
        }
    }

    pub fn validate(&self) -> Result<(), SttError> {
        if !(8_000..=48_000).contains(&self.sample_rate_hertz) {
            return Err(SttError::invalid_input(format!(
                "sample rate {} Hz is outside 8000..=48000",
                self.sample_rate_hertz
            )));
        }
        if self.channel_count == 0 {
            return Err(SttError::invalid_input("channel count must be at least 1"));
        }
        Ok(())
    }
}

/// Where to find the external transcoder.
#[derive(Debug, Clone)]
pub struct TranscodeConfig {
    pub ffmpeg_path: PathBuf,
}

impl Default for TranscodeConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: PathBuf::from("ffmpeg"),
        }
    }
}

impl TranscodeConfig {
    pub fn from_env() -> Self {
        std::env::var("STT_FFMPEG_PATH")
            .map(|p| Self {
                ffmpeg_path: PathBuf::from(p),
            })
            .unwrap_or_default()
    }
}
