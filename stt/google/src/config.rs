use stt_core::{AudioParams, CommonConfig, TranscodeConfig};

pub const DEFAULT_RECOGNIZE_ENDPOINT: &str = "https://speech.googleapis.com/v1/speech:recognize";

#[derive(Debug, Clone, Default)]
pub struct GoogleConfig {
    pub common: CommonConfig,
    pub audio: AudioParams,
    pub transcode: TranscodeConfig,
    pub endpoint: Option<String>,
    pub credentials: Option<String>,
    pub access_token: Option<String>,
}

impl GoogleConfig {
    /// Reads the environment. Credentials are kept as given (a key file path
    /// or inline JSON) and only resolved when a client needs them.
    pub fn from_env() -> Self {
        Self {
            common: CommonConfig::from_env(),
            audio: AudioParams::from_env(),
            transcode: TranscodeConfig::from_env(),
            endpoint: std::env::var("STT_PROVIDER_ENDPOINT").ok(),
            credentials: std::env::var("GOOGLE_APPLICATION_CREDENTIALS").ok(),
            access_token: std::env::var("GOOGLE_ACCESS_TOKEN").ok(),
        }
    }

    pub fn effective_endpoint(&self) -> &str {
        self.endpoint.as_deref().unwrap_or(DEFAULT_RECOGNIZE_ENDPOINT)
    }
}
