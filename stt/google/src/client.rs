use crate::auth::{TokenProvider, CLOUD_PLATFORM_SCOPE};
use crate::config::GoogleConfig;
use crate::conversions::create_recognize_request;
use crate::credentials::ServiceAccountCredentials;
use crate::mapping::{flatten_alternatives, RecognizeResponse};
use log::{debug, error, info, trace};
use stt_core::error::error_from_status;
use stt_core::http::HttpClient;
use stt_core::SttError;

/// Authenticated handle on the synchronous `speech:recognize` endpoint.
pub struct SpeechClient {
    pub cfg: GoogleConfig,
    http: HttpClient,
    tokens: TokenProvider,
}

impl SpeechClient {
    /// Builds a client that signs its own tokens with a service-account key.
    pub fn from_credentials(
        creds: ServiceAccountCredentials,
        scopes: &[&str],
        cfg: GoogleConfig,
    ) -> Result<Self, SttError> {
        let tokens = TokenProvider::service_account(creds, scopes).map_err(|e| {
            error!("Error initializing speech client: {e}");
            e
        })?;
        Self::with_tokens(tokens, cfg)
    }

    /// Builds a client around an already issued bearer token.
    pub fn with_access_token(token: impl Into<String>, cfg: GoogleConfig) -> Result<Self, SttError> {
        Self::with_tokens(TokenProvider::static_token(token), cfg)
    }

    /// Prefers `GOOGLE_ACCESS_TOKEN`, then the service-account key from
    /// `GOOGLE_APPLICATION_CREDENTIALS`.
    pub fn from_config(cfg: GoogleConfig) -> Result<Self, SttError> {
        if let Some(token) = cfg.access_token.clone() {
            return Self::with_access_token(token, cfg);
        }
        let path_or_json = cfg.credentials.as_deref().ok_or_else(|| {
            SttError::unauthorized(
                "neither GOOGLE_ACCESS_TOKEN nor GOOGLE_APPLICATION_CREDENTIALS is set",
            )
        })?;
        let creds = ServiceAccountCredentials::from_path_or_json(path_or_json)?;
        Self::from_credentials(creds, &[CLOUD_PLATFORM_SCOPE], cfg)
    }

    pub fn from_env() -> Result<Self, SttError> {
        Self::from_config(GoogleConfig::from_env())
    }

    fn with_tokens(tokens: TokenProvider, cfg: GoogleConfig) -> Result<Self, SttError> {
        let http = HttpClient::new(cfg.common.timeout_secs, cfg.common.max_retries)?;
        Ok(Self { cfg, http, tokens })
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    pub fn endpoint(&self) -> &str {
        self.cfg.effective_endpoint()
    }

    /// Recognizes FLAC audio and returns every alternative of every result in order.
    pub fn recognize(&self, flac: &[u8], language: &str) -> Result<Vec<String>, SttError> {
        self.cfg.common.validate_audio_size(flac)?;
        let request = create_recognize_request(flac, &self.cfg.audio, language)?;
        let token = self.tokens.token(&self.http)?;

        let url = self.endpoint();
        trace!("Google POST URL: {url}");
        info!(
            "Recognizing {} bytes of FLAC ({} Hz, {} ch, {})",
            flac.len(),
            request.config.sample_rate_hertz,
            request.config.audio_channel_count,
            request.config.language_code
        );

        let (status, body) = self.http.post_json(url, &token, &request)?;
        if !status.is_success() {
            let err = error_from_status(status, &body);
            error!("failed to recognize: {err}");
            return Err(err);
        }

        let response: RecognizeResponse = serde_json::from_str(&body)
            .map_err(|e| SttError::internal(format!("parse google response: {e}")))?;
        if let Some(billed) = &response.total_billed_time {
            debug!("Google billed {billed} for this request");
        }
        Ok(flatten_alternatives(response))
    }
}
