use crate::credentials::ServiceAccountCredentials;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use log::{debug, error};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};
use stt_core::errors::extract_oauth_error_message;
use stt_core::http::HttpClient;
use stt_core::SttError;

pub const CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: u64 = 3600;
const REFRESH_SKEW_SECS: u64 = 60;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub exp: u64,
    pub iat: u64,
}

#[derive(Debug, Clone)]
pub struct TokenInfo {
    pub access_token: String,
    pub expires_at: u64,
}

impl TokenInfo {
    fn is_fresh(&self, now: u64) -> bool {
        self.expires_at.saturating_sub(now) > REFRESH_SKEW_SECS
    }
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Signs a self-issued RS256 assertion for the OAuth jwt-bearer grant.
pub fn build_assertion(
    creds: &ServiceAccountCredentials,
    key: &EncodingKey,
    scopes: &[&str],
    now: u64,
) -> Result<String, SttError> {
    let claims = Claims {
        iss: creds.client_email.clone(),
        scope: scopes.join(" "),
        aud: creds.token_uri.clone(),
        exp: now + ASSERTION_LIFETIME_SECS,
        iat: now,
    };
    let mut header = Header::new(Algorithm::RS256);
    if !creds.private_key_id.is_empty() {
        header.kid = Some(creds.private_key_id.clone());
    }
    encode(&header, &claims, key).map_err(|e| SttError::unauthorized(format!("jwt error {e}")))
}

fn map_token_status(status: u16, body: &str) -> SttError {
    let message = extract_oauth_error_message(body);
    match status {
        400 | 401 => SttError::Unauthorized(message),
        403 => SttError::AccessDenied(message),
        429 => SttError::RateLimited(0),
        500..=599 => SttError::ServiceUnavailable(message),
        _ => SttError::InternalError(format!("http {status}: {message}")),
    }
}

enum Source {
    ServiceAccount {
        creds: ServiceAccountCredentials,
        key: EncodingKey,
        scopes: Vec<String>,
    },
    Static(String),
}

/// Hands out bearer tokens, exchanging a fresh assertion when the cached one
/// is about to expire.
pub struct TokenProvider {
    source: Source,
    cache: Mutex<Option<TokenInfo>>,
}

impl TokenProvider {
    pub fn service_account(
        creds: ServiceAccountCredentials,
        scopes: &[&str],
    ) -> Result<Self, SttError> {
        if scopes.is_empty() {
            return Err(SttError::unauthorized("at least one oauth scope is required"));
        }
        let key = EncodingKey::from_rsa_pem(creds.private_key.as_bytes())
            .map_err(|e| SttError::unauthorized(format!("key error {e}")))?;
        Ok(Self {
            source: Source::ServiceAccount {
                creds,
                key,
                scopes: scopes.iter().map(|s| s.to_string()).collect(),
            },
            cache: Mutex::new(None),
        })
    }

    pub fn static_token(token: impl Into<String>) -> Self {
        Self {
            source: Source::Static(token.into()),
            cache: Mutex::new(None),
        }
    }

    pub fn token(&self, http: &HttpClient) -> Result<String, SttError> {
        let (creds, key, scopes) = match &self.source {
            Source::Static(token) => return Ok(token.clone()),
            Source::ServiceAccount { creds, key, scopes } => (creds, key, scopes),
        };

        let mut cache = self
            .cache
            .lock()
            .map_err(|_| SttError::internal("token cache poisoned"))?;
        let now = now_secs();
        if let Some(cached) = cache.as_ref().filter(|t| t.is_fresh(now)) {
            return Ok(cached.access_token.clone());
        }

        let scopes: Vec<&str> = scopes.iter().map(String::as_str).collect();
        let assertion = build_assertion(creds, key, &scopes, now)?;
        debug!("Exchanging assertion for {} at {}", creds.client_email, creds.token_uri);
        let (status, body) = http.post_form(
            &creds.token_uri,
            &[("grant_type", JWT_BEARER_GRANT), ("assertion", &assertion)],
        )?;
        if !status.is_success() {
            let err = map_token_status(status.as_u16(), &body);
            error!("Token exchange for {} failed: {err}", creds.client_email);
            return Err(err);
        }

        #[derive(Deserialize)]
        struct Resp {
            access_token: String,
            #[serde(default = "default_expires_in")]
            expires_in: u64,
        }
        let token: Resp = serde_json::from_str(&body)
            .map_err(|e| SttError::internal(format!("token response: {e}")))?;
        let info = TokenInfo {
            access_token: token.access_token,
            expires_at: now + token.expires_in,
        };
        *cache = Some(info.clone());
        Ok(info.access_token)
    }
}

fn default_expires_in() -> u64 {
    ASSERTION_LIFETIME_SECS
}
