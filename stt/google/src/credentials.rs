use serde::{Deserialize, Serialize};
use stt_core::SttError;

/// Service-account key file as downloaded from the Google Cloud console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceAccountCredentials {
    #[serde(rename = "type")]
    pub account_type: String,
    pub project_id: String,
    pub private_key_id: String,
    pub private_key: String,
    pub client_email: String,
    pub client_id: String,
    pub auth_uri: String,
    pub token_uri: String,
    pub auth_provider_x509_cert_url: String,
    pub client_x509_cert_url: String,
}

impl ServiceAccountCredentials {
    pub fn from_json(json: &str) -> Result<Self, SttError> {
        let creds: Self = serde_json::from_str(json)
            .map_err(|e| SttError::unauthorized(format!("invalid creds json: {e}")))?;
        creds.validate()?;
        Ok(creds)
    }

    /// Accepts either a path to a key file or the key file contents.
    pub fn from_path_or_json(path_or_json: &str) -> Result<Self, SttError> {
        let trimmed = path_or_json.trim_start();
        if trimmed.starts_with('{') {
            return Self::from_json(trimmed);
        }
        let json = std::fs::read_to_string(path_or_json)
            .map_err(|e| SttError::unauthorized(format!("cannot read creds file: {e}")))?;
        Self::from_json(&json)
    }

    fn validate(&self) -> Result<(), SttError> {
        if self.account_type != "service_account" {
            return Err(SttError::unauthorized(format!(
                "expected service_account credentials, got '{}'",
                self.account_type
            )));
        }
        for (field, value) in [
            ("client_email", &self.client_email),
            ("private_key", &self.private_key),
            ("token_uri", &self.token_uri),
        ] {
            if value.trim().is_empty() {
                return Err(SttError::unauthorized(format!("credentials field {field} is empty")));
            }
        }
        Ok(())
    }
}
