use serde::{Deserialize, Serialize};
use signing_config::{AccessToken, PdfOptions};

/// Fixed key the local service expects on lookup requests.
pub const API_KEY: &str = "123456789000";

/// Port the local signing service listens on.
pub const SIGNING_SERVICE_PORT: u16 = 3000;

/// Body of `POST /api/token/getInfo`.
#[derive(Debug, Clone, Serialize)]
pub struct TokenInfoRequest {
    pub pin: String,
    pub api_key: String,
    pub token_serial: String,
}

/// Body of `POST /api/autoSign`.
#[derive(Debug, Clone, Serialize)]
pub struct SignRequest {
    pub google_token: AccessToken,
    pub config: SignRequestConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct SignRequestConfig {
    pub token: SignRequestToken,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdf_options: Option<PdfOptions>,
}

/// Credential fields as the service spells them. Serials go out exactly as
/// stored; the app list is re-encoded from the semicolon form to an array.
#[derive(Debug, Clone, Serialize)]
pub struct SignRequestToken {
    pub tax_ids: Vec<String>,
    #[serde(rename = "tokenSerial")]
    pub token_serial: String,
    #[serde(rename = "serialNumber")]
    pub serial_number: String,
    pub pin: String,
    pub app: Vec<String>,
}

/// Envelope every service endpoint answers with.
///
/// A missing `status` counts as failure, so it stays optional here instead
/// of defaulting to zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceResponse {
    pub status: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<ResponseData>,
}

impl ServiceResponse {
    pub fn is_success(&self) -> bool {
        self.status == Some(0)
    }

    /// Synthetic failure payload used when the service cannot be reached.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status: Some(1),
            message: Some(message.into()),
            data: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResponseData {
    #[serde(default)]
    pub certs: Vec<CertEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CertEntry {
    #[serde(rename = "SerialNumber")]
    pub serial_number: String,
}
