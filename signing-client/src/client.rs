use crate::models::{
    ServiceResponse, SignRequest, SignRequestConfig, SignRequestToken, TokenInfoRequest, API_KEY,
    SIGNING_SERVICE_PORT,
};
use crate::transport::{HttpTransport, SignTransport};
use signing_config::{Credential, PdfOptions};
use std::sync::Arc;
use tracing::{debug, warn};

/// Client for the local signing service.
///
/// One outbound POST per call, no retries: signing has a real side effect
/// on every invocation, and lookup results must reflect a single probe.
pub struct SigningClient {
    transport: Arc<dyn SignTransport>,
    base_url: String,
}

impl SigningClient {
    pub fn new(api_ip_address: &str) -> Self {
        Self::with_transport(api_ip_address, Arc::new(HttpTransport::new()))
    }

    pub fn with_transport(api_ip_address: &str, transport: Arc<dyn SignTransport>) -> Self {
        Self {
            transport,
            base_url: format!("http://{api_ip_address}:{SIGNING_SERVICE_PORT}"),
        }
    }

    /// Ask the service whether it knows the credential's serial number.
    ///
    /// Fail-closed: a network failure, an unreadable body, or a non-zero
    /// status all report the serial as unknown. The caller decides whether
    /// that surfaces as `SerialNotAvailable`.
    pub async fn token_is_known(&self, credential: &Credential) -> bool {
        let request = TokenInfoRequest {
            pin: credential.pin.clone(),
            api_key: API_KEY.to_string(),
            token_serial: credential.token_serial.clone(),
        };
        let body = match serde_json::to_value(&request) {
            Ok(body) => body,
            Err(e) => {
                warn!(error = %e, "could not encode token lookup request");
                return false;
            }
        };

        let url = format!("{}/api/token/getInfo", self.base_url);
        let value = match self.transport.post_json(&url, &body).await {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "token lookup failed");
                return false;
            }
        };
        let response: ServiceResponse = match serde_json::from_value(value) {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "unreadable token lookup response");
                return false;
            }
        };
        if !response.is_success() {
            debug!(status = ?response.status, message = ?response.message, "token lookup rejected");
            return false;
        }

        response.data.map_or(false, |data| {
            data.certs
                .iter()
                .any(|cert| cert.serial_number.eq_ignore_ascii_case(&credential.serial_number))
        })
    }

    /// Trigger one auto-signing run.
    ///
    /// Never returns an error: any transport problem is converted into a
    /// synthetic failure payload so the signer can fall back to "off"
    /// without special cases. Never retried silently.
    pub async fn auto_sign(&self, credential: &Credential) -> ServiceResponse {
        let request = build_sign_request(credential);
        let body = match serde_json::to_value(&request) {
            Ok(body) => body,
            Err(e) => return ServiceResponse::failure(format!("could not encode signing request: {e}")),
        };

        let url = format!("{}/api/autoSign", self.base_url);
        match self.transport.post_json(&url, &body).await {
            Ok(value) => serde_json::from_value(value)
                .unwrap_or_else(|e| ServiceResponse::failure(format!("unreadable service response: {e}"))),
            Err(e) => {
                warn!(error = %e, "signing service unreachable");
                ServiceResponse::failure(format!("signing service unreachable: {e}"))
            }
        }
    }
}

fn build_sign_request(credential: &Credential) -> SignRequest {
    SignRequest {
        google_token: credential.access_token.clone(),
        config: SignRequestConfig {
            token: SignRequestToken {
                tax_ids: credential.tax_ids.clone(),
                token_serial: credential.token_serial.clone(),
                serial_number: credential.serial_number.clone(),
                pin: credential.pin.clone(),
                app: credential
                    .apps
                    .iter()
                    .map(|tag| tag.as_str().to_string())
                    .collect(),
            },
            pdf_options: stamping_options(credential),
        },
    }
}

/// Malformed stamping options are dropped here rather than failing the
/// request; the document is signed without a stamp.
fn stamping_options(credential: &Credential) -> Option<PdfOptions> {
    let raw = credential.pdf_options.as_ref()?;
    match serde_json::from_value::<PdfOptions>(raw.clone()) {
        Ok(options) if options.is_well_formed() => Some(options),
        Ok(_) | Err(_) => {
            debug!("dropping malformed pdf stamping options");
            None
        }
    }
}
