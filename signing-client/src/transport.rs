use crate::error::Result;
use async_trait::async_trait;

/// Wire seam for the signing service.
///
/// The client only ever issues JSON POSTs, so one method covers the whole
/// surface and tests can substitute a mock or an in-memory fake.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SignTransport: Send + Sync {
    async fn post_json(&self, url: &str, body: &serde_json::Value) -> Result<serde_json::Value>;
}

/// Production transport backed by reqwest.
///
/// No explicit timeout is configured; the client relies on reqwest
/// defaults, matching the service's deployment assumptions.
#[derive(Debug, Default)]
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SignTransport for HttpTransport {
    async fn post_json(&self, url: &str, body: &serde_json::Value) -> Result<serde_json::Value> {
        let response = self.http.post(url).json(body).send().await?;
        Ok(response.json().await?)
    }
}
