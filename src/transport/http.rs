use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use crate::errors::PrivacyError;
use super::provider::RpcTransport;

/// JSON-RPC over HTTPS.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, PrivacyError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PrivacyError::Internal(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl RpcTransport for HttpTransport {
    async fn send(
        &self,
        url: &str,
        headers: &BTreeMap<String, String>,
        payload: &Value,
    ) -> Result<Value, PrivacyError> {
        let mut request = self.client.post(url);
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }

        // Keeps the wallet's Content-Type; json() only adds one if missing
        let resp = request
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    PrivacyError::Timeout(format!("RPC request timed out: {}", e.without_url()))
                } else {
                    PrivacyError::Network(format!("RPC request failed: {}", e.without_url()))
                }
            })?;

        let status = resp.status();
        if status.as_u16() == 429 {
            return Err(PrivacyError::RateLimit("Provider returned HTTP 429".into()));
        }
        if !status.is_success() {
            return Err(PrivacyError::Network(format!("Provider returned HTTP {}", status)));
        }

        resp.json::<Value>()
            .await
            .map_err(|e| {
                PrivacyError::InvalidResponse(format!("Body is not JSON: {}", e.without_url()))
            })
    }

    fn transport_name(&self) -> &str {
        "http"
    }
}
