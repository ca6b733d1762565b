use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::Value;
use crate::errors::PrivacyError;

#[async_trait]
pub trait RpcTransport: Send + Sync {
    /// POST one JSON-RPC payload and return the decoded response envelope
    /// (`{"jsonrpc", "id", "result" | "error"}`).
    async fn send(
        &self,
        url: &str,
        headers: &BTreeMap<String, String>,
        payload: &Value,
    ) -> Result<Value, PrivacyError>;

    /// Transport name for logging
    fn transport_name(&self) -> &str;
}
