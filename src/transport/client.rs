use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use serde_json::{json, Value};
use tracing::debug;

use crate::config::ResolvedEndpoint;
use crate::errors::{with_retry, PrivacyError, RetryConfig};
use crate::models::record::{CallOutcome, CallRecord, CallRequest};
use super::provider::RpcTransport;

/// JSON-RPC client bound to one wallet profile and one provider endpoint.
///
/// Every call is recorded, whether it succeeds, returns a JSON-RPC error
/// or fails in transport.
pub struct RpcClient {
    transport: Arc<dyn RpcTransport>,
    endpoint: ResolvedEndpoint,
    wallet_id: String,
    headers: BTreeMap<String, String>,
    retry: RetryConfig,
    next_id: u64,
    records: Vec<CallRecord>,
}

impl RpcClient {
    pub fn new(
        transport: Arc<dyn RpcTransport>,
        endpoint: ResolvedEndpoint,
        wallet_id: &str,
        headers: BTreeMap<String, String>,
    ) -> Self {
        Self {
            transport,
            endpoint,
            wallet_id: wallet_id.to_string(),
            headers,
            retry: RetryConfig::default(),
            next_id: 1,
            records: Vec::new(),
        }
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Issue one JSON-RPC call and return its `result`.
    pub async fn call(&mut self, method: &str, params: Vec<Value>) -> Result<Value, PrivacyError> {
        let id = self.next_id;
        self.next_id += 1;

        let payload = json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
            "id": id,
        });
        let request = CallRequest::new(
            method,
            params,
            self.wallet_id.as_str(),
            self.endpoint.provider_id.as_str(),
            self.headers.clone(),
            Utc::now(),
        );

        let start = Instant::now();
        let transport = self.transport.clone();
        let url = self.endpoint.url.as_str();
        let headers = &self.headers;
        let response =
            with_retry(method, &self.retry, || transport.send(url, headers, &payload)).await;
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

        debug!(
            method,
            wallet = %self.wallet_id,
            provider = %self.endpoint.provider_id,
            elapsed_ms,
            "RPC call finished"
        );

        let (outcome, result) = match response {
            Ok(envelope) => interpret_envelope(envelope, elapsed_ms),
            Err(e) => (CallOutcome::failure(None, e.to_string(), elapsed_ms), Err(e)),
        };
        self.records.push(CallRecord::new(request, outcome));
        result
    }

    /// Records of every call made so far.
    pub fn records(&self) -> &[CallRecord] {
        &self.records
    }

    /// Drain the recorded calls, leaving the log empty.
    pub fn take_records(&mut self) -> Vec<CallRecord> {
        std::mem::take(&mut self.records)
    }
}

fn interpret_envelope(
    envelope: Value,
    elapsed_ms: f64,
) -> (CallOutcome, Result<Value, PrivacyError>) {
    match envelope.get("error").filter(|e| !e.is_null()) {
        Some(error) => {
            let code = error.get("code").and_then(Value::as_i64);
            let message = error
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| error.to_string());
            (
                CallOutcome::failure(code, message.clone(), elapsed_ms),
                Err(PrivacyError::Rpc { code: code.unwrap_or_default(), message }),
            )
        }
        None => {
            let result = envelope.get("result").cloned().unwrap_or(Value::Null);
            (CallOutcome::success(result.clone(), elapsed_ms), Ok(result))
        }
    }
}
