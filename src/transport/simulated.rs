use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::{json, Value};
use crate::errors::PrivacyError;
use super::provider::RpcTransport;

/// Sepolia chain id.
const CHAIN_ID: &str = "0xaa36a7";

/// Offline transport answering with canned Sepolia-like responses.
///
/// Lets a full run execute without network access; failures can be
/// injected per endpoint or per method.
pub struct SimulatedTransport {
    block_number: u64,
    unreachable: Vec<String>,
    rpc_errors: BTreeMap<String, (i64, String)>,
    sent: AtomicUsize,
}

impl Default for SimulatedTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedTransport {
    pub fn new() -> Self {
        Self {
            block_number: 5_832_114,
            unreachable: Vec::new(),
            rpc_errors: BTreeMap::new(),
            sent: AtomicUsize::new(0),
        }
    }

    /// Fail with a network error for every URL containing `fragment`.
    pub fn with_unreachable(mut self, fragment: &str) -> Self {
        self.unreachable.push(fragment.to_string());
        self
    }

    /// Answer `method` with a JSON-RPC error object.
    pub fn with_rpc_error(mut self, method: &str, code: i64, message: &str) -> Self {
        self.rpc_errors.insert(method.to_string(), (code, message.to_string()));
        self
    }

    /// Number of payloads received so far.
    pub fn sent(&self) -> usize {
        self.sent.load(Ordering::SeqCst)
    }

    fn result_for(&self, method: &str, params: &[Value]) -> Option<Value> {
        let result = match method {
            "eth_blockNumber" => json!(format!("0x{:x}", self.block_number)),
            "eth_getBlockByNumber" => json!({
                "number": params.first().cloned().unwrap_or(Value::Null),
                "hash": format!("0x{:064x}", self.block_number),
                "transactions": [],
            }),
            "eth_getBalance" => json!("0x2386f26fc10000"),
            "eth_getTransactionCount" => json!("0x3"),
            "eth_estimateGas" => json!("0x8d3c"),
            "eth_call" => json!(format!("0x{}", "0".repeat(64))),
            "eth_sendRawTransaction" => json!(format!("0x{:064x}", self.block_number + 1)),
            "eth_getTransactionByHash" => Value::Null,
            "eth_chainId" => json!(CHAIN_ID),
            _ => return None,
        };
        Some(result)
    }
}

#[async_trait]
impl RpcTransport for SimulatedTransport {
    async fn send(
        &self,
        url: &str,
        _headers: &BTreeMap<String, String>,
        payload: &Value,
    ) -> Result<Value, PrivacyError> {
        self.sent.fetch_add(1, Ordering::SeqCst);

        if self.unreachable.iter().any(|f| url.contains(f.as_str())) {
            return Err(PrivacyError::Network("simulated endpoint unreachable".into()));
        }

        let id = payload.get("id").cloned().unwrap_or(Value::Null);
        let method = payload
            .get("method")
            .and_then(Value::as_str)
            .ok_or_else(|| PrivacyError::InvalidResponse("payload has no method".into()))?;
        let params = payload
            .get("params")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();

        if let Some((code, message)) = self.rpc_errors.get(method) {
            return Ok(json!({
                "jsonrpc": "2.0",
                "id": id,
                "error": {"code": code, "message": message},
            }));
        }

        Ok(match self.result_for(method, params) {
            Some(result) => json!({"jsonrpc": "2.0", "id": id, "result": result}),
            None => json!({
                "jsonrpc": "2.0",
                "id": id,
                "error": {
                    "code": -32601,
                    "message": format!("the method {} does not exist/is not available", method),
                },
            }),
        })
    }

    fn transport_name(&self) -> &str {
        "simulated"
    }
}
