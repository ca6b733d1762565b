use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Serialize;
use serde_json::Value;

/// `0x` followed by exactly 40 hex digits.
static ADDRESS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^0x[0-9a-fA-F]{40}$").expect("address pattern is a valid regex")
});

/// Keys of a call object that carry account addresses.
const ADDRESS_KEYS: &[&str] = &["from", "to", "address"];

/// Length of a 4-byte function selector written as `0x` + 8 hex chars.
const SELECTOR_LEN: usize = 10;

/// One outbound JSON-RPC call as seen by the provider.
///
/// `exposed_addresses` and `exposed_params_summary` are derived from
/// `params` in [`CallRequest::new`] and cannot be set independently.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallRequest {
    pub method: String,
    pub params: Vec<Value>,
    pub wallet_id: String,
    pub provider_id: String,
    pub headers_sent: BTreeMap<String, String>,
    pub timestamp: DateTime<Utc>,
    exposed_addresses: BTreeSet<String>,
    exposed_params_summary: String,
}

impl CallRequest {
    pub fn new(
        method: impl Into<String>,
        params: Vec<Value>,
        wallet_id: impl Into<String>,
        provider_id: impl Into<String>,
        headers_sent: BTreeMap<String, String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let exposed_addresses = extract_addresses(&params);
        let exposed_params_summary = summarize_params(&params);
        Self {
            method: method.into(),
            params,
            wallet_id: wallet_id.into(),
            provider_id: provider_id.into(),
            headers_sent,
            timestamp,
            exposed_addresses,
            exposed_params_summary,
        }
    }

    /// Account addresses found in the call parameters.
    pub fn exposed_addresses(&self) -> &BTreeSet<String> {
        &self.exposed_addresses
    }

    /// Short description of the call-data payload, empty if none.
    pub fn exposed_params_summary(&self) -> &str {
        &self.exposed_params_summary
    }
}

/// Error carried by a failed call, either a JSON-RPC error object returned
/// by the node or a transport failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallError {
    pub code: Option<i64>,
    pub message: String,
}

/// Outcome of one call; exactly one per [`CallRequest`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallOutcome {
    pub result: Option<Value>,
    pub error: Option<CallError>,
    pub elapsed_ms: f64,
}

impl CallOutcome {
    pub fn success(result: Value, elapsed_ms: f64) -> Self {
        Self { result: Some(result), error: None, elapsed_ms }
    }

    pub fn failure(code: Option<i64>, message: impl Into<String>, elapsed_ms: f64) -> Self {
        Self {
            result: None,
            error: Some(CallError { code, message: message.into() }),
            elapsed_ms,
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// A completed call: the request paired with its outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallRecord {
    pub request: CallRequest,
    pub outcome: CallOutcome,
}

impl CallRecord {
    pub fn new(request: CallRequest, outcome: CallOutcome) -> Self {
        Self { request, outcome }
    }
}

pub fn is_address(value: &str) -> bool {
    ADDRESS_RE.is_match(value)
}

/// Collect every address-shaped value in `params`: the `from`/`to`/`address`
/// fields of call objects and bare string arguments. Anything that does not
/// look like an address is skipped.
pub fn extract_addresses(params: &[Value]) -> BTreeSet<String> {
    let mut addresses = BTreeSet::new();
    for param in params {
        match param {
            Value::Object(map) => {
                for key in ADDRESS_KEYS {
                    if let Some(Value::String(s)) = map.get(*key) {
                        if is_address(s) {
                            addresses.insert(s.clone());
                        }
                    }
                }
            }
            Value::String(s) if is_address(s) => {
                addresses.insert(s.clone());
            }
            _ => {}
        }
    }
    addresses
}

/// Summarize the `data` field of the first call object that has one.
/// Only that object is considered, even if its `data` is unusable.
pub fn summarize_params(params: &[Value]) -> String {
    params
        .iter()
        .filter_map(Value::as_object)
        .find_map(|map| map.get("data"))
        .map(summarize_call_data)
        .unwrap_or_default()
}

fn summarize_call_data(data: &Value) -> String {
    let Some(data) = data.as_str() else {
        return String::new();
    };
    let length = data.chars().count();
    if length < SELECTOR_LEN {
        return data.to_string();
    }
    let selector: String = data.chars().take(SELECTOR_LEN).collect();
    format!("selector={}..., length={}", selector, length)
}
