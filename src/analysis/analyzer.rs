use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::models::finding::{Dimension, DimensionFinding};
use crate::models::record::{CallOutcome, CallRequest};
use crate::utils::truncation::truncate_preview;
use super::taxonomy::{
    capabilities, definition, FINGERPRINT_HEADERS, PARAMS_LEAK_METHODS, TRACING_METHODS,
};

/// Header values in evidence are cut to this many characters.
pub const HEADER_PREVIEW_LEN: usize = 50;

/// Determine which privacy dimensions one completed call triggers.
///
/// Failed calls are analyzed exactly like successful ones: the request
/// reached the node before it failed.
pub fn analyze(request: &CallRequest, outcome: &CallOutcome) -> Vec<DimensionFinding> {
    let mut findings = Vec::new();

    // Every call reaches a server that can log the source address.
    findings.push(definition(Dimension::IpExposure).finding(vec![
        "Request sent directly to the RPC node, which can log the source IP".to_string(),
        format!("Provider: {}", request.provider_id),
        format!("Wallet: {}", request.wallet_id),
    ]));

    let addresses = request.exposed_addresses();
    if !addresses.is_empty() {
        let mut evidence = vec![format!("Method: {}", request.method)];
        evidence.extend(addresses.iter().map(|a| format!("Exposed address: {}", a)));
        findings.push(definition(Dimension::AddressAssociation).finding(evidence));
    }

    let summary = request.exposed_params_summary();
    if !summary.is_empty() && PARAMS_LEAK_METHODS.contains(&request.method.as_str()) {
        findings.push(definition(Dimension::CallParamsLeak).finding(vec![
            format!("Method: {}", request.method),
            format!("Params summary: {}", summary),
        ]));
    }

    if TRACING_METHODS.contains(&request.method.as_str()) {
        findings.push(definition(Dimension::TransactionTracing).finding(vec![
            format!("Method: {}", request.method),
            format!("Provider: {}", request.provider_id),
        ]));
    }

    let headers = fingerprint_headers(request);
    if !headers.is_empty() {
        let mut evidence = vec![format!("Wallet: {}", request.wallet_id)];
        evidence.extend(headers.into_iter().map(|(name, value)| {
            format!("Header {}: {}", name, truncate_preview(value, HEADER_PREVIEW_LEN))
        }));
        findings.push(definition(Dimension::RequestHeaderFingerprint).finding(evidence));
    }

    trace!(
        method = %request.method,
        provider = %request.provider_id,
        failed = outcome.is_error(),
        findings = findings.len(),
        "Analyzed call"
    );
    findings
}

/// Fingerprinting headers present with a non-empty value, in
/// [`FINGERPRINT_HEADERS`] order. Header names match case-insensitively.
fn fingerprint_headers(request: &CallRequest) -> Vec<(&'static str, &str)> {
    FINGERPRINT_HEADERS
        .iter()
        .filter_map(|name| {
            request
                .headers_sent
                .iter()
                .find(|(k, v)| k.eq_ignore_ascii_case(name) && !v.is_empty())
                .map(|(_, v)| (*name, v.as_str()))
        })
        .collect()
}

/// A known method triggered a dimension its capability entry does not declare.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityViolation {
    pub method: String,
    pub dimension: Dimension,
}

/// Compare the findings of one call against the capability table.
///
/// Mismatches are logged as warnings and returned; they never fail the run.
/// Methods missing from the table are not checked.
pub fn check_capabilities(
    request: &CallRequest,
    findings: &[DimensionFinding],
) -> Vec<CapabilityViolation> {
    let Some(declared) = capabilities(&request.method) else {
        return Vec::new();
    };
    findings
        .iter()
        .filter(|f| !declared.contains(&f.dimension_id))
        .map(|f| {
            warn!(
                method = %request.method,
                dimension = %f.dimension_id,
                "Method triggered a dimension outside its declared capabilities"
            );
            CapabilityViolation {
                method: request.method.clone(),
                dimension: f.dimension_id,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::finding::RiskLevel;
    use chrono::Utc;
    use serde_json::{json, Value};
    use std::collections::BTreeMap;

    const ADDR_A: &str = "0x742d35Cc6634C0532925a3b844Bc9e7595f0bEb1";
    const ADDR_B: &str = "0x1c7D4B196Cb0C7B01d743Fbc6116a902379C7238";

    fn request_with_headers(
        method: &str,
        params: Vec<Value>,
        headers: &[(&str, &str)],
    ) -> CallRequest {
        let headers: BTreeMap<String, String> = headers
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        CallRequest::new(method, params, "metamask", "infura", headers, Utc::now())
    }

    fn request(method: &str, params: Vec<Value>) -> CallRequest {
        request_with_headers(method, params, &[])
    }

    fn ids(findings: &[DimensionFinding]) -> Vec<Dimension> {
        findings.iter().map(|f| f.dimension_id).collect()
    }

    fn ok() -> CallOutcome {
        CallOutcome::success(json!("0x0"), 1.0)
    }

    #[test]
    fn test_get_balance_triggers_address_association() {
        let addr = "0xABCDEF0000000000000000000000000000001234";
        let req = request("eth_getBalance", vec![json!(addr), json!("latest")]);
        let findings = analyze(&req, &ok());

        assert_eq!(ids(&findings), vec![Dimension::IpExposure, Dimension::AddressAssociation]);
        assert!(findings[1].evidence.iter().any(|e| e.contains(addr)));
    }

    #[test]
    fn test_estimate_gas_triggers_params_leak() {
        let data = format!("0xa9059cbb{}", "0".repeat(64));
        let call = json!({"from": ADDR_A, "to": ADDR_B, "data": data});
        let req = request("eth_estimateGas", vec![call]);
        let findings = analyze(&req, &ok());

        assert_eq!(
            ids(&findings),
            vec![Dimension::IpExposure, Dimension::AddressAssociation, Dimension::CallParamsLeak]
        );
        let assoc = &findings[1];
        assert!(assoc.evidence.iter().any(|e| e.contains(ADDR_A)));
        assert!(assoc.evidence.iter().any(|e| e.contains(ADDR_B)));
        let leak = &findings[2];
        assert!(leak.evidence.iter().any(|e| e.contains("selector=0xa9059cbb..., length=74")));
        assert_eq!(leak.risk_level, RiskLevel::High);
    }

    #[test]
    fn test_params_leak_requires_call_method() {
        let req = request("eth_sendRawTransaction", vec![json!({"data": "0xa9059cbb0000"})]);
        let findings = analyze(&req, &ok());
        assert!(!ids(&findings).contains(&Dimension::CallParamsLeak));
        assert!(ids(&findings).contains(&Dimension::TransactionTracing));
    }

    #[test]
    fn test_block_number_with_user_agent() {
        let req = request_with_headers("eth_blockNumber", vec![], &[("User-Agent", "WalletX/1.0")]);
        let findings = analyze(&req, &ok());

        assert_eq!(
            ids(&findings),
            vec![Dimension::IpExposure, Dimension::RequestHeaderFingerprint]
        );
        assert!(findings[1].evidence.contains(&"Header User-Agent: WalletX/1.0".to_string()));
    }

    #[test]
    fn test_empty_header_value_ignored() {
        let headers = [("Origin", ""), ("Content-Type", "application/json")];
        let req = request_with_headers("eth_blockNumber", vec![], &headers);
        let findings = analyze(&req, &ok());
        assert_eq!(ids(&findings), vec![Dimension::IpExposure]);
    }

    #[test]
    fn test_header_name_matched_case_insensitively() {
        let req =
            request_with_headers("eth_blockNumber", vec![], &[("x-requested-with", "org.toshi")]);
        let findings = analyze(&req, &ok());
        assert!(findings[1].evidence.contains(&"Header X-Requested-With: org.toshi".to_string()));
    }

    #[test]
    fn test_header_value_truncated_in_evidence() {
        let long_ua = "A".repeat(120);
        let req = request_with_headers("eth_blockNumber", vec![], &[("User-Agent", &long_ua)]);
        let findings = analyze(&req, &ok());
        let line = &findings[1].evidence[1];
        assert_eq!(line, &format!("Header User-Agent: {}", "A".repeat(HEADER_PREVIEW_LEN)));
    }

    #[test]
    fn test_failed_call_analyzed_like_success() {
        let req = request("eth_getTransactionByHash", vec![json!("0xdeadbeef")]);
        let failed = CallOutcome::failure(None, "connection reset", 30.0);
        assert_eq!(analyze(&req, &failed), analyze(&req, &ok()));
    }

    #[test]
    fn test_unknown_method_only_ip_exposure() {
        let req = request("eth_chainId", vec![]);
        let findings = analyze(&req, &ok());
        assert_eq!(ids(&findings), vec![Dimension::IpExposure]);
        assert!(check_capabilities(&req, &findings).is_empty());
    }

    #[test]
    fn test_capability_violation_reported_not_raised() {
        // eth_blockNumber takes no parameters; an address here is outside its capabilities.
        let req = request("eth_blockNumber", vec![json!(ADDR_A)]);
        let findings = analyze(&req, &ok());
        let violations = check_capabilities(&req, &findings);
        assert_eq!(
            violations,
            vec![CapabilityViolation {
                method: "eth_blockNumber".into(),
                dimension: Dimension::AddressAssociation,
            }]
        );
    }

    #[test]
    fn test_all_dimensions_on_one_record_for_regular_methods() {
        let req = request_with_headers(
            "eth_call",
            vec![json!({"from": ADDR_A, "to": ADDR_B, "data": "0x5c11d7950000"}), json!("latest")],
            &[
                ("User-Agent", "MetaMask"),
                ("Origin", "chrome-extension://nkbihfbeogaeaoehlefnkodbefgpgknn"),
            ],
        );
        let findings = analyze(&req, &ok());
        assert_eq!(findings.len(), 4);
        assert!(check_capabilities(&req, &findings).is_empty());
    }
}
