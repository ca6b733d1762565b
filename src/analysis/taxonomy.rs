use std::collections::BTreeSet;

use crate::models::finding::{Dimension, DimensionFinding, RiskLevel};

/// Fixed text and risk level for one privacy dimension.
pub struct DimensionDefinition {
    pub dimension: Dimension,
    pub name: &'static str,
    pub risk_level: RiskLevel,
    pub description: &'static str,
    pub recommendation: &'static str,
}

impl DimensionDefinition {
    /// Build a finding for this dimension carrying the given evidence.
    pub fn finding(&self, evidence: Vec<String>) -> DimensionFinding {
        let mut finding = DimensionFinding {
            dimension_id: self.dimension,
            dimension_name: self.name.to_string(),
            risk_level: self.risk_level,
            description: self.description.to_string(),
            evidence: Vec::with_capacity(evidence.len()),
            recommendation: self.recommendation.to_string(),
        };
        for line in evidence {
            finding.push_evidence(line);
        }
        finding
    }
}

/// Dimension catalogue, in analyzer evaluation order.
pub static DIMENSIONS: &[DimensionDefinition] = &[
    DimensionDefinition {
        dimension: Dimension::IpExposure,
        name: "IP Address Exposure",
        risk_level: RiskLevel::High,
        description: concat!(
            "The RPC node sees the source IP of every request and can use it ",
            "for geolocation and identity correlation",
        ),
        recommendation: concat!(
            "Route RPC traffic through a proxy, VPN or Tor, ",
            "or use a decentralized RPC aggregator",
        ),
    },
    DimensionDefinition {
        dimension: Dimension::AddressAssociation,
        name: "Wallet Address Association",
        risk_level: RiskLevel::High,
        description: concat!(
            "Addresses in from/to/address parameters reveal which accounts the client ",
            "controls or watches and can be linked to its IP",
        ),
        recommendation: "Spread queries for different accounts across several RPC providers",
    },
    DimensionDefinition {
        dimension: Dimension::CallParamsLeak,
        name: "Call Parameter Leak",
        risk_level: RiskLevel::High,
        description: concat!(
            "The data field carries the full ABI-encoded call, exposing the function ",
            "invoked and its arguments such as recipients and amounts",
        ),
        recommendation: concat!(
            "Avoid simulating sensitive calls on third-party nodes; ",
            "consider off-chain encryption or zero-knowledge techniques",
        ),
    },
    DimensionDefinition {
        dimension: Dimension::TransactionTracing,
        name: "Transaction Tracing",
        risk_level: RiskLevel::Medium,
        description: concat!(
            "Transaction submission and lookup can be logged by the node ",
            "and used to build a behavioural profile",
        ),
        recommendation:
            "Submit transactions and query their status through different RPC providers",
    },
    DimensionDefinition {
        dimension: Dimension::RequestHeaderFingerprint,
        name: "Request Header Fingerprint",
        risk_level: RiskLevel::Medium,
        description:
            "Headers such as User-Agent and Origin identify the wallet application and device",
        recommendation: concat!(
            "Send uniform headers or use a generic client ",
            "to reduce fingerprint distinctiveness",
        ),
    },
];

pub fn definition(dimension: Dimension) -> &'static DimensionDefinition {
    // DIMENSIONS lists every variant in declaration order
    &DIMENSIONS[dimension as usize]
}

/// Headers that identify the client application.
pub const FINGERPRINT_HEADERS: &[&str] = &["User-Agent", "Origin", "X-Client", "X-Requested-With"];

/// Methods whose call data is inspected for parameter leaks.
pub const PARAMS_LEAK_METHODS: &[&str] = &["eth_call", "eth_estimateGas"];

/// Methods that reveal transaction activity.
pub const TRACING_METHODS: &[&str] = &["eth_sendRawTransaction", "eth_getTransactionByHash"];

/// Dimensions any call can trigger regardless of method: every call reaches
/// the node and carries the client's headers.
pub const TRANSPORT_DIMENSIONS: &[Dimension] =
    &[Dimension::IpExposure, Dimension::RequestHeaderFingerprint];

/// Method-specific dimensions a known RPC method is able to trigger.
pub struct MethodCapability {
    pub method: &'static str,
    pub dimensions: &'static [Dimension],
}

pub static CAPABILITY_TABLE: &[MethodCapability] = &[
    MethodCapability {
        method: "eth_getBalance",
        dimensions: &[Dimension::AddressAssociation],
    },
    MethodCapability {
        method: "eth_getTransactionCount",
        dimensions: &[Dimension::AddressAssociation],
    },
    MethodCapability {
        method: "eth_estimateGas",
        dimensions: &[Dimension::AddressAssociation, Dimension::CallParamsLeak],
    },
    MethodCapability {
        method: "eth_call",
        dimensions: &[Dimension::AddressAssociation, Dimension::CallParamsLeak],
    },
    MethodCapability {
        method: "eth_sendRawTransaction",
        dimensions: &[
            Dimension::AddressAssociation,
            Dimension::TransactionTracing,
            Dimension::CallParamsLeak,
        ],
    },
    MethodCapability {
        method: "eth_getTransactionByHash",
        dimensions: &[Dimension::TransactionTracing],
    },
    MethodCapability {
        method: "eth_getBlockByNumber",
        dimensions: &[],
    },
    MethodCapability {
        method: "eth_blockNumber",
        dimensions: &[],
    },
];

/// Full set of dimensions `method` may trigger: its table entry plus the
/// transport dimensions. `None` for methods missing from the table.
pub fn capabilities(method: &str) -> Option<BTreeSet<Dimension>> {
    let entry = CAPABILITY_TABLE.iter().find(|c| c.method == method)?;
    Some(
        TRANSPORT_DIMENSIONS
            .iter()
            .chain(entry.dimensions.iter())
            .copied()
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_indexed_by_variant() {
        for (i, def) in DIMENSIONS.iter().enumerate() {
            assert_eq!(def.dimension as usize, i);
            assert_eq!(definition(def.dimension).name, def.name);
        }
        assert_eq!(DIMENSIONS.len(), 5);
    }

    #[test]
    fn test_fixed_risk_levels() {
        assert_eq!(definition(Dimension::IpExposure).risk_level, RiskLevel::High);
        assert_eq!(definition(Dimension::AddressAssociation).risk_level, RiskLevel::High);
        assert_eq!(definition(Dimension::CallParamsLeak).risk_level, RiskLevel::High);
        assert_eq!(definition(Dimension::TransactionTracing).risk_level, RiskLevel::Medium);
        assert_eq!(definition(Dimension::RequestHeaderFingerprint).risk_level, RiskLevel::Medium);
    }

    #[test]
    fn test_capabilities_include_transport_dimensions() {
        let caps = capabilities("eth_blockNumber").unwrap();
        assert_eq!(caps.len(), 2);
        assert!(caps.contains(&Dimension::IpExposure));
        assert!(caps.contains(&Dimension::RequestHeaderFingerprint));

        let caps = capabilities("eth_estimateGas").unwrap();
        assert!(caps.contains(&Dimension::CallParamsLeak));
        assert!(!caps.contains(&Dimension::TransactionTracing));
    }

    #[test]
    fn test_unknown_method_has_no_capabilities() {
        assert!(capabilities("eth_chainId").is_none());
    }

    #[test]
    fn test_trigger_method_sets_declared_in_table() {
        for method in PARAMS_LEAK_METHODS {
            assert!(capabilities(method).unwrap().contains(&Dimension::CallParamsLeak));
        }
        for method in TRACING_METHODS {
            assert!(capabilities(method).unwrap().contains(&Dimension::TransactionTracing));
        }
    }

    #[test]
    fn test_finding_deduplicates_initial_evidence() {
        let finding = definition(Dimension::IpExposure)
            .finding(vec!["Provider: a".into(), "Provider: a".into(), "Wallet: b".into()]);
        assert_eq!(finding.evidence, vec!["Provider: a", "Wallet: b"]);
        assert_eq!(finding.dimension_id, Dimension::IpExposure);
    }
}
