use serde::{Deserialize, Serialize};

/// Risk level of a privacy finding. Declaration order is the severity order,
/// so the derived `Ord` gives `Low < Medium < High < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category of privacy exposure an RPC call can leak to the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    IpExposure,
    AddressAssociation,
    CallParamsLeak,
    TransactionTracing,
    RequestHeaderFingerprint,
}

impl Dimension {
    /// Stable identifier used in reports and JSON exports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IpExposure => "ip_exposure",
            Self::AddressAssociation => "address_association",
            Self::CallParamsLeak => "call_params_leak",
            Self::TransactionTracing => "transaction_tracing",
            Self::RequestHeaderFingerprint => "request_header_fingerprint",
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One analyzer verdict for one dimension on one call record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimensionFinding {
    pub dimension_id: Dimension,
    pub dimension_name: String,
    pub risk_level: RiskLevel,
    pub description: String,
    /// Ordered evidence lines, no duplicates.
    pub evidence: Vec<String>,
    pub recommendation: String,
}

impl DimensionFinding {
    /// Append an evidence line unless an identical one is already present.
    /// Returns true if the line was added.
    pub fn push_evidence(&mut self, line: impl Into<String>) -> bool {
        let line = line.into();
        if self.evidence.contains(&line) {
            return false;
        }
        self.evidence.push(line);
        true
    }
}
