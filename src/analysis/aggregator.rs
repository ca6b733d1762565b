use std::collections::hash_map::Entry;
use std::collections::HashMap;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::models::finding::{Dimension, DimensionFinding, RiskLevel};

/// Worst-case finding per dimension across a whole batch, in the order each
/// dimension was first seen.
///
/// Serializes as a map keyed by dimension id; each entry carries `name`,
/// `risk_level`, `description`, `evidence` and `recommendation`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregatedReport {
    findings: Vec<DimensionFinding>,
}

impl AggregatedReport {
    pub fn get(&self, dimension: Dimension) -> Option<&DimensionFinding> {
        self.findings.iter().find(|f| f.dimension_id == dimension)
    }

    pub fn contains(&self, dimension: Dimension) -> bool {
        self.get(dimension).is_some()
    }

    /// Number of dimensions present in the report.
    pub fn len(&self) -> usize {
        self.findings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    /// Findings in first-seen order.
    pub fn iter(&self) -> std::slice::Iter<'_, DimensionFinding> {
        self.findings.iter()
    }
}

#[derive(Serialize)]
struct ReportEntry<'a> {
    name: &'a str,
    risk_level: RiskLevel,
    description: &'a str,
    evidence: &'a [String],
    recommendation: &'a str,
}

impl<'a> From<&'a DimensionFinding> for ReportEntry<'a> {
    fn from(f: &'a DimensionFinding) -> Self {
        Self {
            name: &f.dimension_name,
            risk_level: f.risk_level,
            description: &f.description,
            evidence: &f.evidence,
            recommendation: &f.recommendation,
        }
    }
}

impl Serialize for AggregatedReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.findings.len()))?;
        for finding in &self.findings {
            map.serialize_entry(&finding.dimension_id, &ReportEntry::from(finding))?;
        }
        map.end()
    }
}

/// Left-to-right fold of per-record findings into an [`AggregatedReport`].
///
/// The stored level only ever rises; description and recommendation follow
/// the highest level seen. Evidence is unioned in first-seen order.
#[derive(Debug, Default)]
pub struct Aggregator {
    findings: Vec<DimensionFinding>,
    index: HashMap<Dimension, usize>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge the findings of one record.
    pub fn add(&mut self, findings: &[DimensionFinding]) {
        for finding in findings {
            match self.index.entry(finding.dimension_id) {
                Entry::Vacant(e) => {
                    e.insert(self.findings.len());
                    self.findings.push(finding.clone());
                }
                Entry::Occupied(e) => {
                    let stored = &mut self.findings[*e.get()];
                    if finding.risk_level > stored.risk_level {
                        stored.risk_level = finding.risk_level;
                        stored.dimension_name = finding.dimension_name.clone();
                        stored.description = finding.description.clone();
                        stored.recommendation = finding.recommendation.clone();
                    }
                    for line in &finding.evidence {
                        stored.push_evidence(line.as_str());
                    }
                }
            }
        }
    }

    pub fn finish(self) -> AggregatedReport {
        AggregatedReport { findings: self.findings }
    }
}

/// Aggregate an ordered collection of per-record finding lists.
pub fn aggregate<I, L>(finding_lists: I) -> AggregatedReport
where
    I: IntoIterator<Item = L>,
    L: AsRef<[DimensionFinding]>,
{
    let mut aggregator = Aggregator::new();
    for findings in finding_lists {
        aggregator.add(findings.as_ref());
    }
    aggregator.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finding(dimension: Dimension, level: RiskLevel, evidence: &[&str]) -> DimensionFinding {
        DimensionFinding {
            dimension_id: dimension,
            dimension_name: format!("{} ({})", dimension, level),
            risk_level: level,
            description: format!("{} description", level),
            evidence: evidence.iter().map(|s| s.to_string()).collect(),
            recommendation: format!("{} recommendation", level),
        }
    }

    #[test]
    fn test_max_level_wins_in_both_orders() {
        let a = vec![finding(Dimension::AddressAssociation, RiskLevel::Medium, &["a"])];
        let b = vec![finding(Dimension::AddressAssociation, RiskLevel::High, &["b"])];

        let ab = aggregate([&a, &b]);
        let ba = aggregate([&b, &a]);

        for report in [&ab, &ba] {
            let f = report.get(Dimension::AddressAssociation).unwrap();
            assert_eq!(f.risk_level, RiskLevel::High);
            assert_eq!(f.description, "high description");
            assert_eq!(f.recommendation, "high recommendation");
        }
        assert_eq!(ab.get(Dimension::AddressAssociation).unwrap().evidence, vec!["a", "b"]);
        assert_eq!(ba.get(Dimension::AddressAssociation).unwrap().evidence, vec!["b", "a"]);
    }

    #[test]
    fn test_lower_level_does_not_downgrade() {
        let report = aggregate([
            vec![finding(Dimension::IpExposure, RiskLevel::Critical, &["x"])],
            vec![finding(Dimension::IpExposure, RiskLevel::Low, &["y"])],
        ]);
        let f = report.get(Dimension::IpExposure).unwrap();
        assert_eq!(f.risk_level, RiskLevel::Critical);
        assert_eq!(f.description, "critical description");
        assert_eq!(f.evidence, vec!["x", "y"]);
    }

    #[test]
    fn test_equal_level_keeps_first_text() {
        let mut second = finding(Dimension::IpExposure, RiskLevel::High, &["y"]);
        second.description = "other".into();
        let first = finding(Dimension::IpExposure, RiskLevel::High, &["x"]);
        let report = aggregate([vec![first], vec![second]]);
        assert_eq!(report.get(Dimension::IpExposure).unwrap().description, "high description");
    }

    #[test]
    fn test_evidence_union_dedups_in_first_seen_order() {
        let report = aggregate([
            vec![finding(Dimension::IpExposure, RiskLevel::High, &["Provider: infura", "shared"])],
            vec![finding(Dimension::IpExposure, RiskLevel::High, &["shared", "Provider: alchemy"])],
        ]);
        assert_eq!(
            report.get(Dimension::IpExposure).unwrap().evidence,
            vec!["Provider: infura", "shared", "Provider: alchemy"]
        );
    }

    #[test]
    fn test_inputs_not_mutated() {
        let first = vec![finding(Dimension::IpExposure, RiskLevel::High, &["x"])];
        let second = vec![finding(Dimension::IpExposure, RiskLevel::High, &["y"])];
        let report = aggregate([&first, &second]);
        assert_eq!(first[0].evidence, vec!["x"]);
        assert_eq!(report.get(Dimension::IpExposure).unwrap().evidence, vec!["x", "y"]);
    }

    #[test]
    fn test_single_record_dimension_kept_verbatim() {
        let tracing = finding(
            Dimension::TransactionTracing,
            RiskLevel::Medium,
            &["Method: eth_getTransactionByHash"],
        );
        let report = aggregate([
            vec![finding(Dimension::IpExposure, RiskLevel::High, &["a"])],
            vec![finding(Dimension::IpExposure, RiskLevel::High, &["b"]), tracing.clone()],
            vec![finding(Dimension::IpExposure, RiskLevel::High, &["c"])],
        ]);
        assert_eq!(report.get(Dimension::TransactionTracing), Some(&tracing));
        assert_eq!(report.len(), 2);
    }

    #[test]
    fn test_empty_batch() {
        let report = aggregate(Vec::<Vec<DimensionFinding>>::new());
        assert!(report.is_empty());
        assert_eq!(serde_json::to_string(&report).unwrap(), "{}");
    }

    #[test]
    fn test_serializes_as_id_keyed_map() {
        let report = aggregate([vec![finding(Dimension::CallParamsLeak, RiskLevel::High, &["s"])]]);
        let json = serde_json::to_value(&report).unwrap();
        let entry = json["call_params_leak"].as_object().unwrap();
        let keys: Vec<&str> = entry.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["name", "risk_level", "description", "evidence", "recommendation"]);
        assert_eq!(entry["name"], "call_params_leak (high)");
        assert_eq!(entry["risk_level"], "high");
        assert_eq!(entry["evidence"][0], "s");
    }

    #[test]
    fn test_dimensions_kept_in_first_seen_order() {
        let report = aggregate([
            vec![
                finding(Dimension::IpExposure, RiskLevel::High, &["a"]),
                finding(Dimension::TransactionTracing, RiskLevel::Medium, &["t"]),
            ],
            vec![
                finding(Dimension::IpExposure, RiskLevel::High, &["b"]),
                finding(Dimension::AddressAssociation, RiskLevel::High, &["x"]),
            ],
        ]);
        let order: Vec<Dimension> = report.iter().map(|f| f.dimension_id).collect();
        let expected = [
            Dimension::IpExposure,
            Dimension::TransactionTracing,
            Dimension::AddressAssociation,
        ];
        assert_eq!(order, expected);

        let json = serde_json::to_value(&report).unwrap();
        let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["ip_exposure", "transaction_tracing", "address_association"]);
    }
}
