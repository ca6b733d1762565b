pub mod taxonomy;
pub mod analyzer;
pub mod aggregator;

pub use analyzer::{analyze, check_capabilities, CapabilityViolation};
pub use aggregator::{aggregate, AggregatedReport, Aggregator};

use crate::models::record::CallRecord;
use tracing::debug;

/// Result of analyzing one batch of call records.
#[derive(Debug, Clone, Default)]
pub struct BatchAnalysis {
    pub report: AggregatedReport,
    pub records_analyzed: usize,
    pub violations: Vec<CapabilityViolation>,
}

/// Analyze every record in order and fold the findings into one report.
pub fn analyze_batch<'a, I>(records: I) -> BatchAnalysis
where
    I: IntoIterator<Item = &'a CallRecord>,
{
    let mut aggregator = Aggregator::new();
    let mut violations = Vec::new();
    let mut records_analyzed = 0;

    for record in records {
        let findings = analyze(&record.request, &record.outcome);
        violations.extend(check_capabilities(&record.request, &findings));
        aggregator.add(&findings);
        records_analyzed += 1;
    }

    let report = aggregator.finish();
    debug!(records = records_analyzed, dimensions = report.len(), "Batch analysis complete");
    BatchAnalysis { report, records_analyzed, violations }
}
