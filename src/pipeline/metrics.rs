use crate::analysis::AggregatedReport;
use crate::models::record::CallRecord;
use crate::models::report::{RecordSummary, RunSummary, ScenarioState, ScenarioStatus};

pub fn compute_summary(
    records_analyzed: usize,
    statuses: &[ScenarioStatus],
    report: &AggregatedReport,
) -> RunSummary {
    RunSummary {
        total_requests: records_analyzed,
        errors: statuses.iter().filter(|s| s.status == ScenarioState::Error).count(),
        dimensions_affected: report.len(),
    }
}

pub fn summarize_records(records: &[CallRecord]) -> Vec<RecordSummary> {
    records
        .iter()
        .map(|r| RecordSummary {
            method: r.request.method.clone(),
            wallet: r.request.wallet_id.clone(),
            provider: r.request.provider_id.clone(),
            exposed_addresses: r.request.exposed_addresses().iter().cloned().collect(),
            elapsed_ms: r.outcome.elapsed_ms,
            failed: r.outcome.is_error(),
        })
        .collect()
}
