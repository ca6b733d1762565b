use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::{AggregatedReport, CapabilityViolation};

/// Wallets, providers and scenarios a run covered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfigEcho {
    pub wallets: Vec<String>,
    pub providers: Vec<String>,
    pub scenarios: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Call records analyzed.
    pub total_requests: usize,
    /// Scenario executions that failed.
    pub errors: usize,
    /// Dimensions present in the aggregated report.
    pub dimensions_affected: usize,
}

/// Condensed view of one call record for the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordSummary {
    pub method: String,
    pub wallet: String,
    pub provider: String,
    pub exposed_addresses: Vec<String>,
    pub elapsed_ms: f64,
    pub failed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioState {
    Ok,
    Error,
    /// Not started because the run was cancelled.
    Skipped,
}

/// Execution status of one wallet × provider × scenario combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioStatus {
    pub key: String,
    pub wallet: String,
    pub provider: String,
    pub scenario: String,
    pub status: ScenarioState,
    pub requests: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScenarioStatus {
    pub fn combination_key(wallet: &str, provider: &str, scenario: &str) -> String {
        format!("{}_{}_{}", wallet, provider, scenario)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionError {
    pub key: String,
    pub error: String,
}

/// Everything a run hands to rendering and export.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub run_id: String,
    pub generated_at: DateTime<Utc>,
    pub config: RunConfigEcho,
    pub summary: RunSummary,
    pub records: Vec<RecordSummary>,
    pub privacy_analysis: AggregatedReport,
    pub scenario_results: Vec<ScenarioStatus>,
    pub errors: Vec<ExecutionError>,
    pub capability_violations: Vec<CapabilityViolation>,
}
