use crate::analysis::taxonomy::DIMENSIONS;
use crate::models::finding::DimensionFinding;
use crate::models::report::{RecordSummary, RunReport, ScenarioState};
use crate::utils::formatting::format_latency;
use super::metadata::build_info;

/// Request records listed in full before the report switches to a count.
pub const RECORD_PREVIEW_LIMIT: usize = 20;

pub fn format_dimension_markdown(finding: &DimensionFinding) -> String {
    let mut out = format!(
        "### {} ({})\n\n- **Risk level:** {}\n- **Description:** {}\n\n**Evidence:**\n\n",
        finding.dimension_name, finding.dimension_id, finding.risk_level, finding.description,
    );
    for line in &finding.evidence {
        out.push_str(&format!("- {}\n", line));
    }
    out.push_str(&format!("\n**Recommendation:** {}\n", finding.recommendation));
    out
}

pub fn format_execution_summary(report: &RunReport) -> String {
    let count = |state: ScenarioState| {
        report.scenario_results.iter().filter(|s| s.status == state).count()
    };
    format!(
        concat!(
            "## 2. Execution Summary\n\n",
            "| Counter | Value |\n|---|---|\n",
            "| Total requests | **{}** |\n",
            "| Failed scenarios | **{}** |\n",
            "| Dimensions affected | **{}** |\n",
            "| Scenarios ok | {} |\n",
            "| Scenarios skipped | {} |\n",
        ),
        report.summary.total_requests,
        report.summary.errors,
        report.summary.dimensions_affected,
        count(ScenarioState::Ok),
        count(ScenarioState::Skipped),
    )
}

fn format_record_line(record: &RecordSummary) -> String {
    format!(
        "- `{}` | {} → {} | exposed addresses: [{}] | {}{}",
        record.method,
        record.wallet,
        record.provider,
        record.exposed_addresses.join(", "),
        format_latency(record.elapsed_ms),
        if record.failed { " | failed" } else { "" },
    )
}

fn format_overview(report: &RunReport) -> String {
    let mut out = String::from("## 1. Overview\n\n");
    out.push_str(&format!(
        concat!(
            "This report analyzes what **{}** wallet profile(s) ({}) expose to ",
            "**{}** RPC provider(s) ({}) on the Sepolia test network.\n\n",
        ),
        report.config.wallets.len(),
        report.config.wallets.join(", "),
        report.config.providers.len(),
        report.config.providers.join(", "),
    ));
    out.push_str("### Scenarios\n\n");
    for id in &report.config.scenarios {
        out.push_str(&format!("- {}\n", id));
    }
    out.push_str("\n### Privacy dimensions\n\n");
    for def in DIMENSIONS {
        out.push_str(&format!("- {} ({})\n", def.name, def.dimension));
    }
    out
}

/// Render a full run as Markdown.
pub fn generate_markdown_report(report: &RunReport) -> String {
    let mut out = String::from("# RPC Privacy Exposure Report\n\n");
    out.push_str(&format!(
        "**Generated:** {}  \n**Run ID:** {}\n\n",
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
        report.run_id,
    ));

    out.push_str(&format_overview(report));
    out.push_str("\n---\n\n");
    out.push_str(&format_execution_summary(report));
    out.push_str("\n---\n\n## 3. Privacy Analysis\n\n");

    if report.privacy_analysis.is_empty() {
        out.push_str("No privacy dimensions were triggered.\n\n");
    }
    for finding in report.privacy_analysis.iter() {
        out.push_str(&format_dimension_markdown(finding));
        out.push('\n');
    }

    out.push_str("---\n\n## 4. Request Records\n\n");
    for record in report.records.iter().take(RECORD_PREVIEW_LIMIT) {
        out.push_str(&format_record_line(record));
        out.push('\n');
    }
    if report.records.len() > RECORD_PREVIEW_LIMIT {
        out.push_str(&format!("- ... {} total\n", report.records.len()));
    }

    if !report.errors.is_empty() {
        out.push_str("\n---\n\n## 5. Execution Errors\n\n");
        for err in &report.errors {
            out.push_str(&format!("- **{}**: {}\n", err.key, err.error));
        }
    }

    if !report.capability_violations.is_empty() {
        out.push_str("\n### Capability warnings\n\n");
        for v in &report.capability_violations {
            out.push_str(&format!(
                "- `{}` triggered undeclared dimension {}\n",
                v.method, v.dimension
            ));
        }
    }

    out.push_str("\n---\n\n## 6. Conclusions and Recommendations\n\n");
    out.push_str(concat!(
        "1. **IP exposure:** every RPC request reveals the client IP; ",
        "route traffic through a proxy, Tor or a private node.\n",
        "2. **Address association:** eth_getBalance, eth_call and similar calls ",
        "necessarily reveal wallet addresses.\n",
        "3. **Call parameters:** eth_estimateGas and eth_call carry full ABI-encoded data ",
        "that can be decoded.\n",
        "4. **Request headers:** wallets send distinct User-Agent and Origin values ",
        "that fingerprint them.\n",
    ));
    out.push_str(&format!("\n_Generated by {}_\n", build_info().describe()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::aggregate;
    use crate::analysis::taxonomy::definition;
    use crate::models::finding::Dimension;
    use crate::models::report::{ExecutionError, RunConfigEcho, RunSummary};
    use chrono::Utc;

    fn record(i: usize) -> RecordSummary {
        RecordSummary {
            method: "eth_getBalance".into(),
            wallet: "metamask".into(),
            provider: "infura".into(),
            exposed_addresses: vec!["0x742d35Cc6634C0532925a3b844Bc9e7595f0bEb1".into()],
            elapsed_ms: i as f64,
            failed: false,
        }
    }

    fn report(records: usize) -> RunReport {
        let finding = definition(Dimension::IpExposure).finding(vec!["Provider: infura".into()]);
        RunReport {
            run_id: "run-1".into(),
            generated_at: Utc::now(),
            config: RunConfigEcho {
                wallets: vec!["metamask".into()],
                providers: vec!["infura".into()],
                scenarios: vec!["balance_query".into()],
            },
            summary: RunSummary { total_requests: records, errors: 1, dimensions_affected: 1 },
            records: (0..records).map(record).collect(),
            privacy_analysis: aggregate([vec![finding]]),
            scenario_results: Vec::new(),
            errors: vec![ExecutionError {
                key: "metamask_infura_block_query".into(),
                error: "timeout".into(),
            }],
            capability_violations: Vec::new(),
        }
    }

    #[test]
    fn test_report_sections() {
        let md = generate_markdown_report(&report(3));
        assert!(md.starts_with("# RPC Privacy Exposure Report"));
        assert!(md.contains("### IP Address Exposure (ip_exposure)"));
        assert!(md.contains("- **Risk level:** high"));
        assert!(md.contains("- Provider: infura"));
        assert!(md.contains("| Total requests | **3** |"));
        assert!(md.contains("- **metamask_infura_block_query**: timeout"));
        assert!(!md.contains("- ... "));
    }

    #[test]
    fn test_records_capped_with_total_line() {
        let md = generate_markdown_report(&report(25));
        assert_eq!(md.matches("- `eth_getBalance`").count(), RECORD_PREVIEW_LIMIT);
        assert!(md.contains("- ... 25 total"));
    }

    #[test]
    fn test_no_errors_section_when_clean() {
        let mut r = report(1);
        r.errors.clear();
        assert!(!generate_markdown_report(&r).contains("Execution Errors"));
    }
}
