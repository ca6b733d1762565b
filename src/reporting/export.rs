use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::analysis::AggregatedReport;
use crate::errors::PrivacyError;
use crate::models::report::{ExecutionError, RunConfigEcho, RunReport, RunSummary};
use super::formatter::generate_markdown_report;

/// Machine-readable subset of a run.
#[derive(Debug, Serialize)]
pub struct JsonExport<'a> {
    pub config: &'a RunConfigEcho,
    pub summary: &'a RunSummary,
    pub privacy_analysis: &'a AggregatedReport,
    pub errors: &'a [ExecutionError],
}

impl<'a> From<&'a RunReport> for JsonExport<'a> {
    fn from(report: &'a RunReport) -> Self {
        Self {
            config: &report.config,
            summary: &report.summary,
            privacy_analysis: &report.privacy_analysis,
            errors: &report.errors,
        }
    }
}

pub fn export_json(report: &RunReport) -> Result<String, PrivacyError> {
    Ok(serde_json::to_string_pretty(&JsonExport::from(report))?)
}

async fn write_creating_dirs(path: &Path, content: &str) -> Result<(), PrivacyError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, content).await?;
    Ok(())
}

/// Write the Markdown report to `path`.
pub async fn save_report(report: &RunReport, path: &Path) -> Result<(), PrivacyError> {
    write_creating_dirs(path, &generate_markdown_report(report)).await?;
    info!(path = %path.display(), "Wrote Markdown report");
    Ok(())
}

pub async fn save_json(report: &RunReport, path: &Path) -> Result<(), PrivacyError> {
    write_creating_dirs(path, &export_json(report)?).await?;
    info!(path = %path.display(), "Wrote JSON export");
    Ok(())
}
