use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::Utc;
use futures::stream::{self, StreamExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::analysis::{analyze, analyze_batch};
use crate::config::AppConfig;
use crate::errors::{PrivacyError, RetryConfig};
use crate::models::finding::Dimension;
use crate::models::record::CallRecord;
use crate::models::report::{RunConfigEcho, RunReport, ScenarioState};
use crate::scenarios::{Scenario, ScenarioContext};
use crate::transport::{RpcClient, RpcTransport};
use crate::utils::truncation::truncate_error;
use super::metrics::{compute_summary, summarize_records};
use super::progress::RunProgress;
use super::state::{combinations, Combination, CombinationOutcome};

/// Runs scenarios for every wallet × provider combination and analyzes
/// the resulting call records.
pub struct BatchRunner {
    config: Arc<AppConfig>,
    context: ScenarioContext,
    transport: Arc<dyn RpcTransport>,
    scenarios: Vec<Arc<dyn Scenario>>,
    cancel_token: CancellationToken,
    show_progress: bool,
}

impl BatchRunner {
    pub fn new(
        config: AppConfig,
        transport: Arc<dyn RpcTransport>,
        scenarios: Vec<Arc<dyn Scenario>>,
    ) -> Self {
        let context = ScenarioContext::from_config(&config);
        Self {
            config: Arc::new(config),
            context,
            transport,
            scenarios,
            cancel_token: CancellationToken::new(),
            show_progress: false,
        }
    }

    /// Replace the internal cancel token with an external one (e.g. wired to Ctrl-C).
    pub fn with_cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel_token = token;
        self
    }

    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn cancel(&self) {
        self.cancel_token.cancel();
    }

    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    /// Execute every combination, then analyze all collected records in
    /// combination order.
    ///
    /// Unknown wallets or providers fail the whole run before any request
    /// is sent. Failures after that are recorded per scenario and never
    /// stop the analysis.
    pub async fn run_all(
        &self,
        wallets: &[String],
        providers: &[String],
    ) -> Result<RunReport, PrivacyError> {
        self.validate_selection(wallets, providers)?;

        let combos = combinations(wallets, providers);
        let total = (combos.len() * self.scenarios.len()) as u64;
        let progress = if self.show_progress {
            RunProgress::new(total)
        } else {
            RunProgress::hidden()
        };
        let concurrency = self.config.analysis.concurrency.max(1);

        info!(
            wallets = wallets.len(),
            providers = providers.len(),
            scenarios = self.scenarios.len(),
            transport = self.transport.transport_name(),
            concurrency,
            "Starting privacy run"
        );

        // buffered() yields in input order, keeping records deterministic
        let outcomes: Vec<CombinationOutcome> = stream::iter(combos.iter())
            .map(|combo| self.run_combination(combo, &progress))
            .buffered(concurrency)
            .collect()
            .await;
        progress.finish();

        if self.cancel_token.is_cancelled() {
            warn!("Run cancelled; analyzing the records collected so far");
        }

        let mut records = Vec::new();
        let mut scenario_results = Vec::new();
        let mut errors = Vec::new();
        for outcome in outcomes {
            records.extend(outcome.records);
            scenario_results.extend(outcome.statuses);
            errors.extend(outcome.errors);
        }

        let batch = analyze_batch(&records);
        let summary = compute_summary(batch.records_analyzed, &scenario_results, &batch.report);

        info!(
            total_requests = summary.total_requests,
            errors = summary.errors,
            dimensions_affected = summary.dimensions_affected,
            "Privacy run complete"
        );

        Ok(RunReport {
            run_id: uuid::Uuid::new_v4().to_string(),
            generated_at: Utc::now(),
            config: RunConfigEcho {
                wallets: wallets.to_vec(),
                providers: providers.to_vec(),
                scenarios: self.scenarios.iter().map(|s| s.id().to_string()).collect(),
            },
            summary,
            records: summarize_records(&records),
            privacy_analysis: batch.report,
            scenario_results,
            errors,
            capability_violations: batch.violations,
        })
    }

    fn validate_selection(
        &self,
        wallets: &[String],
        providers: &[String],
    ) -> Result<(), PrivacyError> {
        if wallets.is_empty() || providers.is_empty() {
            return Err(PrivacyError::Config(
                "At least one wallet and one provider are required".into(),
            ));
        }
        if self.scenarios.is_empty() {
            return Err(PrivacyError::Config("No scenarios selected".into()));
        }
        if let Some(w) = wallets.iter().find(|w| !self.config.wallets.contains_key(w.as_str())) {
            return Err(PrivacyError::UnknownWallet(w.clone()));
        }
        let known_provider = |p: &&String| self.config.rpc_providers.contains_key(p.as_str());
        if let Some(p) = providers.iter().find(|p| !known_provider(p)) {
            return Err(PrivacyError::UnknownProvider(p.clone()));
        }
        Ok(())
    }

    async fn run_combination(
        &self,
        combo: &Combination,
        progress: &RunProgress,
    ) -> CombinationOutcome {
        let mut outcome = CombinationOutcome::default();

        let mut client = match self.build_client(combo) {
            Ok(client) => client,
            Err(e) => {
                // Typically a missing API key: every scenario of this pair fails
                warn!(
                    wallet = %combo.wallet,
                    provider = %combo.provider,
                    error = %e,
                    "Cannot set up client"
                );
                let message = truncate_error(&e.to_string());
                for scenario in &self.scenarios {
                    let state = if self.cancel_token.is_cancelled() {
                        ScenarioState::Skipped
                    } else {
                        ScenarioState::Error
                    };
                    let error = (state == ScenarioState::Error).then(|| message.clone());
                    outcome.push_status(combo, scenario.id(), state, 0, error);
                    progress.finish_one(&combo.key(scenario.id()), state == ScenarioState::Error);
                }
                return outcome;
            }
        };

        for scenario in &self.scenarios {
            let key = combo.key(scenario.id());
            if self.cancel_token.is_cancelled() {
                outcome.push_status(combo, scenario.id(), ScenarioState::Skipped, 0, None);
                progress.finish_one(&key, false);
                continue;
            }

            progress.start(&key);
            let result = scenario.run(&mut client, &self.context).await;
            let records = client.take_records();
            let requests = records.len();

            match result {
                Ok(value) => {
                    debug!(key = %key, requests, result = %value, "Scenario finished");
                    for dimension in undeclared_dimensions(scenario.as_ref(), &records) {
                        warn!(
                            scenario = scenario.id(),
                            dimension = %dimension,
                            "Scenario exposed an undeclared dimension"
                        );
                    }
                    outcome.push_status(combo, scenario.id(), ScenarioState::Ok, requests, None);
                    progress.finish_one(&key, false);
                }
                Err(e) => {
                    warn!(key = %key, requests, error = %e, "Scenario failed");
                    let message = truncate_error(&e.to_string());
                    outcome.push_status(
                        combo,
                        scenario.id(),
                        ScenarioState::Error,
                        requests,
                        Some(message),
                    );
                    progress.finish_one(&key, true);
                }
            }
            // Records of a failed scenario are still analyzed
            outcome.records.extend(records);
        }

        outcome
    }

    fn build_client(&self, combo: &Combination) -> Result<RpcClient, PrivacyError> {
        let endpoint = self.config.rpc_endpoint(&combo.provider)?;
        let headers = self.config.wallet_headers(&combo.wallet)?;
        debug!(
            wallet = %combo.wallet,
            provider = %combo.provider,
            url = %endpoint.display_url(),
            "Client ready"
        );
        Ok(RpcClient::new(self.transport.clone(), endpoint, &combo.wallet, headers)
            .with_retry(RetryConfig { max_retries: self.config.analysis.max_retries }))
    }
}

/// Dimensions triggered by `records` that `scenario` does not declare.
pub fn undeclared_dimensions(
    scenario: &dyn Scenario,
    records: &[CallRecord],
) -> BTreeSet<Dimension> {
    let declared = scenario.declared_impact();
    records
        .iter()
        .flat_map(|r| analyze(&r.request, &r.outcome))
        .map(|f| f.dimension_id)
        .filter(|d| !declared.contains(d))
        .collect()
}
