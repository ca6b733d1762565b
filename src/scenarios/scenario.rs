use async_trait::async_trait;
use serde_json::Value;

use crate::config::{AppConfig, ContractsConfig};
use crate::errors::PrivacyError;
use crate::models::finding::Dimension;
use crate::transport::RpcClient;

/// Inputs shared by every scenario in a run.
#[derive(Debug, Clone)]
pub struct ScenarioContext {
    pub sample_address: String,
    pub contracts: ContractsConfig,
}

impl ScenarioContext {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            sample_address: config.analysis.sample_address.clone(),
            contracts: config.contracts.clone(),
        }
    }
}

/// One wallet operation expressed as a sequence of RPC calls.
#[async_trait]
pub trait Scenario: Send + Sync {
    fn id(&self) -> &'static str;

    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Dimensions this operation is expected to expose.
    fn declared_impact(&self) -> &'static [Dimension];

    /// Issue the scenario's calls through `client` and return a summary of
    /// what the node answered.
    async fn run(
        &self,
        client: &mut RpcClient,
        ctx: &ScenarioContext,
    ) -> Result<Value, PrivacyError>;
}
