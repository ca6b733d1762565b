use async_trait::async_trait;
use serde_json::{json, Value};

use crate::errors::PrivacyError;
use crate::models::finding::Dimension;
use crate::transport::RpcClient;
use super::scenario::{Scenario, ScenarioContext};

/// Native balance and nonce lookup for one account.
pub struct BalanceQueryScenario;

#[async_trait]
impl Scenario for BalanceQueryScenario {
    fn id(&self) -> &'static str {
        "balance_query"
    }

    fn name(&self) -> &'static str {
        "Balance query"
    }

    fn description(&self) -> &'static str {
        "Query the ETH balance and transaction count of the sample account"
    }

    fn declared_impact(&self) -> &'static [Dimension] {
        &[Dimension::IpExposure, Dimension::AddressAssociation, Dimension::RequestHeaderFingerprint]
    }

    async fn run(
        &self,
        client: &mut RpcClient,
        ctx: &ScenarioContext,
    ) -> Result<Value, PrivacyError> {
        let address = json!(ctx.sample_address);
        let balance = client.call("eth_getBalance", vec![address.clone(), json!("latest")]).await?;
        let nonce = client.call("eth_getTransactionCount", vec![address, json!("latest")]).await?;
        Ok(json!({ "eth_balance": balance, "nonce": nonce }))
    }
}
