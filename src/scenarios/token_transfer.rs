use async_trait::async_trait;
use serde_json::{json, Value};

use crate::errors::PrivacyError;
use crate::models::finding::Dimension;
use crate::transport::RpcClient;
use super::abi::build_transfer_data;
use super::scenario::{Scenario, ScenarioContext};

const RECIPIENT: &str = "0x0000000000000000000000000000000000000001";
const AMOUNT: u128 = 1_000_000;

/// ERC-20 transfer preview: gas estimation of a `transfer` call, nothing is sent.
pub struct TokenTransferScenario;

#[async_trait]
impl Scenario for TokenTransferScenario {
    fn id(&self) -> &'static str {
        "token_transfer"
    }

    fn name(&self) -> &'static str {
        "Token transfer"
    }

    fn description(&self) -> &'static str {
        "Estimate gas for an ERC-20 transfer before signing"
    }

    fn declared_impact(&self) -> &'static [Dimension] {
        &[
            Dimension::IpExposure,
            Dimension::AddressAssociation,
            Dimension::CallParamsLeak,
            Dimension::RequestHeaderFingerprint,
        ]
    }

    async fn run(
        &self,
        client: &mut RpcClient,
        ctx: &ScenarioContext,
    ) -> Result<Value, PrivacyError> {
        // Recipient and amount travel inside `data`
        let call = json!({
            "from": ctx.sample_address,
            "to": ctx.contracts.test_erc20,
            "data": build_transfer_data(RECIPIENT, AMOUNT),
            "gas": "0x5208",
        });
        let gas = client.call("eth_estimateGas", vec![call]).await?;
        Ok(json!({ "estimated_gas": gas, "from": ctx.sample_address, "to": RECIPIENT }))
    }
}
