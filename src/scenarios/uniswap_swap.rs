use async_trait::async_trait;
use serde_json::{json, Value};

use crate::errors::PrivacyError;
use crate::models::finding::Dimension;
use crate::transport::RpcClient;
use super::abi::build_get_amounts_out_data;
use super::scenario::{Scenario, ScenarioContext};

/// 1 WETH.
const AMOUNT_IN: u128 = 1_000_000_000_000_000_000;

/// Swap quote from a Uniswap V2 router through `eth_call`.
pub struct UniswapSwapScenario;

#[async_trait]
impl Scenario for UniswapSwapScenario {
    fn id(&self) -> &'static str {
        "uniswap_swap"
    }

    fn name(&self) -> &'static str {
        "Uniswap swap quote"
    }

    fn description(&self) -> &'static str {
        "Ask the Uniswap V2 router for a WETH to ERC-20 quote via getAmountsOut"
    }

    fn declared_impact(&self) -> &'static [Dimension] {
        // Tracing is declared for the swap as a whole; the eth_call quote alone never triggers it
        &[
            Dimension::IpExposure,
            Dimension::AddressAssociation,
            Dimension::CallParamsLeak,
            Dimension::TransactionTracing,
            Dimension::RequestHeaderFingerprint,
        ]
    }

    async fn run(
        &self,
        client: &mut RpcClient,
        ctx: &ScenarioContext,
    ) -> Result<Value, PrivacyError> {
        let call = json!({
            "from": ctx.sample_address,
            "to": ctx.contracts.uniswap_v2_router,
            "data": build_get_amounts_out_data(AMOUNT_IN),
            "gas": "0x100000",
        });
        let quote = client.call("eth_call", vec![call, json!("latest")]).await?;
        Ok(json!({
            "result": quote,
            "amount_in": AMOUNT_IN.to_string(),
            "path": [ctx.contracts.weth_sepolia, ctx.contracts.test_erc20],
        }))
    }
}
