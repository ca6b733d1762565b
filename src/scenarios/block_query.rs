use async_trait::async_trait;
use serde_json::{json, Value};

use crate::errors::PrivacyError;
use crate::models::finding::Dimension;
use crate::transport::RpcClient;
use super::scenario::{Scenario, ScenarioContext};

/// Latest block number and header.
pub struct BlockQueryScenario;

#[async_trait]
impl Scenario for BlockQueryScenario {
    fn id(&self) -> &'static str {
        "block_query"
    }

    fn name(&self) -> &'static str {
        "Block query"
    }

    fn description(&self) -> &'static str {
        "Fetch the latest block number and that block without its transactions"
    }

    fn declared_impact(&self) -> &'static [Dimension] {
        // No account data, but the IP and headers still reach the node
        &[Dimension::IpExposure, Dimension::RequestHeaderFingerprint]
    }

    async fn run(
        &self,
        client: &mut RpcClient,
        _ctx: &ScenarioContext,
    ) -> Result<Value, PrivacyError> {
        let block_hex = client.call("eth_blockNumber", vec![]).await?;
        let block_number = parse_quantity(&block_hex)?;

        let params = vec![json!(format!("0x{:x}", block_number)), json!(false)];
        let block = client.call("eth_getBlockByNumber", params).await?;

        Ok(json!({
            "block_number": block_number,
            "block_hash": block.get("hash").cloned().unwrap_or(Value::Null),
            "tx_count": block.get("transactions").and_then(Value::as_array).map_or(0, Vec::len),
        }))
    }
}

/// Decode a hex QUANTITY such as `"0x58fdb2"`.
pub fn parse_quantity(value: &Value) -> Result<u64, PrivacyError> {
    let text = value
        .as_str()
        .ok_or_else(|| PrivacyError::Scenario(format!("expected hex quantity, got {}", value)))?;
    let digits = text.strip_prefix("0x").unwrap_or(text);
    u64::from_str_radix(digits, 16)
        .map_err(|e| PrivacyError::Scenario(format!("invalid hex quantity '{}': {}", text, e)))
}
