use std::sync::Arc;

use crate::errors::PrivacyError;
use super::balance_query::BalanceQueryScenario;
use super::block_query::BlockQueryScenario;
use super::scenario::Scenario;
use super::token_transfer::TokenTransferScenario;
use super::uniswap_swap::UniswapSwapScenario;

/// Every built-in scenario, in execution order.
pub fn builtin_scenarios() -> Vec<Arc<dyn Scenario>> {
    vec![
        Arc::new(BalanceQueryScenario),
        Arc::new(TokenTransferScenario),
        Arc::new(UniswapSwapScenario),
        Arc::new(BlockQueryScenario),
    ]
}

/// Resolve scenario ids; an empty selection means all of them.
///
/// Selected scenarios keep built-in order and duplicates collapse.
pub fn select_scenarios(ids: &[String]) -> Result<Vec<Arc<dyn Scenario>>, PrivacyError> {
    let all = builtin_scenarios();
    if ids.is_empty() {
        return Ok(all);
    }

    if let Some(unknown) = ids.iter().find(|id| !all.iter().any(|s| s.id() == id.as_str())) {
        let known: Vec<&str> = all.iter().map(|s| s.id()).collect();
        return Err(PrivacyError::Config(format!(
            "Unknown scenario '{}' (available: {})",
            unknown,
            known.join(", ")
        )));
    }

    Ok(all
        .into_iter()
        .filter(|s| ids.iter().any(|id| id == s.id()))
        .collect())
}
