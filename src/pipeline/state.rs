use crate::models::record::CallRecord;
use crate::models::report::{ExecutionError, ScenarioState, ScenarioStatus};

/// One wallet profile paired with one provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Combination {
    pub wallet: String,
    pub provider: String,
}

impl Combination {
    pub fn new(wallet: &str, provider: &str) -> Self {
        Self { wallet: wallet.to_string(), provider: provider.to_string() }
    }

    pub fn key(&self, scenario: &str) -> String {
        ScenarioStatus::combination_key(&self.wallet, &self.provider, scenario)
    }
}

/// Every combination of the selected wallets and providers, wallet-major.
pub fn combinations(wallets: &[String], providers: &[String]) -> Vec<Combination> {
    wallets
        .iter()
        .flat_map(|w| providers.iter().map(move |p| Combination::new(w, p)))
        .collect()
}

/// What one combination produced.
#[derive(Debug, Default)]
pub struct CombinationOutcome {
    pub records: Vec<CallRecord>,
    pub statuses: Vec<ScenarioStatus>,
    pub errors: Vec<ExecutionError>,
}

impl CombinationOutcome {
    pub fn push_status(
        &mut self,
        combination: &Combination,
        scenario: &str,
        status: ScenarioState,
        requests: usize,
        error: Option<String>,
    ) {
        let key = combination.key(scenario);
        if let Some(message) = &error {
            self.errors.push(ExecutionError { key: key.clone(), error: message.clone() });
        }
        self.statuses.push(ScenarioStatus {
            key,
            wallet: combination.wallet.clone(),
            provider: combination.provider.clone(),
            scenario: scenario.to_string(),
            status,
            requests,
            error,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combinations_are_wallet_major() {
        let combos = combinations(&["a".into(), "b".into()], &["x".into(), "y".into()]);
        let keys: Vec<String> = combos.iter().map(|c| c.key("s")).collect();
        assert_eq!(keys, vec!["a_x_s", "a_y_s", "b_x_s", "b_y_s"]);
    }

    #[test]
    fn test_error_status_also_lands_in_errors() {
        let combo = Combination::new("metamask", "infura");
        let mut outcome = CombinationOutcome::default();
        outcome.push_status(&combo, "balance_query", ScenarioState::Ok, 2, None);
        outcome.push_status(&combo, "block_query", ScenarioState::Error, 1, Some("timeout".into()));

        assert_eq!(outcome.statuses.len(), 2);
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors[0].key, "metamask_infura_block_query");
    }
}
