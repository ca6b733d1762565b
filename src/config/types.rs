use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub rpc_providers: BTreeMap<String, ProviderConfig>,
    #[serde(default)]
    pub wallets: BTreeMap<String, WalletConfig>,
    #[serde(default)]
    pub contracts: ContractsConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

/// One JSON-RPC endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderConfig {
    pub name: Option<String>,
    /// Endpoint URL; `{api_key}` is replaced by the resolved key.
    pub base_url: String,
    #[serde(default)]
    pub no_api_key: bool,
    /// Literal key or `$ENV_VAR` reference.
    pub api_key: Option<String>,
    /// Environment variable holding the key when `api_key` is unset.
    pub api_key_env: Option<String>,
}

/// Request header profile of a simulated wallet client.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WalletConfig {
    pub name: Option<String>,
    pub user_agent: String,
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ContractsConfig {
    pub test_erc20: String,
    pub uniswap_v2_router: String,
    pub weth_sepolia: String,
}

impl Default for ContractsConfig {
    fn default() -> Self {
        Self {
            test_erc20: "0x1c7D4B196Cb0C7B01d743Fbc6116a902379C7238".to_string(),
            uniswap_v2_router: "0xC532a74256D3Db42D0Bf7a0400fEFDbad7694008".to_string(),
            weth_sepolia: "0x7b79995e5f793A07Bc00c21412e50Ecae098E7f9".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub timeout_secs: u64,
    pub max_retries: u32,
    /// Wallet × provider combinations run at the same time.
    pub concurrency: usize,
    /// Account queried and used as sender by the scenarios.
    pub sample_address: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            max_retries: 2,
            concurrency: 4,
            sample_address: "0x742d35Cc6634C0532925a3b844Bc9e7595f0bEb1".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_default_is_empty() {
        let config = AppConfig::default();
        assert!(config.rpc_providers.is_empty());
        assert!(config.wallets.is_empty());
        assert_eq!(config.analysis.concurrency, 4);
    }

    #[test]
    fn test_analysis_config_partial_override() {
        let parsed: AnalysisConfig = serde_yaml::from_str("timeout_secs: 5").unwrap();
        assert_eq!(parsed.timeout_secs, 5);
        assert_eq!(parsed.max_retries, 2);
        assert_eq!(parsed.sample_address, AnalysisConfig::default().sample_address);
    }

    #[test]
    fn test_provider_config_defaults() {
        let parsed: ProviderConfig =
            serde_yaml::from_str("base_url: https://rpc.example.org").unwrap();
        assert!(!parsed.no_api_key);
        assert!(parsed.api_key.is_none());
    }

    #[test]
    fn test_wallet_config_optional_fields() {
        let parsed: WalletConfig = serde_yaml::from_str("user_agent: WalletX/1.0").unwrap();
        assert_eq!(parsed.origin, "");
        assert!(parsed.headers.is_empty());
    }
}
