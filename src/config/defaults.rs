use crate::errors::PrivacyError;
use super::types::AppConfig;

/// Configuration used when no file is given: Sepolia endpoints and the
/// header profiles of three common wallets.
pub const DEFAULT_CONFIG_YAML: &str = r#"
rpc_providers:
  public_sepolia:
    name: Public Sepolia (PublicNode)
    base_url: https://ethereum-sepolia-rpc.publicnode.com
    no_api_key: true
  infura:
    name: Infura
    base_url: https://sepolia.infura.io/v3/{api_key}
    api_key_env: INFURA_API_KEY
  alchemy:
    name: Alchemy
    base_url: https://eth-sepolia.g.alchemy.com/v2/{api_key}
    api_key_env: ALCHEMY_API_KEY
  chainstack:
    name: Chainstack
    base_url: https://ethereum-sepolia.core.chainstack.com/{api_key}
    api_key_env: CHAINSTACK_API_KEY

wallets:
  metamask:
    name: MetaMask
    user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 \
      (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36"
    origin: chrome-extension://nkbihfbeogaeaoehlefnkodbefgpgknn
  trust_wallet:
    name: Trust Wallet
    user_agent: "TrustWallet/8.12 (iPhone; iOS 17.4; Scale/3.00)"
    headers:
      X-Client: trust-wallet-ios
  coinbase_wallet:
    name: Coinbase Wallet
    user_agent: "CoinbaseWallet/28.52 (Android 14)"
    origin: https://wallet.coinbase.com
    headers:
      X-Requested-With: org.toshi

contracts:
  test_erc20: "0x1c7D4B196Cb0C7B01d743Fbc6116a902379C7238"
  uniswap_v2_router: "0xC532a74256D3Db42D0Bf7a0400fEFDbad7694008"
  weth_sepolia: "0x7b79995e5f793A07Bc00c21412e50Ecae098E7f9"

analysis:
  timeout_secs: 30
  max_retries: 2
  concurrency: 4
  sample_address: "0x742d35Cc6634C0532925a3b844Bc9e7595f0bEb1"
"#;

impl AppConfig {
    /// The compiled-in default configuration.
    pub fn builtin() -> Result<Self, PrivacyError> {
        Ok(serde_yaml::from_str(DEFAULT_CONFIG_YAML)?)
    }
}
