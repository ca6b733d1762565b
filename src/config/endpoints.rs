use std::collections::BTreeMap;

use crate::errors::PrivacyError;
use super::credentials::{default_key_env, redact_url, resolve_credential};
use super::types::AppConfig;

/// A provider endpoint ready to receive requests.
#[derive(Debug, Clone)]
pub struct ResolvedEndpoint {
    pub provider_id: String,
    pub url: String,
    api_key: Option<String>,
}

impl ResolvedEndpoint {
    /// URL safe to print or log.
    pub fn display_url(&self) -> String {
        redact_url(&self.url, self.api_key.as_deref())
    }
}

impl AppConfig {
    /// Build the endpoint URL for a provider, substituting its API key.
    pub fn rpc_endpoint(&self, provider_id: &str) -> Result<ResolvedEndpoint, PrivacyError> {
        let provider = self
            .rpc_providers
            .get(provider_id)
            .ok_or_else(|| PrivacyError::UnknownProvider(provider_id.to_string()))?;

        if provider.no_api_key {
            return Ok(ResolvedEndpoint {
                provider_id: provider_id.to_string(),
                url: provider.base_url.clone(),
                api_key: None,
            });
        }

        let key = provider
            .api_key
            .as_deref()
            .map(resolve_credential)
            .filter(|k| !k.is_empty() && !k.starts_with('$'))
            .or_else(|| {
                let var = provider.api_key_env.as_deref().or_else(|| default_key_env(provider_id))?;
                std::env::var(var).ok().filter(|k| !k.is_empty())
            })
            .ok_or_else(|| {
                PrivacyError::Config(format!("No API key available for provider '{}'", provider_id))
            })?;

        Ok(ResolvedEndpoint {
            provider_id: provider_id.to_string(),
            url: provider.base_url.replace("{api_key}", &key),
            api_key: Some(key),
        })
    }

    /// Headers a wallet attaches to every RPC request. Empty values are dropped.
    pub fn wallet_headers(
        &self,
        wallet_id: &str,
    ) -> Result<BTreeMap<String, String>, PrivacyError> {
        let wallet = self
            .wallets
            .get(wallet_id)
            .ok_or_else(|| PrivacyError::UnknownWallet(wallet_id.to_string()))?;

        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("User-Agent".to_string(), wallet.user_agent.clone());
        headers.insert("Origin".to_string(), wallet.origin.clone());
        for (name, value) in &wallet.headers {
            headers.insert(name.clone(), value.clone());
        }
        headers.retain(|_, v| !v.is_empty());
        Ok(headers)
    }
}
