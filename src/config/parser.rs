use std::path::Path;
use crate::errors::PrivacyError;
use super::credentials::default_key_env;
use super::types::AppConfig;
use super::security::validate_security_patterns;
use super::schema::CONFIG_SCHEMA;
use tracing::{info, warn};

pub async fn parse_config(path: &Path) -> Result<AppConfig, PrivacyError> {
    if !path.exists() {
        return Err(PrivacyError::Config(format!("Config file not found: {}", path.display())));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > 1_048_576 {
        return Err(PrivacyError::Config("Config file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    parse_config_str(&content)
}

/// Load the config file if one is given, otherwise the built-in defaults.
pub async fn load_config(path: Option<&Path>) -> Result<AppConfig, PrivacyError> {
    match path {
        Some(path) => {
            let config = parse_config(path).await?;
            info!(path = %path.display(), "Loaded configuration");
            Ok(config)
        }
        None => AppConfig::builtin(),
    }
}

pub fn parse_config_str(content: &str) -> Result<AppConfig, PrivacyError> {
    let yaml: serde_yaml::Value = serde_yaml::from_str(content)?;

    validate_security_patterns(&yaml)?;
    validate_schema(&yaml)?;

    let config: AppConfig = serde_yaml::from_value(yaml)?;

    validate_semantics(&config)?;

    Ok(config)
}

/// Validate config against the JSON schema for structural correctness.
fn validate_schema(yaml: &serde_yaml::Value) -> Result<(), PrivacyError> {
    let json_value: serde_json::Value = serde_json::to_value(yaml)
        .map_err(|e| PrivacyError::Config(format!("Config conversion error: {}", e)))?;

    let compiled = jsonschema::JSONSchema::compile(&CONFIG_SCHEMA)
        .map_err(|e| PrivacyError::Config(format!("Schema compilation error: {}", e)))?;

    if let Err(errors) = compiled.validate(&json_value) {
        // Advisory: typed deserialization below is authoritative
        for e in errors {
            warn!(
                validation_error = %format!("{} at {}", e, e.instance_path),
                "Config schema warning"
            );
        }
    }

    Ok(())
}

/// Checks the type system cannot express.
fn validate_semantics(config: &AppConfig) -> Result<(), PrivacyError> {
    for (id, provider) in &config.rpc_providers {
        let url = provider.base_url.to_lowercase();
        if !url.starts_with("https://") && !url.starts_with("http://") {
            return Err(PrivacyError::Config(format!(
                "Provider '{}' base_url must be an http(s) URL",
                id
            )));
        }
        let has_key_source = provider.api_key.as_deref().is_some_and(|k| !k.is_empty())
            || provider.api_key_env.as_deref().is_some_and(|v| !v.is_empty())
            || default_key_env(id).is_some();
        if !provider.no_api_key && !has_key_source {
            return Err(PrivacyError::Config(format!(
                "Provider '{}' needs api_key, api_key_env or no_api_key: true",
                id
            )));
        }
        if !provider.no_api_key && !provider.base_url.contains("{api_key}") {
            warn!(
                provider = %id,
                "Provider requires an API key but base_url has no {{api_key}} placeholder"
            );
        }
    }

    for (id, wallet) in &config.wallets {
        if wallet.user_agent.trim().is_empty() {
            warn!(wallet = %id, "Wallet profile has an empty User-Agent");
        }
    }

    if config.analysis.concurrency == 0 {
        return Err(PrivacyError::Config("analysis.concurrency must be at least 1".into()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_config() {
        let config = parse_config_str(
            "rpc_providers:\n  local:\n    base_url: http://127.0.0.1:8545\n    no_api_key: true\n\
             wallets:\n  wx:\n    user_agent: WalletX/1.0\n",
        )
        .unwrap();
        assert!(config.rpc_providers["local"].no_api_key);
        assert_eq!(config.wallets["wx"].user_agent, "WalletX/1.0");
        assert_eq!(config.analysis.max_retries, 2);
    }

    #[test]
    fn test_non_http_base_url_rejected() {
        let result = parse_config_str(
            "rpc_providers:\n  ws:\n    base_url: wss://node.example.org\n    no_api_key: true\n",
        );
        assert!(matches!(result, Err(PrivacyError::Config(_))));
    }

    #[test]
    fn test_provider_without_key_source_rejected() {
        let result = parse_config_str(
            "rpc_providers:\n  quicknode:\n    base_url: https://x.quiknode.pro/{api_key}\n",
        );
        assert!(matches!(result, Err(PrivacyError::Config(m)) if m.contains("quicknode")));
    }

    #[test]
    fn test_key_sources_accepted() {
        let yaml = r#"
rpc_providers:
  quicknode:
    base_url: https://x.quiknode.pro/{api_key}
    api_key_env: QN_KEY
  literal:
    base_url: https://node.example.org/{api_key}
    api_key: abcd1234
  infura:
    base_url: https://sepolia.infura.io/v3/{api_key}
"#;
        let config = parse_config_str(yaml).unwrap();
        assert_eq!(config.rpc_providers.len(), 3);
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let result = parse_config_str("analysis:\n  concurrency: 0\n");
        assert!(matches!(result, Err(PrivacyError::Config(_))));
    }

    #[test]
    fn test_dangerous_pattern_rejected_before_parsing() {
        let result = parse_config_str("rpc_providers:\n  x:\n    base_url: 'file:///tmp/rpc'\n");
        assert!(matches!(result, Err(PrivacyError::Config(_))));
    }

    #[test]
    fn test_invalid_yaml_is_yaml_error() {
        let result = parse_config_str("rpc_providers: [unclosed");
        assert!(matches!(result, Err(PrivacyError::Yaml(_))));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let result = parse_config(Path::new("/nonexistent/rpc-privacy.yaml")).await;
        assert!(matches!(result, Err(PrivacyError::Config(_))));
    }

    #[tokio::test]
    async fn test_load_config_defaults_without_path() {
        let config = load_config(None).await.unwrap();
        assert!(config.rpc_providers.contains_key("public_sepolia"));
    }
}
