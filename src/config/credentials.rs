use tracing::debug;

/// Resolve a credential value. If the value starts with '$', treat it as an
/// environment variable reference and resolve from the environment.
pub fn resolve_credential(value: &str) -> String {
    if let Some(var_name) = value.strip_prefix('$') {
        match std::env::var(var_name) {
            Ok(resolved) => {
                debug!(var = %var_name, "Resolved credential from environment");
                resolved
            }
            Err(_) => {
                debug!(var = %var_name, "Environment variable not set, using literal");
                value.to_string()
            }
        }
    } else {
        value.to_string()
    }
}

/// Conventional environment variable for a provider's API key.
pub fn default_key_env(provider_id: &str) -> Option<&'static str> {
    match provider_id {
        "infura" => Some("INFURA_API_KEY"),
        "alchemy" => Some("ALCHEMY_API_KEY"),
        "chainstack" => Some("CHAINSTACK_API_KEY"),
        _ => None,
    }
}

/// Replace every occurrence of the given secrets with [REDACTED].
/// Secrets shorter than 4 characters are left alone.
pub fn redact_credentials(text: &str, secrets: &[&str]) -> String {
    let mut result = text.to_string();
    for secret in secrets {
        if !secret.is_empty() && secret.len() >= 4 {
            result = result.replace(secret, "[REDACTED]");
        }
    }
    result
}

/// Redact an endpoint URL for display: the API key is masked and any
/// query string dropped.
pub fn redact_url(url: &str, api_key: Option<&str>) -> String {
    let without_query = url.split('?').next().unwrap_or(url);
    match api_key {
        Some(key) => redact_credentials(without_query, &[key]),
        None => without_query.to_string(),
    }
}
