use std::path::Path;

use console::style;

use crate::cli::commands::{split_ids, CheckArgs};
use rpc_privacy::config::{load_config, AppConfig};
use rpc_privacy::errors::PrivacyError;

/// Outcome of resolving one provider or wallet profile.
#[derive(Debug, PartialEq, Eq)]
pub struct CheckLine {
    pub ok: bool,
    pub text: String,
}

impl std::fmt::Display for CheckLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = if self.ok { style("[OK]  ").green() } else { style("[FAIL]").red() };
        write!(f, "{} {}", tag, self.text)
    }
}

/// Resolve every selected provider endpoint and wallet profile. URLs are redacted.
pub fn check_lines(
    config: &AppConfig,
    providers: &[String],
    wallets: &[String],
) -> Vec<CheckLine> {
    let mut lines = Vec::new();
    for id in providers {
        lines.push(match config.rpc_endpoint(id) {
            Ok(endpoint) => CheckLine {
                ok: true,
                text: format!("provider {}: {}", id, endpoint.display_url()),
            },
            Err(e) => CheckLine { ok: false, text: format!("provider {}: {}", id, e) },
        });
    }
    for id in wallets {
        lines.push(match config.wallet_headers(id) {
            Ok(headers) => CheckLine {
                ok: true,
                text: format!(
                    "wallet {}: {} headers, User-Agent {}",
                    id,
                    headers.len(),
                    headers.get("User-Agent").map(String::as_str).unwrap_or("-"),
                ),
            },
            Err(e) => CheckLine { ok: false, text: format!("wallet {}: {}", id, e) },
        });
    }
    lines
}

pub async fn handle_check(args: CheckArgs) -> Result<(), PrivacyError> {
    let config = load_config(args.config.as_deref().map(Path::new)).await?;
    let providers = match &args.providers {
        Some(list) => split_ids(list),
        None => config.rpc_providers.keys().cloned().collect(),
    };
    let wallets = match &args.wallets {
        Some(list) => split_ids(list),
        None => config.wallets.keys().cloned().collect(),
    };

    let lines = check_lines(&config, &providers, &wallets);
    for line in &lines {
        println!("{}", line);
    }

    let failed = lines.iter().filter(|l| !l.ok).count();
    if failed > 0 {
        return Err(PrivacyError::Config(format!("{} of {} checks failed", failed, lines.len())));
    }
    Ok(())
}
