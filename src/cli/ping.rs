use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::cli::commands::PingArgs;
use rpc_privacy::config::{load_config, AppConfig};
use rpc_privacy::errors::{PrivacyError, RetryConfig};
use rpc_privacy::scenarios::block_query::parse_quantity;
use rpc_privacy::transport::{HttpTransport, RpcClient, RpcTransport};

/// Latest block number as reported by one provider.
pub async fn ping(
    config: &AppConfig,
    transport: Arc<dyn RpcTransport>,
    provider: &str,
    wallet: &str,
) -> Result<(String, u64), PrivacyError> {
    let endpoint = config.rpc_endpoint(provider)?;
    let headers = config.wallet_headers(wallet)?;
    info!(provider, url = %endpoint.display_url(), "Pinging provider");

    let mut client = RpcClient::new(transport, endpoint, wallet, headers)
        .with_retry(RetryConfig { max_retries: config.analysis.max_retries });
    let block = client.call("eth_blockNumber", vec![]).await?;
    let number = parse_quantity(&block)?;
    Ok((block.as_str().unwrap_or_default().to_string(), number))
}

pub async fn handle_ping(args: PingArgs) -> Result<(), PrivacyError> {
    let config = load_config(args.config.as_deref().map(Path::new)).await?;
    let timeout = Duration::from_secs(config.analysis.timeout_secs);
    let transport = Arc::new(HttpTransport::new(timeout)?);
    let (hex, number) = ping(&config, transport, &args.provider, &args.wallet).await?;
    println!("{}: latest block {} ({})", args.provider, hex, number);
    Ok(())
}
