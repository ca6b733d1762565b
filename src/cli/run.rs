use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use console::style;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::cli::commands::{split_ids, RunArgs};
use rpc_privacy::config::load_config;
use rpc_privacy::errors::PrivacyError;
use rpc_privacy::models::report::RunReport;
use rpc_privacy::pipeline::BatchRunner;
use rpc_privacy::reporting::{save_json, save_report};
use rpc_privacy::scenarios::select_scenarios;
use rpc_privacy::transport::{HttpTransport, RpcTransport, SimulatedTransport};

pub async fn handle_run(args: RunArgs, quiet: bool) -> Result<(), PrivacyError> {
    let config = load_config(args.config.as_deref().map(Path::new)).await?;
    let wallets = split_ids(&args.wallets);
    let providers = split_ids(&args.providers);
    let scenario_ids = args.scenarios.as_deref().map(split_ids).unwrap_or_default();
    let scenarios = select_scenarios(&scenario_ids)?;

    let transport: Arc<dyn RpcTransport> = if args.offline {
        info!("Offline mode: requests are answered locally");
        Arc::new(SimulatedTransport::new())
    } else {
        Arc::new(HttpTransport::new(Duration::from_secs(config.analysis.timeout_secs))?)
    };

    let cancel_token = CancellationToken::new();
    let interrupt = cancel_token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted; finishing in-flight requests and analyzing collected records");
            interrupt.cancel();
        }
    });

    let runner = BatchRunner::new(config, transport, scenarios)
        .with_cancel_token(cancel_token)
        .with_progress(!quiet);
    let report = runner.run_all(&wallets, &providers).await?;

    let output = Path::new(&args.output);
    save_report(&report, output).await?;
    if let Some(json) = &args.json {
        save_json(&report, Path::new(json)).await?;
    }

    if !quiet {
        print_summary(&report, output);
    }
    Ok(())
}

fn print_summary(report: &RunReport, output: &Path) {
    println!();
    println!("  {}", style("RPC privacy run complete").bold());
    println!("  Requests analyzed:   {}", report.summary.total_requests);
    println!("  Failed scenarios:    {}", report.summary.errors);
    println!("  Dimensions affected: {}", report.summary.dimensions_affected);
    for finding in report.privacy_analysis.iter() {
        println!(
            "    {} {} ({} evidence lines)",
            style(format!("[{}]", finding.risk_level)).yellow(),
            finding.dimension_name,
            finding.evidence.len(),
        );
    }
    println!("  Report: {}", style(output.display()).cyan());
}
