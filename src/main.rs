mod cli;

use clap::Parser;
use rpc_privacy::config;
use rpc_privacy::errors::PrivacyError;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    let log_level = match (cli.quiet, cli.verbose) {
        (true, 0) => "warn",
        (_, 0) => "info",
        (_, 1) => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(!cli.no_color)
        .with_writer(std::io::stderr)
        .init();

    if cli.no_color {
        console::set_colors_enabled(false);
    }

    let result = match cli.command {
        cli::Commands::Run(args) => cli::run::handle_run(args, cli.quiet).await,
        cli::Commands::Check(args) => cli::check::handle_check(args).await,
        cli::Commands::Ping(args) => cli::ping::handle_ping(args).await,
        cli::Commands::Validate(args) => handle_validate(args).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        let exit_code = match &e {
            PrivacyError::Config(_) | PrivacyError::Yaml(_) => 2,
            PrivacyError::UnknownProvider(_) | PrivacyError::UnknownWallet(_) => 3,
            PrivacyError::Network(_) | PrivacyError::Timeout(_) | PrivacyError::RateLimit(_) => 4,
            _ => 1,
        };
        std::process::exit(exit_code);
    }
}

async fn handle_validate(args: cli::commands::ValidateArgs) -> Result<(), PrivacyError> {
    let path = std::path::PathBuf::from(&args.config);
    let config = config::parse_config(&path).await?;
    println!(
        "Configuration is valid: {} ({} providers, {} wallets)",
        args.config,
        config.rpc_providers.len(),
        config.wallets.len()
    );
    Ok(())
}
