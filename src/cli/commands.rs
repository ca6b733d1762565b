use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "rpc-privacy",
    version,
    about = "Measure what wallets leak to Ethereum RPC providers"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run scenarios against wallet × provider combinations and write a report
    Run(RunArgs),
    /// Resolve provider endpoints and wallet profiles without sending requests
    Check(CheckArgs),
    /// Send a single eth_blockNumber to one provider
    Ping(PingArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

#[derive(Args, Clone)]
pub struct RunArgs {
    /// Comma-separated provider ids
    #[arg(short, long, default_value = "public_sepolia")]
    pub providers: String,

    /// Comma-separated wallet profile ids
    #[arg(short, long, default_value = "metamask,trust_wallet,coinbase_wallet")]
    pub wallets: String,

    /// Comma-separated scenario ids (default: all)
    #[arg(short, long)]
    pub scenarios: Option<String>,

    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Markdown report path
    #[arg(short, long, default_value = "output/report.md")]
    pub output: String,

    /// Also write the JSON export to this path
    #[arg(long)]
    pub json: Option<String>,

    /// Answer requests locally instead of contacting providers
    #[arg(long)]
    pub offline: bool,
}

#[derive(Args, Clone)]
pub struct CheckArgs {
    /// Comma-separated provider ids (default: all configured)
    #[arg(short, long)]
    pub providers: Option<String>,

    /// Comma-separated wallet profile ids (default: all configured)
    #[arg(short, long)]
    pub wallets: Option<String>,

    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<String>,
}

#[derive(Args, Clone)]
pub struct PingArgs {
    /// Provider id
    #[arg(short, long, default_value = "public_sepolia")]
    pub provider: String,

    /// Wallet profile whose headers are sent
    #[arg(short, long, default_value = "metamask")]
    pub wallet: String,

    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<String>,
}

#[derive(Args, Clone)]
pub struct ValidateArgs {
    /// Config file to validate
    pub config: String,
}

/// Split a comma-separated id list, dropping blanks.
pub fn split_ids(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
