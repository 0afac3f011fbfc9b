use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use token_summary::aggregator::BalanceAggregator;
use token_summary::config::ScanConfig;
use token_summary::explorer::etherscan::{Etherscan, ENDPOINT};
use token_summary::portfolio::GroupBy;
use token_summary::retry::RetryPolicy;
use token_summary::summary::{sort_holdings, SortBy};
use token_summary::{report, wallets};

/// Computes amount owned by a collection of wallets.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// File containing the wallets to analyze, one address per line.
    #[arg(long, default_value = "wallets.txt")]
    addresses_file: PathBuf,

    #[arg(long, env = "ETHERSCAN_API_KEY", hide_env_values = true)]
    api_key: String,

    #[arg(long, env = "ETHERSCAN_ENDPOINT", default_value = ENDPOINT)]
    endpoint: String,

    /// File where results will be saved in CSV format.
    #[arg(long, default_value = "summary.csv")]
    summary_file: PathBuf,

    /// Sort alphabetically by symbol or by ascending amount.
    #[arg(long, default_value_t = SortBy::Amount)]
    sort_by: SortBy,

    /// Merge balances by symbol, or keep distinct contracts apart.
    #[arg(long, default_value_t = GroupBy::Symbol)]
    group_by: GroupBy,

    #[arg(long, default_value = "100")]
    retry_delay_ms: u64,

    /// Give up a request after this many attempts (retries forever if unset).
    #[arg(long)]
    max_attempts: Option<u32>,

    #[arg(long, default_value = "200")]
    wallet_pause_ms: u64,

    #[arg(long)]
    no_progress: bool,
}

impl Args {
    fn scan_config(&self) -> ScanConfig {
        ScanConfig {
            retry: RetryPolicy::new(Duration::from_millis(self.retry_delay_ms))
                .with_max_attempts(self.max_attempts),
            wallet_pause: Duration::from_millis(self.wallet_pause_ms),
            group_by: self.group_by,
            show_progress: !self.no_progress,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            format!("{}=info,token_summary=info,reqwest=info", env!("CARGO_CRATE_NAME")).into()
        }))
        .with(fmt::layer())
        .init();

    let args = Args::parse();

    let addresses = wallets::read_addresses(&args.addresses_file).await?;
    if addresses.is_empty() {
        warn!("No address found in {}", args.addresses_file.display());
    }
    info!(
        "{} wallets, sorting by {}, grouping by {}",
        addresses.len(),
        args.sort_by,
        args.group_by
    );

    let explorer = Etherscan::new(&args.endpoint, &args.api_key)?;
    let aggregator = BalanceAggregator::new(explorer, args.scan_config());

    let portfolio = aggregator.run(&addresses).await?;
    let mut holdings = portfolio.into_holdings();
    sort_holdings(&mut holdings, args.sort_by);

    report::print_table(&holdings);
    report::save_csv(&args.summary_file, &holdings)?;
    info!("{}", "Successfully written CSV summary.".green());

    Ok(())
}
