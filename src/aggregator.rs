use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use crate::{
    config::ScanConfig,
    explorer::{Explorer, ExplorerBalanceApi, ExplorerTransferApi},
    fetcher::fetch_token_contracts,
    portfolio::Portfolio,
    token::TokenContracts,
    utils::normalize_balance,
};

/// Sums token balances of many wallets, one wallet and one contract at a time.
#[derive(Clone, Debug)]
pub struct BalanceAggregator<E> {
    explorer: E,
    config: ScanConfig,
}

impl<E: Explorer + ExplorerTransferApi + ExplorerBalanceApi> BalanceAggregator<E> {
    pub fn new(explorer: E, config: ScanConfig) -> Self {
        Self { explorer, config }
    }

    pub fn explorer(&self) -> &E {
        &self.explorer
    }

    /// Processes every address in order and returns the accumulated totals.
    ///
    /// A non transient explorer error aborts the whole run.
    pub async fn run(&self, addresses: &[String]) -> Result<Portfolio> {
        let mut portfolio = Portfolio::new(self.config.group_by);
        for address in addresses {
            info!("Processing address: {}", address);
            portfolio = self
                .add_wallet(address, portfolio)
                .await
                .with_context(|| format!("Failed to process address {}", address))?;
            debug!("{}", portfolio);
        }
        Ok(portfolio)
    }

    /// Discovers the contracts of `address` and adds its balances to `portfolio`.
    pub async fn add_wallet(&self, address: &str, portfolio: Portfolio) -> Result<Portfolio> {
        let contracts =
            fetch_token_contracts(&self.explorer, &self.config.retry, address).await?;
        let portfolio = self.add_balances(address, &contracts, portfolio).await?;

        tokio::time::sleep(self.config.wallet_pause).await;
        Ok(portfolio)
    }

    pub async fn add_balances(
        &self,
        address: &str,
        contracts: &TokenContracts,
        mut portfolio: Portfolio,
    ) -> Result<Portfolio> {
        let bar = self.progress_bar(contracts.len() as u64);

        for token in contracts.iter() {
            let raw = self
                .config
                .retry
                .run(|| self.explorer.get_token_balance(&token.address, address))
                .await?;
            let amount = normalize_balance(&raw, token.decimals)
                .with_context(|| format!("Balance of {} ({})", token.symbol, token.address))?;
            debug!("{} {} {} (raw {})", address, token.symbol, amount, raw);

            portfolio.add(token, amount);
            bar.inc(1);
        }
        bar.finish_and_clear();

        Ok(portfolio)
    }

    fn progress_bar(&self, len: u64) -> ProgressBar {
        if !self.config.show_progress {
            return ProgressBar::hidden();
        }
        let bar = ProgressBar::new(len);
        if let Ok(style) = ProgressStyle::default_bar().template("{bar:40.cyan/blue} {pos}/{len}") {
            bar.set_style(style);
        }
        bar
    }
}
