use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use tokio::sync::RwLock;

use super::{Explorer, ExplorerError, TokenTransfer};

pub mod balance_api;
pub mod transfer_api;

/// In-memory explorer serving scripted transfers and balances.
///
/// Failures queued with [`SimulationExplorer::fail_next`] are returned, in
/// order, by the next calls for the same request before the scripted data is.
#[derive(Debug, Clone, Default)]
pub struct SimulationExplorer {
    transfers: Arc<RwLock<HashMap<String, Vec<TokenTransfer>>>>,
    balances: Arc<RwLock<HashMap<(String, String), String>>>,
    failures: Arc<RwLock<HashMap<String, VecDeque<ExplorerError>>>>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl SimulationExplorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_transfers(&self, address: &str, transfers: Vec<TokenTransfer>) {
        let mut all = self.transfers.write().await;
        all.insert(address.to_lowercase(), transfers);
    }

    pub async fn set_balance(&self, contract: &str, address: &str, raw: &str) {
        let mut balances = self.balances.write().await;
        balances.insert(balance_key(contract, address), raw.to_string());
    }

    /// Queues `error` for the next request identified by `request`, as
    /// produced by [`transfers_request`] or [`balance_request`].
    pub async fn fail_next(&self, request: &str, error: ExplorerError) {
        let mut failures = self.failures.write().await;
        failures
            .entry(request.to_string())
            .or_default()
            .push_back(error);
    }

    /// Every request served so far, failed ones included.
    pub async fn calls(&self) -> Vec<String> {
        self.calls.read().await.clone()
    }

    async fn record(&self, request: &str) -> Result<(), ExplorerError> {
        self.calls.write().await.push(request.to_string());
        let mut failures = self.failures.write().await;
        match failures.get_mut(request).and_then(|queue| queue.pop_front()) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Explorer for SimulationExplorer {}

pub fn transfers_request(address: &str) -> String {
    format!("tokentx:{}", address.to_lowercase())
}

pub fn balance_request(contract: &str, address: &str) -> String {
    format!(
        "tokenbalance:{}:{}",
        contract.to_lowercase(),
        address.to_lowercase()
    )
}

fn balance_key(contract: &str, address: &str) -> (String, String) {
    (contract.to_lowercase(), address.to_lowercase())
}
