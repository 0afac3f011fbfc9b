use super::{balance_key, balance_request, SimulationExplorer};
use crate::explorer::{ExplorerBalanceApi, ExplorerError};

impl ExplorerBalanceApi for SimulationExplorer {
    async fn get_token_balance(&self, contract: &str, address: &str) -> Result<String, ExplorerError> {
        self.record(&balance_request(contract, address)).await?;
        let balances = self.balances.read().await;
        // unknown pairs hold nothing, like the real endpoint
        Ok(balances
            .get(&balance_key(contract, address))
            .cloned()
            .unwrap_or_else(|| "0".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_balance() {
        let explorer = SimulationExplorer::new();
        explorer.set_balance("0xA0B8", "0xabc", "2500000").await;

        assert_eq!(
            explorer.get_token_balance("0xa0b8", "0xABC").await.unwrap(),
            "2500000"
        );
        assert_eq!(explorer.get_token_balance("0xa0b8", "0xdef").await.unwrap(), "0");
        assert_eq!(
            explorer.calls().await,
            vec![
                balance_request("0xa0b8", "0xabc"),
                balance_request("0xa0b8", "0xdef"),
            ]
        );
    }
}
