use tracing::info;

use crate::{
    explorer::{ExplorerError, ExplorerTransferApi},
    retry::RetryPolicy,
    token::TokenContracts,
};

/// Lists the token contracts `address` ever exchanged, keyed by symbol.
pub async fn fetch_token_contracts<E: ExplorerTransferApi>(
    explorer: &E,
    retry: &RetryPolicy,
    address: &str,
) -> Result<TokenContracts, ExplorerError> {
    let transfers = retry
        .run(|| explorer.get_token_transfers(address))
        .await?;
    info!("Fetched {} transfers for {}", transfers.len(), address);

    Ok(transfers.iter().collect())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use reqwest::StatusCode;

    use super::*;
    use crate::explorer::{
        simulation::{transfers_request, SimulationExplorer},
        TokenTransfer,
    };

    #[tokio::test(start_paused = true)]
    async fn test_fetch_token_contracts() {
        let explorer = SimulationExplorer::new();
        explorer
            .set_transfers(
                "0xa",
                vec![
                    TokenTransfer::new("USDC", "0xa0b8", 6),
                    TokenTransfer::new("DAI", "0x6b17", 18),
                    TokenTransfer::new("USDC", "0xa0b8", 6),
                ],
            )
            .await;

        let contracts = fetch_token_contracts(&explorer, &RetryPolicy::default(), "0xa")
            .await
            .unwrap();
        assert_eq!(contracts.len(), 2);
        assert_eq!(contracts.get("DAI").unwrap().decimals, 18);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_retries_transient_failures() {
        let explorer = SimulationExplorer::new();
        explorer
            .set_transfers("0xa", vec![TokenTransfer::new("USDC", "0xa0b8", 6)])
            .await;
        for _ in 0..3 {
            explorer
                .fail_next(
                    &transfers_request("0xa"),
                    ExplorerError::Status(StatusCode::TOO_MANY_REQUESTS),
                )
                .await;
        }

        let retry = RetryPolicy::new(Duration::from_millis(100));
        let contracts = fetch_token_contracts(&explorer, &retry, "0xa").await.unwrap();
        assert_eq!(contracts.len(), 1);
        assert_eq!(explorer.calls().await.len(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_malformed_is_fatal() {
        let explorer = SimulationExplorer::new();
        explorer
            .fail_next(
                &transfers_request("0xa"),
                ExplorerError::Malformed("missing tokenSymbol".to_string()),
            )
            .await;

        let res = fetch_token_contracts(&explorer, &RetryPolicy::default(), "0xa").await;
        assert!(matches!(res, Err(ExplorerError::Malformed(_))));
        assert_eq!(explorer.calls().await.len(), 1);
    }
}
