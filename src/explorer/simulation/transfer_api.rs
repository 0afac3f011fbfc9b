use super::{transfers_request, SimulationExplorer};
use crate::explorer::{ExplorerError, ExplorerTransferApi, TokenTransfer};

impl ExplorerTransferApi for SimulationExplorer {
    async fn get_token_transfers(
        &self,
        address: &str,
    ) -> Result<Vec<TokenTransfer>, ExplorerError> {
        self.record(&transfers_request(address)).await?;
        let transfers = self.transfers.read().await;
        Ok(transfers
            .get(&address.to_lowercase())
            .cloned()
            .unwrap_or_default())
    }
}
