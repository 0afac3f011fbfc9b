use std::collections::HashMap;

use crate::explorer::TokenTransfer;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TokenContract {
    pub symbol: String,
    pub address: String,
    pub decimals: u32,
}

/// Distinct token contracts of one wallet, keyed by symbol.
///
/// Iteration follows the order in which each symbol was first seen. Seeing a
/// symbol again replaces its contract and decimals but keeps its position.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TokenContracts {
    contracts: Vec<TokenContract>,
    index: HashMap<String, usize>,
}

impl TokenContracts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, contract: TokenContract) {
        match self.index.get(&contract.symbol) {
            Some(&i) => self.contracts[i] = contract,
            None => {
                self.index
                    .insert(contract.symbol.clone(), self.contracts.len());
                self.contracts.push(contract);
            }
        }
    }

    pub fn get(&self, symbol: &str) -> Option<&TokenContract> {
        self.index.get(symbol).map(|&i| &self.contracts[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &TokenContract> {
        self.contracts.iter()
    }

    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }
}

impl<'a> FromIterator<&'a TokenTransfer> for TokenContracts {
    fn from_iter<I: IntoIterator<Item = &'a TokenTransfer>>(iter: I) -> Self {
        let mut contracts = TokenContracts::new();
        for transfer in iter {
            contracts.insert(TokenContract {
                symbol: transfer.token_symbol.clone(),
                address: transfer.contract_address.clone(),
                decimals: transfer.token_decimal,
            });
        }
        contracts
    }
}
