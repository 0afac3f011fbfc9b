use rust_decimal_macros::dec;
use std::{collections::HashMap, fmt::Display};

use colored::Colorize;
use rust_decimal::Decimal;
use strum::{Display as StrumDisplay, EnumString};
use tracing::warn;

use crate::{summary::Holding, token::TokenContract};

/// What two balances must share to be summed together.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, StrumDisplay, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum GroupBy {
    /// Display symbol only, distinct contracts sharing a symbol are merged.
    #[default]
    Symbol,
    /// Symbol and contract address.
    Contract,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum AssetKey {
    Symbol(String),
    Contract(String, String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Asset {
    pub symbol: String,
    pub contract: Option<String>,
    pub amount: Decimal,
}

/// Running totals across every wallet processed so far, in first seen order.
#[derive(Clone, Debug, Default)]
pub struct Portfolio {
    group_by: GroupBy,
    assets: Vec<Asset>,
    index: HashMap<AssetKey, usize>,
}

impl Portfolio {
    pub fn new(group_by: GroupBy) -> Self {
        Self {
            group_by,
            assets: vec![],
            index: HashMap::new(),
        }
    }

    pub fn group_by(&self) -> GroupBy {
        self.group_by
    }

    pub fn add(&mut self, token: &TokenContract, amount: Decimal) {
        let (key, contract) = match self.group_by {
            GroupBy::Symbol => (AssetKey::Symbol(token.symbol.clone()), None),
            GroupBy::Contract => {
                let contract = token.address.to_lowercase();
                (
                    AssetKey::Contract(token.symbol.clone(), contract.clone()),
                    Some(contract),
                )
            }
        };

        let i = match self.index.get(&key) {
            Some(&i) => i,
            None => {
                self.assets.push(Asset {
                    symbol: token.symbol.clone(),
                    contract,
                    amount: dec!(0),
                });
                self.index.insert(key, self.assets.len() - 1);
                self.assets.len() - 1
            }
        };
        let asset = &mut self.assets[i];
        asset.amount = match asset.amount.checked_add(amount) {
            Some(total) => total,
            None => {
                warn!("Total of {} overflows, capped", asset.symbol);
                if amount.is_sign_negative() {
                    Decimal::MIN
                } else {
                    Decimal::MAX
                }
            }
        };
    }

    /// Total held under `symbol`, over every contract using it.
    pub fn amount_of(&self, symbol: &str) -> Option<Decimal> {
        self.assets
            .iter()
            .filter(|asset| asset.symbol == symbol)
            .map(|asset| asset.amount)
            .reduce(|a, b| a.saturating_add(b))
    }

    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Positive totals only, in accumulation order.
    pub fn into_holdings(self) -> Vec<Holding> {
        self.assets
            .into_iter()
            .filter(|asset| asset.amount > dec!(0))
            .map(|asset| Holding {
                symbol: asset.symbol,
                contract: asset.contract,
                amount: asset.amount.normalize(),
            })
            .collect()
    }
}

impl Display for Portfolio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s: Vec<String> = self
            .assets
            .iter()
            .map(|asset| match &asset.contract {
                Some(contract) => format!(
                    "{} ({}): {}",
                    asset.symbol,
                    contract,
                    asset.amount.normalize().to_string().purple()
                ),
                None => format!(
                    "{}: {}",
                    asset.symbol,
                    asset.amount.normalize().to_string().purple()
                ),
            })
            .collect();
        write!(f, "{} assets : {}", self.assets.len().to_string().yellow(), s.join(" / "))
    }
}
