//! Mock data sources for testing without network calls.

use super::{OracleSource, PositionSource, SourceError};
use crate::domain::{AccountKey, OraclePrice, Position};
use async_trait::async_trait;
use std::collections::HashMap;

/// Mock chain source returning predefined positions and prices.
#[derive(Debug, Clone, Default)]
pub struct MockChainSource {
    positions: Vec<(AccountKey, Position)>,
    prices: HashMap<String, OraclePrice>,
    fail_positions: bool,
    fail_prices: bool,
}

impl MockChainSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a position under the given position account key.
    pub fn with_position(mut self, account: &str, position: Position) -> Self {
        self.positions
            .push((AccountKey::new(account.to_string()), position));
        self
    }

    /// Set the price returned for an oracle feed account.
    pub fn with_price(mut self, oracle_address: &str, price: OraclePrice) -> Self {
        self.prices.insert(oracle_address.to_string(), price);
        self
    }

    /// Make position fetches fail with a network error.
    pub fn failing_positions(mut self) -> Self {
        self.fail_positions = true;
        self
    }

    /// Make price fetches fail with a network error.
    pub fn failing_prices(mut self) -> Self {
        self.fail_prices = true;
        self
    }
}

#[async_trait]
impl PositionSource for MockChainSource {
    async fn fetch_open_positions(
        &self,
        _owner: &str,
    ) -> Result<Vec<(AccountKey, Position)>, SourceError> {
        if self.fail_positions {
            return Err(SourceError::Network("mock position fetch failure".to_string()));
        }
        Ok(self
            .positions
            .iter()
            .filter(|(_, p)| p.size_usd > 0)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl OracleSource for MockChainSource {
    async fn fetch_price(&self, oracle_address: &str) -> Result<OraclePrice, SourceError> {
        if self.fail_prices {
            return Err(SourceError::Network("mock price fetch failure".to_string()));
        }
        self.prices
            .get(oracle_address)
            .copied()
            .ok_or_else(|| SourceError::Rpc(format!("oracle account {} not found", oracle_address)))
    }
}
