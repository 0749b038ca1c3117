//! Data source abstraction for fetching positions and oracle prices.

use crate::domain::{AccountKey, OraclePrice, Position};
use async_trait::async_trait;
use thiserror::Error;

pub mod jupiter;
pub mod mock;

pub use jupiter::JupiterRpcSource;
pub use mock::MockChainSource;

/// Source of a wallet's open positions.
#[async_trait]
pub trait PositionSource: Send + Sync {
    /// Fetch the owner's open positions, already filtered to size > 0.
    ///
    /// Returns (position account key, decoded position) pairs in the
    /// source's stable ordering; the report follows this ordering.
    async fn fetch_open_positions(
        &self,
        owner: &str,
    ) -> Result<Vec<(AccountKey, Position)>, SourceError>;
}

/// Source of live oracle prices.
#[async_trait]
pub trait OracleSource: Send + Sync {
    /// Fetch the current price from one oracle feed account.
    async fn fetch_price(&self, oracle_address: &str) -> Result<OraclePrice, SourceError>;
}

/// Error type for data source operations.
///
/// Any of these abandons the current poll cycle; there is no retry within
/// a cycle and the next scheduled cycle starts fresh.
#[derive(Debug, Clone, Error)]
pub enum SourceError {
    #[error("network error: {0}")]
    Network(String),
    #[error("http error: status {0}")]
    Http(u16),
    #[error("rpc error: {0}")]
    Rpc(String),
    #[error("malformed account data: {0}")]
    Parse(String),
}
