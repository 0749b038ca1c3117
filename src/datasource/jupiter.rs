//! Solana JSON-RPC data source for Jupiter Perpetuals accounts.
//!
//! Positions are discovered with a `getProgramAccounts` scan filtered by the
//! account discriminator and the owner key; oracle prices come from the
//! Doves feed accounts via `getAccountInfo`. Account payloads are base64 and
//! decoded at fixed little-endian offsets.

use super::{OracleSource, PositionSource, SourceError};
use crate::domain::{AccountKey, OraclePrice, Position, Side};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use reqwest::Client;
use serde_json::{json, Value};
use sha2::{Digest, Sha256};
use std::time::Duration;
use tracing::debug;

const RPC_TIMEOUT: Duration = Duration::from_secs(15);

/// Jupiter Perpetuals program.
pub const JUPITER_PERPETUALS_PROGRAM: &str = "PERPHjGBqRHArX4DySjwM6UJHiR3sWAatqfdBS2qQJu";

// Position account layout: 8-byte discriminator, then owner, pool, custody,
// collateral custody (32 bytes each), open/update times (i64 each), side
// tag, and the fixed-point amounts.
const OWNER_OFFSET: usize = 8;
const CUSTODY_OFFSET: usize = 72;
const SIDE_OFFSET: usize = 152;
const PRICE_OFFSET: usize = 153;
const SIZE_USD_OFFSET: usize = 161;
const COLLATERAL_USD_OFFSET: usize = 169;
const REALIZED_PNL_OFFSET: usize = 177;

// Price feed account layout: 8-byte discriminator, price i64, timestamp
// i64, exponent i32.
const FEED_PRICE_OFFSET: usize = 8;
const FEED_EXPO_OFFSET: usize = 24;

/// First 8 bytes of sha256("account:<Name>"), the Anchor account tag.
fn account_discriminator(name: &str) -> [u8; 8] {
    let hash = Sha256::digest(format!("account:{}", name).as_bytes());
    let mut discriminator = [0u8; 8];
    discriminator.copy_from_slice(&hash[..8]);
    discriminator
}

fn read_array<const N: usize>(data: &[u8], offset: usize) -> Result<[u8; N], SourceError> {
    data.get(offset..offset + N)
        .and_then(|slice| slice.try_into().ok())
        .ok_or_else(|| SourceError::Parse(format!("account data truncated at offset {}", offset)))
}

fn read_u64_le(data: &[u8], offset: usize) -> Result<u64, SourceError> {
    Ok(u64::from_le_bytes(read_array::<8>(data, offset)?))
}

fn read_i64_le(data: &[u8], offset: usize) -> Result<i64, SourceError> {
    Ok(i64::from_le_bytes(read_array::<8>(data, offset)?))
}

fn read_i32_le(data: &[u8], offset: usize) -> Result<i32, SourceError> {
    Ok(i32::from_le_bytes(read_array::<4>(data, offset)?))
}

/// Decode a position account payload.
pub fn decode_position(data: &[u8]) -> Result<Position, SourceError> {
    let custody = read_array::<32>(data, CUSTODY_OFFSET)?;
    let side = match data.get(SIDE_OFFSET) {
        Some(1) => Side::Long,
        Some(2) => Side::Short,
        Some(tag) => {
            return Err(SourceError::Parse(format!("unknown side tag {}", tag)));
        }
        None => {
            return Err(SourceError::Parse(format!(
                "account data truncated at offset {}",
                SIDE_OFFSET
            )));
        }
    };

    Ok(Position {
        custody: AccountKey::new(bs58::encode(custody).into_string()),
        side,
        entry_price: read_u64_le(data, PRICE_OFFSET)?,
        size_usd: read_u64_le(data, SIZE_USD_OFFSET)?,
        collateral_usd: read_u64_le(data, COLLATERAL_USD_OFFSET)?,
        realized_pnl_usd: read_i64_le(data, REALIZED_PNL_OFFSET)?,
    })
}

/// Decode a price feed account payload.
pub fn decode_price_feed(data: &[u8]) -> Result<OraclePrice, SourceError> {
    Ok(OraclePrice {
        price: read_i64_le(data, FEED_PRICE_OFFSET)?,
        exponent: read_i32_le(data, FEED_EXPO_OFFSET)?,
    })
}

fn account_data(account: Option<&Value>) -> Result<Vec<u8>, SourceError> {
    let encoded = account
        .and_then(|a| a.get("data"))
        .and_then(|d| d.get(0))
        .and_then(|v| v.as_str())
        .ok_or_else(|| SourceError::Parse("account entry missing base64 data".to_string()))?;
    BASE64
        .decode(encoded)
        .map_err(|e| SourceError::Parse(format!("invalid base64 account data: {}", e)))
}

/// Data source backed by a Solana JSON-RPC endpoint.
#[derive(Debug, Clone)]
pub struct JupiterRpcSource {
    client: Client,
    rpc_url: String,
}

impl JupiterRpcSource {
    pub fn new(rpc_url: String) -> Self {
        Self {
            client: Client::new(),
            rpc_url,
        }
    }

    async fn rpc_call(&self, method: &str, params: Value) -> Result<Value, SourceError> {
        debug!(method, "rpc call");

        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });

        let response = self
            .client
            .post(&self.rpc_url)
            .timeout(RPC_TIMEOUT)
            .json(&body)
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Http(status.as_u16()));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| SourceError::Parse(e.to_string()))?;

        if let Some(err) = payload.get("error") {
            return Err(SourceError::Rpc(err.to_string()));
        }

        payload
            .get("result")
            .cloned()
            .ok_or_else(|| SourceError::Parse("rpc response missing result".to_string()))
    }
}

#[async_trait]
impl PositionSource for JupiterRpcSource {
    async fn fetch_open_positions(
        &self,
        owner: &str,
    ) -> Result<Vec<(AccountKey, Position)>, SourceError> {
        let discriminator = BASE64.encode(account_discriminator("Position"));
        let params = json!([
            JUPITER_PERPETUALS_PROGRAM,
            {
                "commitment": "confirmed",
                "encoding": "base64",
                "filters": [
                    { "memcmp": { "offset": 0, "bytes": discriminator, "encoding": "base64" } },
                    { "memcmp": { "offset": OWNER_OFFSET, "bytes": owner } },
                ],
            }
        ]);

        let result = self.rpc_call("getProgramAccounts", params).await?;
        let accounts = result
            .as_array()
            .ok_or_else(|| SourceError::Parse("expected account array".to_string()))?;

        let mut positions = Vec::new();
        for entry in accounts {
            let pubkey = entry
                .get("pubkey")
                .and_then(|v| v.as_str())
                .ok_or_else(|| SourceError::Parse("account entry missing pubkey".to_string()))?;
            let data = account_data(entry.get("account"))?;
            let position = decode_position(&data)?;
            if position.size_usd > 0 {
                positions.push((AccountKey::new(pubkey.to_string()), position));
            } else {
                debug!(account = pubkey, "skipping closed position");
            }
        }

        debug!(owner, open = positions.len(), "fetched positions");
        Ok(positions)
    }
}

#[async_trait]
impl OracleSource for JupiterRpcSource {
    async fn fetch_price(&self, oracle_address: &str) -> Result<OraclePrice, SourceError> {
        let params = json!([
            oracle_address,
            { "commitment": "confirmed", "encoding": "base64" }
        ]);

        let result = self.rpc_call("getAccountInfo", params).await?;
        let value = result.get("value");
        if value.map_or(true, Value::is_null) {
            return Err(SourceError::Rpc(format!(
                "oracle account {} not found",
                oracle_address
            )));
        }

        let data = account_data(value)?;
        decode_price_feed(&data)
    }
}
