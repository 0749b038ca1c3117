//! Position and oracle price records as fetched from chain, and the valued
//! form produced by the valuator.

use super::decimal::Decimal;
use super::primitives::{AccountKey, Side};

/// An open perpetuals position, decoded from its on-chain account.
///
/// All USD amounts and the entry price are fixed-point integers with 6
/// implied decimal places. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    /// Custody account selecting which instrument is held.
    pub custody: AccountKey,
    pub side: Side,
    /// Average entry price, scale 6.
    pub entry_price: u64,
    /// Position size in USD, scale 6. Open positions have size > 0.
    pub size_usd: u64,
    /// Locked collateral in USD, scale 6. Must be > 0.
    pub collateral_usd: u64,
    /// Realized PnL in USD, scale 6. Informational only; not part of the
    /// unrealized-PnL math.
    pub realized_pnl_usd: i64,
}

/// A price read from an oracle feed account.
///
/// `price` is scaled by 10^exponent relative to a whole-unit price, so the
/// feed's own decimal convention travels with the value and is rescaled to
/// the 6-decimal frame before any comparison with an entry price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OraclePrice {
    pub price: i64,
    pub exponent: i32,
}

/// A position valued against a live oracle price.
///
/// Every field is a display figure: descaled to whole USD (or percent) and
/// rounded to 2 decimal places. Signed quantities keep their sign; the
/// report derives the +/- prefix from [`ValuedPosition::is_profit`], not
/// from intermediate raw PnL. Recomputed every poll cycle, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValuedPosition {
    pub display_name: String,
    pub side: Side,
    pub entry_price_usd: Decimal,
    pub current_price_usd: Decimal,
    pub size_usd: Decimal,
    pub collateral_usd: Decimal,
    pub pnl_before_fees: Decimal,
    pub opening_fee: Decimal,
    pub closing_fee: Decimal,
    pub total_fees: Decimal,
    pub pnl_after_fees: Decimal,
    pub pnl_after_fees_percent: Decimal,
}

impl ValuedPosition {
    /// True when the position is in profit after fees. Drives the +/- and
    /// up/down indicators through the whole report.
    pub fn is_profit(&self) -> bool {
        self.pnl_after_fees.is_positive()
    }
}
