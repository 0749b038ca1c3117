//! Position valuation against a live oracle price.

use crate::domain::{
    pow10, Decimal, InstrumentInfo, OraclePrice, Position, Side, ValuedPosition, USD_SCALE,
};
use thiserror::Error;

/// Fee rate per side of the trade: 0.06% of position size to open, the same
/// again to close.
fn fee_rate() -> Decimal {
    Decimal::from_mantissa(6, 4)
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValuationError {
    #[error("collateral must be positive")]
    ZeroCollateral,
    #[error("entry price must be positive")]
    ZeroEntryPrice,
    #[error("oracle price {0} is not positive")]
    NonPositiveOraclePrice(i64),
    #[error("oracle exponent {0} out of range")]
    ExponentOutOfRange(i32),
}

/// Rescale an oracle price into the 6-decimal frame used by entry prices.
///
/// Feeds finer than the frame (|exponent| >= 6) scale down; coarser feeds
/// scale up. Both directions land in the same frame as `entry_price`.
pub fn rescale_to_usd_frame(oracle: &OraclePrice) -> Result<Decimal, ValuationError> {
    if oracle.price <= 0 {
        return Err(ValuationError::NonPositiveOraclePrice(oracle.price));
    }
    let magnitude = oracle.exponent.unsigned_abs();
    if magnitude > 28 {
        return Err(ValuationError::ExponentOutOfRange(oracle.exponent));
    }
    let price = Decimal::from(oracle.price);
    Ok(if magnitude >= USD_SCALE {
        price / pow10(magnitude - USD_SCALE)
    } else {
        price * pow10(USD_SCALE - magnitude)
    })
}

/// Value one position against its oracle price.
///
/// Pure function. All arithmetic stays in exact decimal within the scaled-6
/// frame; values are descaled and rounded only for the display fields of
/// the result.
pub fn value(
    position: &Position,
    oracle: &OraclePrice,
    instrument: &InstrumentInfo,
) -> Result<ValuedPosition, ValuationError> {
    if position.collateral_usd == 0 {
        return Err(ValuationError::ZeroCollateral);
    }
    if position.entry_price == 0 {
        return Err(ValuationError::ZeroEntryPrice);
    }

    let entry = Decimal::from(position.entry_price);
    let size = Decimal::from(position.size_usd);
    let collateral = Decimal::from(position.collateral_usd);
    let current = rescale_to_usd_frame(oracle)?;

    let pnl = match position.side {
        Side::Long => size * (current - entry) / entry,
        Side::Short => size * (entry - current) / entry,
    };

    let opening_fee = size * fee_rate();
    let closing_fee = size * fee_rate();
    let total_fees = opening_fee + closing_fee;
    let pnl_after_fees = pnl - total_fees;

    // Percentage is measured against collateral; the PnL ratio above divides
    // by entry price. Two denominators, two purposes.
    let percent = (pnl_after_fees / collateral * Decimal::hundred()).round2();

    Ok(ValuedPosition {
        display_name: instrument.display_name.clone(),
        side: position.side,
        entry_price_usd: entry.descale(USD_SCALE).round2(),
        current_price_usd: current.descale(USD_SCALE).round2(),
        size_usd: size.descale(USD_SCALE).round2(),
        collateral_usd: collateral.descale(USD_SCALE).round2(),
        pnl_before_fees: pnl.descale(USD_SCALE).round2(),
        opening_fee: opening_fee.descale(USD_SCALE).round2(),
        closing_fee: closing_fee.descale(USD_SCALE).round2(),
        total_fees: total_fees.descale(USD_SCALE).round2(),
        pnl_after_fees: pnl_after_fees.descale(USD_SCALE).round2(),
        pnl_after_fees_percent: percent,
    })
}
