//! Portfolio aggregation over valued positions.

use crate::domain::{Decimal, ValuedPosition};

/// Totals across a portfolio of valued positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortfolioSummary {
    pub total_pnl_after_fees: Decimal,
    pub avg_pnl_after_fees_percent: Decimal,
    pub position_count: usize,
}

/// Aggregate valued positions into portfolio totals.
///
/// Returns None for fewer than two positions; a single-position portfolio
/// has no total distinct from the position itself.
///
/// Totals are computed over the rounded display figures, not the
/// full-precision intermediates, so the summary always matches the sum of
/// what the per-position lines show.
pub fn summarize(valued: &[ValuedPosition]) -> Option<PortfolioSummary> {
    if valued.len() < 2 {
        return None;
    }

    let total = valued
        .iter()
        .fold(Decimal::zero(), |acc, v| acc + v.pnl_after_fees);
    let percent_sum = valued
        .iter()
        .fold(Decimal::zero(), |acc, v| acc + v.pnl_after_fees_percent);
    let avg = (percent_sum / Decimal::from(valued.len())).round2();

    Some(PortfolioSummary {
        total_pnl_after_fees: total,
        avg_pnl_after_fees_percent: avg,
        position_count: valued.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Side;
    use rust_decimal_macros::dec;

    fn valued(name: &str, pnl_after_fees: Decimal, percent: Decimal) -> ValuedPosition {
        ValuedPosition {
            display_name: name.to_string(),
            side: Side::Long,
            entry_price_usd: Decimal::new(dec!(100.00)),
            current_price_usd: Decimal::new(dec!(105.00)),
            size_usd: Decimal::new(dec!(10000.00)),
            collateral_usd: Decimal::new(dec!(1000.00)),
            pnl_before_fees: pnl_after_fees + Decimal::new(dec!(12.00)),
            opening_fee: Decimal::new(dec!(6.00)),
            closing_fee: Decimal::new(dec!(6.00)),
            total_fees: Decimal::new(dec!(12.00)),
            pnl_after_fees,
            pnl_after_fees_percent: percent,
        }
    }

    #[test]
    fn test_empty_portfolio_has_no_summary() {
        assert_eq!(summarize(&[]), None);
    }

    #[test]
    fn test_single_position_has_no_summary() {
        let one = valued("SOL", Decimal::new(dec!(488.00)), Decimal::new(dec!(48.80)));
        assert_eq!(summarize(&[one]), None);
    }

    #[test]
    fn test_two_positions_sum_and_average() {
        let a = valued("SOL", Decimal::new(dec!(488.00)), Decimal::new(dec!(48.80)));
        let b = valued("ETH", Decimal::new(dec!(-12.50)), Decimal::new(dec!(-1.25)));

        let summary = summarize(&[a, b]).unwrap();
        assert_eq!(summary.total_pnl_after_fees, Decimal::new(dec!(475.50)));
        assert_eq!(
            summary.avg_pnl_after_fees_percent,
            Decimal::new(dec!(23.78)) // (48.80 - 1.25) / 2 = 23.775, rounded away from zero
        );
        assert_eq!(summary.position_count, 2);
    }

    #[test]
    fn test_average_rounds_away_from_zero() {
        let a = valued("SOL", Decimal::new(dec!(1.00)), Decimal::new(dec!(10.01)));
        let b = valued("ETH", Decimal::new(dec!(1.00)), Decimal::new(dec!(10.02)));

        let summary = summarize(&[a, b]).unwrap();
        assert_eq!(
            summary.avg_pnl_after_fees_percent,
            Decimal::new(dec!(10.02)) // 10.015 rounds away from zero
        );
    }
}
