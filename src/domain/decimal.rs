//! Exact decimal numeric type for the valuation chain, backed by rust_decimal.
//!
//! On-chain amounts arrive as fixed-point integers (USD values and entry
//! prices carry 6 implied decimal places, oracle prices carry their own
//! exponent). All ratio math runs on this type so that multiplying a large
//! scaled size by a scaled price difference never touches binary floating
//! point or overflows a u64 intermediate.

use rust_decimal::{Decimal as RustDecimal, RoundingStrategy};
use std::fmt;

/// Exact decimal value used throughout valuation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Decimal(RustDecimal);

impl Decimal {
    /// Wrap a RustDecimal.
    pub fn new(value: RustDecimal) -> Self {
        Decimal(value)
    }

    /// Build a decimal from an integer mantissa and a decimal scale,
    /// e.g. `from_mantissa(6, 4)` is 0.0006.
    pub fn from_mantissa(mantissa: i64, scale: u32) -> Self {
        Decimal(RustDecimal::new(mantissa, scale))
    }

    /// The additive identity (0).
    pub fn zero() -> Self {
        Decimal(RustDecimal::ZERO)
    }

    /// The value 100, the percentage multiplier.
    pub fn hundred() -> Self {
        Decimal(RustDecimal::ONE_HUNDRED)
    }

    /// Returns true if the value is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the value is > 0.
    pub fn is_positive(&self) -> bool {
        !self.is_zero() && self.0.is_sign_positive()
    }

    /// Returns true if the value is < 0.
    pub fn is_negative(&self) -> bool {
        !self.is_zero() && self.0.is_sign_negative()
    }

    /// Absolute value.
    pub fn abs(&self) -> Self {
        Decimal(self.0.abs())
    }

    /// Divide out an implied fixed-point scale, e.g. `descale(6)` maps a
    /// raw on-chain USD amount into whole dollars.
    pub fn descale(&self, scale: u32) -> Self {
        *self / pow10(scale)
    }

    /// Round to 2 decimal places, midpoint away from zero.
    ///
    /// This is the display rounding used for every currency and percentage
    /// figure, and portfolio totals are summed over these rounded values.
    pub fn round2(&self) -> Self {
        Decimal(
            self.0
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Get the underlying RustDecimal.
    pub fn inner(&self) -> RustDecimal {
        self.0
    }
}

/// 10^n as an exact decimal. Callers must keep `n` within rust_decimal's
/// 96-bit mantissa (n <= 28); oracle exponents are validated before use.
pub fn pow10(n: u32) -> Decimal {
    Decimal(RustDecimal::from_i128_with_scale(10i128.pow(n), 0))
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Delegate so precision flags like {:.2} keep working.
        self.0.fmt(f)
    }
}

impl From<u64> for Decimal {
    fn from(value: u64) -> Self {
        Decimal(RustDecimal::from(value))
    }
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        Decimal(RustDecimal::from(value))
    }
}

impl From<usize> for Decimal {
    fn from(value: usize) -> Self {
        Decimal(RustDecimal::from(value))
    }
}

impl From<RustDecimal> for Decimal {
    fn from(value: RustDecimal) -> Self {
        Decimal(value)
    }
}

impl From<Decimal> for RustDecimal {
    fn from(value: Decimal) -> Self {
        value.0
    }
}

impl std::ops::Add for Decimal {
    type Output = Decimal;

    fn add(self, rhs: Decimal) -> Decimal {
        Decimal(self.0 + rhs.0)
    }
}

impl std::ops::Sub for Decimal {
    type Output = Decimal;

    fn sub(self, rhs: Decimal) -> Decimal {
        Decimal(self.0 - rhs.0)
    }
}

impl std::ops::Mul for Decimal {
    type Output = Decimal;

    fn mul(self, rhs: Decimal) -> Decimal {
        Decimal(self.0 * rhs.0)
    }
}

impl std::ops::Div for Decimal {
    type Output = Decimal;

    fn div(self, rhs: Decimal) -> Decimal {
        Decimal(self.0 / rhs.0)
    }
}

impl std::ops::Neg for Decimal {
    type Output = Decimal;

    fn neg(self) -> Decimal {
        Decimal(-self.0)
    }
}
