//! Core domain types: exact decimals, positions, oracle prices, instruments.

pub mod decimal;
pub mod instrument;
pub mod position;
pub mod primitives;

pub use decimal::{pow10, Decimal};
pub use instrument::{InstrumentInfo, InstrumentTable};
pub use position::{OraclePrice, Position, ValuedPosition};
pub use primitives::{AccountKey, Side, USD_SCALE};
