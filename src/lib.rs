pub mod api;
pub mod config;
pub mod datasource;
pub mod domain;
pub mod notify;
pub mod orchestration;
pub mod valuation;

pub use config::{Config, ConfigError};
pub use datasource::{
    JupiterRpcSource, MockChainSource, OracleSource, PositionSource, SourceError,
};
pub use domain::{
    AccountKey, Decimal, InstrumentInfo, InstrumentTable, OraclePrice, Position, Side,
    ValuedPosition,
};
pub use notify::{NotificationSink, NotifyError, RecordingSink, TelegramSink};
pub use orchestration::{CycleError, Poller};
pub use valuation::{PortfolioSummary, Report, ValuationError};
