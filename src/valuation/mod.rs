//! The valuation pipeline: value positions, aggregate, render reports.

pub mod report;
pub mod summary;
pub mod valuator;

pub use report::{format, Report};
pub use summary::{summarize, PortfolioSummary};
pub use valuator::{rescale_to_usd_frame, value, ValuationError};
