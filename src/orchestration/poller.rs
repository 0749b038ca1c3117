//! Fixed-interval polling of the valuation pipeline.
//!
//! Each cycle runs fetch -> value -> summarize -> format to completion
//! before the next tick is awaited, so at most one cycle is ever in flight.
//! Cycle state never outlives the cycle.

use crate::datasource::{OracleSource, PositionSource, SourceError};
use crate::domain::{InstrumentInfo, InstrumentTable, Position};
use crate::notify::NotificationSink;
use crate::valuation::{self, Report};
use chrono::Local;
use futures::future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum CycleError {
    #[error(transparent)]
    Source(#[from] SourceError),
}

/// Drives the valuation pipeline on a fixed interval.
pub struct Poller {
    positions: Arc<dyn PositionSource>,
    oracles: Arc<dyn OracleSource>,
    sink: Arc<dyn NotificationSink>,
    instruments: InstrumentTable,
    wallet: String,
    interval: Duration,
}

impl Poller {
    pub fn new(
        positions: Arc<dyn PositionSource>,
        oracles: Arc<dyn OracleSource>,
        sink: Arc<dyn NotificationSink>,
        instruments: InstrumentTable,
        wallet: String,
        interval: Duration,
    ) -> Self {
        Self {
            positions,
            oracles,
            sink,
            instruments,
            wallet,
            interval,
        }
    }

    /// Poll forever. The first cycle runs immediately, then one per
    /// interval tick; ticks are awaited only after the previous cycle
    /// finished.
    pub async fn run(&self) {
        let mut ticker = tokio::time::interval(self.interval);
        loop {
            ticker.tick().await;
            self.poll_once().await;
        }
    }

    /// Run one cycle and dispatch its report to the console and the
    /// notification sink. A failed cycle is logged and produces no
    /// notification; a failed delivery is logged and nothing more.
    pub async fn poll_once(&self) {
        match self.run_cycle().await {
            Ok(report) => {
                println!("{}", report.console_text);
                if let Err(e) = self.sink.send(&report.message_text).await {
                    warn!("notification delivery failed: {}", e);
                }
            }
            Err(e) => error!("poll cycle failed: {}", e),
        }
    }

    /// One pass of fetch -> value -> summarize -> format.
    pub async fn run_cycle(&self) -> Result<Report, CycleError> {
        let timestamp = Local::now().format("%H:%M:%S").to_string();

        let positions = self.positions.fetch_open_positions(&self.wallet).await?;

        // Resolve custodies up front; unknown ones are skipped, not fatal.
        let mut resolved: Vec<(&Position, &InstrumentInfo)> = Vec::new();
        for (account, position) in &positions {
            match self.instruments.get(position.custody.as_str()) {
                Some(instrument) => resolved.push((position, instrument)),
                None => warn!(
                    account = %account,
                    custody = %position.custody,
                    "unknown custody, skipping position"
                ),
            }
        }

        // Oracle reads are independent; run them concurrently. Ordering of
        // the results (and the report) still follows the source ordering.
        let prices = future::try_join_all(
            resolved
                .iter()
                .map(|(_, instrument)| self.oracles.fetch_price(&instrument.oracle_address)),
        )
        .await?;

        let mut valued = Vec::new();
        for ((position, instrument), price) in resolved.iter().zip(prices) {
            match valuation::value(position, &price, instrument) {
                Ok(v) => valued.push(v),
                Err(e) => warn!(
                    custody = %position.custody,
                    "skipping unvaluable position: {}", e
                ),
            }
        }

        let summary = valuation::summarize(&valued);
        Ok(valuation::format(
            &valued,
            summary.as_ref(),
            &timestamp,
            &self.wallet,
        ))
    }
}
