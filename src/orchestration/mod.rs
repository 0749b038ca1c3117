//! Cycle orchestration: the fixed-interval poller driving the pipeline.

pub mod poller;

pub use poller::{CycleError, Poller};
