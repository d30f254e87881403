//! Synthetic scheduler-metrics dashboard engine.
//!
//! A tick-driven simulation that generates one synthetic data point
//! per tick (utilization, throughput, waiting jobs), with play, pause
//! and reset control and a fixed horizon, rendered through a pluggable
//! sink.

pub mod chart;
pub mod command;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod rng;
pub mod sink;
pub mod snapshot;
pub mod state;
pub mod synth;
pub mod timer;
pub mod types;

pub use engine::SimController;
pub use error::{SimError, SimResult};
