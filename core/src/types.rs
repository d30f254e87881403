//! Shared primitive types used across the entire simulation.

/// A simulation tick. One tick = one data point on the chart.
pub type Tick = u64;

/// Identifier of one run of the series, from construction or reset
/// until the next reset.
pub type RunId = String;

/// Default horizon. The simulation auto-stops once this many points exist.
pub const MAX_TICK: Tick = 100;

/// Default cadence of the tick timer, in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 500;

pub fn new_run_id() -> RunId {
    uuid::Uuid::new_v4().to_string()
}
