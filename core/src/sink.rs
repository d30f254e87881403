//! Render sink seam.
//!
//! The controller pushes a DashboardFrame to its sink after every
//! mutation. Sinks own all presentation; nothing they do feeds back
//! into the simulation state.

use crate::{error::SimResult, snapshot::DashboardFrame};

pub trait RenderSink {
    /// Stable name for logs and errors.
    fn name(&self) -> &'static str;

    /// Draw one frame. Must handle an empty series and a series
    /// holding the full horizon.
    fn render(&mut self, frame: &DashboardFrame<'_>) -> SimResult<()>;
}

/// A sink that draws nothing. Use for headless runs and tests.
pub struct NoopSink;

impl RenderSink for NoopSink {
    fn name(&self) -> &'static str { "noop" }

    fn render(&mut self, _frame: &DashboardFrame<'_>) -> SimResult<()> {
        Ok(())
    }
}
