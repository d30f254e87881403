//! JSON-lines sink: one frame object per line on the IPC channel.

use chrono::{DateTime, Utc};
use schedviz_core::{
    error::{SimError, SimResult},
    sink::RenderSink,
    snapshot::DashboardFrame,
};
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FrameLine<'a> {
    emitted_at: DateTime<Utc>,
    #[serde(flatten)]
    frame:      &'a DashboardFrame<'a>,
}

pub struct JsonLinesSink<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> RenderSink for JsonLinesSink<W> {
    fn name(&self) -> &'static str { "json_lines" }

    fn render(&mut self, frame: &DashboardFrame<'_>) -> SimResult<()> {
        let line = FrameLine { emitted_at: Utc::now(), frame };
        let json = serde_json::to_string(&line)?;
        writeln!(self.out, "{json}")
            .and_then(|_| self.out.flush())
            .map_err(|e| SimError::Sink { sink: "json_lines", reason: e.to_string() })
    }
}
