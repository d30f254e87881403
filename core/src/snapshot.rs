//! Read-only views of the simulation handed to render sinks and
//! printed by the runner.

use crate::{
    chart::{ChartSchema, SeriesKey},
    event::SimEvent,
    state::{DataPoint, Phase},
    types::Tick,
};
use serde::Serialize;

/// Everything a sink needs to draw the dashboard once.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardFrame<'a> {
    pub run_id:       &'a str,
    pub phase:        Phase,
    pub is_running:   bool,
    pub current_tick: Tick,
    pub horizon:      Tick,
    pub chart:        &'a ChartSchema,
    pub series:       &'a [DataPoint],
    /// Events that caused this render. Empty for a plain refresh.
    pub events:       &'a [SimEvent],
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct SeriesSummary {
    pub key:  SeriesKey,
    pub min:  f64,
    pub mean: f64,
    pub max:  f64,
    pub last: f64,
}

impl SeriesSummary {
    /// None for an empty series.
    pub fn compute(series: &[DataPoint], key: SeriesKey) -> Option<Self> {
        let last = series.last()?.value(key);
        let (mut min, mut max, mut sum) = (f64::INFINITY, f64::NEG_INFINITY, 0.0);
        for point in series {
            let v = point.value(key);
            min = min.min(v);
            max = max.max(v);
            sum += v;
        }
        Some(Self {
            key,
            min,
            mean: sum / series.len() as f64,
            max,
            last,
        })
    }
}
