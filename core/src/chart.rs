//! Static chart schema handed to every render sink.

use serde::{Deserialize, Serialize};

/// Which metric of a DataPoint a chart line plots.
/// Keys serialize to the same names the data points use.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum SeriesKey {
    Utilization,
    Throughput,
    WaitingJobs,
}

impl SeriesKey {
    pub const ALL: [SeriesKey; 3] = [Self::Utilization, Self::Throughput, Self::WaitingJobs];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Utilization => "utilization",
            Self::Throughput  => "throughput",
            Self::WaitingJobs => "waitingJobs",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeriesDef {
    pub key:    SeriesKey,
    pub label:  String,
    /// Stroke identifier, a `#rrggbb` colour in the stock schema.
    pub stroke: String,
}

impl SeriesDef {
    pub fn new(key: SeriesKey, label: &str, stroke: &str) -> Self {
        Self {
            key,
            label:  label.to_string(),
            stroke: stroke.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChartSchema {
    pub title:        String,
    pub x_axis_label: String,
    pub series:       Vec<SeriesDef>,
}

impl Default for ChartSchema {
    fn default() -> Self {
        Self {
            title:        "Real-time GNN-RL Scheduler Performance".into(),
            x_axis_label: "Time (s)".into(),
            series: vec![
                SeriesDef::new(SeriesKey::Utilization, "Resource Utilization (%)", "#8884d8"),
                SeriesDef::new(SeriesKey::Throughput,  "Throughput (k jobs/s)",    "#82ca9d"),
                SeriesDef::new(SeriesKey::WaitingJobs, "Waiting Jobs",             "#ff7300"),
            ],
        }
    }
}
