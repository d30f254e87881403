use crate::{
    chart::ChartSchema,
    error::{SimError, SimResult},
    types::{Tick, DEFAULT_TICK_INTERVAL_MS, MAX_TICK},
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;

/// A value drawn as `base + U(0, jitter)`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct JitterBand {
    pub base:   f64,
    pub jitter: f64,
}

/// `max(0, initial - decay_per_tick * tick + U(0, jitter))`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DecayBand {
    pub initial:        f64,
    pub decay_per_tick: f64,
    pub jitter:         f64,
}

/// Constants of the metric synthesizer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MetricProfile {
    /// Percent.
    pub utilization:      JitterBand,
    /// Raw jobs/sec before scaling.
    pub throughput:       JitterBand,
    /// Divisor applied to throughput for display (1000 => k jobs/s).
    pub throughput_scale: f64,
    pub waiting_jobs:     DecayBand,
}

impl Default for MetricProfile {
    fn default() -> Self {
        Self {
            utilization:      JitterBand { base: 65.0, jitter: 20.0 },
            throughput:       JitterBand { base: 35_000.0, jitter: 10_000.0 },
            throughput_scale: 1_000.0,
            waiting_jobs:     DecayBand { initial: 100.0, decay_per_tick: 2.0, jitter: 30.0 },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimConfig {
    pub seed:             u64,
    pub horizon:          Tick,
    pub tick_interval_ms: u64,
    pub metrics:          MetricProfile,
    pub chart:            ChartSchema,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed:             42,
            horizon:          MAX_TICK,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            metrics:          MetricProfile::default(),
            chart:            ChartSchema::default(),
        }
    }
}

impl SimConfig {
    /// Load and validate a JSON config file. Missing fields take defaults.
    pub fn load(path: &str) -> SimResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: SimConfig = serde_json::from_str(&content)?;
        config.validate()?;
        log::info!("Loaded config from {path} (seed={}, horizon={})", config.seed, config.horizon);
        Ok(config)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn validate(&self) -> SimResult<()> {
        if self.horizon == 0 {
            return Err(invalid("horizon", "must be at least 1 tick"));
        }
        if self.tick_interval_ms == 0 {
            return Err(invalid("tick_interval_ms", "must be positive"));
        }

        let m = &self.metrics;
        for (field, jitter) in [
            ("metrics.utilization.jitter", m.utilization.jitter),
            ("metrics.throughput.jitter", m.throughput.jitter),
            ("metrics.waiting_jobs.jitter", m.waiting_jobs.jitter),
        ] {
            if !(jitter >= 0.0 && jitter.is_finite()) {
                return Err(invalid(field, format!("jitter must be finite and >= 0, got {jitter}")));
            }
        }
        if !(m.throughput_scale > 0.0 && m.throughput_scale.is_finite()) {
            return Err(invalid(
                "metrics.throughput_scale",
                format!("must be finite and > 0, got {}", m.throughput_scale),
            ));
        }

        if self.chart.series.is_empty() {
            return Err(invalid("chart.series", "at least one series is required"));
        }
        let mut seen = HashSet::new();
        for def in &self.chart.series {
            if !seen.insert(def.key) {
                return Err(invalid("chart.series", format!("duplicate key '{}'", def.key.as_str())));
            }
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> SimError {
    SimError::InvalidConfig { field, reason: reason.into() }
}
