//! Metric synthesizer: maps a tick to one synthetic data point.
//!
//! The only source of nondeterminism in the system. All draws go
//! through the injected UniformSource, one per metric, always in
//! the order utilization, throughput, waiting jobs.

use crate::{
    config::MetricProfile,
    rng::UniformSource,
    state::DataPoint,
    types::Tick,
};

pub fn synthesize(tick: Tick, profile: &MetricProfile, rng: &mut dyn UniformSource) -> DataPoint {
    let utilization = profile.utilization.base + rng.uniform(profile.utilization.jitter);

    let raw_throughput = profile.throughput.base + rng.uniform(profile.throughput.jitter);
    let throughput = raw_throughput / profile.throughput_scale;

    let w = &profile.waiting_jobs;
    let waiting_jobs =
        (w.initial - w.decay_per_tick * tick as f64 + rng.uniform(w.jitter)).max(0.0);

    DataPoint { tick, utilization, throughput, waiting_jobs }
}

/// A profile bundled with the random source that feeds it.
pub struct MetricSynthesizer {
    profile: MetricProfile,
    source:  Box<dyn UniformSource + Send>,
}

impl MetricSynthesizer {
    pub fn new(profile: MetricProfile, source: Box<dyn UniformSource + Send>) -> Self {
        Self { profile, source }
    }

    pub fn synthesize(&mut self, tick: Tick) -> DataPoint {
        synthesize(tick, &self.profile, self.source.as_mut())
    }
}
