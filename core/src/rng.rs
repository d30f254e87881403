//! Injectable randomness.
//!
//! RULE: Nothing in the simulation may call any platform RNG.
//! The synthesizer draws every random value through a UniformSource
//! handed to it by the controller, so a run is fully reproducible
//! from its seed and tests can pin every draw.

use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

/// A source of uniform draws in [0.0, 1.0).
pub trait UniformSource {
    /// Roll a float in [0.0, 1.0).
    fn next_f64(&mut self) -> f64;

    /// Roll a float in [0.0, span).
    fn uniform(&mut self, span: f64) -> f64 {
        self.next_f64() * span
    }
}

/// Seeded PCG stream used for real runs.
pub struct MetricRng {
    seed:  u64,
    inner: Pcg64Mcg,
}

impl MetricRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            inner: Pcg64Mcg::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl UniformSource for MetricRng {
    fn next_f64(&mut self) -> f64 {
        use rand::RngCore;
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }
}

/// Returns the same draw forever. Values outside [0, 1) are clamped in.
#[derive(Debug, Clone, Copy)]
pub struct ConstantSource(pub f64);

impl UniformSource for ConstantSource {
    fn next_f64(&mut self) -> f64 {
        self.0.clamp(0.0, 1.0 - f64::EPSILON)
    }
}
