//! Deterministic, explicitly injected randomness.
//!
//! There is no process-global RNG anywhere in the workspace.  Whoever needs
//! randomness (initial placement in the orchestrator, loss injection in the
//! in-memory network) receives a `SimRng` built from a seed, so two runs with
//! the same seed place agents identically.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Seeded simulation RNG.
///
/// Used only in single-owner or explicitly synchronised contexts.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Uniform sample in `[0, 1)`.
    #[inline]
    pub fn unit(&mut self) -> f64 {
        self.0.r#gen::<f64>()
    }

    /// Uniform sample in `[-half_width, half_width)`.
    ///
    /// Unlike `gen_range`, a zero width is valid and always yields `0.0`.
    #[inline]
    pub fn symmetric(&mut self, half_width: f64) -> f64 {
        (self.unit() - 0.5) * 2.0 * half_width
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }
}
