//! Orchestrator step counter and wall-clock timestamps.
//!
//! Agents free-run on their own tick cadence and never see a `Step`.  The
//! step counter belongs to the orchestrator alone and exists only so that
//! loggers and visualizers have a monotonically increasing row key.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

// ── Step ──────────────────────────────────────────────────────────────────────

/// An orchestrator reporting step.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Step(pub u64);

impl Step {
    pub const ZERO: Step = Step(0);

    /// The step after `self`.
    #[inline]
    pub fn next(self) -> Step {
        Step(self.0 + 1)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.0)
    }
}

// ── Wall clock ────────────────────────────────────────────────────────────────

/// Seconds since the Unix epoch as `f64`, the `t` field of every state message.
///
/// A clock set before 1970 yields `0.0` rather than an error; the timestamp
/// is informational only and never used for ordering.
pub fn unix_now() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}
