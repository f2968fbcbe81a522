//! The `OutputWriter` trait implemented by backend writers.

use sw_core::{DVec2, Step};

use crate::OutputResult;

/// A sink for per-step agent positions.
///
/// Errors are returned here but swallowed by [`SimOutputObserver`]
/// (see [`take_error`][crate::SimOutputObserver::take_error]), so a failing
/// log never stops a run.
///
/// [`SimOutputObserver`]: crate::SimOutputObserver
pub trait OutputWriter {
    /// Append one row: `positions[i]` belongs to `AgentId(i)`.
    fn write_step(&mut self, step: Step, positions: &[DVec2]) -> OutputResult<()>;

    /// Flush all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
