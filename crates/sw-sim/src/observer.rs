//! Simulation observer trait for progress reporting and data collection.

use sw_core::{DVec2, Step};

/// Callbacks invoked by [`Swarm::run`][crate::Swarm::run] at key points in
/// the reporting loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  Observers cannot fail the run; one that
/// can hit errors (a file writer, say) should keep the error for its owner to
/// collect afterwards.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_step(&mut self, step: Step, positions: &[DVec2]) {
///         if step.0 % self.interval == 0 {
///             println!("{step}: {} agents", positions.len());
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called once before the first step with the number of agents.
    fn on_start(&mut self, _agent_count: usize) {}

    /// Called every step with each agent's latest published position,
    /// indexed by `AgentId`.
    fn on_step(&mut self, _step: Step, _positions: &[DVec2]) {}

    /// Called once after the last step, before agents are stopped.
    fn on_sim_end(&mut self, _final_step: Step) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

/// An absent observer is a no-op; lets callers enable logging conditionally.
impl<O: SimObserver> SimObserver for Option<O> {
    fn on_start(&mut self, agent_count: usize) {
        if let Some(o) = self {
            o.on_start(agent_count);
        }
    }

    fn on_step(&mut self, step: Step, positions: &[DVec2]) {
        if let Some(o) = self {
            o.on_step(step, positions);
        }
    }

    fn on_sim_end(&mut self, final_step: Step) {
        if let Some(o) = self {
            o.on_sim_end(final_step);
        }
    }
}

/// Pairs fan out to both observers, first then second.
impl<A: SimObserver, B: SimObserver> SimObserver for (A, B) {
    fn on_start(&mut self, agent_count: usize) {
        self.0.on_start(agent_count);
        self.1.on_start(agent_count);
    }

    fn on_step(&mut self, step: Step, positions: &[DVec2]) {
        self.0.on_step(step, positions);
        self.1.on_step(step, positions);
    }

    fn on_sim_end(&mut self, final_step: Step) {
        self.0.on_sim_end(final_step);
        self.1.on_sim_end(final_step);
    }
}
