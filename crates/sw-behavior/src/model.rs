//! The `SteeringModel` trait: the main extension point for user code.

use sw_core::{DVec2, NeighborTable};
use sw_kinematics::KinematicState;

/// Pluggable per-tick steering.
///
/// Called once per agent tick with the agent's current state and a snapshot
/// of its neighbor table.  The returned force is left unnormalized; the agent
/// loop clamps it to `max_accel` before integrating.
///
/// # Thread safety
///
/// Every agent task holds an `Arc` to the same model, so implementations must
/// be `Send + Sync`.  Per-agent state belongs in the agent, not the model.
///
/// # Example
///
/// ```rust,ignore
/// struct SeekOrigin;
///
/// impl SteeringModel for SeekOrigin {
///     fn steer(&self, own: &KinematicState, _neighbors: &NeighborTable) -> DVec2 {
///         -own.position
///     }
/// }
/// ```
pub trait SteeringModel: Send + Sync + 'static {
    fn steer(&self, own: &KinematicState, neighbors: &NeighborTable) -> DVec2;
}
