//! A no-op steering model: agents coast on their current velocity.

use sw_core::{DVec2, NeighborTable};
use sw_kinematics::KinematicState;

use crate::SteeringModel;

/// A [`SteeringModel`] that always returns the zero force.
///
/// Useful in tests where agents should keep a predictable straight-line
/// course regardless of what their neighbors broadcast.
pub struct NoopSteering;

impl SteeringModel for NoopSteering {
    fn steer(&self, _own: &KinematicState, _neighbors: &NeighborTable) -> DVec2 {
        DVec2::ZERO
    }
}
