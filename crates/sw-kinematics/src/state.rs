//! Per-agent kinematic state.

use sw_core::{ControllerParams, DVec2};

use crate::{integrate_step, limit_acceleration};

/// Position, velocity and the acceleration applied on the most recent tick.
///
/// Owned by exactly one agent loop.  Everyone else sees copies: the wire
/// message, the watch channel feeding observers, and test snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct KinematicState {
    pub position:     DVec2,
    pub velocity:     DVec2,
    pub acceleration: DVec2,
}

impl KinematicState {
    /// A state at `position` moving with `velocity` and no applied acceleration.
    #[inline]
    pub fn new(position: DVec2, velocity: DVec2) -> Self {
        Self { position, velocity, acceleration: DVec2::ZERO }
    }

    #[inline]
    pub fn at_rest(position: DVec2) -> Self {
        Self::new(position, DVec2::ZERO)
    }

    #[inline]
    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }

    /// One controller step: clamp `force` to `limits.max_accel`, record it as
    /// the applied acceleration, then integrate over `dt`.
    pub fn advance(&mut self, force: DVec2, limits: &ControllerParams, dt: f64) {
        self.acceleration = limit_acceleration(force, limits.max_accel);
        let (position, velocity) =
            integrate_step(self.position, self.velocity, self.acceleration, dt, limits.max_speed);
        self.position = position;
        self.velocity = velocity;
    }
}
