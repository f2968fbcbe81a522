//! Pure integration helpers.

use sw_core::DVec2;

/// Scale `force` down to at most `max_accel`, preserving its direction.
///
/// Never scales up: a force already within the cap is returned unchanged.
#[inline]
pub fn limit_acceleration(force: DVec2, max_accel: f64) -> DVec2 {
    force.clamp_length_max(max_accel)
}

/// Advance one step under `accel`.  Returns `(position', velocity')`.
///
/// The new velocity is rescaled to exactly `max_speed` when it would exceed
/// it; the position is advanced with the clamped velocity.
pub fn integrate_step(
    position:  DVec2,
    velocity:  DVec2,
    accel:     DVec2,
    dt:        f64,
    max_speed: f64,
) -> (DVec2, DVec2) {
    let mut new_vel = velocity + accel * dt;
    let speed = new_vel.length();
    if speed > max_speed {
        new_vel *= max_speed / speed;
    }
    let new_pos = position + new_vel * dt;
    (new_pos, new_vel)
}
