//! Seeded initial placement.

use sw_core::{DVec2, SimRng, SimulationConfig};
use sw_kinematics::KinematicState;

/// One initial state per agent, drawn from `rng` in agent order.
///
/// Positions are uniform inside the arena shrunk by `spawn.margin` on every
/// side; each velocity component is uniform in
/// `[-max_initial_speed, max_initial_speed)`.  Per agent the draws are
/// `x, y, vx, vy`, so the same seed always yields the same swarm.
pub fn seeded_placement(config: &SimulationConfig, rng: &mut SimRng) -> Vec<KinematicState> {
    let margin = config.spawn.margin;
    let extent = DVec2::from_array(config.arena_size) - DVec2::splat(2.0 * margin);
    let max_speed = config.spawn.max_initial_speed;

    (0..config.num_agents)
        .map(|_| {
            let position = DVec2::new(margin + rng.unit() * extent.x, margin + rng.unit() * extent.y);
            let velocity = DVec2::new(rng.symmetric(max_speed), rng.symmetric(max_speed));
            KinematicState::new(position, velocity)
        })
        .collect()
}
