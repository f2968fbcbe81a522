//! Reynolds flocking: separation, alignment and cohesion.

use sw_core::{BehaviorParams, DVec2, NeighborTable};
use sw_kinematics::KinematicState;

use crate::SteeringModel;

/// Neighbors closer than this are treated as coincident and ignored.  Also
/// added to the squared distance in the separation term.
pub const EPSILON: f64 = 1e-6;

/// The three flocking terms before weighting.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FlockingTerms {
    /// Σ `-rel / (dist² + EPSILON)` over candidates.
    pub separation:     DVec2,
    /// Mean candidate velocity minus own velocity.
    pub alignment:      DVec2,
    /// Mean candidate position minus own position.
    pub cohesion:       DVec2,
    pub neighbor_count: usize,
}

impl FlockingTerms {
    /// `w_s·separation + w_a·alignment + w_c·cohesion`, unnormalized.
    pub fn weighted(&self, params: &BehaviorParams) -> DVec2 {
        params.separation_weight * self.separation
            + params.alignment_weight * self.alignment
            + params.cohesion_weight * self.cohesion
    }
}

/// Compute the flocking terms for an agent at `position` moving with
/// `velocity`, over the records in `neighbors` within `radius`.
///
/// A record is a candidate when `EPSILON < distance <= radius`.  With no
/// candidates every term is zero.
pub fn flocking_terms(
    position:  DVec2,
    velocity:  DVec2,
    neighbors: &NeighborTable,
    radius:    f64,
) -> FlockingTerms {
    let mut separation = DVec2::ZERO;
    let mut velocity_sum = DVec2::ZERO;
    let mut position_sum = DVec2::ZERO;
    let mut count = 0usize;

    for record in neighbors.iter() {
        let rel = record.position - position;
        let dist = rel.length();
        if dist <= EPSILON || dist > radius {
            continue;
        }
        separation -= rel / (dist * dist + EPSILON);
        velocity_sum += record.velocity;
        position_sum += record.position;
        count += 1;
    }

    if count == 0 {
        return FlockingTerms::default();
    }

    let n = count as f64;
    FlockingTerms {
        separation,
        alignment: velocity_sum / n - velocity,
        cohesion: position_sum / n - position,
        neighbor_count: count,
    }
}

/// Weighted flocking force for `own` given its neighbor snapshot.
pub fn reynolds_force(own: &KinematicState, neighbors: &NeighborTable, params: &BehaviorParams) -> DVec2 {
    flocking_terms(own.position, own.velocity, neighbors, params.neighbor_radius).weighted(params)
}

/// The standard flocking [`SteeringModel`].
#[derive(Debug, Clone, Default)]
pub struct ReynoldsFlocking {
    pub params: BehaviorParams,
}

impl ReynoldsFlocking {
    pub fn new(params: BehaviorParams) -> Self {
        Self { params }
    }
}

impl SteeringModel for ReynoldsFlocking {
    fn steer(&self, own: &KinematicState, neighbors: &NeighborTable) -> DVec2 {
        reynolds_force(own, neighbors, &self.params)
    }
}
