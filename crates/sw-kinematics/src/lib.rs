//! `sw-kinematics`: agent kinematic state and one-step integration.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                     |
//! |----------------|--------------------------------------------------------------|
//! | [`state`]      | `KinematicState`: position / velocity / last acceleration   |
//! | [`integrator`] | `integrate_step`, `limit_acceleration`                       |
//!
//! # Movement model
//!
//! Semi-implicit Euler with a speed cap:
//!
//! ```text
//! v' = v + a·dt            (a already clamped to max_accel)
//! v' = v' · max_speed/|v'| if |v'| > max_speed
//! p' = p + v'·dt
//! ```
//!
//! Non-finite inputs propagate unchanged; nothing here masks NaN or infinity.

pub mod integrator;
pub mod state;


pub use integrator::{integrate_step, limit_acceleration};
pub use state::KinematicState;
