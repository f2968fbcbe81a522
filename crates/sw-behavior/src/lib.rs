//! `sw-behavior`: steering model trait, flocking rules and scalar consensus.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                       |
//! |---------------|----------------------------------------------------------------|
//! | [`model`]     | `SteeringModel` trait                                          |
//! | [`reynolds`]  | `ReynoldsFlocking`, `flocking_terms`, `reynolds_force`         |
//! | [`consensus`] | `consensus_update`: one gossip-averaging step                 |
//! | [`noop`]      | `NoopSteering`: placeholder that never steers                 |
//!
//! # Design notes
//!
//! Every function here is pure.  A steering model sees a copy of its agent's
//! state and a snapshot of that agent's neighbor table; it never touches the
//! transport and never mutates anything, so one model instance can be shared
//! across all agent tasks behind an `Arc`.

pub mod consensus;
pub mod model;
pub mod noop;
pub mod reynolds;


pub use consensus::consensus_update;
pub use model::SteeringModel;
pub use noop::NoopSteering;
pub use reynolds::{EPSILON, FlockingTerms, ReynoldsFlocking, flocking_terms, reynolds_force};
