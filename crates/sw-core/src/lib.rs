//! `sw-core`: foundational types for the `rust_swarm` flocking framework.
//!
//! This crate is a dependency of every other `sw-*` crate and has no `sw-*`
//! dependencies of its own.
//!
//! # What lives here
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`ids`]         | `AgentId`                                                  |
//! | [`time`]        | `Step`, `unix_now`                                         |
//! | [`rng`]         | `SimRng`: the single injected randomness source           |
//! | [`neighbor`]    | `NeighborRecord`, `NeighborTable`                          |
//! | [`config`]      | `SimulationConfig` and its parameter groups                |
//! | [`signal`]      | `CloseSignal`: one-shot, idempotent stop flag             |
//! | [`error`]       | `CoreError`, `CoreResult`                                  |
//!
//! 2D vectors are `glam::DVec2`, re-exported as [`DVec2`].

pub mod config;
pub mod error;
pub mod ids;
pub mod neighbor;
pub mod rng;
pub mod signal;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{
    BehaviorParams, ControllerParams, LoggingConfig, SimulationConfig, SpawnConfig,
    TransportConfig,
};
pub use error::{CoreError, CoreResult};
pub use glam::DVec2;
pub use ids::AgentId;
pub use neighbor::{NeighborRecord, NeighborTable};
pub use rng::SimRng;
pub use signal::CloseSignal;
pub use time::{Step, unix_now};
