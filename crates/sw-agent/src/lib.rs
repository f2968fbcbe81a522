//! `sw-agent`: one autonomous agent: control loop, listener and handle.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                       |
//! |--------------|----------------------------------------------------------------|
//! | [`agent`]    | `Agent`, `AgentSettings`, `AgentStatus`: the control loop     |
//! | [`handle`]   | `AgentHandle`: stop, inspect and subscribe from outside       |
//! | [`listener`] | `ingest`, `DropReason`, `ListenerStats`: neighbor ingestion   |
//! | [`error`]    | `AgentError`, `AgentResult`                                    |
//!
//! # Tasks
//!
//! `Agent::run` is the control loop.  It spawns one listener task that
//! drains the agent's transport into its `NeighborTable`.  The two tasks
//! share the table through a `std::sync::RwLock` whose guards are only ever
//! held inside synchronous sections, never across an `.await`.  The loop is
//! the only writer of the agent's `KinematicState`; everyone else reads
//! copies from a `watch` channel.

pub mod agent;
pub mod error;
pub mod handle;
pub mod listener;

mod shared;


pub use agent::{Agent, AgentSettings, AgentStatus};
pub use error::{AgentError, AgentResult};
pub use handle::AgentHandle;
pub use listener::{DropReason, ListenerStats, ingest};
