//! `sw-sim`: swarm orchestrator for the rust_swarm framework.
//!
//! # Run loop
//!
//! ```text
//! build:
//!   validate config → seeded placement → bind one transport per agent
//! run:
//!   spawn every agent task
//!   for step in 0..config.max_steps (or until interrupted):
//!     ① read every agent's latest published position
//!     ② observer.on_step(step, positions)
//!     ③ sleep sim_dt
//!   stop every agent → wait up to shutdown_grace → abort stragglers → reap
//! ```
//!
//! The orchestrator never drives agent ticks.  Agents free-run on their own
//! timers; the step counter only paces reporting.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use sw_behavior::ReynoldsFlocking;
//! use sw_core::{SimRng, SimulationConfig};
//! use sw_sim::{NoopObserver, SwarmBuilder};
//! use sw_transport::UdpBinder;
//!
//! let config = SimulationConfig::default();
//! let steering = Arc::new(ReynoldsFlocking::new(config.behavior));
//! let binder = UdpBinder::new(config.transport.host);
//! let rng = SimRng::new(config.seed);
//! let swarm = SwarmBuilder::new(config, steering, binder, rng).build().await?;
//! let summary = swarm.run(&mut NoopObserver).await;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod placement;
pub mod sim;
pub mod view;


pub use builder::SwarmBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use placement::seeded_placement;
pub use sim::{AgentReport, RunSummary, Swarm};
pub use view::SwarmView;
