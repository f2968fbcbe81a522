//! Run configuration.
//!
//! Loaded once from TOML by the application crate, validated, then shared
//! read-only by the orchestrator and every agent.  Every field has a default,
//! so an empty file is a valid configuration:
//!
//! ```toml
//! num_agents = 8
//! arena_size = [10.0, 10.0]
//! sim_dt     = 0.05
//! max_steps  = 1000
//! seed       = 42
//!
//! [transport]
//! port_base  = 10000
//! port_range = 64
//!
//! [behavior]
//! neighbor_radius = 2.5
//!
//! [controller]
//! max_accel = 1.0
//! max_speed = 2.0
//! ```

use std::net::{IpAddr, Ipv4Addr};
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{AgentId, CoreError, CoreResult};

// ── SimulationConfig ──────────────────────────────────────────────────────────

/// Top-level simulation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of agents to spawn.  Agent ids are `0..num_agents`.
    pub num_agents: usize,

    /// Arena width and height.  Only used for initial placement; agents are
    /// free to leave it.
    pub arena_size: [f64; 2],

    /// Seconds per agent tick.  Also the integration step and the
    /// orchestrator's reporting period.
    pub sim_dt: f64,

    /// Orchestrator steps before shutdown.
    pub max_steps: u64,

    /// Seed for the orchestrator's `SimRng`.
    pub seed: u64,

    /// Pause after stopping every agent before the run returns.
    pub shutdown_grace_ms: u64,

    pub spawn:      SpawnConfig,
    pub transport:  TransportConfig,
    pub behavior:   BehaviorParams,
    pub controller: ControllerParams,
    pub logging:    LoggingConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_agents:        8,
            arena_size:        [10.0, 10.0],
            sim_dt:            0.05,
            max_steps:         1000,
            seed:              42,
            shutdown_grace_ms: 100,
            spawn:             SpawnConfig::default(),
            transport:         TransportConfig::default(),
            behavior:          BehaviorParams::default(),
            controller:        ControllerParams::default(),
            logging:           LoggingConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Load and validate a configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate a configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> CoreResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the orchestrator cannot run.
    pub fn validate(&self) -> CoreResult<()> {
        if self.num_agents == 0 {
            return Err(CoreError::Config("num_agents must be at least 1".into()));
        }
        let representable = Duration::try_from_secs_f64(self.sim_dt).is_ok();
        if !(representable && self.sim_dt > 0.0) {
            return Err(CoreError::Config(format!(
                "sim_dt must be a positive number of seconds, got {}",
                self.sim_dt
            )));
        }
        let margin = self.spawn.margin;
        if !(margin.is_finite() && margin >= 0.0) {
            return Err(CoreError::Config(format!("spawn.margin must be non-negative, got {margin}")));
        }
        for (axis, extent) in ["width", "height"].into_iter().zip(self.arena_size) {
            if !(extent.is_finite() && extent > 2.0 * margin) {
                return Err(CoreError::Config(format!(
                    "arena {axis} {extent} leaves no room inside a spawn margin of {margin}"
                )));
            }
        }
        if !(self.spawn.max_initial_speed.is_finite() && self.spawn.max_initial_speed >= 0.0) {
            return Err(CoreError::Config("spawn.max_initial_speed must be non-negative".into()));
        }
        if self.transport.port_range == 0 {
            return Err(CoreError::Config("transport.port_range must be at least 1".into()));
        }
        let last_port = self.transport.port_base as u64 + self.num_agents as u64 - 1;
        if last_port > u16::MAX as u64 {
            return Err(CoreError::Config(format!(
                "{} agents starting at port {} overflow the port space",
                self.num_agents, self.transport.port_base
            )));
        }
        if !non_negative(self.behavior.neighbor_radius) {
            return Err(CoreError::Config("behavior.neighbor_radius must be non-negative".into()));
        }
        if !(non_negative(self.controller.max_accel) && non_negative(self.controller.max_speed)) {
            return Err(CoreError::Config("controller limits must be non-negative".into()));
        }
        Ok(())
    }

    /// `sim_dt` as a `Duration`.  Only meaningful on a validated config.
    pub fn tick_period(&self) -> Duration {
        Duration::from_secs_f64(self.sim_dt)
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_millis(self.shutdown_grace_ms)
    }

    /// Port agent `id` binds: `port_base + id`, or `None` past `u16::MAX`.
    pub fn port_for(&self, id: AgentId) -> Option<u16> {
        u16::try_from(id.0).ok()?.checked_add(self.transport.port_base)
    }
}

fn non_negative(x: f64) -> bool {
    x.is_finite() && x >= 0.0
}

// ── Parameter groups ──────────────────────────────────────────────────────────

/// Initial placement of agents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// Distance kept clear between spawned agents and the arena edge.
    pub margin: f64,
    /// Each initial velocity component is drawn from `[-max, max)`.
    pub max_initial_speed: f64,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self { margin: 1.0, max_initial_speed: 0.1 }
    }
}

/// Local broadcast addressing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    pub host: IpAddr,
    /// Agent `i` binds `port_base + i`.
    pub port_base: u16,
    /// Size of the contiguous port block one broadcast reaches.
    pub port_range: u16,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            host:       IpAddr::V4(Ipv4Addr::LOCALHOST),
            port_base:  10_000,
            port_range: 64,
        }
    }
}

/// Flocking weights and perception radius.  Immutable for a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorParams {
    pub neighbor_radius:   f64,
    pub separation_weight: f64,
    pub alignment_weight:  f64,
    pub cohesion_weight:   f64,
}

impl Default for BehaviorParams {
    fn default() -> Self {
        Self {
            neighbor_radius:   2.5,
            separation_weight: 1.2,
            alignment_weight:  1.0,
            cohesion_weight:   0.8,
        }
    }
}

/// Actuation limits.  Immutable for a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerParams {
    pub max_accel: f64,
    pub max_speed: f64,
}

impl Default for ControllerParams {
    fn default() -> Self {
        Self { max_accel: 1.0, max_speed: 2.0 }
    }
}

/// CSV position log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub enabled: bool,
    pub path:    PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { enabled: false, path: PathBuf::from("logs/run.csv") }
    }
}
