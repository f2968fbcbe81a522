//! Fluent builder for constructing a [`Swarm`].

use std::collections::BTreeSet;
use std::sync::Arc;

use sw_agent::{Agent, AgentError, AgentSettings};
use sw_behavior::SteeringModel;
use sw_core::{AgentId, CoreError, SimRng, SimulationConfig};
use sw_kinematics::KinematicState;
use sw_transport::{Binder, group_base};
use tracing::{info, warn};

use crate::{SimError, SimResult, Swarm, seeded_placement};

/// Fluent builder for [`Swarm<S, T>`].
///
/// # Required inputs
///
/// - [`SimulationConfig`]: agent count, timing, ports, limits, …
/// - `Arc<S: SteeringModel>`: shared by every agent
/// - `B: Binder`: where endpoints come from (`UdpBinder`, `MemoryNetwork`)
/// - [`SimRng`]: placement randomness, seeded by the caller
///
/// # Optional inputs
///
/// | Method                 | Default                               |
/// |------------------------|---------------------------------------|
/// | `.initial_states(v)`   | [`seeded_placement`] from the `SimRng` |
///
/// # Example
///
/// ```rust,ignore
/// let swarm = SwarmBuilder::new(config, steering, MemoryNetwork::new(), SimRng::new(7))
///     .initial_states(states)
///     .build()
///     .await?;
/// ```
pub struct SwarmBuilder<S: SteeringModel + ?Sized, B: Binder> {
    config:   SimulationConfig,
    steering: Arc<S>,
    binder:   B,
    rng:      SimRng,
    initial:  Option<Vec<KinematicState>>,
}

impl<S: SteeringModel + ?Sized, B: Binder> SwarmBuilder<S, B> {
    pub fn new(config: SimulationConfig, steering: Arc<S>, binder: B, rng: SimRng) -> Self {
        Self { config, steering, binder, rng, initial: None }
    }

    /// Start agents from `states` instead of seeded placement.  Must hold
    /// exactly `num_agents` entries.
    pub fn initial_states(mut self, states: Vec<KinematicState>) -> Self {
        self.initial = Some(states);
        self
    }

    /// Validate the configuration, place agents and bind one endpoint per
    /// agent.  Any bind failure aborts the build and releases the endpoints
    /// already bound.
    pub async fn build(mut self) -> SimResult<Swarm<S, B::Transport>> {
        let config = self.config;
        config.validate()?;
        let n = config.num_agents;

        let states = match self.initial.take() {
            Some(states) => {
                if states.len() != n {
                    return Err(SimError::AgentCountMismatch {
                        expected: n,
                        got:      states.len(),
                        what:     "initial states",
                    });
                }
                states
            }
            None => seeded_placement(&config, &mut self.rng),
        };

        let mut ports = Vec::with_capacity(n);
        for i in 0..n {
            let id = AgentId::try_from(i)
                .map_err(|_| CoreError::Config(format!("agent index {i} does not fit an AgentId")))?;
            let port = config
                .port_for(id)
                .ok_or_else(|| CoreError::Config(format!("no port left for {id}")))?;
            ports.push((id, port));
        }

        let range = config.transport.port_range;
        let groups: BTreeSet<u16> = ports.iter().map(|&(_, port)| group_base(port, range)).collect();
        if groups.len() > 1 {
            warn!(
                groups = groups.len(),
                port_range = range,
                "agents span several broadcast groups; agents in different groups never hear each other"
            );
        }

        let mut agents = Vec::with_capacity(n);
        for ((id, port), state) in ports.into_iter().zip(states) {
            let settings = AgentSettings::from_config(id, &config);
            let agent = Agent::bind(settings, state, Arc::clone(&self.steering), &self.binder, port, range)
                .await
                .map_err(|e| match e {
                    AgentError::Transport(source) => SimError::Bind { agent: id, source },
                })?;
            agents.push(agent);
        }

        info!(agents = n, port_base = config.transport.port_base, port_range = range, "swarm built");
        Ok(Swarm::new(config, agents))
    }
}
