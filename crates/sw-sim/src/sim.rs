//! The `Swarm` orchestrator and its reporting loop.

use std::future::{self, Future};

use sw_agent::{Agent, AgentHandle, ListenerStats};
use sw_behavior::SteeringModel;
use sw_core::{AgentId, DVec2, SimulationConfig, Step};
use sw_kinematics::KinematicState;
use sw_transport::{Transport, TransportStats};
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep, timeout_at};
use tracing::{debug, info, warn};

use crate::{SimObserver, SwarmView};

// ── Reports ───────────────────────────────────────────────────────────────────

/// What one agent looked like when the run ended.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentReport {
    pub id:          AgentId,
    pub final_state: KinematicState,
    pub ticks:       u64,
    /// Size of the agent's neighbor table at shutdown.
    pub neighbors:   usize,
    pub listener:    ListenerStats,
    pub transport:   TransportStats,
    /// `false` if the agent task had to be aborted after the grace period.
    pub clean_exit:  bool,
}

/// Outcome of [`Swarm::run`].
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Reporting steps completed.
    pub steps:       u64,
    pub interrupted: bool,
    /// One report per agent, in `AgentId` order.
    pub agents:      Vec<AgentReport>,
}

impl RunSummary {
    pub fn centroid(&self) -> Option<DVec2> {
        if self.agents.is_empty() {
            return None;
        }
        let sum: DVec2 = self.agents.iter().map(|a| a.final_state.position).sum();
        Some(sum / self.agents.len() as f64)
    }
}

// ── Swarm ─────────────────────────────────────────────────────────────────────

/// A built swarm: one bound, idle agent per id.
///
/// Create via [`SwarmBuilder`][crate::SwarmBuilder].  Agents only start
/// moving once [`run`](Self::run) spawns them.
pub struct Swarm<S: SteeringModel + ?Sized, T: Transport> {
    config:  SimulationConfig,
    agents:  Vec<Agent<S, T>>,
    handles: Vec<AgentHandle<T>>,
}

impl<S: SteeringModel + ?Sized, T: Transport> Swarm<S, T> {
    pub(crate) fn new(config: SimulationConfig, agents: Vec<Agent<S, T>>) -> Self {
        let handles = agents.iter().map(Agent::handle).collect();
        Self { config, agents, handles }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    /// Handles to every agent, in `AgentId` order.  Stay valid after the run.
    pub fn handles(&self) -> &[AgentHandle<T>] {
        &self.handles
    }

    /// A position feed that outlives the swarm.
    pub fn view(&self) -> SwarmView {
        SwarmView::new(&self.handles)
    }

    /// Run for `max_steps` reporting steps.
    pub async fn run<O: SimObserver + ?Sized>(self, observer: &mut O) -> RunSummary {
        self.run_until(observer, future::pending()).await
    }

    /// Run for `max_steps` reporting steps, or until `interrupt` resolves.
    pub async fn run_until<O, F>(self, observer: &mut O, interrupt: F) -> RunSummary
    where
        O: SimObserver + ?Sized,
        F: Future<Output = ()>,
    {
        let Self { config, agents, handles } = self;
        let view = SwarmView::new(&handles);

        info!(agents = agents.len(), max_steps = config.max_steps, "swarm starting");
        let tasks: Vec<JoinHandle<KinematicState>> =
            agents.into_iter().map(|agent| tokio::spawn(agent.run())).collect();

        observer.on_start(handles.len());

        let period = config.tick_period();
        let mut interrupt = std::pin::pin!(interrupt);
        let mut positions = Vec::with_capacity(handles.len());
        let mut step = Step::ZERO;
        let mut interrupted = false;

        while step.0 < config.max_steps {
            view.positions_into(&mut positions);
            observer.on_step(step, &positions);
            tokio::select! {
                biased;
                _ = &mut interrupt => {
                    interrupted = true;
                    info!(%step, "swarm interrupted");
                    break;
                }
                _ = sleep(period) => {}
            }
            step = step.next();
        }

        observer.on_sim_end(step);

        let clean = shutdown(&handles, tasks, &config).await;
        let agents = handles
            .iter()
            .zip(clean)
            .map(|(h, clean_exit)| AgentReport {
                id: h.id(),
                final_state: h.state(),
                ticks: h.ticks(),
                neighbors: h.neighbors().len(),
                listener: h.listener_stats(),
                transport: h.transport_stats(),
                clean_exit,
            })
            .collect();

        info!(steps = step.0, interrupted, "swarm finished");
        RunSummary { steps: step.0, interrupted, agents }
    }
}

/// Stop every agent, give the tasks `shutdown_grace` to exit, then abort the
/// rest.  Returns, per agent, whether its task exited on its own.
///
/// Tasks are aborted only after the grace period, not before it, so a task
/// that exits in time is reported as a clean exit.
async fn shutdown<T: Transport>(
    handles: &[AgentHandle<T>],
    tasks:   Vec<JoinHandle<KinematicState>>,
    config:  &SimulationConfig,
) -> Vec<bool> {
    for handle in handles {
        handle.stop();
    }

    let deadline = Instant::now() + config.shutdown_grace();
    let mut clean = Vec::with_capacity(tasks.len());
    for (handle, mut task) in handles.iter().zip(tasks) {
        match timeout_at(deadline, &mut task).await {
            Ok(Ok(_)) => clean.push(true),
            Ok(Err(e)) => {
                warn!(agent = %handle.id(), error = %e, "agent task failed");
                clean.push(false);
            }
            Err(_) => {
                task.abort();
                debug!(agent = %handle.id(), "agent task aborted after grace period");
                clean.push(false);
            }
        }
    }
    clean
}
