//! The per-agent control loop.

use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

use sw_behavior::SteeringModel;
use sw_core::{AgentId, ControllerParams, SimulationConfig, unix_now};
use sw_kinematics::KinematicState;
use sw_transport::{Binder, StateMessage, Transport, encode};
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::AgentResult;
use crate::handle::AgentHandle;
use crate::listener::listen;
use crate::shared::Shared;

// ── AgentStatus ───────────────────────────────────────────────────────────────

/// Lifecycle of an agent.  `Stopped` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum AgentStatus {
    Idle    = 0,
    Running = 1,
    Stopped = 2,
}

impl AgentStatus {
    pub(crate) fn from_u8(raw: u8) -> Self {
        match raw {
            0 => AgentStatus::Idle,
            1 => AgentStatus::Running,
            _ => AgentStatus::Stopped,
        }
    }
}

// ── AgentSettings ─────────────────────────────────────────────────────────────

/// Per-agent loop parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentSettings {
    pub id:          AgentId,
    /// Target wall-clock time per tick.
    pub tick_period: Duration,
    /// Integration step, seconds.
    pub dt:          f64,
    pub controller:  ControllerParams,
}

impl AgentSettings {
    /// Settings for agent `id` under `config`: one tick per `sim_dt`.
    pub fn from_config(id: AgentId, config: &SimulationConfig) -> Self {
        Self {
            id,
            tick_period: config.tick_period(),
            dt: config.sim_dt,
            controller: config.controller,
        }
    }
}

// ── Agent ─────────────────────────────────────────────────────────────────────

/// One agent, ready to run.
///
/// `run` consumes the agent; observe and stop it through the [`AgentHandle`]s
/// taken beforehand with [`Agent::handle`].
pub struct Agent<S: SteeringModel + ?Sized, T: Transport> {
    shared:   Arc<Shared<T>>,
    steering: Arc<S>,
    settings: AgentSettings,
    state:    KinematicState,
}

impl<S: SteeringModel + ?Sized, T: Transport> Agent<S, T> {
    pub fn new(settings: AgentSettings, initial: KinematicState, steering: Arc<S>, transport: T) -> Self {
        Self {
            shared: Arc::new(Shared::new(settings.id, initial, transport)),
            steering,
            settings,
            state: initial,
        }
    }

    /// Bind a transport on `port` through `binder`, then build the agent.
    pub async fn bind<B>(
        settings:   AgentSettings,
        initial:    KinematicState,
        steering:   Arc<S>,
        binder:     &B,
        port:       u16,
        port_range: u16,
    ) -> AgentResult<Self>
    where
        B: Binder<Transport = T>,
    {
        let transport = binder.bind(port, port_range).await?;
        Ok(Self::new(settings, initial, steering, transport))
    }

    #[inline]
    pub fn id(&self) -> AgentId {
        self.settings.id
    }

    pub fn handle(&self) -> AgentHandle<T> {
        AgentHandle::new(Arc::clone(&self.shared))
    }

    /// Run the control loop until the agent is stopped.  Returns the final
    /// state.
    ///
    /// Returns at once, without ticking, if the agent was stopped before
    /// `run` was called.
    pub async fn run(mut self) -> KinematicState {
        let shared = Arc::clone(&self.shared);
        let started = shared.status.compare_exchange(
            AgentStatus::Idle as u8,
            AgentStatus::Running as u8,
            Ordering::AcqRel,
            Ordering::Acquire,
        );
        if started.is_err() {
            debug!(agent = %self.id(), "agent stopped before start");
            return self.state;
        }
        debug!(agent = %self.id(), addr = %shared.transport.local_addr(), "agent started");

        let listener = tokio::spawn(listen(Arc::clone(&shared)));

        while !shared.stop.is_closed() {
            let tick_start = Instant::now();
            self.tick();
            let wait = self.settings.tick_period.saturating_sub(tick_start.elapsed());
            tokio::select! {
                biased;
                _ = shared.stop.closed() => break,
                _ = tokio::time::sleep(wait) => {}
            }
        }

        // The listener ends once stop() has closed the transport.
        if let Err(e) = listener.await {
            warn!(agent = %self.id(), error = %e, "listener task failed");
        }
        debug!(agent = %self.id(), ticks = shared.ticks.load(Ordering::Relaxed), "agent finished");
        self.state
    }

    /// Sense, steer, integrate, publish.
    fn tick(&mut self) {
        let neighbors = self.shared.snapshot_neighbors();
        let force = self.steering.steer(&self.state, &neighbors);
        self.state.advance(force, &self.settings.controller, self.settings.dt);
        self.publish();
        self.shared.ticks.fetch_add(1, Ordering::Relaxed);
    }

    fn publish(&self) {
        let msg = StateMessage::new(self.id(), self.state.position, self.state.velocity, unix_now());
        match encode(&msg) {
            Ok(payload) => {
                self.shared.transport.broadcast(&payload);
            }
            Err(e) => warn!(agent = %self.id(), error = %e, "state message not encoded"),
        }
        self.shared.state_tx.send_replace(self.state);
    }
}
