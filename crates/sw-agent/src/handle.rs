//! Outside view of a running agent.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::Ordering;

use sw_core::{AgentId, NeighborTable};
use sw_kinematics::KinematicState;
use sw_transport::{Transport, TransportStats};
use tokio::sync::watch;
use tracing::debug;

use crate::AgentStatus;
use crate::listener::ListenerStats;
use crate::shared::Shared;

/// Cheap, cloneable handle to one agent.
///
/// Handles never mutate the agent's kinematic state or neighbor table.  The
/// only thing they can change is the lifecycle, through [`stop`](Self::stop).
pub struct AgentHandle<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Clone for AgentHandle<T> {
    fn clone(&self) -> Self {
        Self { shared: Arc::clone(&self.shared) }
    }
}

impl<T: Transport> AgentHandle<T> {
    pub(crate) fn new(shared: Arc<Shared<T>>) -> Self {
        Self { shared }
    }

    #[inline]
    pub fn id(&self) -> AgentId {
        self.shared.id
    }

    pub fn status(&self) -> AgentStatus {
        self.shared.status()
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.shared.transport.local_addr()
    }

    /// Most recently published state.  The initial state until the first tick.
    pub fn state(&self) -> KinematicState {
        *self.shared.state_tx.borrow()
    }

    /// A receiver that sees every state published from now on.
    pub fn subscribe(&self) -> watch::Receiver<KinematicState> {
        self.shared.state_tx.subscribe()
    }

    /// Copy of the agent's current neighbor table.
    pub fn neighbors(&self) -> NeighborTable {
        self.shared.snapshot_neighbors()
    }

    pub fn listener_stats(&self) -> ListenerStats {
        self.shared.listener.snapshot()
    }

    pub fn transport_stats(&self) -> TransportStats {
        self.shared.transport.stats()
    }

    /// Completed control-loop ticks.
    pub fn ticks(&self) -> u64 {
        self.shared.ticks.load(Ordering::Relaxed)
    }

    /// Stop the agent and close its transport.
    ///
    /// Idempotent and safe at any point of the agent's cycle, including
    /// before `run`.  Once this returns, the agent sends nothing more.
    pub fn stop(&self) {
        if self.shared.stop() {
            debug!(agent = %self.shared.id, "agent stop requested");
        }
    }
}
