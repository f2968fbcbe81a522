//! State shared between an agent's loop, its listener and its handles.

use std::sync::atomic::{AtomicU8, AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};

use sw_core::{AgentId, CloseSignal, NeighborRecord, NeighborTable};
use sw_kinematics::KinematicState;
use sw_transport::Transport;
use tokio::sync::watch;

use crate::AgentStatus;
use crate::listener::ListenerCounters;

pub(crate) struct Shared<T> {
    pub(crate) id:        AgentId,
    pub(crate) status:    AtomicU8,
    pub(crate) stop:      CloseSignal,
    pub(crate) transport: T,
    pub(crate) neighbors: RwLock<NeighborTable>,
    pub(crate) state_tx:  watch::Sender<KinematicState>,
    pub(crate) listener:  ListenerCounters,
    pub(crate) ticks:     AtomicU64,
}

impl<T: Transport> Shared<T> {
    pub(crate) fn new(id: AgentId, initial: KinematicState, transport: T) -> Self {
        let (state_tx, _) = watch::channel(initial);
        Self {
            id,
            status: AtomicU8::new(AgentStatus::Idle as u8),
            stop: CloseSignal::new(),
            transport,
            neighbors: RwLock::new(NeighborTable::new(id)),
            state_tx,
            listener: ListenerCounters::default(),
            ticks: AtomicU64::new(0),
        }
    }

    pub(crate) fn status(&self) -> AgentStatus {
        AgentStatus::from_u8(self.status.load(Ordering::Acquire))
    }

    /// Clone of the neighbor table.  The read guard is released on return.
    pub(crate) fn snapshot_neighbors(&self) -> NeighborTable {
        self.neighbors.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub(crate) fn upsert_neighbor(&self, record: NeighborRecord) -> bool {
        self.neighbors.write().unwrap_or_else(PoisonError::into_inner).upsert(record)
    }

    /// Stop the loop and close the transport.  Returns `true` for the call
    /// that moved the agent to `Stopped`.
    pub(crate) fn stop(&self) -> bool {
        let prev = self.status.swap(AgentStatus::Stopped as u8, Ordering::AcqRel);
        self.stop.close();
        self.transport.close();
        prev != AgentStatus::Stopped as u8
    }
}
