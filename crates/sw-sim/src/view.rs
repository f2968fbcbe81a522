//! Read-only position feed for visualizers.

use sw_agent::AgentHandle;
use sw_core::DVec2;
use sw_kinematics::KinematicState;
use sw_transport::Transport;
use tokio::sync::watch;

/// Latest published state of every agent, in `AgentId` order.
///
/// Clones are independent and can be moved to another task or thread.  A
/// view keeps answering with the final states after the swarm has stopped.
#[derive(Clone)]
pub struct SwarmView {
    feeds: Vec<watch::Receiver<KinematicState>>,
}

impl SwarmView {
    pub fn new<T: Transport>(handles: &[AgentHandle<T>]) -> Self {
        Self { feeds: handles.iter().map(AgentHandle::subscribe).collect() }
    }

    pub fn len(&self) -> usize {
        self.feeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.feeds.is_empty()
    }

    pub fn states(&self) -> Vec<KinematicState> {
        self.feeds.iter().map(|rx| *rx.borrow()).collect()
    }

    pub fn positions(&self) -> Vec<DVec2> {
        let mut out = Vec::with_capacity(self.feeds.len());
        self.positions_into(&mut out);
        out
    }

    /// Overwrite `out` with the current positions, reusing its allocation.
    pub fn positions_into(&self, out: &mut Vec<DVec2>) {
        out.clear();
        out.extend(self.feeds.iter().map(|rx| rx.borrow().position));
    }

    /// Mean position, or `None` for an empty swarm.
    pub fn centroid(&self) -> Option<DVec2> {
        if self.feeds.is_empty() {
            return None;
        }
        let sum: DVec2 = self.feeds.iter().map(|rx| rx.borrow().position).sum();
        Some(sum / self.feeds.len() as f64)
    }
}
