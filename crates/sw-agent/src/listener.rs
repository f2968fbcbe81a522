//! Neighbor-state ingestion.
//!
//! Every datagram is decoded on its own.  A bad packet is counted and
//! dropped; the listener only ends when its transport stops yielding
//! datagrams.  Accepted records overwrite whatever the table held for that
//! id, so a late packet with an older timestamp still wins.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use sw_core::{AgentId, NeighborRecord};
use sw_transport::{Transport, WireError, decode};
use thiserror::Error;
use tracing::trace;

use crate::shared::Shared;

/// Why a datagram did not become a neighbor record.
#[derive(Debug, Error)]
pub enum DropReason {
    #[error("malformed payload: {0}")]
    Malformed(#[from] WireError),

    #[error("message from self")]
    OwnMessage,
}

/// Turn one payload into a record for the agent `own`.
pub fn ingest(own: AgentId, payload: &[u8]) -> Result<NeighborRecord, DropReason> {
    let msg = decode(payload)?;
    if msg.agent() == own {
        return Err(DropReason::OwnMessage);
    }
    Ok(msg.into_record())
}

/// Point-in-time copy of a listener's counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListenerStats {
    pub accepted:  u64,
    pub malformed: u64,
    /// The agent's own broadcasts, which come back because its port is in
    /// its own group.
    pub own:       u64,
}

#[derive(Debug, Default)]
pub(crate) struct ListenerCounters {
    accepted:  AtomicU64,
    malformed: AtomicU64,
    own:       AtomicU64,
}

impl ListenerCounters {
    fn count(&self, outcome: &Result<NeighborRecord, DropReason>) {
        let counter = match outcome {
            Ok(_) => &self.accepted,
            Err(DropReason::Malformed(_)) => &self.malformed,
            Err(DropReason::OwnMessage) => &self.own,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> ListenerStats {
        ListenerStats {
            accepted:  self.accepted.load(Ordering::Relaxed),
            malformed: self.malformed.load(Ordering::Relaxed),
            own:       self.own.load(Ordering::Relaxed),
        }
    }
}

/// Listener task body.  Runs until the transport is closed.
pub(crate) async fn listen<T: Transport>(shared: Arc<Shared<T>>) {
    while let Some(datagram) = shared.transport.recv().await {
        let outcome = ingest(shared.id, &datagram.payload);
        shared.listener.count(&outcome);
        match outcome {
            Ok(record) => {
                shared.upsert_neighbor(record);
            }
            Err(DropReason::Malformed(e)) => {
                trace!(agent = %shared.id, source = %datagram.source, error = %e, "dropped malformed datagram");
            }
            Err(DropReason::OwnMessage) => {}
        }
    }
    trace!(agent = %shared.id, "listener finished");
}
