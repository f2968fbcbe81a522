//! Per-endpoint traffic counters.

use std::sync::atomic::{AtomicU64, Ordering};

/// Point-in-time copy of an endpoint's counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransportStats {
    /// Datagrams handed to the channel by `broadcast`.
    pub sent:          u64,
    /// Destinations a datagram could not be handed to.
    pub send_failures: u64,
    /// Datagrams returned by `recv`.
    pub received:      u64,
}

/// Live counters, updated lock-free from the send and receive paths.
#[derive(Debug, Default)]
pub(crate) struct Counters {
    sent:          AtomicU64,
    send_failures: AtomicU64,
    received:      AtomicU64,
}

impl Counters {
    pub(crate) fn add_sent(&self, n: usize) {
        self.sent.fetch_add(n as u64, Ordering::Relaxed);
    }

    pub(crate) fn add_failure(&self) {
        self.send_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn add_received(&self) {
        self.received.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> TransportStats {
        TransportStats {
            sent:          self.sent.load(Ordering::Relaxed),
            send_failures: self.send_failures.load(Ordering::Relaxed),
            received:      self.received.load(Ordering::Relaxed),
        }
    }
}
