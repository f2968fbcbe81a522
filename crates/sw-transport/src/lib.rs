//! `sw-transport`: best-effort local broadcast between agents.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                          |
//! |------------|-------------------------------------------------------------------|
//! | [`wire`]   | `StateMessage` and its JSON codec                                 |
//! | [`udp`]    | `UdpTransport`, `UdpBinder`: tokio UDP sockets on one host       |
//! | [`memory`] | `MemoryNetwork`, `MemoryTransport`: in-process channels          |
//! | [`stats`]  | `TransportStats` counters                                         |
//! | [`error`]  | `TransportError`, `TransportResult`                               |
//!
//! # Addressing
//!
//! Every endpoint owns one port.  Broadcasting sends the same payload to each
//! port of the endpoint's *group*: the `port_range` contiguous ports starting
//! at `port - port % port_range`, the sender's own port included.  Nothing is
//! acknowledged or retried.

pub mod error;
pub mod memory;
pub mod stats;
pub mod udp;
pub mod wire;

#[cfg(test)]
mod tests;

use std::future::Future;
use std::net::SocketAddr;

pub use error::{TransportError, TransportResult};
pub use memory::{MemoryNetwork, MemoryTransport};
pub use stats::TransportStats;
pub use udp::{UdpBinder, UdpTransport};
pub use wire::{StateMessage, WireError, decode, encode};

/// One received packet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Datagram {
    pub source:  SocketAddr,
    pub payload: Vec<u8>,
}

// ── Transport ─────────────────────────────────────────────────────────────────

/// A bound broadcast endpoint.
///
/// `broadcast` is called from the agent loop, `recv` from the agent's
/// listener task, and `close` from whoever stops the agent, all concurrently
/// through a shared reference.
pub trait Transport: Send + Sync + 'static {
    fn local_addr(&self) -> SocketAddr;

    /// Send `payload` once to every port of this endpoint's group.
    ///
    /// Never waits.  Per-destination failures are counted and logged, not
    /// returned.  Returns the number of datagrams handed to the channel, `0`
    /// once closed.
    fn broadcast(&self, payload: &[u8]) -> usize;

    /// Next datagram, or `None` once the endpoint is closed.
    fn recv(&self) -> impl Future<Output = Option<Datagram>> + Send;

    /// Stop receiving and sending.  Idempotent.  Once this returns, no further
    /// datagram leaves the endpoint.
    fn close(&self);

    fn stats(&self) -> TransportStats;
}

/// Claims endpoints for agents.
pub trait Binder: Send + Sync + 'static {
    type Transport: Transport;

    /// Bind an exclusive endpoint on `port` whose broadcast group is sized
    /// `port_range`.
    fn bind(
        &self,
        port: u16,
        port_range: u16,
    ) -> impl Future<Output = TransportResult<Self::Transport>> + Send;
}

// ── Groups ────────────────────────────────────────────────────────────────────

/// First port of the broadcast group containing `port`.
///
/// A `port_range` of zero is treated as one.
pub fn group_base(port: u16, port_range: u16) -> u16 {
    let range = port_range.max(1);
    port - port % range
}

/// Every port of the broadcast group containing `port`, in ascending order.
///
/// The last group is cut short at `u16::MAX`.
pub fn group_ports(port: u16, port_range: u16) -> impl Iterator<Item = u16> {
    let base = u32::from(group_base(port, port_range));
    let end = (base + u32::from(port_range.max(1))).min(u32::from(u16::MAX) + 1);
    (base..end).filter_map(|p| u16::try_from(p).ok())
}
