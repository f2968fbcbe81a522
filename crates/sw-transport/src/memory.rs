//! In-process broadcast network.
//!
//! A `MemoryNetwork` maps ports to unbounded channels.  It follows the same
//! group addressing as the UDP transport but never touches the OS, so tests
//! can run many swarms side by side.  Delivery is loss-free unless the
//! network was built with [`MemoryNetwork::lossy`].
//!
//! A datagram addressed to a port nobody has bound, or dropped by loss
//! injection, still counts as sent: it was handed to the channel and lost in
//! flight, the same as with UDP.

use std::io;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rustc_hash::FxHashMap;
use sw_core::{CloseSignal, SimRng};
use tokio::sync::mpsc;
use tracing::trace;

use crate::stats::Counters;
use crate::{Binder, Datagram, Transport, TransportError, TransportResult, TransportStats, group_ports};

/// Virtual host every memory endpoint reports as its address.
const HOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

struct Inner {
    endpoints: FxHashMap<u16, mpsc::UnboundedSender<Datagram>>,
    loss:      f64,
    rng:       SimRng,
}

/// Shared handle to one in-process network.  Clones refer to the same network.
#[derive(Clone)]
pub struct MemoryNetwork {
    inner: Arc<Mutex<Inner>>,
}

impl Default for MemoryNetwork {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryNetwork {
    /// A loss-free network.
    pub fn new() -> Self {
        Self::lossy(0.0, 0)
    }

    /// A network that drops each datagram independently with probability
    /// `loss`, drawing from a `SimRng` seeded with `seed`.
    pub fn lossy(loss: f64, seed: u64) -> Self {
        let inner = Inner {
            endpoints: FxHashMap::default(),
            loss:      loss.clamp(0.0, 1.0),
            rng:       SimRng::new(seed),
        };
        Self { inner: Arc::new(Mutex::new(inner)) }
    }

    /// Ports currently bound.
    pub fn bound_ports(&self) -> Vec<u16> {
        let mut ports: Vec<u16> = self.lock().endpoints.keys().copied().collect();
        ports.sort_unstable();
        ports
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn attach(&self, port: u16, port_range: u16) -> TransportResult<MemoryTransport> {
        let addr = SocketAddr::new(HOST, port);
        let mut inner = self.lock();
        if inner.endpoints.contains_key(&port) {
            return Err(TransportError::Bind {
                addr,
                source: io::Error::from(io::ErrorKind::AddrInUse),
            });
        }
        let (tx, rx) = mpsc::unbounded_channel();
        inner.endpoints.insert(port, tx);
        Ok(MemoryTransport {
            network: self.clone(),
            local: addr,
            port_range,
            signal: CloseSignal::new(),
            counters: Counters::default(),
            rx: tokio::sync::Mutex::new(rx),
        })
    }

    fn detach(&self, port: u16) {
        self.lock().endpoints.remove(&port);
    }

    /// Hand `payload` to every bound port of the sender's group.  Returns the
    /// number of datagrams handed over.
    fn deliver(&self, source: SocketAddr, port_range: u16, payload: &[u8], counters: &Counters) -> usize {
        let mut inner = self.lock();
        let Inner { endpoints, loss, rng } = &mut *inner;
        let mut handed = 0;
        for port in group_ports(source.port(), port_range) {
            handed += 1;
            let Some(tx) = endpoints.get(&port) else { continue };
            if *loss > 0.0 && rng.gen_bool(*loss) {
                trace!(%source, port, "datagram dropped by loss injection");
                continue;
            }
            let datagram = Datagram { source, payload: payload.to_vec() };
            if tx.send(datagram).is_err() {
                handed -= 1;
                counters.add_failure();
                trace!(%source, port, "memory endpoint gone");
            }
        }
        handed
    }
}

impl Binder for MemoryNetwork {
    type Transport = MemoryTransport;

    async fn bind(&self, port: u16, port_range: u16) -> TransportResult<MemoryTransport> {
        self.attach(port, port_range)
    }
}

/// One endpoint of a [`MemoryNetwork`].  Closing or dropping it frees the port.
pub struct MemoryTransport {
    network:    MemoryNetwork,
    local:      SocketAddr,
    port_range: u16,
    signal:     CloseSignal,
    counters:   Counters,
    rx:         tokio::sync::Mutex<mpsc::UnboundedReceiver<Datagram>>,
}

impl Transport for MemoryTransport {
    fn local_addr(&self) -> SocketAddr {
        self.local
    }

    fn broadcast(&self, payload: &[u8]) -> usize {
        self.signal
            .while_open(|| {
                let handed = self.network.deliver(self.local, self.port_range, payload, &self.counters);
                self.counters.add_sent(handed);
                handed
            })
            .unwrap_or(0)
    }

    async fn recv(&self) -> Option<Datagram> {
        let mut rx = self.rx.lock().await;
        tokio::select! {
            biased;
            _ = self.signal.closed() => None,
            datagram = rx.recv() => {
                if datagram.is_some() {
                    self.counters.add_received();
                }
                datagram
            }
        }
    }

    fn close(&self) {
        if self.signal.close() {
            self.network.detach(self.local.port());
        }
    }

    fn stats(&self) -> TransportStats {
        self.counters.snapshot()
    }
}

impl Drop for MemoryTransport {
    fn drop(&mut self) {
        self.close();
    }
}
