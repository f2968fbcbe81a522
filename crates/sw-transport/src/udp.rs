//! UDP endpoints on a single host.
//!
//! Each agent binds `host:port`.  Broadcast is emulated by sending one
//! datagram to every port of the group with `try_send_to`, which fails fast
//! instead of waiting for socket readiness, so a full send buffer costs a
//! dropped datagram rather than a stalled agent loop.

use std::net::{IpAddr, SocketAddr};
use std::sync::{Arc, PoisonError};
use std::time::Duration;

use sw_core::CloseSignal;
use tokio::net::UdpSocket;
use tokio::sync::Mutex;
use tracing::{debug, trace};

use crate::stats::Counters;
use crate::{Binder, Datagram, Transport, TransportError, TransportResult, TransportStats, group_ports};

/// Largest payload a single `recv` can return.
const RECV_BUFFER: usize = 64 * 1024;

/// Pause after a failed `recv_from` before trying again.
const RECV_ERROR_BACKOFF: Duration = Duration::from_millis(10);

/// Binds [`UdpTransport`]s on `host`.
#[derive(Debug, Clone, Copy)]
pub struct UdpBinder {
    pub host: IpAddr,
}

impl UdpBinder {
    pub fn new(host: IpAddr) -> Self {
        Self { host }
    }
}

impl Binder for UdpBinder {
    type Transport = UdpTransport;

    async fn bind(&self, port: u16, port_range: u16) -> TransportResult<UdpTransport> {
        UdpTransport::bind(SocketAddr::new(self.host, port), port_range).await
    }
}

/// A bound UDP endpoint.  `close` drops the socket, so the port can be bound
/// again right away.
pub struct UdpTransport {
    socket:     std::sync::Mutex<Option<Arc<UdpSocket>>>,
    local:      SocketAddr,
    port_range: u16,
    signal:     CloseSignal,
    counters:   Counters,
    buf:        Mutex<Vec<u8>>,
}

impl UdpTransport {
    pub async fn bind(addr: SocketAddr, port_range: u16) -> TransportResult<Self> {
        let socket = UdpSocket::bind(addr)
            .await
            .map_err(|source| TransportError::Bind { addr, source })?;
        let local = socket.local_addr()?;
        debug!(%local, port_range, "udp endpoint bound");
        Ok(Self {
            socket: std::sync::Mutex::new(Some(Arc::new(socket))),
            local,
            port_range,
            signal: CloseSignal::new(),
            counters: Counters::default(),
            buf: Mutex::new(vec![0; RECV_BUFFER]),
        })
    }

    /// The live socket, or `None` once closed.
    fn socket(&self) -> Option<Arc<UdpSocket>> {
        self.socket.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl Transport for UdpTransport {
    fn local_addr(&self) -> SocketAddr {
        self.local
    }

    fn broadcast(&self, payload: &[u8]) -> usize {
        self.signal
            .while_open(|| {
                let Some(socket) = self.socket() else { return 0 };
                let mut handed = 0;
                for port in group_ports(self.local.port(), self.port_range) {
                    let dest = SocketAddr::new(self.local.ip(), port);
                    match socket.try_send_to(payload, dest) {
                        Ok(_) => handed += 1,
                        Err(e) => {
                            self.counters.add_failure();
                            trace!(%dest, error = %e, "udp send failed");
                        }
                    }
                }
                self.counters.add_sent(handed);
                handed
            })
            .unwrap_or(0)
    }

    async fn recv(&self) -> Option<Datagram> {
        let mut buf = self.buf.lock().await;
        let socket = self.socket()?;
        loop {
            tokio::select! {
                biased;
                _ = self.signal.closed() => return None,
                res = socket.recv_from(&mut buf[..]) => match res {
                    Ok((n, source)) => {
                        self.counters.add_received();
                        return Some(Datagram { source, payload: buf[..n].to_vec() });
                    }
                    // ICMP errors from earlier sends surface here on some
                    // platforms; the socket itself is still usable.
                    Err(e) => debug!(local = %self.local, error = %e, "udp recv error"),
                },
            }
            tokio::select! {
                biased;
                _ = self.signal.closed() => return None,
                _ = tokio::time::sleep(RECV_ERROR_BACKOFF) => {}
            }
        }
    }

    fn close(&self) {
        if self.signal.close() {
            self.socket.lock().unwrap_or_else(PoisonError::into_inner).take();
            debug!(local = %self.local, "udp endpoint closed");
        }
    }

    fn stats(&self) -> TransportStats {
        self.counters.snapshot()
    }
}
