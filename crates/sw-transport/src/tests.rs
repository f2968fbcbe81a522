//! Unit tests for sw-transport.

use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use sw_core::{AgentId, DVec2};
use tokio::time::timeout;

use crate::{
    Binder, MemoryNetwork, StateMessage, Transport, TransportError, UdpBinder, decode, encode,
    group_base, group_ports,
};

const WAIT: Duration = Duration::from_millis(500);
const QUIET: Duration = Duration::from_millis(50);

// ── Groups ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod groups {
    use super::*;

    #[test]
    fn base_is_aligned_to_range() {
        assert_eq!(group_base(10_000, 64), 9_984);
        assert_eq!(group_base(10_005, 64), 9_984);
        assert_eq!(group_base(10_048, 64), 10_048);
    }

    #[test]
    fn ports_cover_whole_group() {
        let ports: Vec<u16> = group_ports(10_005, 64).collect();
        assert_eq!(ports.len(), 64);
        assert_eq!(ports[0], 9_984);
        assert_eq!(*ports.last().unwrap(), 10_047);
        assert!(ports.contains(&10_005));
    }

    #[test]
    fn last_group_stops_at_max_port() {
        let ports: Vec<u16> = group_ports(65_535, 1_000).collect();
        assert_eq!(ports.first(), Some(&65_000));
        assert_eq!(ports.last(), Some(&u16::MAX));
        assert_eq!(ports.len(), 536);
    }

    #[test]
    fn zero_range_is_just_self() {
        assert_eq!(group_ports(4_321, 0).collect::<Vec<_>>(), vec![4_321]);
    }
}

// ── Wire codec ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod wire {
    use super::*;

    #[test]
    fn encodes_expected_fields() {
        let msg = StateMessage::new(AgentId(3), DVec2::new(1.5, 2.0), DVec2::new(0.1, -0.2), 7.25);
        let value: serde_json::Value = serde_json::from_slice(&encode(&msg).unwrap()).unwrap();
        assert_eq!(value["id"], 3);
        assert_eq!(value["position"][0], 1.5);
        assert_eq!(value["velocity"][1], -0.2);
        assert_eq!(value["t"], 7.25);
    }

    #[test]
    fn decode_ignores_unknown_fields() {
        let raw = br#"{"id":1,"position":[0,1],"velocity":[2,3],"t":4.5,"extra":"x"}"#;
        let msg = decode(raw).unwrap();
        assert_eq!(msg.agent(), AgentId(1));
        assert_eq!(msg.position, [0.0, 1.0]);
    }

    #[test]
    fn decode_rejects_missing_field() {
        assert!(decode(br#"{"id":1,"position":[0,1],"t":4.5}"#).is_err());
    }

    #[test]
    fn decode_rejects_mistyped_field() {
        assert!(decode(br#"{"id":"one","position":[0,1],"velocity":[0,0],"t":0}"#).is_err());
        assert!(decode(br#"{"id":1,"position":[0],"velocity":[0,0],"t":0}"#).is_err());
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(decode(b"\xff\x00not json").is_err());
        assert!(decode(b"").is_err());
    }

    #[test]
    fn non_finite_values_do_not_survive() {
        let msg = StateMessage::new(AgentId(0), DVec2::new(f64::NAN, 0.0), DVec2::ZERO, 0.0);
        let bytes = encode(&msg).unwrap();
        assert!(decode(&bytes).is_err());
    }

    #[test]
    fn into_record_copies_state() {
        let rec = StateMessage::new(AgentId(9), DVec2::new(1.0, 2.0), DVec2::new(3.0, 4.0), 5.0)
            .into_record();
        assert_eq!(rec.id, AgentId(9));
        assert_eq!(rec.position, DVec2::new(1.0, 2.0));
        assert_eq!(rec.velocity, DVec2::new(3.0, 4.0));
        assert_eq!(rec.timestamp, 5.0);
    }
}

// ── MemoryNetwork ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod memory {
    use super::*;

    #[tokio::test]
    async fn broadcast_reaches_whole_group_including_self() {
        let net = MemoryNetwork::new();
        let a = net.bind(100, 4).await.unwrap();
        let b = net.bind(101, 4).await.unwrap();
        let c = net.bind(103, 4).await.unwrap();

        assert_eq!(a.broadcast(b"hi"), 4);

        for t in [&a, &b, &c] {
            let d = timeout(WAIT, t.recv()).await.unwrap().unwrap();
            assert_eq!(d.payload, b"hi");
            assert_eq!(d.source, a.local_addr());
        }
    }

    #[tokio::test]
    async fn other_groups_hear_nothing() {
        let net = MemoryNetwork::new();
        let a = net.bind(100, 4).await.unwrap();
        let far = net.bind(104, 4).await.unwrap();
        a.broadcast(b"hi");
        assert!(timeout(QUIET, far.recv()).await.is_err());
    }

    #[tokio::test]
    async fn double_bind_is_refused() {
        let net = MemoryNetwork::new();
        let _a = net.bind(7, 8).await.unwrap();
        match net.bind(7, 8).await {
            Err(TransportError::Bind { addr, source }) => {
                assert_eq!(addr.port(), 7);
                assert_eq!(source.kind(), std::io::ErrorKind::AddrInUse);
            }
            Err(e) => panic!("unexpected error {e}"),
            Ok(_) => panic!("second bind succeeded"),
        }
    }

    #[tokio::test]
    async fn close_ends_recv_and_silences_broadcast() {
        let net = MemoryNetwork::new();
        let a = net.bind(10, 2).await.unwrap();
        let b = net.bind(11, 2).await.unwrap();

        a.close();
        a.close();
        assert_eq!(a.broadcast(b"late"), 0);
        assert!(timeout(WAIT, a.recv()).await.unwrap().is_none());
        assert!(timeout(QUIET, b.recv()).await.is_err());
        assert_eq!(a.stats().sent, 0);
    }

    #[tokio::test]
    async fn close_wakes_pending_recv() {
        let net = MemoryNetwork::new();
        let a = std::sync::Arc::new(net.bind(20, 2).await.unwrap());
        let waiter = {
            let a = a.clone();
            tokio::spawn(async move { a.recv().await })
        };
        tokio::time::sleep(QUIET).await;
        a.close();
        let got = timeout(WAIT, waiter).await.unwrap().unwrap();
        assert!(got.is_none());
    }

    #[tokio::test]
    async fn closing_frees_the_port() {
        let net = MemoryNetwork::new();
        let a = net.bind(30, 2).await.unwrap();
        assert_eq!(net.bound_ports(), vec![30]);
        a.close();
        assert!(net.bound_ports().is_empty());
        let again = net.bind(30, 2).await.unwrap();
        drop(a);
        assert_eq!(net.bound_ports(), vec![30]);
        drop(again);
        assert!(net.bound_ports().is_empty());
    }

    #[tokio::test]
    async fn total_loss_delivers_nothing() {
        let net = MemoryNetwork::lossy(1.0, 1);
        let a = net.bind(40, 2).await.unwrap();
        let b = net.bind(41, 2).await.unwrap();
        assert_eq!(a.broadcast(b"x"), 2);
        assert!(timeout(QUIET, b.recv()).await.is_err());
    }

    #[tokio::test]
    async fn partial_loss_drops_some() {
        let net = MemoryNetwork::lossy(0.5, 7);
        let a = net.bind(50, 2).await.unwrap();
        let b = net.bind(51, 2).await.unwrap();
        for _ in 0..200 {
            a.broadcast(b"x");
        }
        let mut got = 0;
        while timeout(QUIET, b.recv()).await.is_ok() {
            got += 1;
        }
        assert!(got > 20 && got < 180, "got {got}");
    }

    #[tokio::test]
    async fn stats_count_traffic() {
        let net = MemoryNetwork::new();
        let a = net.bind(60, 2).await.unwrap();
        let b = net.bind(61, 2).await.unwrap();
        a.broadcast(b"1");
        a.broadcast(b"2");
        timeout(WAIT, b.recv()).await.unwrap().unwrap();
        timeout(WAIT, b.recv()).await.unwrap().unwrap();
        assert_eq!(a.stats().sent, 4);
        assert_eq!(a.stats().send_failures, 0);
        assert_eq!(b.stats().received, 2);
    }
}

// ── UdpTransport ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod udp {
    use super::*;

    fn binder() -> UdpBinder {
        UdpBinder::new(IpAddr::V4(Ipv4Addr::LOCALHOST))
    }

    #[tokio::test]
    async fn broadcast_reaches_group_peer() {
        let a = binder().bind(47_310, 2).await.unwrap();
        let b = binder().bind(47_311, 2).await.unwrap();

        assert_eq!(a.broadcast(b"ping"), 2);
        let d = timeout(WAIT, b.recv()).await.unwrap().unwrap();
        assert_eq!(d.payload, b"ping");
        assert_eq!(d.source.port(), 47_310);
        assert_eq!(b.stats().received, 1);
    }

    #[tokio::test]
    async fn bind_conflict_is_reported() {
        let _a = binder().bind(47_320, 4).await.unwrap();
        match binder().bind(47_320, 4).await {
            Err(TransportError::Bind { addr, .. }) => assert_eq!(addr.port(), 47_320),
            Err(e) => panic!("unexpected error {e}"),
            Ok(_) => panic!("second bind succeeded"),
        }
    }

    #[tokio::test]
    async fn closed_endpoint_is_silent() {
        let a = binder().bind(47_330, 2).await.unwrap();
        let b = binder().bind(47_331, 2).await.unwrap();
        a.close();
        assert_eq!(a.broadcast(b"late"), 0);
        assert!(timeout(WAIT, a.recv()).await.unwrap().is_none());
        assert!(timeout(QUIET, b.recv()).await.is_err());
    }

    #[tokio::test]
    async fn close_frees_the_port_for_rebind() {
        let a = binder().bind(47_340, 2).await.unwrap();
        a.close();
        let again = binder().bind(47_340, 2).await.unwrap();
        assert_eq!(again.local_addr().port(), 47_340);

        // The old handle stays inert.
        assert_eq!(a.broadcast(b"ghost"), 0);
        assert!(timeout(WAIT, a.recv()).await.unwrap().is_none());
    }
}
