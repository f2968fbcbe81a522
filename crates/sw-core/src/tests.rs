//! Unit tests for sw-core primitives.

#[cfg(test)]
mod ids {
    use crate::AgentId;

    #[test]
    fn index_roundtrip() {
        let id = AgentId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(AgentId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn display() {
        assert_eq!(AgentId(7).to_string(), "AgentId(7)");
    }
}

#[cfg(test)]
mod time {
    use crate::{Step, unix_now};

    #[test]
    fn step_next_and_display() {
        assert_eq!(Step::ZERO.next(), Step(1));
        assert_eq!(Step(12).to_string(), "S12");
    }

    #[test]
    fn unix_now_is_recent() {
        // 2020-01-01T00:00:00Z
        assert!(unix_now() > 1_577_836_800.0);
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = SimRng::new(12345);
        let mut r2 = SimRng::new(12345);
        for _ in 0..100 {
            assert_eq!(r1.unit(), r2.unit());
        }
    }

    #[test]
    fn different_seeds_differ() {
        let mut r1 = SimRng::new(1);
        let mut r2 = SimRng::new(2);
        assert_ne!(r1.unit(), r2.unit());
    }

    #[test]
    fn symmetric_in_bounds() {
        let mut rng = SimRng::new(0);
        for _ in 0..1000 {
            let v = rng.symmetric(0.1);
            assert!((-0.1..0.1).contains(&v), "got {v}");
        }
        assert_eq!(rng.symmetric(0.0), 0.0);
    }

    #[test]
    fn gen_bool_extremes() {
        let mut rng = SimRng::new(0);
        assert!(!rng.gen_bool(0.0));
        assert!(rng.gen_bool(1.0));
    }
}

#[cfg(test)]
mod neighbor {
    use glam::DVec2;

    use crate::{AgentId, NeighborRecord, NeighborTable};

    fn record(id: u32, x: f64, t: f64) -> NeighborRecord {
        NeighborRecord {
            id:        AgentId(id),
            position:  DVec2::new(x, 0.0),
            velocity:  DVec2::ZERO,
            timestamp: t,
        }
    }

    #[test]
    fn refuses_owner_record() {
        let mut table = NeighborTable::new(AgentId(3));
        assert!(!table.upsert(record(3, 1.0, 0.0)));
        assert!(table.is_empty());
        assert!(!table.contains(AgentId(3)));
    }

    #[test]
    fn upsert_overwrites_whole_record() {
        let mut table = NeighborTable::new(AgentId(0));
        table.upsert(record(1, 1.0, 10.0));
        // An older timestamp still wins: last writer, not latest timestamp.
        table.upsert(record(1, 5.0, 2.0));
        assert_eq!(table.len(), 1);
        let r = table.get(AgentId(1)).unwrap();
        assert_eq!(r.position, DVec2::new(5.0, 0.0));
        assert_eq!(r.timestamp, 2.0);
    }

    #[test]
    fn from_records_skips_owner() {
        let table = NeighborTable::from_records(
            AgentId(1),
            [record(0, 0.0, 0.0), record(1, 1.0, 0.0), record(2, 2.0, 0.0)],
        );
        assert_eq!(table.owner(), AgentId(1));
        assert_eq!(table.len(), 2);
        assert!(table.iter().all(|r| r.id != AgentId(1)));
    }
}

#[cfg(test)]
mod config {
    use crate::{AgentId, CoreError, SimulationConfig};

    #[test]
    fn empty_toml_is_default() {
        let cfg = SimulationConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, SimulationConfig::default());
        assert_eq!(cfg.num_agents, 8);
        assert_eq!(cfg.transport.port_base, 10_000);
        assert_eq!(cfg.transport.port_range, 64);
        assert_eq!(cfg.behavior.neighbor_radius, 2.5);
        assert!(!cfg.logging.enabled);
    }

    #[test]
    fn partial_tables_fill_defaults() {
        let cfg = SimulationConfig::from_toml_str(
            r#"
            num_agents = 12
            sim_dt = 0.02

            [transport]
            host = "127.0.0.1"
            port_base = 20000

            [behavior]
            cohesion_weight = 0.1

            [controller]
            max_speed = 4.0
            "#,
        )
        .unwrap();
        assert_eq!(cfg.num_agents, 12);
        assert!((cfg.tick_period().as_secs_f64() - 0.02).abs() < 1e-9);
        assert_eq!(cfg.transport.port_base, 20_000);
        assert_eq!(cfg.transport.port_range, 64);
        assert_eq!(cfg.behavior.cohesion_weight, 0.1);
        assert_eq!(cfg.behavior.separation_weight, 1.2);
        assert_eq!(cfg.controller.max_speed, 4.0);
        assert_eq!(cfg.controller.max_accel, 1.0);
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let err = SimulationConfig::from_toml_str("num_agents = \"many\"").unwrap_err();
        assert!(matches!(err, CoreError::Parse(_)), "got {err:?}");
    }

    #[test]
    fn validation_rejects_bad_values() {
        let bad: Vec<Box<dyn Fn(&mut SimulationConfig)>> = vec![
            Box::new(|c: &mut SimulationConfig| c.num_agents = 0),
            Box::new(|c: &mut SimulationConfig| c.sim_dt = 0.0),
            Box::new(|c: &mut SimulationConfig| c.sim_dt = f64::NAN),
            Box::new(|c: &mut SimulationConfig| c.sim_dt = 1e20),
            Box::new(|c: &mut SimulationConfig| c.arena_size = [2.0, 10.0]),
            Box::new(|c: &mut SimulationConfig| c.transport.port_range = 0),
            Box::new(|c: &mut SimulationConfig| {
                c.transport.port_base = 65_530;
                c.num_agents = 10;
            }),
            Box::new(|c: &mut SimulationConfig| c.behavior.neighbor_radius = -1.0),
            Box::new(|c: &mut SimulationConfig| c.controller.max_speed = -0.5),
            Box::new(|c: &mut SimulationConfig| c.controller.max_speed = f64::NAN),
            Box::new(|c: &mut SimulationConfig| c.controller.max_accel = f64::INFINITY),
            Box::new(|c: &mut SimulationConfig| c.behavior.neighbor_radius = f64::NAN),
        ];
        for (i, mutate) in bad.iter().enumerate() {
            let mut cfg = SimulationConfig::default();
            mutate(&mut cfg);
            assert!(
                matches!(cfg.validate(), Err(CoreError::Config(_))),
                "case {i} should fail validation"
            );
        }
    }

    #[test]
    fn huge_sim_dt_is_rejected_from_toml() {
        assert!(matches!(SimulationConfig::from_toml_str("sim_dt = 1e20"), Err(CoreError::Config(_))));
    }

    #[test]
    fn last_port_exactly_fits() {
        let mut cfg = SimulationConfig::default();
        cfg.transport.port_base = 65_526;
        cfg.num_agents = 10;
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn port_for_offsets_from_base() {
        let mut cfg = SimulationConfig::default();
        assert_eq!(cfg.port_for(AgentId(3)), Some(10_003));
        cfg.transport.port_base = 65_535;
        assert_eq!(cfg.port_for(AgentId(0)), Some(65_535));
        assert_eq!(cfg.port_for(AgentId(1)), None);
        assert_eq!(cfg.port_for(AgentId(70_000)), None);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = SimulationConfig::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, CoreError::Io(_)));
    }
}

#[cfg(test)]
mod signal {
    use std::sync::Arc;
    use std::time::Duration;

    use crate::CloseSignal;

    #[test]
    fn close_is_idempotent() {
        let s = CloseSignal::new();
        assert!(!s.is_closed());
        assert!(s.close());
        assert!(!s.close());
        assert!(s.is_closed());
    }

    #[test]
    fn while_open_stops_after_close() {
        let s = CloseSignal::new();
        assert_eq!(s.while_open(|| 1), Some(1));
        s.close();
        assert_eq!(s.while_open(|| 1), None);
    }

    #[tokio::test]
    async fn closed_wakes_waiter() {
        let s = Arc::new(CloseSignal::new());
        let waiter = {
            let s = Arc::clone(&s);
            tokio::spawn(async move { s.closed().await })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;
        s.close();
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter should wake")
            .unwrap();
    }

    #[tokio::test]
    async fn closed_resolves_immediately_when_already_closed() {
        let s = CloseSignal::new();
        s.close();
        tokio::time::timeout(Duration::from_millis(100), s.closed())
            .await
            .expect("already closed");
    }
}
