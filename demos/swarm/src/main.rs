//! swarm: decentralized flocking over a lossy local broadcast.
//!
//! Spawns `num_agents` agents, each with its own control loop and its own
//! endpoint, and lets them flock for `max_steps` reporting steps or until
//! Ctrl-C.  Agents only know what they hear from each other.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use sw_behavior::ReynoldsFlocking;
use sw_core::{DVec2, SimRng, SimulationConfig, Step};
use sw_output::{CsvWriter, SimOutputObserver};
use sw_sim::{RunSummary, SimObserver, SwarmBuilder};
use sw_transport::{Binder, MemoryNetwork, UdpBinder};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "swarm")]
#[command(about = "Decentralized flocking agents over local UDP broadcast")]
struct Cli {
    /// TOML configuration file; defaults apply to every missing key
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Override num_agents
    #[arg(long)]
    agents: Option<usize>,

    /// Override max_steps
    #[arg(long)]
    steps: Option<u64>,

    /// Override seed
    #[arg(long)]
    seed: Option<u64>,

    /// Use the in-process network instead of UDP sockets
    #[arg(long)]
    memory: bool,

    /// Enable debug logging
    #[arg(long, short)]
    verbose: bool,
}

impl Cli {
    fn load_config(&self) -> Result<SimulationConfig> {
        let mut config = match &self.config {
            Some(path) => SimulationConfig::from_file(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => SimulationConfig::default(),
        };
        if let Some(n) = self.agents {
            config.num_agents = n;
        }
        if let Some(steps) = self.steps {
            config.max_steps = steps;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        config.validate()?;
        Ok(config)
    }
}

// ── Progress observer ─────────────────────────────────────────────────────────

/// Logs the swarm's centroid and spread every `interval` steps.
struct Progress {
    interval: u64,
}

impl SimObserver for Progress {
    fn on_start(&mut self, agent_count: usize) {
        info!(agent_count, "reporting started");
    }

    fn on_step(&mut self, step: Step, positions: &[DVec2]) {
        if step.0 % self.interval != 0 || positions.is_empty() {
            return;
        }
        let centroid = positions.iter().copied().sum::<DVec2>() / positions.len() as f64;
        let spread = positions.iter().map(|p| p.distance(centroid)).fold(0.0, f64::max);
        info!(%step, x = centroid.x, y = centroid.y, spread, "swarm");
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = cli.load_config()?;
    info!(
        agents = config.num_agents,
        steps = config.max_steps,
        seed = config.seed,
        transport = if cli.memory { "memory" } else { "udp" },
        "configuration loaded"
    );

    let t0 = Instant::now();
    let summary = if cli.memory {
        run(config.clone(), MemoryNetwork::new()).await?
    } else {
        run(config.clone(), UdpBinder::new(config.transport.host)).await?
    };
    let elapsed = t0.elapsed();

    print_summary(&summary, elapsed.as_secs_f64());
    if config.logging.enabled {
        println!("positions logged to {}", config.logging.path.display());
    }
    Ok(())
}

async fn run<B: Binder>(config: SimulationConfig, binder: B) -> Result<RunSummary> {
    let csv = if config.logging.enabled {
        let writer = CsvWriter::new(&config.logging.path, config.num_agents)
            .with_context(|| format!("opening {}", config.logging.path.display()))?;
        Some(SimOutputObserver::new(writer))
    } else {
        None
    };
    let progress = Progress { interval: (1.0 / config.sim_dt).round().max(1.0) as u64 };

    let steering = Arc::new(ReynoldsFlocking::new(config.behavior));
    let rng = SimRng::new(config.seed);
    let swarm = SwarmBuilder::new(config, steering, binder, rng).build().await?;

    let mut observer = (progress, csv);
    let interrupt = async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };
    let summary = swarm.run_until(&mut observer, interrupt).await;

    if let Some(e) = observer.1.as_mut().and_then(SimOutputObserver::take_error) {
        eprintln!("output error: {e}");
    }
    Ok(summary)
}

fn print_summary(summary: &RunSummary, elapsed_secs: f64) {
    println!();
    println!(
        "Run {} after {} steps in {:.2} s",
        if summary.interrupted { "interrupted" } else { "complete" },
        summary.steps,
        elapsed_secs
    );
    if let Some(c) = summary.centroid() {
        println!("Final centroid: ({:.3}, {:.3})", c.x, c.y);
    }
    println!();
    println!(
        "{:<6} {:>9} {:>9} {:>7} {:>7} {:>5} {:>8} {:>6}",
        "Agent", "x", "y", "speed", "ticks", "nbrs", "heard", "bad"
    );
    println!("{}", "-".repeat(64));
    for a in &summary.agents {
        println!(
            "{:<6} {:>9.3} {:>9.3} {:>7.3} {:>7} {:>5} {:>8} {:>6}",
            a.id.0,
            a.final_state.position.x,
            a.final_state.position.y,
            a.final_state.speed(),
            a.ticks,
            a.neighbors,
            a.listener.accepted,
            a.listener.malformed,
        );
    }
}
