use anyhow::Result;
use clap::{Parser, ValueEnum};
use tokio::sync::watch;
use tracing::{Level, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use vitals_sim_core::alerts::{self, AlertLog};
use vitals_sim_core::clock;
use vitals_sim_core::config::SimConfig;
use vitals_sim_core::driver;
use vitals_sim_core::fleet::FleetSession;
use vitals_sim_core::generator::RandomWalk;
use vitals_sim_core::single::SingleSession;
use vitals_sim_core::subject;
use vitals_sim_core::viz;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Single,
    Fleet,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

/// Simulated vitals dashboard in the terminal
#[derive(Parser, Debug)]
#[command(name = "vitals-sim", version)]
struct Cli {
    #[arg(long, value_enum, default_value = "single")]
    mode: Mode,

    /// Stop after this many ticks (default: run until Ctrl-C)
    #[arg(long)]
    ticks: Option<u64>,

    #[arg(long)]
    tick_ms: Option<u64>,

    #[arg(long)]
    history_ms: Option<u64>,

    #[arg(long)]
    history_capacity: Option<usize>,

    #[arg(long)]
    threshold: Option<f32>,

    /// Fixed RNG seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, value_enum, default_value = "info")]
    log_level: LogLevel,
}

impl Cli {
    fn resolve_config(&self) -> Result<SimConfig> {
        let preset = match self.mode {
            Mode::Single => SimConfig::single_subject(),
            Mode::Fleet => SimConfig::default(),
        };
        let mut cfg = SimConfig::from_env(preset)?;

        if let Some(v) = self.tick_ms {
            cfg.tick_interval_ms = v;
        }
        if let Some(v) = self.history_ms {
            cfg.history_interval_ms = v;
        }
        if let Some(v) = self.history_capacity {
            cfg.history_capacity = v;
        }
        if let Some(v) = self.threshold {
            cfg.stress_threshold = v;
        }
        if self.seed.is_some() {
            cfg.rng_seed = self.seed;
        }

        cfg.validate()?;
        Ok(cfg)
    }
}

fn init_logging(level: LogLevel) {
    let filter = EnvFilter::builder()
        .with_default_directive(Level::from(level).into())
        .from_env_lossy();
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

fn walk_for(cfg: &SimConfig) -> RandomWalk {
    match cfg.rng_seed {
        Some(seed) => RandomWalk::seeded(seed, cfg.walk_cfg()),
        None => RandomWalk::from_entropy(cfg.walk_cfg()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    let cfg = cli.resolve_config()?;
    info!(mode = ?cli.mode, ?cfg, "vitals-sim starting");

    let (stop_tx, stop_rx) = watch::channel(false);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                let _ = stop_tx.send(true);
            }
            Err(err) => {
                warn!(%err, "ctrl-c handler unavailable");
                // Dropping the sender would stop the driver.
                std::future::pending::<()>().await;
            }
        }
    });

    match cli.mode {
        Mode::Single => {
            let session = SingleSession::new(cfg.clone(), walk_for(&cfg));
            driver::run_single(session, stop_rx, cli.ticks, |snap| {
                viz::print_lines(&viz::vitals_table(snap));
            })
            .await;
        }
        Mode::Fleet => {
            let session =
                FleetSession::with_roster(cfg.clone(), walk_for(&cfg), subject::default_roster());
            let (_, log) = driver::run_fleet(
                session,
                AlertLog::new(),
                stop_rx,
                cli.ticks,
                |snap, log: &AlertLog| {
                    println!("tick {} @ {}", snap.tick, clock::history_label(snap.at));
                    viz::print_lines(&viz::fleet_table(&snap.subjects, &snap.stats));
                    if snap.crossings > 0 {
                        println!("[alerts] unread={}", log.unread_count());
                    }
                },
            )
            .await;
            alerts::print_summary(&log);
        }
    }

    info!("vitals-sim stopped");
    Ok(())
}
