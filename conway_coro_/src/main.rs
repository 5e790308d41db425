// main.rs - Conway's Game of Life driven by a tokio worker
//
// The worker task owns the simulation and advances it on a timer; the egui
// window only reads published generations and sends commands back.

use anyhow::{Context, anyhow};
use clap::Parser;
use conway::{Seed, Simulation};
use eframe::egui;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod coro;      // Row coroutines
mod ui;        // egui renderer
mod worker;    // Simulation owner

use worker::{Command, Engine, Worker, WorkerStatus};

#[derive(Parser, Debug)]
#[command(name = "conway_coro")]
#[command(about = "Conway's Game of Life on a bounded grid")]
struct Cli {
    /// Grid rows
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u16).range(1..))]
    rows: u16,

    /// Grid columns
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u16).range(1..))]
    cols: u16,

    /// Starting state: `clear`, `random` or a built-in pattern name
    #[arg(long, default_value = "gosper-glider-gun")]
    seed_mode: Seed,

    /// Place a named pattern in the middle of the grid instead of the corner
    #[arg(long)]
    center: bool,

    /// Milliseconds between generations
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u64).range(1..))]
    interval_ms: u64,

    /// Seed for the random fill, for reproducible runs
    #[arg(long)]
    rng_seed: Option<u64>,

    /// Start paused
    #[arg(long)]
    paused: bool,

    /// How generations are computed
    #[arg(long, value_enum, default_value_t = Engine::Rows)]
    engine: Engine,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let interval = Duration::from_millis(cli.interval_ms);
    let seed = if cli.center { cli.seed_mode.centered() } else { cli.seed_mode };

    let mut rng = match cli.rng_seed {
        Some(value) => StdRng::seed_from_u64(value),
        None => StdRng::from_entropy(),
    };
    let simulation = Simulation::seeded(usize::from(cli.rows), usize::from(cli.cols), seed, &mut rng);
    let view = simulation.view();

    let runtime = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (status_tx, status_rx) = watch::channel(WorkerStatus::new(!cli.paused, interval));
    let worker = Worker::new(simulation, rng, cli.engine, !cli.paused, interval, status_tx);
    let worker_handle = runtime.spawn(worker.run(command_rx));

    info!(rows = cli.rows, cols = cli.cols, %seed, "opening window");
    let app = ui::LifeApp::new(view, command_tx.clone(), status_rx);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 700.0]),
        ..Default::default()
    };
    let gui_result = eframe::run_native(
        "Conway's Game of Life",
        options,
        Box::new(move |_cc| Box::new(app)),
    );

    // The window is gone either way; stop the worker before reporting.
    let _ = command_tx.send(Command::Shutdown);
    runtime
        .block_on(worker_handle)
        .context("worker task panicked")??;
    gui_result.map_err(|err| anyhow!("window failed: {err}"))
}
