// worker.rs - The task that owns the simulation
//
// All writes to the grid happen here. The UI sends `Command`s and reads the
// published generation through its `GridView`.

use crate::coro;
use conway::{GridSource, Seed, Simulation, TickOutcome};
use rand::rngs::StdRng;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, warn};

/// How each generation is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Engine {
    /// Straight pass over the grid.
    Serial,
    /// One cooperative tokio task per row.
    Rows,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Pause,
    /// Advance exactly one generation.
    Step,
    Clear,
    Seed(Seed),
    Toggle { row: usize, col: usize },
    SetInterval(Duration),
    Shutdown,
}

/// What the UI needs to know about the worker besides the grid itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerStatus {
    pub running: bool,
    pub interval: Duration,
    pub last_tick: Option<TickOutcome>,
}

impl WorkerStatus {
    pub fn new(running: bool, interval: Duration) -> Self {
        Self { running, interval, last_tick: None }
    }
}

pub struct Worker {
    simulation: Simulation,
    rng: StdRng,
    engine: Engine,
    running: bool,
    interval: Duration,
    status: watch::Sender<WorkerStatus>,
}

impl Worker {
    pub fn new(
        simulation: Simulation,
        rng: StdRng,
        engine: Engine,
        running: bool,
        interval: Duration,
        status: watch::Sender<WorkerStatus>,
    ) -> Self {
        Self { simulation, rng, engine, running, interval, status }
    }

    /// Runs until `Shutdown` arrives or every command sender is dropped.
    pub async fn run(mut self, mut commands: mpsc::UnboundedReceiver<Command>) -> anyhow::Result<()> {
        info!(engine = ?self.engine, interval = ?self.interval, running = self.running, "worker started");
        let mut ticker = new_ticker(self.interval);
        self.publish_status(None);

        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    None | Some(Command::Shutdown) => break,
                    Some(Command::SetInterval(interval)) => {
                        self.interval = interval;
                        ticker = new_ticker(interval);
                        debug!(?interval, "tick interval changed");
                        self.publish_status(None);
                    }
                    Some(command) => self.handle(command).await?,
                },
                _ = ticker.tick(), if self.running => {
                    self.step().await?;
                }
            }
        }

        info!(generation = self.simulation.generation(), "worker stopped");
        Ok(())
    }

    async fn handle(&mut self, command: Command) -> anyhow::Result<()> {
        debug!(?command, "command");
        match command {
            Command::Start => self.running = true,
            Command::Pause => self.running = false,
            Command::Step => {
                self.running = false;
                self.step().await?;
                return Ok(());
            }
            Command::Clear => {
                self.running = false;
                self.simulation.reseed(Seed::Clear, &mut self.rng);
            }
            Command::Seed(seed) => {
                self.running = false;
                self.simulation.reseed(seed, &mut self.rng);
            }
            Command::Toggle { row, col } => {
                if let Err(err) = self.simulation.toggle(row, col) {
                    warn!(%err, "ignoring toggle");
                }
            }
            Command::SetInterval(_) | Command::Shutdown => {}
        }
        self.publish_status(None);
        Ok(())
    }

    async fn step(&mut self) -> anyhow::Result<()> {
        let outcome = match self.engine {
            Engine::Serial => self.simulation.tick(),
            Engine::Rows => {
                let next = coro::advance_by_rows(self.simulation.current_grid()).await?;
                self.simulation.tick_with(next)?
            }
        };
        if outcome.cycle_detected && self.running {
            warn!(generation = outcome.generation, "cycle detected, pausing");
            self.running = false;
        }
        self.publish_status(Some(outcome));
        Ok(())
    }

    fn publish_status(&self, last_tick: Option<TickOutcome>) {
        let running = self.running;
        let interval = self.interval;
        self.status.send_modify(|status| {
            status.running = running;
            status.interval = interval;
            if last_tick.is_some() {
                status.last_tick = last_tick;
            }
        });
    }
}

fn new_ticker(interval: Duration) -> time::Interval {
    let mut ticker = time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}
