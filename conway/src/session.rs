// session.rs - The current generation and who may touch it
//
// `Simulation` is the only writer. It computes each successor from its own
// copy, then swaps the published snapshot under a write lock. Renderers hold
// a `GridView` and only ever take read locks, so a reader sees either the old
// generation or the new one, never a grid being built.

use crate::evolve;
use crate::grid::{Cell, Grid, GridError};
use crate::patterns::{self, Seed};
use rand::Rng;
use std::collections::VecDeque;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{trace, warn};

/// How many past generations are remembered for cycle detection.
const HISTORY_LEN: usize = 10;

/// Read side consumed by renderers.
pub trait GridSource {
    fn current_grid(&self) -> Arc<Grid>;

    fn dimensions(&self) -> (usize, usize) {
        self.current_grid().dimensions()
    }

    fn cell_state(&self, row: usize, col: usize) -> Result<Cell, GridError> {
        self.current_grid().get(row, col)
    }
}

/// A published generation.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub grid: Arc<Grid>,
    pub generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutcome {
    pub generation: u64,
    pub population: usize,
    /// The new grid matches one of the last few generations.
    pub cycle_detected: bool,
}

/// Cloneable read-only handle on the published generation.
#[derive(Debug, Clone)]
pub struct GridView {
    shared: Arc<RwLock<Snapshot>>,
}

impl GridView {
    pub fn snapshot(&self) -> Snapshot {
        self.shared.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn generation(&self) -> u64 {
        self.snapshot().generation
    }
}

impl GridSource for GridView {
    fn current_grid(&self) -> Arc<Grid> {
        self.snapshot().grid
    }
}

/// Owns the current grid and publishes every replacement.
#[derive(Debug)]
pub struct Simulation {
    current: Arc<Grid>,
    generation: u64,
    shared: Arc<RwLock<Snapshot>>,
    history: VecDeque<u64>,
}

impl Simulation {
    /// Starts a session at generation 0 with `grid`.
    pub fn new(grid: Grid) -> Self {
        let current = Arc::new(grid);
        let shared = Arc::new(RwLock::new(Snapshot { grid: Arc::clone(&current), generation: 0 }));
        let mut simulation = Self {
            current,
            generation: 0,
            shared,
            history: VecDeque::with_capacity(HISTORY_LEN),
        };
        simulation.remember();
        simulation
    }

    /// Creates a `rows` x `cols` grid, seeds it and starts a session on it.
    pub fn seeded<R: Rng + ?Sized>(rows: usize, cols: usize, seed: Seed, rng: &mut R) -> Self {
        let mut grid = Grid::new(rows, cols);
        patterns::seed(&mut grid, seed, rng);
        Self::new(grid)
    }

    pub fn view(&self) -> GridView {
        GridView { shared: Arc::clone(&self.shared) }
    }

    pub fn grid(&self) -> &Grid {
        &self.current
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Advances one generation and publishes it.
    pub fn tick(&mut self) -> TickOutcome {
        let next = evolve::advance(&self.current);
        self.install(next)
    }

    /// Publishes a successor computed elsewhere, e.g. row by row on worker
    /// tasks. `next` must have the dimensions of the current grid.
    pub fn tick_with(&mut self, next: Grid) -> Result<TickOutcome, GridError> {
        let expected = self.current.dimensions();
        if next.dimensions() != expected {
            return Err(GridError::DimensionMismatch { expected, found: next.dimensions() });
        }
        Ok(self.install(next))
    }

    fn install(&mut self, next: Grid) -> TickOutcome {
        self.current = Arc::new(next);
        self.generation += 1;
        self.publish();

        let cycle_detected = self.check_for_cycle();
        let population = self.current.population();
        trace!(generation = self.generation, population, "advanced generation");
        if cycle_detected {
            warn!(generation = self.generation, "grid repeats a recent generation");
        }
        TickOutcome { generation: self.generation, population, cycle_detected }
    }

    /// Re-seeds the grid in place of the current one and restarts at generation 0.
    pub fn reseed<R: Rng + ?Sized>(&mut self, seed: Seed, rng: &mut R) {
        let (rows, cols) = self.current.dimensions();
        let mut grid = Grid::new(rows, cols);
        patterns::seed(&mut grid, seed, rng);
        self.restart(grid);
    }

    /// Flips one cell of the current generation.
    pub fn toggle(&mut self, row: usize, col: usize) -> Result<Cell, GridError> {
        let mut grid = (*self.current).clone();
        let cell = grid.toggle(row, col)?;
        self.current = Arc::new(grid);
        self.history.clear();
        self.remember();
        self.publish();
        Ok(cell)
    }

    fn restart(&mut self, grid: Grid) {
        self.current = Arc::new(grid);
        self.generation = 0;
        self.history.clear();
        self.remember();
        self.publish();
    }

    fn publish(&self) {
        let mut shared = self.shared.write().unwrap_or_else(PoisonError::into_inner);
        *shared = Snapshot { grid: Arc::clone(&self.current), generation: self.generation };
    }

    fn hash_grid(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.current.hash(&mut hasher);
        hasher.finish()
    }

    fn remember(&mut self) {
        if self.history.len() == HISTORY_LEN {
            self.history.pop_front();
        }
        let hash = self.hash_grid();
        self.history.push_back(hash);
    }

    /// Records the current grid and reports whether it was already in the history.
    fn check_for_cycle(&mut self) -> bool {
        let hash = self.hash_grid();
        let seen = self.history.contains(&hash);
        self.remember();
        seen
    }
}

impl GridSource for Simulation {
    fn current_grid(&self) -> Arc<Grid> {
        Arc::clone(&self.current)
    }
}
