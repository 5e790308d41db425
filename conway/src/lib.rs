//! Conway's Game of Life on a bounded grid.
//!
//! The crate covers the simulation itself: the [`Grid`] of [`Cell`]s, the
//! B3/S23 generation step in [`evolve`], a lenient RLE reader in [`rle`], the
//! built-in patterns and seeding in [`patterns`], and the single-writer
//! [`Simulation`] that publishes generations to renderers through
//! [`GridView`]. Drawing and timing are left to the caller.
//!
//! ```
//! use conway::{evolve, rle, Cell, Grid};
//!
//! let mut grid = Grid::new(5, 5);
//! rle::load_pattern("x = 3, y = 1\n3o!", &mut grid, (2, 1));
//! let next = evolve::advance(&grid);
//! assert_eq!(next.get(1, 2), Ok(Cell::Alive));
//! assert_eq!(next.get(2, 1), Ok(Cell::Dead));
//! ```

pub mod evolve;
pub mod grid;
pub mod patterns;
pub mod rle;
pub mod session;

pub use evolve::advance;
pub use grid::{Cell, Grid, GridError, InvalidCell};
pub use patterns::{BuiltinPattern, ParseSeedError, Seed};
pub use rle::{load_pattern, Placement, RlePattern};
pub use session::{GridSource, GridView, Simulation, Snapshot, TickOutcome};
