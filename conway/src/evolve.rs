// evolve.rs - Generation advance under the B3/S23 rule
//
// Edges are closed: neighbours that fall off the board count as dead.

use crate::grid::{Cell, Grid};

const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    ( 0, -1),          ( 0, 1),
    ( 1, -1), ( 1, 0), ( 1, 1),
];

/// Counts live cells among the up-to-8 in-bounds neighbours of `(row, col)`.
/// The cell itself is never counted.
pub fn neighbor_count(grid: &Grid, row: usize, col: usize) -> u8 {
    let mut count = 0;
    for &(dr, dc) in &NEIGHBOR_OFFSETS {
        let (Some(nr), Some(nc)) = (row.checked_add_signed(dr), col.checked_add_signed(dc)) else {
            continue;
        };
        if let Ok(Cell::Alive) = grid.get(nr, nc) {
            count += 1;
        }
    }
    count
}

/// Conway's rule applied to one cell.
pub fn next_state(current: Cell, neighbors: u8) -> Cell {
    match (current, neighbors) {
        (Cell::Alive, 2) | (Cell::Alive, 3) => Cell::Alive, // Survival
        (Cell::Dead, 3)                     => Cell::Alive, // Birth
        _                                   => Cell::Dead,  // Death or stays dead
    }
}

/// Successor states for a single row, read entirely from the pre-advance `grid`.
///
/// Returns an empty vector for a row outside the grid.
pub fn next_row(grid: &Grid, row: usize) -> Vec<Cell> {
    let Some(cells) = grid.row(row) else {
        return Vec::new();
    };
    cells
        .iter()
        .enumerate()
        .map(|(col, &cell)| next_state(cell, neighbor_count(grid, row, col)))
        .collect()
}

/// Computes the next generation into a new grid of the same dimensions.
///
/// The input is only read; writing the successor into a separate grid keeps
/// every neighbour count based on the generation being replaced.
pub fn advance(grid: &Grid) -> Grid {
    let (rows, cols) = grid.dimensions();
    let cells = (0..rows).flat_map(|row| next_row(grid, row)).collect();
    Grid::from_cells(rows, cols, cells)
}
