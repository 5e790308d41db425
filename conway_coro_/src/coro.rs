// coro.rs - Generation advance with one coroutine per row
//
// Every row task reads the same immutable snapshot, so the result is identical
// to `conway::evolve::advance`; the tasks just interleave.

use conway::evolve::{neighbor_count, next_state};
use conway::{Cell, Grid};
use std::sync::Arc;

/// Row coroutine: computes one row of the next generation.
async fn process_row(row_index: usize, current_grid: Arc<Grid>) -> (usize, Vec<Cell>) {
    let cols = current_grid.cols();
    let mut row_result = Vec::with_capacity(cols);
    for col in 0..cols {
        let current = current_grid.get(row_index, col).unwrap_or_default();
        let count = neighbor_count(&current_grid, row_index, col);
        row_result.push(next_state(current, count));

        tokio::task::yield_now().await; // Cooperative yielding!
    }
    (row_index, row_result) // Return (row_id, completed_row)
}

/// Spawns all row coroutines at once and assembles their rows into the next grid.
pub async fn advance_by_rows(current_grid: Arc<Grid>) -> anyhow::Result<Grid> {
    let (rows, cols) = current_grid.dimensions();
    let mut next_grid = Grid::new(rows, cols);

    let handles: Vec<_> = (0..rows)
        .map(|row| tokio::spawn(process_row(row, Arc::clone(&current_grid))))
        .collect();

    for handle in handles {
        let (row_index, completed_row) = handle.await?;
        for (col, cell) in completed_row.into_iter().enumerate() {
            next_grid.set(row_index, col, cell)?;
        }
    }
    Ok(next_grid)
}
