// grid.rs - Cell and Grid types for Conway's Game of Life

use std::fmt;
use std::ops::Range;
use thiserror::Error;

/// State of a single cell. There are exactly two.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    Alive,
    #[default]
    Dead,
}

impl Cell {
    pub fn is_alive(self) -> bool {
        self == Cell::Alive
    }

    pub fn toggled(self) -> Cell {
        match self {
            Cell::Alive => Cell::Dead,
            Cell::Dead  => Cell::Alive,
        }
    }

    pub fn glyph(self) -> char {
        match self {
            Cell::Alive => '█',
            Cell::Dead  => '.',
        }
    }
}

impl From<bool> for Cell {
    fn from(alive: bool) -> Self {
        if alive { Cell::Alive } else { Cell::Dead }
    }
}

/// A character that names no cell state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unrecognized cell character {0:?}")]
pub struct InvalidCell(pub char);

impl TryFrom<char> for Cell {
    type Error = InvalidCell;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'o' | 'O' | '*' | '█' => Ok(Cell::Alive),
            'b' | '.' | ' '       => Ok(Cell::Dead),
            other                 => Err(InvalidCell(other)),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("cell ({row}, {col}) is outside the {rows}x{cols} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    #[error("expected a {}x{} grid, got {}x{}", .expected.0, .expected.1, .found.0, .found.1)]
    DimensionMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },
}

/// Fixed-size board of cells, stored row-major.
///
/// Dimensions are set at construction and never change. A zero in either
/// dimension, or a cell count that overflows `usize`, produces an empty grid
/// with no addressable cells; every `get`/`set` on it is out of bounds and
/// evolving it yields another empty grid.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a `rows` x `cols` grid with every cell dead.
    pub fn new(rows: usize, cols: usize) -> Self {
        let Some(len) = rows.checked_mul(cols).filter(|&len| len > 0) else {
            return Self { rows: 0, cols: 0, cells: Vec::new() };
        };
        Self {
            rows,
            cols,
            cells: vec![Cell::Dead; len],
        }
    }

    /// Assembles a grid from row-major cells. `cells.len()` must be `rows * cols`.
    pub(crate) fn from_cells(rows: usize, cols: usize, cells: Vec<Cell>) -> Self {
        debug_assert_eq!(cells.len(), rows * cols);
        Self { rows, cols, cells }
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    fn index(&self, row: usize, col: usize) -> Result<usize, GridError> {
        if self.contains(row, col) {
            Ok(row * self.cols + col)
        } else {
            Err(GridError::OutOfBounds { row, col, rows: self.rows, cols: self.cols })
        }
    }

    pub fn get(&self, row: usize, col: usize) -> Result<Cell, GridError> {
        self.index(row, col).map(|i| self.cells[i])
    }

    pub fn set(&mut self, row: usize, col: usize, cell: Cell) -> Result<(), GridError> {
        let i = self.index(row, col)?;
        self.cells[i] = cell;
        Ok(())
    }

    /// Flips the cell and returns its new state.
    pub fn toggle(&mut self, row: usize, col: usize) -> Result<Cell, GridError> {
        let i = self.index(row, col)?;
        self.cells[i] = self.cells[i].toggled();
        Ok(self.cells[i])
    }

    /// Sets `cols` of `row` to `cell`. The span must lie inside the grid.
    pub(crate) fn fill_span(&mut self, row: usize, cols: Range<usize>, cell: Cell) {
        let start = row * self.cols;
        self.cells[start + cols.start..start + cols.end].fill(cell);
    }

    /// Overwrites every cell, visiting in row-major order.
    pub fn fill_with(&mut self, mut f: impl FnMut(usize, usize) -> Cell) {
        let cols = self.cols;
        for (i, cell) in self.cells.iter_mut().enumerate() {
            *cell = f(i / cols, i % cols);
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::Dead);
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    /// Cells of one row, left to right.
    pub fn row(&self, row: usize) -> Option<&[Cell]> {
        if row < self.rows {
            Some(&self.cells[row * self.cols..(row + 1) * self.cols])
        } else {
            None
        }
    }

    /// Coordinates `(row, col)` of every live cell in row-major order.
    pub fn alive_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_alive())
            .map(move |(i, _)| (i / cols, i % cols))
    }

    /// Builds a grid from one row of cells per slice entry, `true` meaning alive.
    /// Ragged input is padded with dead cells to the longest row.
    #[cfg(test)]
    pub(crate) fn from_rows<R: AsRef<[bool]>>(rows: &[R]) -> Self {
        let cols = rows.iter().map(|r| r.as_ref().len()).max().unwrap_or(0);
        let mut grid = Grid::new(rows.len(), cols);
        for (r, line) in rows.iter().enumerate() {
            for (c, &alive) in line.as_ref().iter().enumerate() {
                grid.cells[r * cols + c] = Cell::from(alive);
            }
        }
        grid
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.rows {
            for cell in &self.cells[r * self.cols..(r + 1) * self.cols] {
                write!(f, "{cell}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Grid {}x{} ({} alive)", self.rows, self.cols, self.population())?;
        write!(f, "{self}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_all_dead() {
        let grid = Grid::new(4, 7);
        assert_eq!(grid.dimensions(), (4, 7));
        assert_eq!(grid.population(), 0);
        for r in 0..4 {
            for c in 0..7 {
                assert_eq!(grid.get(r, c), Ok(Cell::Dead));
            }
        }
    }

    #[test]
    fn zero_dimension_gives_empty_grid() {
        let grid = Grid::new(0, 5);
        assert!(grid.is_empty());
        assert_eq!(grid.dimensions(), (0, 0));
        assert!(grid.get(0, 0).is_err());
    }

    #[test]
    fn overflowing_dimensions_give_empty_grid() {
        let grid = Grid::new(usize::MAX, 2);
        assert!(grid.is_empty());
        assert_eq!(grid.dimensions(), (0, 0));
        assert!(grid.get(usize::MAX / 2, 1).is_err());
        assert!(crate::evolve::advance(&grid).is_empty());
    }

    #[test]
    fn set_then_get() {
        let mut grid = Grid::new(3, 3);
        grid.set(1, 2, Cell::Alive).unwrap();
        assert_eq!(grid.get(1, 2), Ok(Cell::Alive));
        assert_eq!(grid.get(2, 1), Ok(Cell::Dead));
        grid.set(1, 2, Cell::Dead).unwrap();
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn out_of_bounds_is_reported() {
        let mut grid = Grid::new(2, 3);
        assert_eq!(
            grid.get(2, 0),
            Err(GridError::OutOfBounds { row: 2, col: 0, rows: 2, cols: 3 })
        );
        assert!(grid.set(0, 3, Cell::Alive).is_err());
        assert!(grid.toggle(5, 5).is_err());
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn toggle_flips_state() {
        let mut grid = Grid::new(2, 2);
        assert_eq!(grid.toggle(0, 1), Ok(Cell::Alive));
        assert_eq!(grid.toggle(0, 1), Ok(Cell::Dead));
    }

    #[test]
    fn alive_cells_in_row_major_order() {
        let grid = Grid::from_rows(&[
            [false, true, false],
            [true, false, true],
        ]);
        let cells: Vec<_> = grid.alive_cells().collect();
        assert_eq!(cells, vec![(0, 1), (1, 0), (1, 2)]);
    }

    #[test]
    fn cell_from_char() {
        assert_eq!(Cell::try_from('o'), Ok(Cell::Alive));
        assert_eq!(Cell::try_from('b'), Ok(Cell::Dead));
        assert_eq!(Cell::try_from('z'), Err(InvalidCell('z')));
        assert_eq!(Cell::default(), Cell::Dead);
    }

    #[test]
    fn display_uses_glyphs() {
        let grid = Grid::from_rows(&[[true, false], [false, true]]);
        assert_eq!(grid.to_string(), "█.\n.█\n");
    }
}
