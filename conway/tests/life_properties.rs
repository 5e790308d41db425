//! Behavioural tests for the evolution engine, RLE loading and seeding.

use conway::evolve::{advance, neighbor_count};
use conway::patterns::{self, BuiltinPattern, Seed};
use conway::{load_pattern, Cell, Grid};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn grid_with(rows: usize, cols: usize, alive: &[(usize, usize)]) -> Grid {
    let mut grid = Grid::new(rows, cols);
    for &(r, c) in alive {
        grid.set(r, c, Cell::Alive).unwrap();
    }
    grid
}

fn alive(grid: &Grid) -> Vec<(usize, usize)> {
    grid.alive_cells().collect()
}

fn arb_grid() -> impl Strategy<Value = Grid> {
    (1usize..12, 1usize..12).prop_flat_map(|(rows, cols)| {
        prop::collection::vec(any::<bool>(), rows * cols).prop_map(move |bits| {
            let mut grid = Grid::new(rows, cols);
            grid.fill_with(|r, c| Cell::from(bits[r * cols + c]));
            grid
        })
    })
}

proptest! {
    #[test]
    fn neighbor_count_is_bounded_and_excludes_self(grid in arb_grid()) {
        let (rows, cols) = grid.dimensions();
        for r in 0..rows {
            for c in 0..cols {
                let n = neighbor_count(&grid, r, c);
                prop_assert!(n <= 8);

                // flipping the cell itself must not change its own count
                let mut flipped = grid.clone();
                flipped.toggle(r, c).unwrap();
                prop_assert_eq!(neighbor_count(&flipped, r, c), n);
            }
        }
    }

    #[test]
    fn advance_is_pure(grid in arb_grid()) {
        let copy = grid.clone();
        let a = advance(&grid);
        let b = advance(&copy);
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(&grid, &copy);
        prop_assert_eq!(a.dimensions(), grid.dimensions());
    }
}

#[test]
fn dead_grid_stays_dead() {
    let mut grid = Grid::new(10, 13);
    for _ in 0..5 {
        grid = advance(&grid);
        assert_eq!(grid.population(), 0);
    }
}

#[test]
fn isolated_cell_dies_of_underpopulation() {
    let grid = grid_with(7, 7, &[(3, 3)]);
    assert_eq!(advance(&grid).population(), 0);
}

#[test]
fn block_is_a_still_life() {
    let block = grid_with(6, 6, &[(2, 2), (2, 3), (3, 2), (3, 3)]);
    assert_eq!(advance(&block), block);
}

#[test]
fn block_in_the_corner_is_still_a_still_life() {
    let block = grid_with(2, 2, &[(0, 0), (0, 1), (1, 0), (1, 1)]);
    assert_eq!(advance(&block), block);
}

#[test]
fn blinker_has_period_two() {
    let horizontal = grid_with(5, 5, &[(2, 1), (2, 2), (2, 3)]);
    let vertical = grid_with(5, 5, &[(1, 2), (2, 2), (3, 2)]);
    let once = advance(&horizontal);
    assert_eq!(once, vertical);
    assert_eq!(advance(&once), horizontal);
}

#[test]
fn blinker_on_the_edge_is_clipped() {
    // no wraparound: the half that would land above row 0 is simply lost
    let edge = grid_with(3, 3, &[(0, 0), (0, 1), (0, 2)]);
    assert_eq!(alive(&advance(&edge)), vec![(0, 1), (1, 1)]);
}

#[test]
fn glider_translates_diagonally() {
    let mut grid = Grid::new(10, 10);
    load_pattern("x = 3, y = 3\nbo$2bo$3o!", &mut grid, (0, 0));
    let start = alive(&grid);
    for _ in 0..4 {
        grid = advance(&grid);
    }
    let moved: Vec<_> = start.iter().map(|&(r, c)| (r + 1, c + 1)).collect();
    assert_eq!(alive(&grid), moved);
}

#[test]
fn glider_rle_round_trip() {
    let mut grid = Grid::new(3, 3);
    load_pattern("x = 3, y = 3\nbo$2bo$3o!", &mut grid, (0, 0));
    assert_eq!(alive(&grid), vec![(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)]);
    assert_eq!(grid.population(), 5);
}

#[test]
fn stray_letter_does_not_stop_decoding() {
    let mut grid = Grid::new(3, 3);
    load_pattern("x = 3, y = 3\nbo$2bo$q3o!", &mut grid, (0, 0));
    assert_eq!(alive(&grid), vec![(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)]);
}

#[test]
fn pattern_without_bang_decodes_to_end_of_input() {
    let glider = vec![(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)];

    let mut grid = Grid::new(3, 3);
    load_pattern("x = 3, y = 3\nbo$2bo$3o", &mut grid, (0, 0));
    assert_eq!(alive(&grid), glider);

    let mut grid = Grid::new(3, 3);
    load_pattern("x = 3, y = 3\r\nbo$2bo$\r\n3o", &mut grid, (0, 0));
    assert_eq!(alive(&grid), glider);
}

#[test]
fn trailing_count_places_nothing() {
    let mut grid = Grid::new(1, 3);
    load_pattern("x = 3, y = 1\n2o3", &mut grid, (0, 0));
    assert_eq!(alive(&grid), vec![(0, 0), (0, 1)]);
}

#[test]
fn offset_drops_only_cells_outside_the_target() {
    let mut grid = Grid::new(5, 5);
    load_pattern("x = 3, y = 3\n3o$3o$3o!", &mut grid, (3, 3));
    assert_eq!(alive(&grid), vec![(3, 3), (3, 4), (4, 3), (4, 4)]);
}

#[test]
fn gosper_gun_fires_every_thirty_generations() {
    let mut grid = Grid::new(30, 50);
    patterns::seed(&mut grid, Seed::Named(BuiltinPattern::GosperGliderGun), &mut ChaCha8Rng::seed_from_u64(1));
    let gun: Vec<_> = alive(&grid);
    assert_eq!(gun.len(), 36);

    for _ in 0..30 {
        grid = advance(&grid);
    }
    let in_box: Vec<_> = grid.alive_cells().filter(|&(r, c)| r < 9 && c < 36).collect();
    assert_eq!(in_box, gun);
    // one glider has left the gun's bounding box
    assert_eq!(grid.population(), 41);
}

#[test]
fn pulsar_has_period_three() {
    let mut grid = Grid::new(17, 17);
    patterns::seed(&mut grid, Seed::NamedCentered(BuiltinPattern::Pulsar), &mut ChaCha8Rng::seed_from_u64(1));
    let start = grid.clone();
    for _ in 0..3 {
        grid = advance(&grid);
    }
    assert_eq!(grid, start);
}
