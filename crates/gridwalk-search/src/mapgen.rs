//! Random layouts: scattered walls and endpoint placement.

use rand::Rng;
use rand::distr::{Bernoulli, Distribution, Uniform};

use crate::cell::CellState;
use crate::error::SearchError;
use crate::grid::Grid;

/// Turn each empty cell into a wall with probability `density`.
///
/// Start and finish cells are never touched. Returns the number of walls
/// placed.
pub fn scatter_walls<R: Rng + ?Sized>(
    grid: &mut Grid,
    density: f64,
    rng: &mut R,
) -> Result<usize, SearchError> {
    let coin = Bernoulli::new(density).map_err(|_| SearchError::InvalidWallDensity(density))?;
    Ok(scatter_walls_with(grid, &coin, rng))
}

/// [`scatter_walls`] with a prebuilt wall distribution.
pub fn scatter_walls_with<R: Rng + ?Sized>(grid: &mut Grid, coin: &Bernoulli, rng: &mut R) -> usize {
    let mut placed = 0;
    for p in grid.bounds().iter() {
        let empty = grid.cell(p).is_some_and(|c| c.state == CellState::Empty);
        if empty && coin.sample(rng) && grid.set_cell_state(p, CellState::Wall) {
            placed += 1;
        }
    }
    placed
}

/// Move the start and the finish to two distinct, uniformly chosen empty
/// cells.
///
/// Returns `false` (leaving the grid as it was) when fewer than two empty
/// cells are available.
pub fn place_random_endpoints<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) -> bool {
    let empty: Vec<usize> = grid
        .iter()
        .enumerate()
        .filter(|(_, c)| c.state == CellState::Empty)
        .map(|(i, _)| i)
        .collect();
    if empty.len() < 2 {
        return false;
    }
    let (Ok(first), Ok(second)) = (
        Uniform::new(0, empty.len()),
        Uniform::new(0, empty.len() - 1),
    ) else {
        return false;
    };
    let a = first.sample(rng);
    let mut b = second.sample(rng);
    // Skip over `a` so both picks stay uniform and distinct.
    if b >= a {
        b += 1;
    }
    let (start, finish) = (grid.point(empty[a]), grid.point(empty[b]));
    grid.set_start(start) && grid.set_finish(finish)
}
