//! # Life engine
//!
//! Computes the next generation of a [`Grid`] under the B3/S23 rule with
//! toroidal adjacency: the left edge touches the right edge and the top edge
//! touches the bottom edge.

use log::debug;

use crate::error::GridError;
use crate::grid::{CellState, Grid};

/// Offsets of the eight neighbors: right, bottom-right, bottom, bottom-left,
/// left, top-left, top, top-right.
const NEIGHBOR_OFFSETS: [(i64, i64); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

/// Births and deaths produced by one call to [`step`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    pub births: u64,
    pub deaths: u64,
}

/// Counts the live cells among the eight neighbors of `(x, y)`.
///
/// Neighbor coordinates wrap with `rem_euclid`, so a cell on column 0 sees
/// column `width - 1` as its left neighbor.
///
/// # Returns
///
/// The number of live neighbors (0-8)
pub fn count_live_neighbors(grid: &Grid, x: usize, y: usize) -> u8 {
    let width = grid.width() as i64;
    let height = grid.height() as i64;
    let (x, y) = (x as i64, y as i64);

    NEIGHBOR_OFFSETS
        .iter()
        .filter(|&&(dx, dy)| {
            let nx = (x + dx).rem_euclid(width);
            let ny = (y + dy).rem_euclid(height);
            grid.is_alive_at((ny * width + nx) as usize)
        })
        .count() as u8
}

/// Writes the generation after `current` into `next`.
///
/// `next` first becomes a copy of `current`; then every cell whose fate
/// changes is rewritten. Neighbor counts are always read from `current`, so
/// the result does not depend on iteration order. Swapping the roles of the
/// two grids afterwards is left to the owner.
///
/// * Any live cell with fewer than two live neighbors dies (underpopulation)
/// * Any live cell with two or three live neighbors survives
/// * Any live cell with more than three live neighbors dies (overpopulation)
/// * Any dead cell with exactly three live neighbors becomes alive (reproduction)
///
/// # Errors
///
/// [`GridError::DimensionMismatch`] if the grids differ in size. `next` is
/// not modified in that case.
pub fn step(current: &Grid, next: &mut Grid) -> Result<StepReport, GridError> {
    next.copy_from(current)?;

    let width = current.width();
    let mut report = StepReport::default();

    for y in 0..current.height() {
        for x in 0..width {
            let index = y * width + x;
            let alive = current.is_alive_at(index);
            let live_neighbors = count_live_neighbors(current, x, y);

            match (alive, live_neighbors) {
                (true, 2) | (true, 3) => {}
                (true, _) => {
                    next.set_at(index, CellState::Dead);
                    report.deaths += 1;
                }
                (false, 3) => {
                    next.set_at(index, CellState::Alive);
                    report.births += 1;
                }
                (false, _) => {}
            }
        }
    }

    debug!("step: {} births, {} deaths", report.births, report.deaths);
    Ok(report)
}
