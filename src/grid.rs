//! # Grid store
//!
//! One generation of cells over a fixed `width x height` toroidal space,
//! stored row-major in a flat buffer. Each element is a 32-bit ARGB pixel,
//! either [`ON`] or [`OFF`], so the buffer can be handed to a renderer as is.

use log::trace;

use crate::config::LifeConfig;
use crate::error::GridError;

/// Pixel value of a dead cell: transparent black.
pub const OFF: u32 = 0x0000_0000;
/// Pixel value of a live cell: opaque white.
pub const ON: u32 = 0xFFFF_FFFF;

/// State of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellState {
    #[default]
    Dead,
    Alive,
}

impl CellState {
    pub fn is_alive(self) -> bool {
        self == CellState::Alive
    }

    /// The opposite state.
    pub fn flipped(self) -> Self {
        match self {
            CellState::Dead => CellState::Alive,
            CellState::Alive => CellState::Dead,
        }
    }

    /// Display-ready pixel encoding of this state.
    pub fn to_pixel(self) -> u32 {
        match self {
            CellState::Dead => OFF,
            CellState::Alive => ON,
        }
    }

    /// Any non-zero pixel counts as alive.
    pub fn from_pixel(pixel: u32) -> Self {
        if pixel == OFF {
            CellState::Dead
        } else {
            CellState::Alive
        }
    }
}

impl From<bool> for CellState {
    fn from(alive: bool) -> Self {
        if alive {
            CellState::Alive
        } else {
            CellState::Dead
        }
    }
}

/// A single generation of cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<u32>,
}

impl Grid {
    /// Allocates an all-dead grid with the dimensions of `config`.
    pub fn new(config: &LifeConfig) -> Self {
        Grid {
            width: config.width(),
            height: config.height(),
            cells: vec![OFF; config.cell_count()],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the state stored at `(x, y)`.
    ///
    /// # Errors
    ///
    /// [`GridError::OutOfBounds`] if `x >= width` or `y >= height`.
    pub fn get(&self, x: usize, y: usize) -> Result<CellState, GridError> {
        let index = self.index(x, y)?;
        Ok(CellState::from_pixel(self.cells[index]))
    }

    /// Overwrites the state stored at `(x, y)`.
    ///
    /// # Errors
    ///
    /// [`GridError::OutOfBounds`] if `x >= width` or `y >= height`.
    pub fn set(&mut self, x: usize, y: usize, state: CellState) -> Result<(), GridError> {
        let index = self.index(x, y)?;
        self.cells[index] = state.to_pixel();
        Ok(())
    }

    /// Flips the cell covering screen pixel `(pixel_x, pixel_y)` when every
    /// cell is drawn as a `scale x scale` square.
    ///
    /// # Arguments
    ///
    /// * `pixel_x` - Horizontal pixel offset from the left edge of the surface
    /// * `pixel_y` - Vertical pixel offset from the top edge of the surface
    /// * `scale` - Pixels per cell edge
    ///
    /// # Returns
    ///
    /// The new state of the toggled cell. Pixels off the surface (negative,
    /// or past the last cell) are rejected and the grid is left untouched.
    pub fn toggle_at_pixel(
        &mut self,
        pixel_x: i32,
        pixel_y: i32,
        scale: u32,
    ) -> Result<CellState, GridError> {
        if scale == 0 {
            return Err(GridError::ZeroScale);
        }
        let scale = i64::from(scale);
        // Truncating division would fold pixels in (-scale, 0) onto cell 0.
        if pixel_x < 0 || pixel_y < 0 {
            return Err(self.out_of_bounds(
                i64::from(pixel_x).div_euclid(scale),
                i64::from(pixel_y).div_euclid(scale),
            ));
        }
        let x = i64::from(pixel_x) / scale;
        let y = i64::from(pixel_y) / scale;
        let index = self.index_signed(x, y)?;

        let next = CellState::from_pixel(self.cells[index]).flipped();
        self.cells[index] = next.to_pixel();
        trace!("toggled cell ({x}, {y}) to {next:?}");
        Ok(next)
    }

    /// Row-major pixel buffer of `width * height` cells.
    pub fn raw_view(&self) -> &[u32] {
        &self.cells
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&pixel| pixel != OFF).count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&pixel| pixel == OFF)
    }

    /// Kills every cell.
    pub fn clear(&mut self) {
        self.cells.fill(OFF);
    }

    /// Coordinates of all live cells, in row-major order.
    pub fn live_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &pixel)| pixel != OFF)
            .map(move |(index, _)| (index % width, index / width))
    }

    /// Makes this grid an exact copy of `other` without reallocating.
    ///
    /// # Errors
    ///
    /// [`GridError::DimensionMismatch`] if the two grids differ in size.
    pub fn copy_from(&mut self, other: &Grid) -> Result<(), GridError> {
        self.check_same_dimensions(other)?;
        self.cells.copy_from_slice(&other.cells);
        Ok(())
    }

    pub(crate) fn check_same_dimensions(&self, other: &Grid) -> Result<(), GridError> {
        if self.width == other.width && self.height == other.height {
            Ok(())
        } else {
            Err(GridError::DimensionMismatch {
                left_width: self.width,
                left_height: self.height,
                right_width: other.width,
                right_height: other.height,
            })
        }
    }

    /// Liveness at a flat index already known to be in range.
    pub(crate) fn is_alive_at(&self, index: usize) -> bool {
        self.cells[index] != OFF
    }

    pub(crate) fn set_at(&mut self, index: usize, state: CellState) {
        self.cells[index] = state.to_pixel();
    }

    fn index(&self, x: usize, y: usize) -> Result<usize, GridError> {
        if x < self.width && y < self.height {
            Ok(y * self.width + x)
        } else {
            Err(self.out_of_bounds(x as i64, y as i64))
        }
    }

    fn index_signed(&self, x: i64, y: i64) -> Result<usize, GridError> {
        match (usize::try_from(x), usize::try_from(y)) {
            (Ok(ux), Ok(uy)) => self.index(ux, uy),
            _ => Err(self.out_of_bounds(x, y)),
        }
    }

    fn out_of_bounds(&self, x: i64, y: i64) -> GridError {
        GridError::OutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(width: usize, height: usize) -> Grid {
        Grid::new(&LifeConfig::new(width, height, 1).unwrap())
    }

    #[test]
    fn starts_dead() {
        let grid = grid(4, 3);
        assert_eq!(grid.raw_view().len(), 12);
        assert!(grid.is_empty());
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn set_then_get() {
        let mut grid = grid(4, 3);
        grid.set(3, 2, CellState::Alive).unwrap();
        assert_eq!(grid.get(3, 2), Ok(CellState::Alive));
        assert_eq!(grid.get(2, 2), Ok(CellState::Dead));
        grid.set(3, 2, CellState::Dead).unwrap();
        assert!(grid.is_empty());
    }

    #[test]
    fn raw_view_is_row_major_pixels() {
        let mut grid = grid(4, 3);
        grid.set(1, 2, CellState::Alive).unwrap();
        let raw = grid.raw_view();
        assert_eq!(raw[2 * 4 + 1], ON);
        assert_eq!(raw.iter().filter(|&&p| p == OFF).count(), 11);
    }

    #[test]
    fn out_of_range_access_fails_fast() {
        let mut grid = grid(4, 3);
        assert_eq!(
            grid.get(4, 0),
            Err(GridError::OutOfBounds {
                x: 4,
                y: 0,
                width: 4,
                height: 3
            })
        );
        assert!(grid.set(0, 3, CellState::Alive).is_err());
        assert!(grid.is_empty());
    }

    #[test]
    fn toggle_maps_pixels_to_cells() {
        let mut grid = grid(30, 30);
        assert_eq!(grid.toggle_at_pixel(74, 26, 25), Ok(CellState::Alive));
        assert_eq!(grid.get(2, 1), Ok(CellState::Alive));
        assert_eq!(grid.toggle_at_pixel(50, 49, 25), Ok(CellState::Dead));
        assert!(grid.is_empty());
    }

    #[test]
    fn toggle_twice_restores() {
        let mut grid = grid(5, 5);
        grid.set(1, 1, CellState::Alive).unwrap();
        let before = grid.clone();
        grid.toggle_at_pixel(3, 2, 2).unwrap();
        assert_ne!(grid, before);
        grid.toggle_at_pixel(3, 2, 2).unwrap();
        assert_eq!(grid, before);
    }

    #[test]
    fn toggle_rejects_pixels_off_surface() {
        let mut grid = grid(3, 3);
        assert!(grid.toggle_at_pixel(-1, 0, 4).is_err());
        assert!(grid.toggle_at_pixel(0, -3, 4).is_err());
        assert!(grid.toggle_at_pixel(12, 0, 4).is_err());
        assert!(grid.toggle_at_pixel(0, 12, 4).is_err());
        assert_eq!(grid.toggle_at_pixel(1, 1, 0), Err(GridError::ZeroScale));
        assert!(grid.is_empty());
        assert_eq!(grid.toggle_at_pixel(11, 11, 4), Ok(CellState::Alive));
    }

    #[test]
    fn live_cells_reports_coordinates() {
        let mut grid = grid(4, 3);
        grid.set(3, 0, CellState::Alive).unwrap();
        grid.set(0, 2, CellState::Alive).unwrap();
        let live: Vec<_> = grid.live_cells().collect();
        assert_eq!(live, vec![(3, 0), (0, 2)]);
        assert_eq!(grid.population(), 2);
    }

    #[test]
    fn copy_from_requires_same_size() {
        let mut source = grid(4, 3);
        source.set(2, 2, CellState::Alive).unwrap();
        let mut target = grid(4, 3);
        target.copy_from(&source).unwrap();
        assert_eq!(target, source);

        let mut other = grid(3, 4);
        assert!(matches!(
            other.copy_from(&source),
            Err(GridError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn pixel_encoding() {
        assert_eq!(CellState::Alive.to_pixel(), 0xFFFF_FFFF);
        assert_eq!(CellState::Dead.to_pixel(), 0);
        assert_eq!(CellState::from_pixel(0x0000_0001), CellState::Alive);
        assert_eq!(CellState::from(true).flipped(), CellState::Dead);
    }
}
