//! Double-buffered simulation state.
//!
//! The [`Universe`] owns two [`Grid`]s for its whole lifetime. One is the
//! current generation; the other receives the next generation on each step,
//! after which the two trade roles by flipping an index.

use log::{debug, info};
use rand::Rng;

use crate::config::LifeConfig;
use crate::engine::{self, StepReport};
use crate::error::GridError;
use crate::grid::{CellState, Grid};

/// Running totals since the grid was last cleared or reseeded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub generation: u64,
    /// Dead cells that came alive, summed over all steps
    pub cells_created: u64,
    /// Live cells that died, summed over all steps
    pub cells_destroyed: u64,
    /// Live cells in the current generation
    pub current_population: u64,
}

impl Stats {
    /// Average births per generation.
    pub fn birth_rate(&self) -> f64 {
        self.cells_created as f64 / self.generation.max(1) as f64
    }

    /// Average deaths per generation.
    pub fn death_rate(&self) -> f64 {
        self.cells_destroyed as f64 / self.generation.max(1) as f64
    }
}

/// The two generation buffers, which of them is current, and the run
/// statistics.
#[derive(Debug, Clone)]
pub struct Universe {
    config: LifeConfig,
    buffers: [Grid; 2],
    current: usize,
    stats: Stats,
}

impl Universe {
    /// Allocates both buffers, all cells dead.
    pub fn new(config: LifeConfig) -> Self {
        Universe {
            buffers: [Grid::new(&config), Grid::new(&config)],
            config,
            current: 0,
            stats: Stats::default(),
        }
    }

    pub fn config(&self) -> &LifeConfig {
        &self.config
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// The current generation.
    pub fn current(&self) -> &Grid {
        &self.buffers[self.current]
    }

    /// Mutable access to the current generation. Callers must refresh the
    /// population afterwards; the next-generation buffer is never exposed.
    pub(crate) fn current_mut(&mut self) -> &mut Grid {
        &mut self.buffers[self.current]
    }

    /// Pixel buffer of the current generation, ready for upload.
    pub fn raw_view(&self) -> &[u32] {
        self.current().raw_view()
    }

    /// Flips the cell under screen pixel `(pixel_x, pixel_y)` using the
    /// configured scale.
    pub fn toggle_at_pixel(&mut self, pixel_x: i32, pixel_y: i32) -> Result<CellState, GridError> {
        let scale = self.config.scale();
        let state = self.current_mut().toggle_at_pixel(pixel_x, pixel_y, scale)?;
        self.refresh_population();
        Ok(state)
    }

    /// Sets a single cell of the current generation.
    pub fn set(&mut self, x: usize, y: usize, state: CellState) -> Result<(), GridError> {
        self.current_mut().set(x, y, state)?;
        self.refresh_population();
        Ok(())
    }

    /// Advances one generation and swaps the buffers.
    pub fn step(&mut self) -> Result<StepReport, GridError> {
        let [first, second] = &mut self.buffers;
        let report = if self.current == 0 {
            engine::step(first, second)?
        } else {
            engine::step(second, first)?
        };
        self.current ^= 1;

        self.stats.generation += 1;
        self.stats.cells_created += report.births;
        self.stats.cells_destroyed += report.deaths;
        self.refresh_population();
        debug!(
            "generation {} population {}",
            self.stats.generation, self.stats.current_population
        );
        Ok(report)
    }

    /// Kills every cell and resets the statistics.
    pub fn clear(&mut self) {
        self.current_mut().clear();
        self.stats = Stats::default();
        info!("grid cleared");
    }

    /// Refills the current generation so that each cell is alive with
    /// probability `density`, and resets the statistics.
    ///
    /// `density` is clamped to `0.0..=1.0`.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R, density: f64) {
        let density = if density.is_nan() {
            0.0
        } else {
            density.clamp(0.0, 1.0)
        };
        let cell_count = self.config.cell_count();
        let grid = self.current_mut();
        for index in 0..cell_count {
            grid.set_at(index, CellState::from(rng.gen_bool(density)));
        }
        self.stats = Stats::default();
        self.refresh_population();
        info!(
            "randomized grid at density {density:.2}: {} live cells",
            self.stats.current_population
        );
    }

    fn refresh_population(&mut self) {
        self.stats.current_population = self.current().population() as u64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn universe(width: usize, height: usize) -> Universe {
        Universe::new(LifeConfig::new(width, height, 1).unwrap())
    }

    #[test]
    fn step_swaps_buffers_without_reallocating() {
        let mut universe = universe(5, 5);
        let first = universe.buffers[0].raw_view().as_ptr();
        let second = universe.buffers[1].raw_view().as_ptr();
        assert_eq!(universe.raw_view().as_ptr(), first);

        universe.step().unwrap();
        assert_eq!(universe.raw_view().as_ptr(), second);
        universe.step().unwrap();
        assert_eq!(universe.raw_view().as_ptr(), first);
    }

    #[test]
    fn drawing_only_touches_current() {
        let mut universe = universe(5, 5);
        universe.toggle_at_pixel(2, 3).unwrap();
        assert_eq!(universe.current().get(2, 3), Ok(CellState::Alive));
        assert!(universe.buffers[universe.current ^ 1].is_empty());
    }

    #[test]
    fn toggle_uses_configured_scale() {
        let mut universe = Universe::new(LifeConfig::new(4, 4, 3).unwrap());
        assert_eq!(universe.toggle_at_pixel(8, 11), Ok(CellState::Alive));
        assert_eq!(universe.current().get(2, 3), Ok(CellState::Alive));
        assert!(universe.toggle_at_pixel(12, 0).is_err());
        assert_eq!(universe.stats().current_population, 1);
    }

    #[test]
    fn stats_track_steps() {
        let mut universe = universe(5, 5);
        for x in 1..=3 {
            universe.set(x, 2, CellState::Alive).unwrap();
        }
        universe.step().unwrap();
        universe.step().unwrap();
        let stats = *universe.stats();
        assert_eq!(stats.generation, 2);
        assert_eq!(stats.cells_created, 4);
        assert_eq!(stats.cells_destroyed, 4);
        assert_eq!(stats.current_population, 3);
        assert_eq!(stats.birth_rate(), 2.0);
    }

    #[test]
    fn population_follows_every_edit() {
        let mut universe = universe(6, 6);
        let check = |universe: &Universe| {
            assert_eq!(
                universe.stats().current_population,
                universe.current().population() as u64
            );
        };
        universe.set(1, 1, CellState::Alive).unwrap();
        check(&universe);
        universe.toggle_at_pixel(2, 2).unwrap();
        check(&universe);
        universe.toggle_at_pixel(1, 1).unwrap();
        check(&universe);
        universe.randomize(&mut StdRng::seed_from_u64(3), 0.5);
        check(&universe);
        universe.step().unwrap();
        check(&universe);
        universe.clear();
        check(&universe);
    }

    #[test]
    fn clear_resets_everything() {
        let mut universe = universe(5, 5);
        universe.set(0, 0, CellState::Alive).unwrap();
        universe.step().unwrap();
        universe.clear();
        assert!(universe.current().is_empty());
        assert_eq!(*universe.stats(), Stats::default());
    }

    #[test]
    fn randomize_respects_density_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut universe = universe(8, 8);
        universe.randomize(&mut rng, 1.0);
        assert_eq!(universe.stats().current_population, 64);
        universe.randomize(&mut rng, 0.0);
        assert!(universe.current().is_empty());
        universe.randomize(&mut rng, 3.0);
        assert_eq!(universe.current().population(), 64);
    }

    #[test]
    fn randomize_is_reproducible_with_seed() {
        let mut a = universe(10, 10);
        let mut b = universe(10, 10);
        a.randomize(&mut StdRng::seed_from_u64(42), 0.3);
        b.randomize(&mut StdRng::seed_from_u64(42), 0.3);
        assert_eq!(a.raw_view(), b.raw_view());
    }
}
