//! # pixel_life
//!
//! Conway's Game of Life on a fixed-size toroidal grid.
//!
//! * [`grid`] - one generation of cells, stored as display-ready pixels
//! * [`engine`] - neighbor counting with wraparound and the B3/S23 update rule
//! * [`universe`] - the two generation buffers, swapped after every step
//! * [`app`] - input dispatch for the terminal front end
//! * [`tui`] - terminal setup and restore, including on panic
//! * [`ui`] - terminal rendering of the pixel buffer with `ratatui`

pub mod app;
pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod tui;
pub mod ui;
pub mod universe;

pub use app::App;
pub use config::{Args, LifeConfig};
pub use engine::{count_live_neighbors, step, StepReport};
pub use error::{ConfigError, GridError};
pub use grid::{CellState, Grid, OFF, ON};
pub use universe::{Stats, Universe};
