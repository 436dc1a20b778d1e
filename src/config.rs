//! Startup configuration.
//!
//! Grid dimensions and the pixel scale are fixed for the lifetime of a run.
//! They are gathered once from the command line into a [`LifeConfig`], which
//! is then handed to the [`Universe`](crate::universe::Universe) and, through
//! it, to every grid it allocates.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::error::ConfigError;

pub const DEFAULT_WIDTH: usize = 30;
pub const DEFAULT_HEIGHT: usize = 30;
/// One terminal character is one pixel.
pub const DEFAULT_SCALE: u32 = 1;
pub const DEFAULT_TICK_MS: u64 = 100;
/// Fill ratio used by a random reseed when no `--density` was given.
pub const DEFAULT_RESEED_DENSITY: f64 = 0.3;

/// Largest coordinate the engine's signed neighbor arithmetic can address.
const MAX_SIDE: usize = i32::MAX as usize;

/// Immutable grid geometry shared by both generation buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifeConfig {
    width: usize,
    height: usize,
    scale: u32,
}

impl LifeConfig {
    /// Validates and builds a configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if any dimension or the scale is zero, or the
    /// grid would not fit in memory.
    pub fn new(width: usize, height: usize, scale: u32) -> Result<Self, ConfigError> {
        if width == 0 {
            return Err(ConfigError::ZeroWidth);
        }
        if height == 0 {
            return Err(ConfigError::ZeroHeight);
        }
        if scale == 0 {
            return Err(ConfigError::ZeroScale);
        }
        if width > MAX_SIDE || height > MAX_SIDE || width.checked_mul(height).is_none() {
            return Err(ConfigError::TooLarge { width, height });
        }
        Ok(LifeConfig {
            width,
            height,
            scale,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Pixels per cell edge on the display surface.
    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Number of cells in one generation.
    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }
}

impl Default for LifeConfig {
    fn default() -> Self {
        LifeConfig {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            scale: DEFAULT_SCALE,
        }
    }
}

/// Command line options for the terminal front end.
#[derive(Debug, Clone, Parser)]
#[command(name = "pixel_life", version, about = "Conway's Game of Life on a toroidal grid")]
pub struct Args {
    /// Grid width in cells
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    pub width: usize,

    /// Grid height in cells
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    pub height: usize,

    /// Terminal characters per cell edge
    #[arg(long, default_value_t = DEFAULT_SCALE)]
    pub scale: u32,

    /// Fraction of cells alive at startup (0 starts with an empty grid)
    #[arg(long, default_value_t = 0.0)]
    pub density: f64,

    /// Seed for the random fill, for reproducible boards
    #[arg(long)]
    pub seed: Option<u64>,

    /// Milliseconds between generations while autoplay is on
    #[arg(long, default_value_t = DEFAULT_TICK_MS)]
    pub tick_ms: u64,

    /// Write log output to this file (the terminal is owned by the UI)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Args {
    /// Builds the grid geometry from the parsed flags.
    pub fn life_config(&self) -> Result<LifeConfig, ConfigError> {
        LifeConfig::new(self.width, self.height, self.scale)
    }

    /// Initial fill ratio, checked to lie in `0.0..=1.0`.
    pub fn density(&self) -> Result<f64, ConfigError> {
        check_density(self.density)
    }

    /// Fill ratio used by the reseed key.
    pub fn reseed_density(&self) -> f64 {
        if self.density > 0.0 {
            self.density
        } else {
            DEFAULT_RESEED_DENSITY
        }
    }

    /// Autoplay period, never shorter than one millisecond.
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }
}

/// Rejects fill ratios outside `0.0..=1.0` (including NaN).
pub fn check_density(density: f64) -> Result<f64, ConfigError> {
    if (0.0..=1.0).contains(&density) {
        Ok(density)
    } else {
        Err(ConfigError::Density(density))
    }
}
