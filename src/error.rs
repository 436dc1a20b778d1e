//! Error types for the grid store, the engine and startup configuration.

use thiserror::Error;

/// Errors raised by the grid store and the life engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// A coordinate fell outside `0..width` / `0..height`.
    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: i64,
        y: i64,
        width: usize,
        height: usize,
    },
    /// Two grids that must share dimensions do not.
    #[error("grid dimensions differ: {left_width}x{left_height} vs {right_width}x{right_height}")]
    DimensionMismatch {
        left_width: usize,
        left_height: usize,
        right_width: usize,
        right_height: usize,
    },
    /// Pixel-to-cell conversion was asked to divide by zero.
    #[error("pixel scale must be at least 1")]
    ZeroScale,
}

/// Errors raised while validating a [`LifeConfig`](crate::config::LifeConfig).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("grid width must be at least 1")]
    ZeroWidth,
    #[error("grid height must be at least 1")]
    ZeroHeight,
    #[error("scale must be at least 1")]
    ZeroScale,
    #[error("grid of {width}x{height} cells is too large")]
    TooLarge { width: usize, height: usize },
    #[error("density {0} is not within 0.0..=1.0")]
    Density(f64),
}
