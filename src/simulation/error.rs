//! Error types for the evolution engine and its configuration.

use thiserror::Error;

/// Precondition violations raised by the core simulation operations.
///
/// Every variant is detected before any numeric work is done, so a failed call
/// leaves its receiver untouched.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Two networks with different layer shapes were combined.
    #[error("network shapes differ: {left:?} vs {right:?}")]
    ShapeMismatch {
        /// Shape of the receiving network.
        left: Vec<usize>,
        /// Shape of the partner network.
        right: Vec<usize>,
    },
    /// A network was requested with fewer than two layers or an empty layer.
    #[error("invalid network shape {0:?}: need at least two layers, each non-empty")]
    InvalidShape(Vec<usize>),
    /// An input vector does not match the network input width.
    #[error("input has {actual} values, network expects {expected}")]
    DimensionMismatch {
        /// Width the network was built for.
        expected: usize,
        /// Width that was supplied.
        actual: usize,
    },
    /// Fitness-weighted selection is undefined for this population.
    #[error("cannot select from population of {population} with fitness sum {fitness_sum}")]
    DegenerateSelection {
        /// Number of candidates.
        population: usize,
        /// Total fitness mass.
        fitness_sum: f32,
    },
    /// No obstacle is available for an observation or collision query.
    #[error("no obstacle ahead of x = {0}")]
    EmptyObstacleQueue(f32),
    /// A tick was requested with a non-positive or non-finite time step.
    #[error("time step must be positive and finite, got {0}")]
    InvalidTimeStep(f32),
    /// The parameters handed to the population are invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors raised while loading or validating [`Params`](super::params::Params).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// The configuration file is not valid JSON for `Params`.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    /// A parameter is out of its allowed range.
    #[error("invalid parameter: {0}")]
    Invalid(String),
}
