//! # Flappy Evo - Neuroevolution of Flappy Birds
//!
//! A population of birds, each steered by a small feed-forward neural network,
//! learns to fly through a scrolling obstacle course. Nothing is trained by
//! gradient: every generation is bred from the previous one by
//! fitness-proportionate selection, per-weight crossover and random mutation.
//!
//! ## Features
//!
//! - Dense sigmoid networks with fixed topology
//! - Uniform per-weight crossover and probabilistic per-weight mutation
//! - Roulette-wheel parent selection with a uniform fallback
//! - Seedable single random stream for reproducible runs
//! - Headless driver with per-generation statistics
//!
//! ## Core Modules
//!
//! - [`simulation::brain`] - Neural network implementation
//! - [`simulation::bird`] - Bird physics, decisions and reproduction
//! - [`simulation::environment`] - Obstacle course
//! - [`simulation::population`] - Generational evolution loop
//!
//! ```no_run
//! use flappy_evo::simulation::params::Params;
//! use flappy_evo::simulation::population::Population;
//!
//! let params = Params { seed: Some(7), ..Params::default() };
//! let mut population = Population::new(params)?;
//! let stats = population.run_generation(1.0 / 60.0)?;
//! println!("best bird flew for {:.2}s", stats.best_fitness);
//! # Ok::<(), flappy_evo::simulation::error::SimulationError>(())
//! ```

/// Core simulation logic and data structures.
pub mod simulation {
    /// Birds: physics, decisions and reproduction.
    pub mod bird;
    /// Neural network implementation for bird brains.
    pub mod brain;
    /// Scrolling obstacle course.
    pub mod environment;
    /// Error types.
    pub mod error;
    /// Obstacles and the bird collision test.
    pub mod obstacle;
    /// Simulation parameters.
    pub mod params;
    /// Population and generational evolution loop.
    pub mod population;
    /// Seedable random stream and uniform draws.
    pub mod rng;
    /// Parent selection strategies.
    pub mod selection;
    /// Observation assembly for bird brains.
    pub mod sense;
    /// Generation statistics tracking.
    pub mod stats;
}
