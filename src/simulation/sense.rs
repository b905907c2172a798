//! Observation assembly for bird brains.
//!
//! A sense turns the state of a bird and the obstacle it is approaching into
//! the input vector of the bird's network.

use ndarray::Array1;

use super::bird::Bird;
use super::obstacle::Obstacle;
use super::params::Params;

/// Converts the world as seen by one bird into neural network inputs.
pub trait Sense {
    /// Builds the input vector for `bird` facing `obstacle`.
    fn sense(&self, bird: &Bird, obstacle: &Obstacle, params: &Params) -> Array1<f32>;

    /// Length of the vector returned by [`Sense::sense`].
    fn input_size(&self) -> usize;

    /// Human-readable name.
    fn name(&self) -> &str;
}

/// Default four-input sense.
///
/// Outputs:
/// - vertical position, as a fraction of world height
/// - vertical velocity, divided by `velocity_scale`
/// - distance from the bird to the obstacle's right edge, as a fraction of world width
/// - gap centre, as a fraction of world height
#[derive(Debug, Clone, Copy, Default)]
pub struct FlightSense;

impl FlightSense {
    /// Creates the sense.
    pub fn new() -> Self {
        Self
    }
}

impl Sense for FlightSense {
    fn sense(&self, bird: &Bird, obstacle: &Obstacle, params: &Params) -> Array1<f32> {
        Array1::from_vec(vec![
            bird.y() / params.world_height,
            bird.velocity() / params.velocity_scale,
            (obstacle.right() - bird.x()) / params.world_width,
            obstacle.gap_center_y / params.world_height,
        ])
    }

    fn input_size(&self) -> usize {
        4
    }

    fn name(&self) -> &'static str {
        "Flight"
    }
}
