//! Bird state, physics and reproduction.
//!
//! A bird pairs a [`NeuralNetwork`] with a vertical point-mass body. Its
//! fitness is the time it has stayed alive.

use ndarray::{Array1, ArrayView1};
use rand::Rng;

use super::brain::NeuralNetwork;
use super::error::SimulationError;
use super::params::Params;

/// Network output above which a bird flaps.
pub const FLAP_THRESHOLD: f32 = 0.5;

/// One evolvable individual.
///
/// Once killed, a bird stays dead; the next generation is made of new birds.
#[derive(Debug, Clone)]
pub struct Bird {
    brain: NeuralNetwork,
    pos: Array1<f32>,
    velocity: f32,
    radius: f32,
    alive: bool,
    fitness: f32,
}

impl Bird {
    /// Creates a live bird at `[x, y]` with zero velocity and fitness.
    pub fn new(brain: NeuralNetwork, pos: [f32; 2], radius: f32) -> Self {
        Self {
            brain,
            pos: Array1::from_vec(pos.to_vec()),
            velocity: 0.0,
            radius,
            alive: true,
            fitness: 0.0,
        }
    }

    /// Creates a bird at the start position of the course: on the bird lane,
    /// halfway up the world.
    pub fn spawn(brain: NeuralNetwork, params: &Params) -> Self {
        let pos = [params.bird_lane_x, params.world_height / 2.0];
        Self::new(brain, pos, params.bird_radius)
    }

    /// The bird's network.
    pub fn brain(&self) -> &NeuralNetwork {
        &self.brain
    }

    /// Mutable access to the network, used to mutate newborn birds.
    pub fn brain_mut(&mut self) -> &mut NeuralNetwork {
        &mut self.brain
    }

    /// Position `[x, y]`.
    pub fn pos(&self) -> &Array1<f32> {
        &self.pos
    }

    /// Horizontal position.
    pub fn x(&self) -> f32 {
        self.pos[0]
    }

    /// Vertical position, growing downward.
    pub fn y(&self) -> f32 {
        self.pos[1]
    }

    /// Vertical velocity, positive when falling.
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Collision radius.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Whether the bird is still flying.
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Accumulated survival time.
    pub fn fitness(&self) -> f32 {
        self.fitness
    }

    /// Feeds an observation through the brain; `true` means flap.
    pub fn decide<'a>(
        &mut self,
        observation: impl Into<ArrayView1<'a, f32>>,
    ) -> Result<bool, SimulationError> {
        let output = self.brain.evaluate(observation)?;
        Ok(output[0] > FLAP_THRESHOLD)
    }

    /// Integrates one Euler step: optional flap, gravity, then position.
    pub fn apply_physics(&mut self, dt: f32, flap: bool, gravity: f32, flap_impulse: f32) {
        if flap {
            self.velocity -= flap_impulse;
        }
        self.velocity += gravity * dt;
        self.pos[1] += self.velocity * dt;
    }

    /// Adds survival time; has no effect on a dead bird.
    pub fn accumulate_fitness(&mut self, dt: f32) {
        if self.alive {
            self.fitness += dt;
        }
    }

    /// Marks the bird as dead. Calling it again has no effect.
    pub fn kill(&mut self) {
        self.alive = false;
    }

    /// Whether any part of the body is outside `[0, world_height]`.
    pub fn is_out_of_bounds(&self, world_height: f32) -> bool {
        self.y() - self.radius < 0.0 || self.y() + self.radius > world_height
    }

    /// Creates a fresh bird whose brain is the crossover of both parents.
    pub fn reproduce_with<R: Rng>(
        &self,
        partner: &Bird,
        params: &Params,
        rng: &mut R,
    ) -> Result<Bird, SimulationError> {
        let brain = self.brain.crossover(&partner.brain, rng)?;
        Ok(Bird::spawn(brain, params))
    }
}
