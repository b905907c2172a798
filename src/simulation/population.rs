//! Population of birds and the generational evolution loop.
//!
//! A generation runs until every bird is dead. The finished generation is then
//! replaced in one step by children bred through fitness-proportionate
//! selection, uniform crossover and mutation, and the course starts over.

use std::collections::VecDeque;

use rand::Rng;

use super::bird::Bird;
use super::brain::NeuralNetwork;
use super::environment::Environment;
use super::error::SimulationError;
use super::obstacle::Obstacle;
use super::params::Params;
use super::rng::{self, SimRng};
use super::selection;
use super::sense::{FlightSense, Sense};
use super::stats::{GenerationStats, StatsHistory};

/// A fixed-size population of birds flying the same course.
pub struct Population {
    birds: Vec<Bird>,
    environment: Environment,
    params: Params,
    sense: Box<dyn Sense>,
    rng: SimRng,
    generation: u32,
    generation_time: f32,
    history: StatsHistory,
}

impl Population {
    /// Creates generation 0 with random brains and the default [`FlightSense`].
    pub fn new(params: Params) -> Result<Self, SimulationError> {
        Self::with_sense(params, Box::new(FlightSense::new()))
    }

    /// Creates generation 0 with random brains observing the world through `sense`.
    ///
    /// The sense must produce exactly `layer_sizes[0]` inputs.
    pub fn with_sense(params: Params, sense: Box<dyn Sense>) -> Result<Self, SimulationError> {
        params.validate()?;
        if sense.input_size() != params.layer_sizes[0] {
            return Err(SimulationError::DimensionMismatch {
                expected: params.layer_sizes[0],
                actual: sense.input_size(),
            });
        }

        let mut rng = rng::from_seed(params.seed);
        let birds = (0..params.population_size)
            .map(|_| {
                NeuralNetwork::new(&params.layer_sizes, params.weight_range, &mut rng)
                    .map(|brain| Bird::spawn(brain, &params))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let environment = Environment::with_obstacles(&params, &mut rng);

        log::info!(
            "Created population of {} birds with brain shape {:?} and {} sense",
            birds.len(),
            params.layer_sizes,
            sense.name()
        );

        Ok(Self {
            birds,
            environment,
            history: StatsHistory::new(params.stats_history),
            params,
            sense,
            rng,
            generation: 0,
            generation_time: 0.0,
        })
    }

    /// Birds of the current generation.
    pub fn birds(&self) -> &[Bird] {
        &self.birds
    }

    /// Mutable access to the birds of the current generation.
    pub fn birds_mut(&mut self) -> &mut [Bird] {
        &mut self.birds
    }

    /// The obstacle course.
    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Live obstacles, left to right.
    pub fn obstacles(&self) -> &VecDeque<Obstacle> {
        self.environment.obstacles()
    }

    /// Parameters the population was created with.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Index of the current generation.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Simulated time since the current generation started.
    pub fn generation_time(&self) -> f32 {
        self.generation_time
    }

    /// Number of birds still flying.
    pub fn alive_count(&self) -> usize {
        self.birds.iter().filter(|b| b.is_alive()).count()
    }

    /// Statistics of recently finished generations.
    pub fn history(&self) -> &StatsHistory {
        &self.history
    }

    /// Runs `frame_skip` ticks of `dt` each, returning every generation that
    /// finished along the way.
    pub fn step(&mut self, dt: f32) -> Result<Vec<GenerationStats>, SimulationError> {
        let mut finished = Vec::new();
        for _ in 0..self.params.frame_skip {
            if let Some(stats) = self.tick(dt)? {
                finished.push(stats);
            }
        }
        Ok(finished)
    }

    /// Ticks until the current generation ends.
    ///
    /// Without a `max_generation_time` this only returns once every bird has
    /// crashed.
    pub fn run_generation(&mut self, dt: f32) -> Result<GenerationStats, SimulationError> {
        loop {
            if let Some(stats) = self.tick(dt)? {
                return Ok(stats);
            }
        }
    }

    /// Advances the simulation by `dt`.
    ///
    /// Scrolls the course, then lets every live bird observe, decide, move,
    /// score and possibly crash. Returns the statistics of the finished
    /// generation if this tick killed the last bird.
    pub fn tick(&mut self, dt: f32) -> Result<Option<GenerationStats>, SimulationError> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(SimulationError::InvalidTimeStep(dt));
        }

        self.environment.advance(dt, self.params.obstacle_speed);
        self.environment.spawn_if_needed(&self.params, &mut self.rng);
        self.generation_time += dt;

        let params = &self.params;
        for bird in self.birds.iter_mut().filter(|b| b.is_alive()) {
            let obstacle = self.environment.nearest_ahead(bird.x())?;
            let observation = self.sense.sense(bird, obstacle, params);
            let flap = bird.decide(&observation)?;

            bird.apply_physics(dt, flap, params.gravity, params.flap_impulse);
            bird.accumulate_fitness(dt);

            if self.environment.is_colliding(bird)? || bird.is_out_of_bounds(params.world_height)
            {
                bird.kill();
            }
        }

        let time_is_up = self
            .params
            .max_generation_time
            .is_some_and(|limit| self.generation_time >= limit);
        if time_is_up && self.alive_count() > 0 {
            log::info!(
                "Generation {} reached the {:.1}s limit with {} birds alive",
                self.generation,
                self.generation_time,
                self.alive_count()
            );
            for bird in &mut self.birds {
                bird.kill();
            }
        }

        if self.alive_count() == 0 {
            return self.advance_generation().map(Some);
        }
        Ok(None)
    }

    /// Replaces the current generation with bred children.
    ///
    /// Each of the `population_size` children has two parents drawn by
    /// fitness-weighted selection over the finished generation, gets their
    /// crossover as brain and is then mutated. When the fitness sum is zero,
    /// parents are drawn uniformly instead.
    pub fn advance_generation(&mut self) -> Result<GenerationStats, SimulationError> {
        let fitness: Vec<f32> = self.birds.iter().map(Bird::fitness).collect();
        let fitness_sum: f32 = fitness.iter().sum();
        let diversity = self.diversity()?;

        let mut uniform_fallback = false;
        let mut next = Vec::with_capacity(self.params.population_size);
        for _ in 0..self.params.population_size {
            let a = select_parent(&fitness, fitness_sum, &mut self.rng, &mut uniform_fallback)?;
            let b = select_parent(&fitness, fitness_sum, &mut self.rng, &mut uniform_fallback)?;

            let mut child =
                self.birds[a].reproduce_with(&self.birds[b], &self.params, &mut self.rng)?;
            child.brain_mut().mutate(
                self.params.mutation_chance,
                self.params.learning_rate,
                &mut self.rng,
            );
            next.push(child);
        }

        if uniform_fallback {
            log::warn!(
                "Generation {} has no fitness mass, parents were chosen uniformly",
                self.generation
            );
        }

        let stats = GenerationStats {
            generation: self.generation,
            population: self.birds.len(),
            best_fitness: fitness.iter().copied().fold(0.0, f32::max),
            mean_fitness: fitness_sum / fitness.len() as f32,
            fitness_sum,
            duration: self.generation_time,
            diversity,
            uniform_fallback,
        };

        self.birds = next;
        self.environment.reset();
        self.environment.spawn_if_needed(&self.params, &mut self.rng);
        self.generation += 1;
        self.generation_time = 0.0;

        log::info!(
            "Generation {} done after {:.2}s: best {:.2}, mean {:.2}, diversity {:.3}",
            stats.generation,
            stats.duration,
            stats.best_fitness,
            stats.mean_fitness,
            stats.diversity
        );
        self.history.record(stats.clone());

        Ok(stats)
    }

    /// Mean weight distance of every brain to the fittest brain.
    fn diversity(&self) -> Result<f32, SimulationError> {
        let Some(best) = self
            .birds
            .iter()
            .max_by(|a, b| a.fitness().total_cmp(&b.fitness()))
        else {
            return Ok(0.0);
        };

        let mut total = 0.0;
        for bird in &self.birds {
            total += NeuralNetwork::distance(bird.brain(), best.brain())?;
        }
        Ok(total / self.birds.len() as f32)
    }
}

/// Weighted selection, falling back to a uniform draw when the fitness mass is
/// degenerate. Sets `fallback` when the uniform draw was used.
fn select_parent<R: Rng>(
    fitness: &[f32],
    fitness_sum: f32,
    rng: &mut R,
    fallback: &mut bool,
) -> Result<usize, SimulationError> {
    match selection::weighted_selection(fitness, fitness_sum, rng) {
        Err(SimulationError::DegenerateSelection { .. }) => {
            *fallback = true;
            selection::uniform_selection(fitness.len(), rng)
        }
        result => result,
    }
}
