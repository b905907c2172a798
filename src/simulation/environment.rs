//! Scrolling course of obstacles.
//!
//! Obstacles live in a deque ordered by spawn time, which is also left to
//! right order. New obstacles are pushed at the back and retired ones popped
//! from the front, so `x` is strictly increasing along the deque.

use rand::Rng;
use std::collections::VecDeque;

use super::bird::Bird;
use super::error::SimulationError;
use super::obstacle::Obstacle;
use super::params::Params;
use super::rng;

/// The obstacle course shared by every bird of a generation.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    obstacles: VecDeque<Obstacle>,
}

impl Environment {
    /// Creates an empty course.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a course already populated up to the right edge of the world.
    pub fn with_obstacles<R: Rng>(params: &Params, rng: &mut R) -> Self {
        let mut environment = Self::new();
        environment.spawn_if_needed(params, rng);
        environment
    }

    /// Live obstacles, left to right.
    pub fn obstacles(&self) -> &VecDeque<Obstacle> {
        &self.obstacles
    }

    /// Number of live obstacles.
    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    /// Whether the course has no obstacles.
    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Adds an obstacle at the right end of the course.
    ///
    /// Obstacles must be pushed in increasing `x` order.
    pub fn push(&mut self, obstacle: Obstacle) {
        debug_assert!(
            self.obstacles.back().is_none_or(|last| last.x < obstacle.x),
            "obstacles must be pushed left to right"
        );
        self.obstacles.push_back(obstacle);
    }

    /// Removes every obstacle.
    pub fn reset(&mut self) {
        self.obstacles.clear();
    }

    /// Spawns obstacles until the rightmost one reaches the right edge of the world.
    ///
    /// The first obstacle of an empty course is placed at `obstacle_start_x`;
    /// each following one `obstacle_spacing` further right. Gap centres are
    /// uniform over [`Params::gap_center_range`].
    pub fn spawn_if_needed<R: Rng>(&mut self, params: &Params, rng: &mut R) {
        let (lo, hi) = params.gap_center_range();

        loop {
            let next_x = match self.obstacles.back() {
                Some(last) if last.x >= params.world_width => break,
                Some(last) => last.x + params.obstacle_spacing,
                None => params.obstacle_start_x,
            };

            let gap_center_y = lo + rng::unit(rng) * (hi - lo);
            log::debug!("Spawning obstacle at x = {:.1}, gap = {:.1}", next_x, gap_center_y);
            self.obstacles.push_back(Obstacle::new(
                next_x,
                gap_center_y,
                params.gap_half_height,
                params.obstacle_width,
            ));
        }
    }

    /// Scrolls every obstacle left by `speed * dt` and retires those whose
    /// right edge has passed the left boundary.
    pub fn advance(&mut self, dt: f32, speed: f32) {
        let distance = speed * dt;
        for obstacle in &mut self.obstacles {
            obstacle.shift(distance);
        }

        while self
            .obstacles
            .front()
            .is_some_and(|obstacle| obstacle.right() < 0.0)
        {
            self.obstacles.pop_front();
        }
    }

    /// The leftmost obstacle whose right edge is at or beyond `x`.
    pub fn nearest_ahead(&self, x: f32) -> Result<&Obstacle, SimulationError> {
        self.obstacles
            .iter()
            .find(|obstacle| obstacle.right() >= x)
            .ok_or(SimulationError::EmptyObstacleQueue(x))
    }

    /// Tests the bird against the obstacle nearest ahead of its centre, the
    /// same one it observes.
    pub fn is_colliding(&self, bird: &Bird) -> Result<bool, SimulationError> {
        let obstacle = self.nearest_ahead(bird.x())?;
        Ok(obstacle.is_colliding(bird))
    }
}
