use serde::{Deserialize, Serialize};
use std::path::Path;

use super::brain::{DEFAULT_LEARNING_RATE, DEFAULT_WEIGHT_RANGE};
use super::error::ConfigError;

/// Simulation parameters that control the course, the birds and evolution.
///
/// Distances are in world units with `y` growing downward, times in seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Number of birds per generation.
    pub population_size: usize,
    /// Neural network layer widths, input first.
    pub layer_sizes: Vec<usize>,
    /// Half-width of the uniform range for initial weights.
    pub weight_range: f32,
    /// Per-weight probability of mutation for a newborn bird.
    pub mutation_chance: f32,
    /// Scale of a single weight perturbation.
    pub learning_rate: f32,
    /// World width.
    pub world_width: f32,
    /// World height.
    pub world_height: f32,
    /// Fixed horizontal position of every bird.
    pub bird_lane_x: f32,
    /// Bird collision radius.
    pub bird_radius: f32,
    /// Downward acceleration.
    pub gravity: f32,
    /// Upward velocity change applied by a flap.
    pub flap_impulse: f32,
    /// Velocity that maps to 1.0 in the observation vector.
    pub velocity_scale: f32,
    /// Leftward obstacle speed.
    pub obstacle_speed: f32,
    /// Horizontal distance between consecutive obstacles.
    pub obstacle_spacing: f32,
    /// Obstacle width.
    pub obstacle_width: f32,
    /// Half the height of the opening in each obstacle.
    pub gap_half_height: f32,
    /// Minimum distance between a gap and the top or bottom of the world.
    pub gap_margin: f32,
    /// Position of the first obstacle of every generation.
    pub obstacle_start_x: f32,
    /// Logical ticks per driver frame.
    pub frame_skip: usize,
    /// Generation length cap; surviving birds are retired when reached.
    pub max_generation_time: Option<f32>,
    /// Seed for the random stream; drawn at startup when absent.
    pub seed: Option<u64>,
    /// Number of generations kept in the statistics history.
    pub stats_history: usize,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            population_size: 100,
            layer_sizes: vec![4, 6, 1],
            weight_range: DEFAULT_WEIGHT_RANGE,
            mutation_chance: 0.05,
            learning_rate: DEFAULT_LEARNING_RATE,
            world_width: 640.0,
            world_height: 480.0,
            bird_lane_x: 80.0,
            bird_radius: 12.0,
            gravity: 900.0,
            flap_impulse: 30.0,
            velocity_scale: 600.0,
            obstacle_speed: 150.0,
            obstacle_spacing: 240.0,
            obstacle_width: 50.0,
            gap_half_height: 70.0,
            gap_margin: 20.0,
            obstacle_start_x: 400.0,
            frame_skip: 1,
            max_generation_time: Some(120.0),
            seed: None,
            stats_history: 100,
        }
    }
}

impl Params {
    /// Loads parameters from a JSON file; missing fields take their defaults.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let params: Params = serde_json::from_str(&json)?;
        params.validate()?;
        Ok(params)
    }

    /// Range of admissible gap centres, `(min, max)`.
    pub fn gap_center_range(&self) -> (f32, f32) {
        let inset = self.gap_margin + self.gap_half_height;
        (inset, self.world_height - inset)
    }

    /// Checks that every parameter is within its allowed range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(msg: impl Into<String>) -> Result<(), ConfigError> {
            Err(ConfigError::Invalid(msg.into()))
        }

        let floats = [
            ("weight_range", self.weight_range),
            ("mutation_chance", self.mutation_chance),
            ("learning_rate", self.learning_rate),
            ("world_width", self.world_width),
            ("world_height", self.world_height),
            ("bird_lane_x", self.bird_lane_x),
            ("bird_radius", self.bird_radius),
            ("gravity", self.gravity),
            ("flap_impulse", self.flap_impulse),
            ("velocity_scale", self.velocity_scale),
            ("obstacle_speed", self.obstacle_speed),
            ("obstacle_spacing", self.obstacle_spacing),
            ("obstacle_width", self.obstacle_width),
            ("gap_half_height", self.gap_half_height),
            ("gap_margin", self.gap_margin),
            ("obstacle_start_x", self.obstacle_start_x),
            ("max_generation_time", self.max_generation_time.unwrap_or(1.0)),
        ];
        if let Some((name, value)) = floats.into_iter().find(|(_, value)| !value.is_finite()) {
            return invalid(format!("{name} must be finite, got {value}"));
        }

        if self.population_size == 0 {
            return invalid("population_size must be at least 1");
        }
        if self.layer_sizes.len() < 2 || self.layer_sizes.contains(&0) {
            return invalid(format!(
                "layer_sizes {:?} needs two or more non-empty layers",
                self.layer_sizes
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_chance) {
            return invalid(format!(
                "mutation_chance {} must lie in [0, 1]",
                self.mutation_chance
            ));
        }
        if self.weight_range <= 0.0 || self.learning_rate < 0.0 {
            return invalid("weight_range must be positive and learning_rate non-negative");
        }
        if self.world_width <= 0.0 || self.world_height <= 0.0 {
            return invalid("world dimensions must be positive");
        }
        if !(0.0..self.world_width).contains(&self.bird_lane_x) {
            return invalid(format!(
                "bird_lane_x {} must lie inside the world",
                self.bird_lane_x
            ));
        }
        if self.obstacle_start_x < self.bird_lane_x {
            return invalid(format!(
                "obstacle_start_x {} must not be behind bird_lane_x {}",
                self.obstacle_start_x, self.bird_lane_x
            ));
        }
        if self.gravity <= 0.0 || self.flap_impulse < 0.0 {
            return invalid("gravity must be positive and flap_impulse non-negative");
        }
        if self.obstacle_speed <= 0.0 {
            return invalid("obstacle_speed must be positive");
        }
        if self.bird_radius <= 0.0 || self.velocity_scale <= 0.0 {
            return invalid("bird_radius and velocity_scale must be positive");
        }
        if self.obstacle_width <= 0.0 || self.obstacle_spacing <= self.obstacle_width {
            return invalid("obstacle_spacing must exceed a positive obstacle_width");
        }
        let (lo, hi) = self.gap_center_range();
        if self.gap_half_height <= 0.0 || self.gap_margin < 0.0 || lo > hi {
            return invalid(format!(
                "gap_half_height {} with margin {} does not fit a world of height {}",
                self.gap_half_height, self.gap_margin, self.world_height
            ));
        }
        if self.frame_skip == 0 {
            return invalid("frame_skip must be at least 1");
        }
        if self.max_generation_time.is_some_and(|t| t <= 0.0) {
            return invalid("max_generation_time must be positive when set");
        }
        Ok(())
    }
}
