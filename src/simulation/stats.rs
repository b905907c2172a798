use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Summary of one finished generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Index of the generation, starting at 0.
    pub generation: u32,
    /// Number of birds in the generation.
    pub population: usize,
    /// Longest survival time.
    pub best_fitness: f32,
    /// Average survival time.
    pub mean_fitness: f32,
    /// Total fitness mass used for selection.
    pub fitness_sum: f32,
    /// Simulated time from the first tick to the generation boundary.
    pub duration: f32,
    /// Mean weight distance of every brain to the fittest brain.
    pub diversity: f32,
    /// Whether parents were picked uniformly because the fitness sum was zero.
    pub uniform_fallback: bool,
}

/// Bounded history of generation statistics, oldest evicted first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsHistory {
    /// Recent generations, oldest first
    pub generations: VecDeque<GenerationStats>,
    /// Maximum number of generations to keep
    pub max_history: usize,
}

impl Default for StatsHistory {
    fn default() -> Self {
        Self::new(100)
    }
}

impl StatsHistory {
    /// Creates an empty history holding at most `max_history` generations.
    pub fn new(max_history: usize) -> Self {
        Self {
            generations: VecDeque::with_capacity(max_history),
            max_history,
        }
    }

    /// Appends a generation, evicting the oldest ones beyond capacity.
    pub fn record(&mut self, stats: GenerationStats) {
        self.generations.push_back(stats);
        while self.generations.len() > self.max_history {
            self.generations.pop_front();
        }
    }

    /// Most recent generation.
    pub fn latest(&self) -> Option<&GenerationStats> {
        self.generations.back()
    }

    /// Highest best fitness among the kept generations.
    pub fn best_fitness_ever(&self) -> Option<f32> {
        self.generations
            .iter()
            .map(|g| g.best_fitness)
            .reduce(f32::max)
    }

    /// Average of the best fitness over the kept generations.
    pub fn mean_best_fitness(&self) -> f32 {
        if self.generations.is_empty() {
            0.0
        } else {
            self.generations.iter().map(|g| g.best_fitness).sum::<f32>()
                / self.generations.len() as f32
        }
    }

    /// Number of kept generations.
    pub fn len(&self) -> usize {
        self.generations.len()
    }

    /// Whether no generation has been recorded.
    pub fn is_empty(&self) -> bool {
        self.generations.is_empty()
    }

    /// Kept generations, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &GenerationStats> {
        self.generations.iter()
    }
}
