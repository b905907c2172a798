//! Parent selection for the next generation.

use rand::Rng;

use super::error::SimulationError;
use super::rng;

/// Roulette-wheel selection: picks index `i` with probability
/// `fitness[i] / fitness_sum`.
///
/// Walks the candidates in order, accumulating fitness shares, and returns the
/// first candidate whose cumulative share reaches a uniform draw from `[0, 1)`.
/// Candidates with zero fitness are never chosen. Fails with
/// [`SimulationError::DegenerateSelection`] when there are no candidates or the
/// fitness mass is not positive.
pub fn weighted_selection<R: Rng>(
    fitness: &[f32],
    fitness_sum: f32,
    rng: &mut R,
) -> Result<usize, SimulationError> {
    if fitness.is_empty() || !(fitness_sum > 0.0 && fitness_sum.is_finite()) {
        return Err(SimulationError::DegenerateSelection {
            population: fitness.len(),
            fitness_sum,
        });
    }

    let draw = rng::unit(rng);
    let mut cumulative = 0.0;
    let mut last_candidate = None;

    for (i, &f) in fitness.iter().enumerate() {
        if f <= 0.0 {
            continue;
        }
        cumulative += f / fitness_sum;
        last_candidate = Some(i);
        if cumulative >= draw {
            return Ok(i);
        }
    }

    // Shares can sum to slightly below 1.0 after rounding.
    last_candidate.ok_or(SimulationError::DegenerateSelection {
        population: fitness.len(),
        fitness_sum,
    })
}

/// Picks an index uniformly from `0..len`.
pub fn uniform_selection<R: Rng>(len: usize, rng: &mut R) -> Result<usize, SimulationError> {
    if len == 0 {
        return Err(SimulationError::DegenerateSelection {
            population: 0,
            fitness_sum: 0.0,
        });
    }
    Ok(rng.random_range(0..len))
}
