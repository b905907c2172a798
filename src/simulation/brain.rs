//! Dense feed-forward neural network used as a bird's brain.
//!
//! The network has a fixed shape chosen at construction. It supports the two
//! genetic operators used by the evolution loop: per-weight mutation and
//! per-weight uniform crossover.

use ndarray::{Array1, Array2, ArrayView1, Zip};
use rand::Rng;

use super::error::SimulationError;
use super::rng;

/// Default half-width of the uniform range used for initial weights.
pub const DEFAULT_WEIGHT_RANGE: f32 = 1.0;

/// Default scale applied to a mutation perturbation.
pub const DEFAULT_LEARNING_RATE: f32 = 0.2;

/// Logistic sigmoid, `1 / (1 + e^-x)`.
#[inline]
pub fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

/// A fully connected feed-forward network with sigmoid activations.
///
/// Layer `i` is connected to layer `i + 1` through a `shape[i] × shape[i + 1]`
/// weight matrix. There are no biases.
#[derive(Debug, Clone)]
pub struct NeuralNetwork {
    shape: Vec<usize>,
    weights: Vec<Array2<f32>>,
    /// Scratch buffers, one per layer, overwritten by every evaluation.
    activations: Vec<Array1<f32>>,
}

impl NeuralNetwork {
    /// Creates a network with every weight drawn from `[-weight_range, weight_range)`.
    ///
    /// Fails with [`SimulationError::InvalidShape`] if `shape` has fewer than two
    /// layers or contains an empty layer.
    pub fn new<R: Rng>(
        shape: &[usize],
        weight_range: f32,
        rng: &mut R,
    ) -> Result<Self, SimulationError> {
        Self::validate_shape(shape)?;

        let weights = shape
            .windows(2)
            .map(|pair| {
                Array2::from_shape_fn((pair[0], pair[1]), |_| rng::symmetric(rng, weight_range))
            })
            .collect();

        Ok(Self::from_parts(shape.to_vec(), weights))
    }

    /// Builds a network from explicit weight matrices.
    ///
    /// The shape is derived from the matrices, which must chain: the column count
    /// of each matrix equals the row count of the next.
    pub fn from_weights(weights: Vec<Array2<f32>>) -> Result<Self, SimulationError> {
        let mut shape: Vec<usize> = weights.iter().map(|w| w.nrows()).collect();
        if let Some(last) = weights.last() {
            shape.push(last.ncols());
        }
        Self::validate_shape(&shape)?;

        let chained = weights
            .windows(2)
            .all(|pair| pair[0].ncols() == pair[1].nrows());
        if !chained {
            return Err(SimulationError::InvalidShape(shape));
        }

        Ok(Self::from_parts(shape, weights))
    }

    fn validate_shape(shape: &[usize]) -> Result<(), SimulationError> {
        if shape.len() < 2 || shape.contains(&0) {
            return Err(SimulationError::InvalidShape(shape.to_vec()));
        }
        Ok(())
    }

    fn from_parts(shape: Vec<usize>, weights: Vec<Array2<f32>>) -> Self {
        let activations = shape.iter().map(|&n| Array1::zeros(n)).collect();
        Self {
            shape,
            weights,
            activations,
        }
    }

    /// Layer widths from input to output.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Weight matrices, one per layer boundary.
    pub fn weights(&self) -> &[Array2<f32>] {
        &self.weights
    }

    /// Activations left behind by the most recent evaluation.
    pub fn activations(&self) -> &[Array1<f32>] {
        &self.activations
    }

    /// Total number of weights.
    pub fn parameter_count(&self) -> usize {
        self.weights.iter().map(Array2::len).sum()
    }

    /// Runs a forward pass and returns the output layer activations.
    ///
    /// Every node takes the weighted sum of the previous layer and squashes it
    /// through [`sigmoid`], so each output lies in `(0, 1)`.
    pub fn evaluate<'a>(
        &mut self,
        input: impl Into<ArrayView1<'a, f32>>,
    ) -> Result<&Array1<f32>, SimulationError> {
        let input = input.into();
        if input.len() != self.shape[0] {
            return Err(SimulationError::DimensionMismatch {
                expected: self.shape[0],
                actual: input.len(),
            });
        }

        self.activations[0].assign(&input);
        for (layer, weights) in self.weights.iter().enumerate() {
            let (done, rest) = self.activations.split_at_mut(layer + 1);
            let next = &mut rest[0];
            next.assign(&done[layer].dot(weights));
            next.mapv_inplace(sigmoid);
        }

        Ok(&self.activations[self.shape.len() - 1])
    }

    /// Perturbs each weight with independent probability `chance`.
    ///
    /// A selected weight moves by a uniform draw from `[-1, 1)` scaled by
    /// `learning_rate`. `chance` is expected in `[0, 1]`.
    pub fn mutate<R: Rng>(&mut self, chance: f32, learning_rate: f32, rng: &mut R) {
        for weights in &mut self.weights {
            weights.map_inplace(|w| {
                if rng::unit(rng) < chance {
                    *w += rng::symmetric(rng, 1.0) * learning_rate;
                }
            });
        }
    }

    /// Creates a child whose every weight is copied from `self` or `partner`
    /// with equal probability.
    ///
    /// Neither parent is modified.
    pub fn crossover<R: Rng>(
        &self,
        partner: &NeuralNetwork,
        rng: &mut R,
    ) -> Result<NeuralNetwork, SimulationError> {
        self.check_same_shape(partner)?;

        let weights = self
            .weights
            .iter()
            .zip(&partner.weights)
            .map(|(mine, theirs)| {
                let mut child = Array2::<f32>::zeros(mine.dim());
                Zip::from(&mut child)
                    .and(mine)
                    .and(theirs)
                    .for_each(|c, &a, &b| {
                        *c = if rng::unit(rng) < 0.5 { a } else { b };
                    });
                child
            })
            .collect();

        Ok(Self::from_parts(self.shape.clone(), weights))
    }

    /// Euclidean distance between the weights of two same-shaped networks.
    pub fn distance(a: &NeuralNetwork, b: &NeuralNetwork) -> Result<f32, SimulationError> {
        a.check_same_shape(b)?;

        let mut sum_sq = 0.0;
        for (wa, wb) in a.weights.iter().zip(&b.weights) {
            for (x, y) in wa.iter().zip(wb.iter()) {
                let diff = x - y;
                sum_sq += diff * diff;
            }
        }
        Ok(sum_sq.sqrt())
    }

    fn check_same_shape(&self, other: &NeuralNetwork) -> Result<(), SimulationError> {
        if self.shape != other.shape {
            return Err(SimulationError::ShapeMismatch {
                left: self.shape.clone(),
                right: other.shape.clone(),
            });
        }
        Ok(())
    }
}
