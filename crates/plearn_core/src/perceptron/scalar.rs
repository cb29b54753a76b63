use alloc::vec::Vec;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{check_len, Result};

/// Maps a weighted sum to a discrete output class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    /// `sum > 0 → 1`, otherwise `-1`
    #[default]
    Bipolar,
    /// `sum > 0.5 → 1`, otherwise `0`
    Unipolar,
}

impl Activation {
    pub fn apply(self, sum: f64) -> f64 {
        match self {
            Activation::Bipolar => {
                if sum > 0.0 {
                    1.0
                } else {
                    -1.0
                }
            }
            Activation::Unipolar => {
                if sum > 0.5 {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }
}

/// How the initial scalar weights are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarInit {
    /// Each weight drawn independently from `[-1, 1)`
    #[default]
    UniformRandom,
    /// All weights start at 0
    Zeros,
}

/// Result of a single `train` call.
///
/// `correct` is advisory: it reports whether the pre-update guess already
/// matched the label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainStep {
    pub guess: f64,
    pub error: f64,
    pub correct: bool,
}

/// A single neuron over an n-dimensional feature vector.
///
/// The bias is not stored separately: callers append a constant `1.0` input
/// and the matching weight learns the offset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalarPerceptron {
    weights: Vec<f64>,
    learning_rate: f64,
    activation: Activation,
}

impl ScalarPerceptron {
    /// Create a perceptron with `n` weights chosen by `init`.
    ///
    /// `rng` is only consumed for [`ScalarInit::UniformRandom`].
    pub fn new<R: Rng + ?Sized>(
        n: usize,
        learning_rate: f64,
        activation: Activation,
        init: ScalarInit,
        rng: &mut R,
    ) -> Self {
        let weights = match init {
            ScalarInit::UniformRandom => (0..n).map(|_| rng.gen_range(-1.0..1.0)).collect(),
            ScalarInit::Zeros => alloc::vec![0.0; n],
        };
        log::debug!(
            "ScalarPerceptron: n={} lr={} activation={:?} init={:?}",
            n,
            learning_rate,
            activation,
            init
        );
        Self::from_weights(weights, learning_rate, activation)
    }

    /// Create a perceptron with explicit starting weights.
    pub fn from_weights(weights: Vec<f64>, learning_rate: f64, activation: Activation) -> Self {
        Self {
            weights,
            learning_rate,
            activation,
        }
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }

    pub fn activate(&self, sum: f64) -> f64 {
        self.activation.apply(sum)
    }

    /// Weighted sum `Σ input[i] * weights[i]` before activation.
    pub fn weighted_sum(&self, input: &[f64]) -> Result<f64> {
        check_len(self.weights.len(), input.len())?;
        Ok(input
            .iter()
            .zip(self.weights.iter())
            .map(|(x, w)| x * w)
            .sum())
    }

    /// Classify `input`: `activate(Σ input[i] * weights[i])`.
    pub fn feedforward(&self, input: &[f64]) -> Result<f64> {
        self.weighted_sum(input).map(|sum| self.activate(sum))
    }

    /// One step of the delta rule: `weights[i] += input[i] * (desired - guess) * lr`.
    ///
    /// The shape is checked before any weight changes.
    pub fn train(&mut self, input: &[f64], desired: f64) -> Result<TrainStep> {
        let guess = self.feedforward(input)?;
        let error = desired - guess;
        let delta = error * self.learning_rate;

        for (w, x) in self.weights.iter_mut().zip(input.iter()) {
            *w += x * delta;
        }

        let correct = guess == desired;
        log::trace!(
            "train: guess={} desired={} correct={} weights={:?}",
            guess,
            desired,
            correct,
            self.weights
        );

        Ok(TrainStep {
            guess,
            error,
            correct,
        })
    }
}
