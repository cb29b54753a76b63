use alloc::vec::Vec;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{check_len, Result};
use crate::vector::Vector2;

/// How the initial vector weights are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VectorInit {
    /// Every weight starts at `(1, 1)`, passing forces through unchanged
    #[default]
    Identity,
    /// Each axis drawn independently from `[-1, 1)`
    UniformRandom,
}

/// A neuron whose weights are 2D vectors, blending several candidate forces
/// into one.
///
/// Each weight scales the x and y channel of its force independently. There
/// is no activation function: the output is the linear blend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorPerceptron {
    weights: Vec<Vector2>,
    learning_rate: f64,
}

impl VectorPerceptron {
    /// Create a perceptron with `n` weights chosen by `init`.
    ///
    /// `rng` is only consumed for [`VectorInit::UniformRandom`].
    pub fn new<R: Rng + ?Sized>(
        n: usize,
        learning_rate: f64,
        init: VectorInit,
        rng: &mut R,
    ) -> Self {
        let weights = match init {
            VectorInit::Identity => alloc::vec![Vector2::new(1.0, 1.0); n],
            VectorInit::UniformRandom => (0..n)
                .map(|_| Vector2::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)))
                .collect(),
        };
        log::debug!(
            "VectorPerceptron: n={} lr={} init={:?}",
            n,
            learning_rate,
            init
        );
        Self::from_weights(weights, learning_rate)
    }

    /// Identity-initialized perceptron; needs no randomness.
    pub fn identity(n: usize, learning_rate: f64) -> Self {
        Self::from_weights(alloc::vec![Vector2::new(1.0, 1.0); n], learning_rate)
    }

    pub fn from_weights(weights: Vec<Vector2>, learning_rate: f64) -> Self {
        Self {
            weights,
            learning_rate,
        }
    }

    pub fn weights(&self) -> &[Vector2] {
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

    /// Blend `forces` into `Σ forces[i] ⊙ weights[i]`.
    pub fn feedforward(&self, forces: &[Vector2]) -> Result<Vector2> {
        check_len(self.weights.len(), forces.len())?;
        Ok(forces
            .iter()
            .zip(self.weights.iter())
            .fold(Vector2::zero(), |sum, (f, w)| sum + f.component_mul(*w)))
    }

    /// Nudge every weight by `forces[i] ⊙ error * lr`.
    ///
    /// The same `error` drives every index; it is not apportioned per force.
    pub fn train(&mut self, forces: &[Vector2], error: Vector2) -> Result<()> {
        check_len(self.weights.len(), forces.len())?;
        let lr = self.learning_rate;
        for (w, f) in self.weights.iter_mut().zip(forces.iter()) {
            w.x += f.x * error.x * lr;
            w.y += f.y * error.y * lr;
        }
        Ok(())
    }
}
