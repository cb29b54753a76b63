//! Labelled training samples for the scalar perceptron.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::Range;

use crate::config::ClassifierConfig;
use crate::error::SimError;

/// A labelled sample: the feature vector (bias input included) and the answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trainer {
    pub input: Vec<f64>,
    pub answer: f64,
}

impl Trainer {
    pub fn new(input: Vec<f64>, answer: f64) -> Self {
        Self { input, answer }
    }
}

/// Draws random points and labels them against the line `y = slope * x + intercept`.
///
/// Points strictly below the line are labelled `-1`, everything else `1`.
/// Inputs are `[x, y, 1]`.
#[derive(Debug, Clone)]
pub struct LineTrainer {
    slope: f64,
    intercept: f64,
    x_range: Range<f64>,
    y_range: Range<f64>,
}

impl LineTrainer {
    pub fn new(
        slope: f64,
        intercept: f64,
        x_range: Range<f64>,
        y_range: Range<f64>,
    ) -> Result<Self, SimError> {
        if x_range.is_empty() || y_range.is_empty() {
            return Err(SimError::InvalidConfig(format!(
                "sample ranges must be non-empty: x {:?}, y {:?}",
                x_range, y_range
            )));
        }
        Ok(Self {
            slope,
            intercept,
            x_range,
            y_range,
        })
    }

    pub fn from_config(config: &ClassifierConfig) -> Result<Self, SimError> {
        Self::new(
            config.slope,
            config.intercept,
            config.x_min..config.x_max,
            config.y_min..config.y_max,
        )
    }

    /// The line being learned.
    pub fn f(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    pub fn label(&self, x: f64, y: f64) -> f64 {
        if y < self.f(x) {
            -1.0
        } else {
            1.0
        }
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Trainer {
        let x = rng.gen_range(self.x_range.clone());
        let y = rng.gen_range(self.y_range.clone());
        Trainer::new(vec![x, y, 1.0], self.label(x, y))
    }
}

pub fn nand(a: bool, b: bool) -> bool {
    !(a && b)
}

/// The four rows of the NAND truth table as `[1, a, b] → {0, 1}` trainers.
pub fn nand_truth_table() -> [Trainer; 4] {
    [(false, false), (false, true), (true, false), (true, true)].map(|(a, b)| {
        let bit = |v: bool| if v { 1.0 } else { 0.0 };
        Trainer::new(vec![1.0, bit(a), bit(b)], bit(nand(a, b)))
    })
}

/// `count` trainers cycling through the truth table in order.
pub fn nand_trainers(count: usize) -> Vec<Trainer> {
    let table = nand_truth_table();
    table.iter().cycle().take(count).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn test_nand_truth() {
        assert!(nand(false, false));
        assert!(nand(false, true));
        assert!(nand(true, false));
        assert!(!nand(true, true));
    }

    #[test]
    fn test_nand_trainers_cycle() {
        let trainers = nand_trainers(180);
        assert_eq!(trainers.len(), 180);
        assert_eq!(trainers[0], Trainer::new(vec![1.0, 0.0, 0.0], 1.0));
        assert_eq!(trainers[1], Trainer::new(vec![1.0, 0.0, 1.0], 1.0));
        assert_eq!(trainers[2], Trainer::new(vec![1.0, 1.0, 0.0], 1.0));
        assert_eq!(trainers[3], Trainer::new(vec![1.0, 1.0, 1.0], 0.0));
        assert_eq!(trainers[4], trainers[0]);
        assert_eq!(trainers[179], trainers[3]);
    }

    #[test]
    fn test_line_label() {
        let t = LineTrainer::new(2.0, 1.0, -400.0..400.0, -100.0..100.0).unwrap();
        assert_eq!(t.f(3.0), 7.0);
        assert_eq!(t.label(3.0, 6.9), -1.0);
        assert_eq!(t.label(3.0, 7.0), 1.0);
        assert_eq!(t.label(-100.0, 0.0), 1.0);
    }

    #[test]
    fn test_line_samples_in_range() {
        let t = LineTrainer::new(2.0, 1.0, -400.0..400.0, -100.0..100.0).unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        for _ in 0..500 {
            let s = t.sample(&mut rng);
            assert_eq!(s.input.len(), 3);
            assert!((-400.0..400.0).contains(&s.input[0]));
            assert!((-100.0..100.0).contains(&s.input[1]));
            assert_eq!(s.input[2], 1.0);
            assert_eq!(s.answer, t.label(s.input[0], s.input[1]));
        }
    }

    #[test]
    fn test_empty_range_rejected() {
        assert!(LineTrainer::new(1.0, 0.0, 1.0..1.0, 0.0..1.0).is_err());
    }
}
