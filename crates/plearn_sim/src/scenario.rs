//! The three demo scenarios: line classification, NAND, and the steering mover.
//!
//! Each run is deterministic for a given config and RNG seed and returns a
//! serializable report.

use plearn_core::{AgentConfig, ScalarPerceptron, SteeringAgent, Vector2};
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::{ClassifierConfig, MoverConfig, NandConfig};
use crate::error::SimError;
use crate::trainers::{nand_trainers, nand_truth_table, LineTrainer};

#[derive(Debug, Clone, Serialize)]
pub struct ClassifierReport {
    pub trained: usize,
    pub correct: usize,
    /// Fraction of correct guesses over the last `report_window` steps
    pub trailing_accuracy: f64,
    /// Fraction of fresh points classified correctly after training
    pub holdout_accuracy: f64,
    pub weights: Vec<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NandReport {
    pub trained: usize,
    pub correct: usize,
    /// Index of the last wrong guess during training, if any
    pub last_mistake: Option<usize>,
    /// Whether the trained perceptron reproduces the whole truth table
    pub learned: bool,
    pub weights: Vec<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MoverReport {
    pub ticks: usize,
    pub start: Vector2,
    pub destination: Vector2,
    pub final_position: Vector2,
    pub distance_to_destination: f64,
    pub closest_distance: f64,
    pub weights: Vec<Vector2>,
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

/// Train a scalar perceptron on random points labelled against a line.
pub fn run_classifier<R: Rng + ?Sized>(
    config: &ClassifierConfig,
    rng: &mut R,
) -> Result<ClassifierReport, SimError> {
    let trainer = LineTrainer::from_config(config)?;
    let mut perceptron = ScalarPerceptron::new(
        3,
        config.learning_rate,
        config.activation,
        config.init,
        rng,
    );

    let window_start = config.trainer_count.saturating_sub(config.report_window);
    let mut correct = 0;
    let mut window_correct = 0;

    for i in 0..config.trainer_count {
        let sample = trainer.sample(rng);
        let step = perceptron.train(&sample.input, sample.answer)?;
        if step.correct {
            correct += 1;
            if i >= window_start {
                window_correct += 1;
            }
        }
        debug!(
            step = i,
            x = sample.input[0],
            y = sample.input[1],
            guess = step.guess,
            answer = sample.answer,
            "classifier step"
        );
    }

    let mut holdout_correct = 0;
    for _ in 0..config.holdout_count {
        let sample = trainer.sample(rng);
        if perceptron.feedforward(&sample.input)? == sample.answer {
            holdout_correct += 1;
        }
    }

    let report = ClassifierReport {
        trained: config.trainer_count,
        correct,
        trailing_accuracy: ratio(window_correct, config.trainer_count - window_start),
        holdout_accuracy: ratio(holdout_correct, config.holdout_count),
        weights: perceptron.weights().to_vec(),
    };
    info!(
        trained = report.trained,
        correct = report.correct,
        trailing_accuracy = report.trailing_accuracy,
        holdout_accuracy = report.holdout_accuracy,
        "Classifier training complete"
    );
    Ok(report)
}

/// Train a scalar perceptron on the cycling NAND truth table.
pub fn run_nand<R: Rng + ?Sized>(config: &NandConfig, rng: &mut R) -> Result<NandReport, SimError> {
    let mut perceptron =
        ScalarPerceptron::new(3, config.learning_rate, config.activation, config.init, rng);

    let trainers = nand_trainers(config.trainer_count);
    let mut correct = 0;
    let mut last_mistake = None;

    for (i, trainer) in trainers.iter().enumerate() {
        let step = perceptron.train(&trainer.input, trainer.answer)?;
        if step.correct {
            correct += 1;
        } else {
            last_mistake = Some(i);
        }
        debug!(
            step = i,
            correct = step.correct,
            weights = ?perceptron.weights(),
            "nand step"
        );
    }

    let mut learned = true;
    for row in nand_truth_table() {
        if perceptron.feedforward(&row.input)? != row.answer {
            learned = false;
        }
    }

    let report = NandReport {
        trained: trainers.len(),
        correct,
        last_mistake,
        learned,
        weights: perceptron.weights().to_vec(),
    };
    info!(
        trained = report.trained,
        correct = report.correct,
        last_mistake = ?report.last_mistake,
        learned = report.learned,
        "NAND training complete"
    );
    Ok(report)
}

/// Step a steering agent toward the configured targets for `ticks` ticks.
pub fn run_mover<R: Rng + ?Sized>(
    config: &MoverConfig,
    rng: &mut R,
) -> Result<MoverReport, SimError> {
    if config.agent.target_count != config.targets.len() {
        warn!(
            configured = config.agent.target_count,
            targets = config.targets.len(),
            "Brain size follows the target list"
        );
    }
    let agent_config = AgentConfig {
        target_count: config.targets.len(),
        ..config.agent.clone()
    };

    let mut agent = SteeringAgent::with_config(
        config.start,
        config.velocity,
        Vector2::zero(),
        &agent_config,
        rng,
    )?;

    let mut closest = agent.distance_to_destination();
    for tick in 0..config.ticks {
        if !config.wind.is_zero() {
            agent.apply_force(config.wind);
        }
        let blended = agent.seek(&config.targets)?;
        agent.update();

        let distance = agent.distance_to_destination();
        closest = closest.min(distance);
        debug!(
            tick,
            position = %agent.position(),
            velocity = %agent.velocity(),
            force = %blended,
            distance,
            "mover tick"
        );
    }

    let report = MoverReport {
        ticks: config.ticks,
        start: config.start,
        destination: agent.destination(),
        final_position: agent.position(),
        distance_to_destination: agent.distance_to_destination(),
        closest_distance: closest,
        weights: agent.brain().weights().to_vec(),
    };
    info!(
        ticks = report.ticks,
        final_position = %report.final_position,
        distance = report.distance_to_destination,
        closest = report.closest_distance,
        "Mover run complete"
    );
    Ok(report)
}
