use plearn_core::{Activation, AgentConfig, ScalarInit, Vector2};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::error::SimError;

/// Seed used when neither the config file nor the CLI provides one.
pub const DEFAULT_SEED: u64 = 42;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Seed for the ChaCha20 RNG behind every random draw
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default)]
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub nand: NandConfig,
    #[serde(default)]
    pub mover: MoverConfig,
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            classifier: ClassifierConfig::default(),
            nand: NandConfig::default(),
            mover: MoverConfig::default(),
        }
    }
}

/// Line classification: is a random point above or below `y = slope * x + intercept`?
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub trainer_count: usize,
    /// Kept low so the learning is slow enough to watch
    pub learning_rate: f64,
    pub activation: Activation,
    pub init: ScalarInit,
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub slope: f64,
    pub intercept: f64,
    /// Trailing number of training steps used for the reported accuracy
    pub report_window: usize,
    /// Fresh points classified after training
    pub holdout_count: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            trainer_count: 100_000,
            learning_rate: 0.00001,
            activation: Activation::Bipolar,
            init: ScalarInit::UniformRandom,
            x_min: -400.0,
            x_max: 400.0,
            y_min: -100.0,
            y_max: 100.0,
            slope: 2.0,
            intercept: 1.0,
            report_window: 1_000,
            holdout_count: 1_000,
        }
    }
}

/// NAND over `[1, a, b]`, the leading 1 acting as bias input.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NandConfig {
    pub trainer_count: usize,
    pub learning_rate: f64,
    pub activation: Activation,
    pub init: ScalarInit,
}

impl Default for NandConfig {
    fn default() -> Self {
        Self {
            trainer_count: 180,
            learning_rate: 0.1,
            activation: Activation::Unipolar,
            init: ScalarInit::Zeros,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MoverConfig {
    pub ticks: usize,
    pub start: Vector2,
    pub velocity: Vector2,
    pub targets: Vec<Vector2>,
    /// Constant external force applied every tick before seeking
    pub wind: Vector2,
    /// `target_count` is overridden by `targets.len()`
    pub agent: AgentConfig,
}

impl Default for MoverConfig {
    fn default() -> Self {
        Self {
            ticks: 1_000,
            start: Vector2::new(100.0, 100.0),
            velocity: Vector2::zero(),
            targets: vec![Vector2::new(209.0, 215.0), Vector2::new(400.0, 400.0)],
            wind: Vector2::zero(),
            agent: AgentConfig::default(),
        }
    }
}

impl SimConfig {
    /// Load from a TOML file, falling back to defaults when it does not exist.
    pub fn load(path: &Path) -> Result<Self, SimError> {
        if !path.exists() {
            warn!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config = Self::from_toml(&content)?;
        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, SimError> {
        let config: SimConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<(), SimError> {
        let toml = toml::to_string_pretty(self)?;
        fs::write(path, toml)?;
        Ok(())
    }

    /// Reject values that would panic or make the scenarios meaningless.
    pub fn validate(&self) -> Result<(), SimError> {
        let c = &self.classifier;
        if !(c.x_min < c.x_max) || !(c.y_min < c.y_max) {
            return Err(SimError::InvalidConfig(format!(
                "classifier ranges must be non-empty: x [{}, {}), y [{}, {})",
                c.x_min, c.x_max, c.y_min, c.y_max
            )));
        }

        let agent = &self.mover.agent;
        if !(agent.mass.is_finite() && agent.mass > 0.0) {
            return Err(SimError::InvalidConfig(format!(
                "mover.agent.mass must be finite and > 0, got {}",
                agent.mass
            )));
        }
        if agent.max_speed < 0.0 || agent.max_force < 0.0 {
            return Err(SimError::InvalidConfig(
                "mover.agent.max_speed and max_force must be >= 0".to_string(),
            ));
        }
        Ok(())
    }
}
