//! Steering agent ("mover")
//!
//! A point mass that seeks one or more targets. Each tick it:
//! 1. Computes one seek-and-arrive steering force per target
//! 2. Lets its `VectorPerceptron` brain blend them into a single force
//! 3. Trains the brain on its position error relative to a fixed destination
//! 4. Integrates acceleration → velocity → position on `update()`
//!
//! Forces are instantaneous: acceleration is cleared by every `update()`.

use alloc::vec::Vec;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{check_len, LearnError, Result};
use crate::perceptron::{VectorInit, VectorPerceptron};
use crate::vector::Vector2;

/// Destination the brain is trained toward unless configured otherwise.
pub const DEFAULT_DESTINATION: Vector2 = Vector2::new(209.0, 215.0);

/// Tunables for a `SteeringAgent` and its brain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Velocity is clamped to this magnitude
    pub max_speed: f64,
    /// Each steering force is clamped to this magnitude
    pub max_force: f64,
    /// Must be finite and > 0
    pub mass: f64,
    pub learning_rate: f64,
    /// Number of brain weights, i.e. targets per `seek`
    pub target_count: usize,
    pub brain_init: VectorInit,
    /// Fixed point whose position error trains the brain
    pub destination: Vector2,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_speed: 20.0,
            max_force: 2000.0,
            mass: 100.0,
            learning_rate: 0.00001,
            target_count: 2,
            brain_init: VectorInit::Identity,
            destination: DEFAULT_DESTINATION,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SteeringAgent {
    brain: VectorPerceptron,
    position: Vector2,
    velocity: Vector2,
    acceleration: Vector2,
    max_speed: f64,
    max_force: f64,
    mass: f64,
    destination: Vector2,
}

impl SteeringAgent {
    /// Create an agent with an identity brain sized for two targets and the
    /// default learning rate and destination.
    pub fn new(
        position: Vector2,
        velocity: Vector2,
        acceleration: Vector2,
        max_speed: f64,
        max_force: f64,
        mass: f64,
    ) -> Result<Self> {
        let config = AgentConfig {
            max_speed,
            max_force,
            mass,
            ..AgentConfig::default()
        };
        let brain = VectorPerceptron::identity(config.target_count, config.learning_rate);
        Self::from_parts(position, velocity, acceleration, &config, brain)
    }

    /// Create an agent with every tunable taken from `config`.
    ///
    /// `rng` is only consumed when `config.brain_init` is random.
    pub fn with_config<R: Rng + ?Sized>(
        position: Vector2,
        velocity: Vector2,
        acceleration: Vector2,
        config: &AgentConfig,
        rng: &mut R,
    ) -> Result<Self> {
        let brain = VectorPerceptron::new(
            config.target_count,
            config.learning_rate,
            config.brain_init,
            rng,
        );
        Self::from_parts(position, velocity, acceleration, config, brain)
    }

    /// Create an agent around an existing brain. `config.target_count`,
    /// `learning_rate` and `brain_init` are ignored in favour of the brain's own.
    pub fn from_parts(
        position: Vector2,
        velocity: Vector2,
        acceleration: Vector2,
        config: &AgentConfig,
        brain: VectorPerceptron,
    ) -> Result<Self> {
        if !(config.mass.is_finite() && config.mass > 0.0) {
            return Err(LearnError::InvalidMass(config.mass));
        }
        Ok(Self {
            brain,
            position,
            velocity,
            acceleration,
            max_speed: config.max_speed,
            max_force: config.max_force,
            mass: config.mass,
            destination: config.destination,
        })
    }

    pub fn brain(&self) -> &VectorPerceptron {
        &self.brain
    }

    pub fn position(&self) -> Vector2 {
        self.position
    }

    pub fn velocity(&self) -> Vector2 {
        self.velocity
    }

    pub fn acceleration(&self) -> Vector2 {
        self.acceleration
    }

    pub fn max_speed(&self) -> f64 {
        self.max_speed
    }

    pub fn max_force(&self) -> f64 {
        self.max_force
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn destination(&self) -> Vector2 {
        self.destination
    }

    pub fn set_destination(&mut self, destination: Vector2) {
        self.destination = destination;
    }

    /// Distance from the current position to the training destination.
    pub fn distance_to_destination(&self) -> f64 {
        self.position.distance(self.destination)
    }

    /// `acceleration += force / mass`. Calls within a tick accumulate.
    pub fn apply_force(&mut self, force: Vector2) {
        self.acceleration += force / self.mass;
    }

    /// Seek-and-arrive force toward `target`.
    ///
    /// Desired speed is `max_speed` when far away and `distance / 2` once
    /// within `2 * max_speed`. The result is capped at `max_force`.
    pub fn steering_force(&self, target: Vector2) -> Vector2 {
        let offset = target - self.position;
        let distance = offset.magnitude();
        let heading = offset.normalize();

        let desired = if distance < self.max_speed * 2.0 {
            heading * (distance / 2.0)
        } else {
            heading * self.max_speed
        };

        let steer = ((desired - self.velocity) * self.mass).limit(self.max_force);
        log::trace!("steer toward {}: {}", target, steer);
        steer
    }

    /// Steer toward `targets` through the brain, then train the brain on the
    /// error to the destination. Returns the blended force that was applied.
    ///
    /// `targets.len()` must equal the brain's weight count; on mismatch
    /// nothing is mutated.
    pub fn seek(&mut self, targets: &[Vector2]) -> Result<Vector2> {
        check_len(self.brain.len(), targets.len())?;

        let forces: Vec<Vector2> = targets.iter().map(|&t| self.steering_force(t)).collect();

        let blended = self.brain.feedforward(&forces)?;
        self.apply_force(blended);

        let error = self.destination - self.position;
        log::trace!(
            "seek: position={} destination={} error={}",
            self.position,
            self.destination,
            error
        );
        self.brain.train(&forces, error)?;

        Ok(blended)
    }

    /// Close the tick: integrate acceleration into velocity (capped at
    /// `max_speed`), move, and clear acceleration.
    pub fn update(&mut self) {
        self.velocity = (self.velocity + self.acceleration).limit(self.max_speed);
        self.position += self.velocity;
        self.acceleration = Vector2::zero();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    const EPS: f64 = 1e-9;

    fn v(x: f64, y: f64) -> Vector2 {
        Vector2::new(x, y)
    }

    fn unit_mass_agent(position: Vector2, velocity: Vector2) -> SteeringAgent {
        SteeringAgent::new(position, velocity, Vector2::zero(), 5.0, 10.0, 1.0).unwrap()
    }

    #[test]
    fn test_construction() {
        let z = Vector2::zero();
        let agent = SteeringAgent::new(v(100.0, 100.0), z, z, 20.0, 2000.0, 100.0).unwrap();
        assert_eq!(agent.position(), v(100.0, 100.0));
        assert_eq!(agent.velocity(), Vector2::zero());
        assert_eq!(agent.acceleration(), Vector2::zero());
        assert_eq!(agent.brain().len(), 2);
        assert_eq!(agent.brain().weights(), &[v(1.0, 1.0), v(1.0, 1.0)]);
        assert_eq!(agent.destination(), DEFAULT_DESTINATION);
    }

    #[test]
    fn test_invalid_mass_rejected() {
        for mass in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let z = Vector2::zero();
            let result = SteeringAgent::new(z, z, z, 1.0, 1.0, mass);
            assert!(
                matches!(result, Err(LearnError::InvalidMass(_))),
                "mass {mass}"
            );
        }
    }

    #[test]
    fn test_with_config() {
        let config = AgentConfig {
            target_count: 3,
            brain_init: VectorInit::UniformRandom,
            destination: v(1.0, 2.0),
            ..AgentConfig::default()
        };
        let mut rng = ChaCha20Rng::seed_from_u64(9);
        let z = Vector2::zero();
        let agent = SteeringAgent::with_config(z, z, z, &config, &mut rng).unwrap();
        assert_eq!(agent.brain().len(), 3);
        assert_eq!(agent.destination(), v(1.0, 2.0));
        assert_eq!(agent.mass(), 100.0);
    }

    #[test]
    fn test_apply_force_accumulates() {
        let z = Vector2::zero();
        let mut agent = SteeringAgent::new(z, z, z, 20.0, 2000.0, 4.0).unwrap();
        agent.apply_force(v(8.0, 0.0));
        agent.apply_force(v(0.0, -4.0));
        assert_eq!(agent.acceleration(), v(2.0, -1.0));
    }

    #[test]
    fn test_update_constant_velocity() {
        let mut agent = unit_mass_agent(v(10.0, 10.0), v(1.0, 2.0));
        agent.update();
        assert_eq!(agent.velocity(), v(1.0, 2.0));
        assert_eq!(agent.position(), v(11.0, 12.0));
    }

    #[test]
    fn test_update_limits_velocity_and_resets_acceleration() {
        let mut agent = unit_mass_agent(Vector2::zero(), Vector2::zero());
        agent.apply_force(v(30.0, 40.0));
        agent.update();
        assert!((agent.velocity().magnitude() - 5.0).abs() < EPS);
        assert!((agent.position().x - 3.0).abs() < EPS);
        assert!((agent.position().y - 4.0).abs() < EPS);
        assert!(agent.acceleration().is_zero());
    }

    #[test]
    fn test_steering_force_far_target_saturates() {
        let agent = unit_mass_agent(Vector2::zero(), Vector2::zero());
        let steer = agent.steering_force(v(1000.0, 0.0));
        assert!((steer.x - 5.0).abs() < EPS);
        assert_eq!(steer.y, 0.0);
    }

    #[test]
    fn test_steering_force_arrival_slows() {
        // distance 6 < 2 * max_speed, desired speed 3, minus current velocity 2
        let agent = unit_mass_agent(Vector2::zero(), v(2.0, 0.0));
        let steer = agent.steering_force(v(6.0, 0.0));
        assert!((steer.x - 1.0).abs() < EPS);
        assert_eq!(steer.y, 0.0);
    }

    #[test]
    fn test_steering_force_scaled_by_mass_and_capped() {
        let z = Vector2::zero();
        let agent = SteeringAgent::new(z, z, z, 5.0, 10.0, 100.0).unwrap();
        let steer = agent.steering_force(v(0.0, 1000.0));
        // (0, 5) * 100 = 500, capped at 10
        assert!((steer.magnitude() - 10.0).abs() < EPS);
        assert!(steer.y > 0.0);
    }

    #[test]
    fn test_steering_force_at_target() {
        let agent = unit_mass_agent(v(3.0, 3.0), v(1.0, 0.0));
        let steer = agent.steering_force(v(3.0, 3.0));
        // Zero desired velocity: brake against current velocity
        assert_eq!(steer, v(-1.0, 0.0));
    }

    #[test]
    fn test_seek_shape_mismatch_does_not_mutate() {
        let mut agent = unit_mass_agent(Vector2::zero(), Vector2::zero());
        let before = agent.clone();
        let err = agent.seek(&[v(1.0, 1.0)]).unwrap_err();
        assert_eq!(
            err,
            LearnError::ShapeMismatch {
                expected: 2,
                actual: 1
            }
        );
        assert_eq!(agent, before);
    }

    #[test]
    fn test_seek_applies_blend_and_trains() {
        let mut agent = unit_mass_agent(Vector2::zero(), Vector2::zero());
        let targets = [v(1000.0, 0.0), v(0.0, 1000.0)];

        let blended = agent.seek(&targets).unwrap();
        // Identity brain: sum of (5, 0) and (0, 5)
        assert!((blended.x - 5.0).abs() < EPS);
        assert!((blended.y - 5.0).abs() < EPS);
        assert_eq!(agent.acceleration(), blended);

        // error = (209, 215), lr = 0.00001
        let w = agent.brain().weights();
        assert!((w[0].x - (1.0 + 5.0 * 209.0 * 0.00001)).abs() < EPS);
        assert_eq!(w[0].y, 1.0);
        assert_eq!(w[1].x, 1.0);
        assert!((w[1].y - (1.0 + 5.0 * 215.0 * 0.00001)).abs() < EPS);

        agent.update();
        assert!(agent.acceleration().is_zero());
    }

    #[test]
    fn test_seek_at_destination_leaves_brain() {
        let mut agent = unit_mass_agent(DEFAULT_DESTINATION, Vector2::zero());
        agent.seek(&[v(0.0, 0.0), v(500.0, 500.0)]).unwrap();
        assert_eq!(agent.brain().weights(), &[v(1.0, 1.0), v(1.0, 1.0)]);
    }

    #[test]
    fn test_single_target_arrival() {
        let config = AgentConfig {
            max_speed: 5.0,
            max_force: 10.0,
            mass: 1.0,
            learning_rate: 0.0,
            target_count: 1,
            destination: v(50.0, 0.0),
            ..AgentConfig::default()
        };
        let brain = VectorPerceptron::identity(1, 0.0);
        let z = Vector2::zero();
        let mut agent = SteeringAgent::from_parts(z, z, z, &config, brain).unwrap();

        let targets = vec![v(50.0, 0.0)];
        for _ in 0..100 {
            agent.seek(&targets).unwrap();
            agent.update();
            assert!(agent.velocity().magnitude() <= 5.0 + EPS);
        }
        assert!(agent.distance_to_destination() < 1e-6);
    }
}
