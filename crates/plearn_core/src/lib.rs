//! Online perceptron learning and a perceptron-steered 2D agent.
//!
//! - [`vector`]: `Vector2` value type
//! - [`perceptron`]: scalar and vector perceptrons trained with the delta rule
//! - [`agent`]: a point mass whose vector perceptron blends per-target steering
//!   forces and keeps learning from its position error
//!
//! `no_std` + `alloc` by default. The `std` feature adds `std::error::Error`
//! and uses the platform float intrinsics instead of `libm`.
//!
//! Randomness is injected: constructors that can draw random weights take any
//! `rand::Rng`.
#![cfg_attr(not(any(feature = "std", test)), no_std)]

extern crate alloc;

pub mod agent;
pub mod error;
pub mod perceptron;
pub mod vector;

pub use agent::{AgentConfig, SteeringAgent, DEFAULT_DESTINATION};
pub use error::{LearnError, Result};
pub use perceptron::{
    Activation, ScalarInit, ScalarPerceptron, TrainStep, VectorInit, VectorPerceptron,
};
pub use vector::Vector2;
