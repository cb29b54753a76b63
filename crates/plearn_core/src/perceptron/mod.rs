//! Perceptrons trained online with the delta rule.
//!
//! Two variants share the same update law `w += lr * error * input`:
//! - `ScalarPerceptron`: scalar weights, a configurable `Activation`, used for
//!   classification over a feature vector
//! - `VectorPerceptron`: 2D weights, no activation, used to blend steering
//!   forces against a vector-valued error
//!
//! `train` is the only mutating operation on either type.
pub mod scalar;
pub mod vector;

pub use scalar::{Activation, ScalarInit, ScalarPerceptron, TrainStep};
pub use vector::{VectorInit, VectorPerceptron};
