//! Drivers for `plearn_core`: trainer generation, TOML configuration and the
//! classification, NAND and mover scenarios behind the `plearn` binary.

pub mod config;
pub mod error;
pub mod scenario;
pub mod trainers;

pub use config::SimConfig;
pub use error::SimError;
pub use scenario::{run_classifier, run_mover, run_nand, ClassifierReport, MoverReport, NandReport};
