use core::fmt;

/// Errors raised by the perceptrons and the steering agent.
///
/// Every variant is an invalid-argument condition the caller can fix by
/// correcting its inputs; no operation leaves state half-updated on error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LearnError {
    /// An input, force or target slice did not match the weight count.
    ShapeMismatch { expected: usize, actual: usize },
    /// Agent mass must be finite and strictly positive.
    InvalidMass(f64),
}

impl fmt::Display for LearnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LearnError::ShapeMismatch { expected, actual } => write!(
                f,
                "Shape mismatch: expected {} values, got {}",
                expected, actual
            ),
            LearnError::InvalidMass(mass) => {
                write!(f, "Invalid mass {}: must be finite and > 0", mass)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LearnError {}

pub type Result<T> = core::result::Result<T, LearnError>;

/// Fail with `ShapeMismatch` unless `actual == expected`.
pub(crate) fn check_len(expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(LearnError::ShapeMismatch { expected, actual })
    }
}
