//! Math helpers shared by the filter design and filtering code.

use std::error;
use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub enum MathError {
    DimensionMismatch,
}

impl fmt::Display for MathError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let desc = match *self {
            MathError::DimensionMismatch => {
                "Matrix must be square and match the right-hand side length"
            }
        };
        write!(f, "Math error: {}", desc)
    }
}

impl error::Error for MathError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        None
    }
}

/// Dense linear system solver
pub mod linalg;
/// Complex helpers and unit conversions
pub mod math;
