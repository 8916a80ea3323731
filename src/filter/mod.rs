//! Butterworth band-pass design and zero-phase IIR filtering.
//!
//! IIR filters are feedback based systems, and have all the caveats associated
//! with any feedback system.  If poorly designed they can be unstable and
//! unpredictable.  The phase and group delay responses are non-linear, which
//! smears the timing of anything passing through them.
//!
//! Running a filter forward over a recorded signal and then backward over the
//! result cancels that phase response entirely, at the cost of squaring the
//! magnitude response.  The `filtfilt` family of functions here does exactly
//! that, padding both ends of the signal and starting each pass from a
//! steady state so the edges don't ring.
//!
//! Filters are designed from a normalized analog Butterworth prototype:
//!
//! * `zpk` - analog prototype, low-pass to band-pass and bilinear transforms
//! * `poly` - root to coefficient expansion
//! * `design` - order estimation and the band-pass design entry point
//! * `iir` - the `DigitalFilter` coefficient container and single pass
//! * `filtfilt` - forward-backward filtering
use crate::util::MathError;
use std::error;
use std::fmt;

pub mod design;
pub mod filtfilt;
pub mod iir;
pub mod poly;
pub mod zpk;

#[derive(Clone, Debug, PartialEq)]
pub enum FilterError {
    EmptyCoefficients,
    ZeroDenominator,
    NonCausal,
    StateLength { expected: usize, actual: usize },
    SignalTooShort { len: usize, min: usize },
    InvalidFrequencies,
    InvalidAttenuation,
    UndefinedOrder,
    OrderTooHigh { max: usize },
    NotLowpassPrototype,
    Math(MathError),
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            FilterError::EmptyCoefficients => {
                write!(f, "Filter error: coefficient vectors must not be empty")
            }
            FilterError::ZeroDenominator => {
                write!(f, "Filter error: denominator coefficients are all zero")
            }
            FilterError::NonCausal => write!(
                f,
                "Filter error: leading denominator coefficient must be nonzero"
            ),
            FilterError::StateLength { expected, actual } => write!(
                f,
                "Filter error: state has {} entries, filter order is {}",
                actual, expected
            ),
            FilterError::SignalTooShort { len, min } => write!(
                f,
                "Filter error: signal of {} samples is too short, need at least {}",
                len, min
            ),
            FilterError::InvalidFrequencies => write!(
                f,
                "Filter error: frequencies must satisfy 0 < stop1 < pass1 < pass2 < stop2 < fs/2"
            ),
            FilterError::InvalidAttenuation => write!(
                f,
                "Filter error: ripple and attenuation must be positive with attenuation > ripple"
            ),
            FilterError::UndefinedOrder => {
                write!(f, "Filter error: design parameters give no valid order")
            }
            FilterError::OrderTooHigh { max } => write!(
                f,
                "Filter error: transition bands need an order above {}",
                max
            ),
            FilterError::NotLowpassPrototype => write!(
                f,
                "Filter error: band-pass transform needs a prototype without zeros"
            ),
            FilterError::Math(ref err) => write!(f, "Filter error: {}", err),
        }
    }
}

impl error::Error for FilterError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            FilterError::Math(ref err) => Some(err),
            _ => None,
        }
    }
}

impl From<MathError> for FilterError {
    fn from(err: MathError) -> FilterError {
        FilterError::Math(err)
    }
}
