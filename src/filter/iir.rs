//! Implementation of an infinite impulse response (IIR) filter.
//!
//! The filter is stored as numerator `b` and denominator `a` coefficient
//! vectors of equal length, indexed by powers of `z^-1`:
//!
//! ```text
//!         b[0] + b[1] z^-1 + ... + b[n] z^-n
//! H(z) = ------------------------------------
//!         a[0] + a[1] z^-1 + ... + a[n] z^-n
//! ```
//!
//! Samples are run through the transposed direct form II recurrence. The
//! stored coefficients are never modified; each call normalizes its own copy
//! by `a[0]`.

use crate::filter::poly::eval_ascending;
use crate::filter::FilterError;
use crate::util::math::to_db;
use num::Complex;
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::f64::consts::PI;

/// IIR filter defined by its transfer function coefficients.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Coefficients")]
pub struct DigitalFilter {
    b: Vec<f64>,
    a: Vec<f64>,
}

/// Unchecked coefficients, validated on their way into a `DigitalFilter`.
#[derive(Deserialize)]
struct Coefficients {
    b: Vec<f64>,
    a: Vec<f64>,
}

impl TryFrom<Coefficients> for DigitalFilter {
    type Error = FilterError;

    fn try_from(coeffs: Coefficients) -> Result<DigitalFilter, FilterError> {
        DigitalFilter::new(coeffs.b, coeffs.a)
    }
}

impl DigitalFilter {
    /// Creates a new `DigitalFilter`, right-padding the shorter of `b` and
    /// `a` with zeros.
    ///
    /// Fails if either vector is empty, if `a` is all zeros, or if `a[0]` is
    /// zero.
    ///
    /// # Arguments
    ///
    /// * `b` - Numerator coefficients.
    /// * `a` - Denominator coefficients.
    ///
    /// # Examples
    ///
    /// ```
    /// use butter_rs::filter::iir::DigitalFilter;
    ///
    /// let filter = DigitalFilter::new(vec![0.2], vec![1.0, -0.8]).unwrap();
    /// assert_eq!(filter.numerator(), &[0.2, 0.0]);
    /// assert_eq!(filter.order(), 1);
    /// ```
    pub fn new(mut b: Vec<f64>, mut a: Vec<f64>) -> Result<DigitalFilter, FilterError> {
        if b.is_empty() || a.is_empty() {
            return Err(FilterError::EmptyCoefficients);
        }
        if a.iter().all(|&x| x == 0.0) {
            return Err(FilterError::ZeroDenominator);
        }
        if a[0] == 0.0 {
            return Err(FilterError::NonCausal);
        }

        let len = b.len().max(a.len());
        b.resize(len, 0.0);
        a.resize(len, 0.0);
        Ok(DigitalFilter { b, a })
    }

    /// Numerator coefficients as stored.
    pub fn numerator(&self) -> &[f64] {
        &self.b
    }

    /// Denominator coefficients as stored.
    pub fn denominator(&self) -> &[f64] {
        &self.a
    }

    /// Order of the filter, which is also the length of its state vector.
    pub fn order(&self) -> usize {
        self.a.len() - 1
    }

    /// Copies of `b` and `a` scaled so that `a[0] == 1`.
    pub fn normalized(&self) -> (Vec<f64>, Vec<f64>) {
        let a0 = self.a[0];
        (
            self.b.iter().map(|x| x / a0).collect(),
            self.a.iter().map(|x| x / a0).collect(),
        )
    }

    /// Runs `input` through the filter starting from `state`, leaving the
    /// final state in `state` so a later call can pick up where this one
    /// stopped.
    ///
    /// Fails if `state` doesn't hold exactly `order()` values.
    ///
    /// # Arguments
    ///
    /// * `input` - Samples to be filtered.
    /// * `state` - Filter internal state, updated in place.
    ///
    /// # Examples
    ///
    /// ```
    /// use butter_rs::filter::iir::DigitalFilter;
    ///
    /// let filter = DigitalFilter::new(vec![1.0], vec![1.0, -0.5]).unwrap();
    /// let mut state = vec![0.0];
    /// let output = filter.lfilter(&[1.0, 0.0, 0.0], &mut state).unwrap();
    /// assert_eq!(output, vec![1.0, 0.5, 0.25]);
    /// assert_eq!(state, vec![0.125]);
    /// ```
    pub fn lfilter(&self, input: &[f64], state: &mut [f64]) -> Result<Vec<f64>, FilterError> {
        let order = self.order();
        if state.len() != order {
            return Err(FilterError::StateLength {
                expected: order,
                actual: state.len(),
            });
        }

        Ok(self.run(input, state))
    }

    /// Runs `input` through the filter starting from an all-zero state.
    pub fn filter(&self, input: &[f64]) -> Vec<f64> {
        let mut state = vec![0.0; self.order()];
        self.run(input, &mut state)
    }

    /// Transposed direct form II recurrence. `state` holds `order()` values.
    fn run(&self, input: &[f64], state: &mut [f64]) -> Vec<f64> {
        let order = self.order();
        let (b, a) = self.normalized();
        let mut output = Vec::with_capacity(input.len());
        for &x in input {
            let y = b[0] * x + state.first().cloned().unwrap_or(0.0);
            for j in 0..order {
                let next = state.get(j + 1).cloned().unwrap_or(0.0);
                state[j] = b[j + 1] * x - a[j + 1] * y + next;
            }
            output.push(y);
        }
        output
    }

    /// Complex frequency response `H(e^jw)` at `freq` Hz for sample rate
    /// `fs`.
    pub fn response(&self, freq: f64, fs: f64) -> Complex<f64> {
        let w = 2.0 * PI * freq / fs;
        let z_inv = Complex::new(0.0, -w).exp();
        eval_ascending(&self.b, z_inv) / eval_ascending(&self.a, z_inv)
    }

    /// Magnitude response in dB at `freq` Hz for sample rate `fs`.
    pub fn magnitude_db(&self, freq: f64, fs: f64) -> f64 {
        to_db(self.response(freq, fs).norm())
    }
}
