//! Zero, pole and gain representation of a filter, along with the transforms
//! that take a normalized analog Butterworth prototype to a digital
//! band-pass filter.
//!
//! The usual path through this module is:
//!
//! ```
//! use butter_rs::filter::zpk::{digital_to_analog, Zpk};
//!
//! let fs = 1000.0;
//! let w1 = digital_to_analog(40.0, fs);
//! let w2 = digital_to_analog(80.0, fs);
//! let digital = Zpk::butterworth(3)
//!     .lowpass_to_bandpass(w1, w2)
//!     .unwrap()
//!     .bilinear(fs);
//! assert_eq!(digital.poles.len(), 6);
//! assert_eq!(digital.zeros.len(), 6);
//! ```

use crate::filter::FilterError;
use crate::util::math::{imag_residual, stable_sqrt};
use num::Complex;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Relative imaginary residual above which a value projected to the real
/// axis gets logged.
pub(crate) const REAL_TOLERANCE: f64 = 1e-6;

/// Filter in zero, pole, gain form.
///
/// The zeros and poles are either s-plane (analog) or z-plane (digital)
/// values depending on where in the design chain the value came from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Zpk {
    pub zeros: Vec<Complex<f64>>,
    pub poles: Vec<Complex<f64>>,
    pub gain: f64,
}

impl Zpk {
    /// Creates the normalized analog low-pass Butterworth prototype of order
    /// `n`: `n` poles evenly spaced on the left half of the unit circle, no
    /// zeros and unity gain.
    ///
    /// # Arguments
    ///
    /// * `n` - Order of the prototype.
    ///
    /// # Examples
    ///
    /// ```
    /// use butter_rs::filter::zpk::Zpk;
    ///
    /// let proto = Zpk::butterworth(1);
    /// assert!((proto.poles[0].re + 1.0).abs() < 1e-12);
    /// assert!(proto.zeros.is_empty());
    /// ```
    pub fn butterworth(n: usize) -> Zpk {
        let poles = (1..=n)
            .map(|k| {
                let theta =
                    PI * (2 * k - 1) as f64 / (2 * n) as f64 + PI / 2.0;
                Complex::new(theta.cos(), theta.sin())
            })
            .collect();
        Zpk {
            zeros: Vec::new(),
            poles,
            gain: 1.0,
        }
    }

    /// Transforms a low-pass prototype into an analog band-pass filter with
    /// corners `w1` and `w2` in rad/s.
    ///
    /// Every prototype pole `p` splits into the pair
    /// `(p * bw ± sqrt(p^2 * bw^2 - 4 * w1 * w2)) / 2` with `bw = w2 - w1`,
    /// and contributes one zero at the origin. The gain is scaled by `bw^n`.
    ///
    /// Fails if `self` already has zeros or the corners are not increasing.
    pub fn lowpass_to_bandpass(&self, w1: f64, w2: f64) -> Result<Zpk, FilterError> {
        if !self.zeros.is_empty() {
            return Err(FilterError::NotLowpassPrototype);
        }
        if !(w1 < w2) {
            return Err(FilterError::InvalidFrequencies);
        }

        let bw = w2 - w1;
        let w0_sq = w1 * w2;
        let n = self.poles.len();
        let mut zeros = Vec::with_capacity(n);
        let mut poles = Vec::with_capacity(2 * n);
        for &p in &self.poles {
            zeros.push(Complex::new(0.0, 0.0));
            let disc = p * p * (bw * bw) - 4.0 * w0_sq;
            let root = stable_sqrt(disc);
            poles.push((p * bw + root) / 2.0);
            poles.push((p * bw - root) / 2.0);
        }

        Ok(Zpk {
            zeros,
            poles,
            gain: self.gain * bw.powf(n as f64),
        })
    }

    /// Maps an analog filter onto the z-plane with the bilinear transform.
    ///
    /// Each zero and pole `x` maps to `(2fs + x) / (2fs - x)`. The shorter of
    /// the two lists is padded with `-1` so both end up the same length.
    ///
    /// # Arguments
    ///
    /// * `fs` - Sample rate in Hz.
    pub fn bilinear(&self, fs: f64) -> Zpk {
        let k = Complex::new(2.0 * fs, 0.0);
        let degree = self.zeros.len().max(self.poles.len());
        let map = |roots: &[Complex<f64>]| -> Vec<Complex<f64>> {
            let mut mapped: Vec<Complex<f64>> =
                roots.iter().map(|&x| (k + x) / (k - x)).collect();
            mapped.resize(degree, Complex::new(-1.0, 0.0));
            mapped
        };

        let gain = self.bilinear_gain(fs);
        let residual = imag_residual(gain);
        if residual > REAL_TOLERANCE {
            warn!(
                "bilinear gain has imaginary residual {:e}, keeping the real part",
                residual
            );
        }

        Zpk {
            zeros: map(&self.zeros[..]),
            poles: map(&self.poles[..]),
            gain: gain.re,
        }
    }

    /// Complex gain of the bilinear-transformed filter,
    /// `k * prod(2fs - z) / prod(2fs - p)`. Only the real part is meaningful
    /// for a realizable filter.
    pub fn bilinear_gain(&self, fs: f64) -> Complex<f64> {
        let k = Complex::new(2.0 * fs, 0.0);
        let one = Complex::new(1.0, 0.0);
        let num = self.zeros.iter().fold(one, |acc, &z| acc * (k - z));
        let den = self.poles.iter().fold(one, |acc, &p| acc * (k - p));
        num / den * self.gain
    }
}

/// Prewarps a digital frequency in Hz to the analog frequency in rad/s that
/// the bilinear transform will map back onto it.
///
/// # Examples
///
/// ```
/// use butter_rs::filter::zpk::digital_to_analog;
/// use std::f64::consts::PI;
///
/// let w = digital_to_analog(1.0, 48000.0);
/// assert!((w - 2.0 * PI).abs() < 1e-6);
/// ```
pub fn digital_to_analog(freq: f64, fs: f64) -> f64 {
    2.0 * fs * (PI * freq / fs).tan()
}
