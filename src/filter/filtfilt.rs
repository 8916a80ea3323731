//! Zero-phase forward-backward filtering.
//!
//! The signal is extended at both ends by `3 * order` samples reflected about
//! its end points, run through the filter, reversed, run through the filter
//! again and reversed back. Each pass starts from the steady state the filter
//! would settle into if its input had always been the first sample of that
//! pass, so neither end of the extended signal produces a turn-on transient.
//! Finally the padding is trimmed so the output lines up with the input.

use crate::filter::iir::DigitalFilter;
use crate::filter::FilterError;
use crate::util::linalg;
use rayon::prelude::*;

impl DigitalFilter {
    /// Number of samples reflected onto each end of the signal.
    pub fn padlen(&self) -> usize {
        3 * self.order()
    }

    /// Initial state for which a constant unit input produces a constant
    /// output right from the first sample.
    ///
    /// Solves `(I - A) z = b[1..] - a[1..] * b[0]` where `A` is the
    /// transposed companion matrix of the normalized denominator. Scale the
    /// result by the first input sample to get the state for a real signal.
    ///
    /// # Examples
    ///
    /// ```
    /// use butter_rs::filter::iir::DigitalFilter;
    ///
    /// let filter = DigitalFilter::new(vec![0.2], vec![1.0, -0.8]).unwrap();
    /// let zi = filter.steady_state().unwrap();
    /// assert!((zi[0] - 0.8).abs() < 1e-12);
    /// ```
    pub fn steady_state(&self) -> Result<Vec<f64>, FilterError> {
        let order = self.order();
        let (b, a) = self.normalized();

        let mut system = vec![vec![0.0; order]; order];
        for (i, row) in system.iter_mut().enumerate() {
            row[i] = 1.0;
            row[0] += a[i + 1];
            if i + 1 < order {
                row[i + 1] = -1.0;
            }
        }
        let rhs: Vec<f64> = (0..order).map(|i| b[i + 1] - a[i + 1] * b[0]).collect();

        Ok(linalg::solve(&system, &rhs)?)
    }

    /// Filters `signal` forward and backward, giving an output with zero
    /// phase shift and the same length as the input.
    ///
    /// Fails if `signal` has `padlen()` samples or fewer.
    ///
    /// # Arguments
    ///
    /// * `signal` - Complete signal to be filtered.
    ///
    /// # Examples
    ///
    /// ```
    /// use butter_rs::filter::iir::DigitalFilter;
    ///
    /// let filter = DigitalFilter::new(vec![0.2], vec![1.0, -0.8]).unwrap();
    /// let signal = vec![3.0; 16];
    /// let output = filter.filtfilt(&signal).unwrap();
    /// assert_eq!(output.len(), signal.len());
    /// assert!(output.iter().all(|y| (y - 3.0).abs() < 1e-9));
    /// ```
    pub fn filtfilt(&self, signal: &[f64]) -> Result<Vec<f64>, FilterError> {
        let padlen = self.padlen();
        if signal.len() <= padlen {
            return Err(FilterError::SignalTooShort {
                len: signal.len(),
                min: padlen + 1,
            });
        }

        let zi = self.steady_state()?;
        let extended = reflect_pad(signal, padlen);
        trace!(
            "filtfilt: order {}, {} samples padded by {} on each end",
            self.order(),
            signal.len(),
            padlen
        );

        let mut state = scaled(&zi, extended[0]);
        let mut forward = self.lfilter(&extended, &mut state)?;
        forward.reverse();

        let mut state = scaled(&zi, forward[0]);
        let mut backward = self.lfilter(&forward, &mut state)?;
        backward.reverse();

        let end = backward.len() - padlen;
        backward.truncate(end);
        backward.drain(..padlen);
        Ok(backward)
    }

    /// Runs [`DigitalFilter::filtfilt`] over each channel independently, in
    /// parallel.
    ///
    /// Fails with the first error any channel produces.
    pub fn filtfilt_channels<S>(&self, channels: &[S]) -> Result<Vec<Vec<f64>>, FilterError>
    where
        S: AsRef<[f64]> + Sync,
    {
        channels
            .par_iter()
            .map(|channel| self.filtfilt(channel.as_ref()))
            .collect()
    }
}

/// Zero-phase filters `signal` with the transfer function `b / a`.
///
/// Fails if the coefficients don't make a valid filter or `signal` is too
/// short for the padding; see [`DigitalFilter::new`] and
/// [`DigitalFilter::filtfilt`].
///
/// # Examples
///
/// ```
/// use butter_rs::filter::filtfilt::filtfilt;
///
/// let signal: Vec<f64> = (0..64).map(|x| (x as f64 * 0.1).sin()).collect();
/// let output = filtfilt(&[0.25, 0.5, 0.25], &[1.0], &signal).unwrap();
/// assert_eq!(output.len(), 64);
/// ```
pub fn filtfilt(b: &[f64], a: &[f64], signal: &[f64]) -> Result<Vec<f64>, FilterError> {
    DigitalFilter::new(b.to_vec(), a.to_vec())?.filtfilt(signal)
}

/// Extends `signal` by `padlen` samples on each end, reflecting about the
/// first and last samples. `signal` must hold more than `padlen` samples.
fn reflect_pad(signal: &[f64], padlen: usize) -> Vec<f64> {
    let n = signal.len();
    let first = signal[0];
    let last = signal[n - 1];

    let mut extended = Vec::with_capacity(n + 2 * padlen);
    extended.extend((0..padlen).map(|i| 2.0 * first - signal[padlen - i]));
    extended.extend_from_slice(signal);
    extended.extend((0..padlen).map(|i| 2.0 * last - signal[n - 2 - i]));
    extended
}

fn scaled(state: &[f64], factor: f64) -> Vec<f64> {
    state.iter().map(|z| z * factor).collect()
}
