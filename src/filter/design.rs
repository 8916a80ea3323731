//! Butterworth band-pass filter design from pass-band and stop-band targets.
//!
//! The design picks the smallest Butterworth order that meets the
//! attenuation target at the tighter of the two stop-band edges, builds the
//! band-pass prototype with its corners at the stop-band frequencies and maps
//! it to a digital filter with the bilinear transform. All four frequencies
//! are prewarped first, so the digital corners land where they were asked
//! for.

use crate::filter::iir::DigitalFilter;
use crate::filter::poly::expand_real;
use crate::filter::zpk::{digital_to_analog, Zpk};
use crate::filter::FilterError;
use serde::{Deserialize, Serialize};

/// Largest prototype order a design may use. Expanding more roots than this
/// into direct form coefficients loses all precision anyway.
pub const MAX_ORDER: usize = 50;

/// Parameters of a band-pass Butterworth design. Frequencies are in Hz,
/// attenuation and ripple in dB.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BandpassSpec {
    pub stop_low: f64,
    pub pass_low: f64,
    pub pass_high: f64,
    pub stop_high: f64,
    pub stop_attenuation_db: f64,
    pub pass_ripple_db: f64,
    pub sample_rate: f64,
}

impl BandpassSpec {
    /// Checks the parameters can produce a filter.
    ///
    /// The sample rate must be positive, the frequencies must satisfy
    /// `0 < stop_low < pass_low < pass_high < stop_high < sample_rate / 2`,
    /// and the ripple and attenuation must both be positive with the
    /// attenuation the larger of the two.
    pub fn validate(&self) -> Result<(), FilterError> {
        if !(self.sample_rate > 0.0) || !self.sample_rate.is_finite() {
            return Err(FilterError::InvalidFrequencies);
        }
        let nyquist = self.sample_rate / 2.0;
        let edges = [
            0.0,
            self.stop_low,
            self.pass_low,
            self.pass_high,
            self.stop_high,
            nyquist,
        ];
        if !edges.windows(2).all(|w| w[0] < w[1]) {
            return Err(FilterError::InvalidFrequencies);
        }

        if !(self.pass_ripple_db > 0.0)
            || !(self.stop_attenuation_db > self.pass_ripple_db)
            || !self.stop_attenuation_db.is_finite()
        {
            return Err(FilterError::InvalidAttenuation);
        }
        Ok(())
    }

    /// Minimum Butterworth prototype order meeting the targets. The
    /// band-pass filter built from it has twice as many poles.
    ///
    /// Fails with `OrderTooHigh` when the transition bands are so narrow
    /// that more than [`MAX_ORDER`] would be needed.
    ///
    /// # Examples
    ///
    /// ```
    /// use butter_rs::filter::design::BandpassSpec;
    ///
    /// let spec = BandpassSpec {
    ///     stop_low: 55.0,
    ///     pass_low: 59.0,
    ///     pass_high: 61.0,
    ///     stop_high: 65.0,
    ///     stop_attenuation_db: 60.0,
    ///     pass_ripple_db: 1.0,
    ///     sample_rate: 1920.0,
    /// };
    /// assert_eq!(spec.order().unwrap(), 5);
    /// ```
    pub fn order(&self) -> Result<usize, FilterError> {
        self.validate()?;
        let fs = self.sample_rate;
        let stop_low = digital_to_analog(self.stop_low, fs);
        let pass_low = digital_to_analog(self.pass_low, fs);
        let pass_high = digital_to_analog(self.pass_high, fs);
        let stop_high = digital_to_analog(self.stop_high, fs);

        // Fold each stop-band edge back to its low-pass prototype frequency.
        let w0_sq = pass_low * pass_high;
        let wp = pass_high - pass_low;
        let ws = (stop_low - w0_sq / stop_low)
            .abs()
            .min((stop_high - w0_sq / stop_high).abs());

        let stop = 10f64.powf(self.stop_attenuation_db / 10.0) - 1.0;
        let pass = 10f64.powf(self.pass_ripple_db / 10.0) - 1.0;
        let order = ((stop / pass).sqrt().ln() / (ws / wp).ln()).ceil();
        if !order.is_finite() || order < 1.0 {
            return Err(FilterError::UndefinedOrder);
        }
        if order > MAX_ORDER as f64 {
            return Err(FilterError::OrderTooHigh { max: MAX_ORDER });
        }

        debug!(
            "band-pass {}-{} Hz (stop {}-{} Hz) needs order {}",
            self.pass_low, self.pass_high, self.stop_low, self.stop_high, order
        );
        Ok(order as usize)
    }

    /// Digital zeros, poles and gain of the designed filter.
    pub fn zpk(&self) -> Result<Zpk, FilterError> {
        let order = self.order()?;
        let fs = self.sample_rate;
        let w1 = digital_to_analog(self.stop_low, fs);
        let w2 = digital_to_analog(self.stop_high, fs);
        Ok(Zpk::butterworth(order)
            .lowpass_to_bandpass(w1, w2)?
            .bilinear(fs))
    }

    /// Designs the filter.
    pub fn design(&self) -> Result<DigitalFilter, FilterError> {
        let zpk = self.zpk()?;
        let b = expand_real(&zpk.zeros, zpk.gain);
        let a = expand_real(&zpk.poles, 1.0);
        debug!("designed band-pass filter with {} coefficients", a.len());
        DigitalFilter::new(b, a)
    }
}

/// Designs the lowest order Butterworth band-pass filter that passes
/// `f_pass1..f_pass2` with at most `pass_ripple_db` of ripple and attenuates
/// below `f_stop1` and above `f_stop2` by at least `stop_attenuation_db`.
///
/// # Arguments
///
/// * `f_stop1` - Upper edge of the lower stop band, Hz.
/// * `f_pass1` - Lower edge of the pass band, Hz.
/// * `f_pass2` - Upper edge of the pass band, Hz.
/// * `f_stop2` - Lower edge of the upper stop band, Hz.
/// * `stop_attenuation_db` - Minimum stop-band attenuation, dB.
/// * `pass_ripple_db` - Maximum pass-band ripple, dB.
/// * `sample_rate` - Sample rate, Hz.
///
/// # Examples
///
/// ```
/// use butter_rs::filter::design::design_bandpass_butterworth;
///
/// let filter =
///     design_bandpass_butterworth(55.0, 59.0, 61.0, 65.0, 60.0, 1.0, 1920.0).unwrap();
/// assert_eq!(filter.order(), 10);
/// assert!(filter.magnitude_db(60.0, 1920.0).abs() < 0.5);
/// ```
pub fn design_bandpass_butterworth(
    f_stop1: f64,
    f_pass1: f64,
    f_pass2: f64,
    f_stop2: f64,
    stop_attenuation_db: f64,
    pass_ripple_db: f64,
    sample_rate: f64,
) -> Result<DigitalFilter, FilterError> {
    BandpassSpec {
        stop_low: f_stop1,
        pass_low: f_pass1,
        pass_high: f_pass2,
        stop_high: f_stop2,
        stop_attenuation_db,
        pass_ripple_db,
        sample_rate,
    }
    .design()
}
