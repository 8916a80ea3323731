//! This module provides an easy single import for those using this crate.

pub use crate::filter::design::{design_bandpass_butterworth, BandpassSpec};
pub use crate::filter::filtfilt::filtfilt;
pub use crate::filter::iir::DigitalFilter;
pub use crate::filter::zpk::Zpk;
pub use crate::filter::FilterError;
