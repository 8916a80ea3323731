//! Butterworth band-pass filter design and zero-phase IIR filtering.
//!
//! # Example
//!
//! ```
//! use butter_rs::prelude::*;
//! use std::f64::consts::PI;
//!
//! let fs = 1920.0;
//! let filter = design_bandpass_butterworth(55.0, 59.0, 61.0, 65.0, 60.0, 1.0, fs).unwrap();
//!
//! let signal: Vec<f64> = (0..1920)
//!     .map(|i| (2.0 * PI * 60.0 * i as f64 / fs).sin())
//!     .collect();
//! let output = filter.filtfilt(&signal).unwrap();
//! assert_eq!(output.len(), signal.len());
//! ```

#[macro_use]
extern crate log;

pub mod filter;
pub mod prelude;
pub mod util;
