use butter_rs::prelude::*;
use rustfft::num_complex::Complex;
use rustfft::num_traits::Zero;
use rustfft::FFTplanner;
use std::f64::consts::PI;

const FS: f64 = 1920.0;

fn mains_filter() -> DigitalFilter {
    design_bandpass_butterworth(55.0, 59.0, 61.0, 65.0, 60.0, 1.0, FS).unwrap()
}

fn sine(freq: f64, len: usize) -> Vec<f64> {
    (0..len)
        .map(|i| (2.0 * PI * freq * i as f64 / FS).sin())
        .collect()
}

fn spectrum(signal: &[f64]) -> Vec<f64> {
    let n = signal.len();
    let mut planner = FFTplanner::new(false);
    let fft = planner.plan_fft(n);
    let mut input: Vec<Complex<f64>> = signal.iter().map(|&x| Complex::new(x, 0.0)).collect();
    let mut output: Vec<Complex<f64>> = vec![Complex::zero(); n];
    fft.process(&mut input[..], &mut output[..]);
    output.iter().map(|x| x.norm()).collect()
}

#[test]
fn mains_scenario_rejects_low_tone() {
    let len = 10 * FS as usize;
    let signal: Vec<f64> = sine(60.0, len)
        .iter()
        .zip(sine(10.0, len).iter())
        .map(|(a, b)| a + b)
        .collect();
    let filter = mains_filter();
    let output = filter.filtfilt(&signal).unwrap();
    assert_eq!(output.len(), signal.len());

    // Skip the first and last second, leaving a whole number of cycles of
    // both tones.
    let interior = &output[FS as usize..9 * FS as usize];
    let spec = spectrum(interior);
    let bin_hz = FS / interior.len() as f64;
    let passed = spec[(60.0 / bin_hz) as usize];
    let rejected = spec[(10.0 / bin_hz) as usize];

    assert!(passed / (interior.len() as f64 / 2.0) > 0.9);
    assert!(20.0 * (rejected / passed).log10() < -40.0);
}

#[test]
fn mains_filter_unity_gain_at_center() {
    let filter = mains_filter();
    let center = (59.0_f64 * 61.0).sqrt();
    assert!(filter.magnitude_db(center, FS).abs() < 0.5);

    let wide = design_bandpass_butterworth(300.0, 500.0, 1000.0, 1500.0, 30.0, 0.5, 8000.0).unwrap();
    let center = (500.0_f64 * 1000.0).sqrt();
    assert!(wide.magnitude_db(center, 8000.0).abs() < 0.5);
}

#[test]
fn order_grows_as_transition_narrows() {
    let mut last = 0;
    for &width in &[10.0, 8.0, 6.0, 4.0, 3.0, 2.0, 1.5, 1.0] {
        let spec = BandpassSpec {
            stop_low: 59.0 - width,
            pass_low: 59.0,
            pass_high: 61.0,
            stop_high: 61.0 + width,
            stop_attenuation_db: 60.0,
            pass_ripple_db: 1.0,
            sample_rate: FS,
        };
        let order = spec.order().unwrap();
        assert!(order >= last, "width {} gave order {} < {}", width, order, last);
        last = order;
    }
    assert!(last > 5);
}

#[test]
fn filtfilt_is_zero_phase() {
    let filter = design_bandpass_butterworth(40.0, 55.0, 65.0, 80.0, 20.0, 3.0, 1000.0).unwrap();
    let pulse: Vec<f64> = (0..801)
        .map(|i| {
            let t = i as f64 - 400.0;
            (-(t / 60.0).powi(2)).exp() * (2.0 * PI * 60.0 * t / 1000.0).cos()
        })
        .collect();
    let reversed: Vec<f64> = pulse.iter().rev().cloned().collect();

    let output = filter.filtfilt(&pulse).unwrap();
    let mut output_rev = filter.filtfilt(&reversed).unwrap();
    output_rev.reverse();
    for (a, b) in output.iter().zip(output_rev.iter()) {
        assert!((a - b).abs() < 1e-9);
    }
}

#[test]
fn filtfilt_keeps_burst_centered() {
    let len = 4 * FS as usize + 1;
    let center = (len - 1) / 2;
    let burst: Vec<f64> = (0..len)
        .map(|i| {
            let t = (i as f64 - center as f64) / FS;
            (-(t / 0.3).powi(2)).exp() * (2.0 * PI * 60.0 * t).cos()
        })
        .collect();

    let output = mains_filter().filtfilt(&burst).unwrap();
    let peak = output
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.abs().partial_cmp(&b.1.abs()).unwrap())
        .map(|(i, _)| i)
        .unwrap();
    assert_eq!(peak, center);
    for i in 0..len {
        // Rounding in the order 10 recurrence is the only asymmetry.
        assert!((output[i] - output[len - 1 - i]).abs() < 1e-2);
    }
}

#[test]
fn constant_signal_is_blocked() {
    let filter = design_bandpass_butterworth(40.0, 55.0, 65.0, 80.0, 20.0, 3.0, 1000.0).unwrap();
    let output = filter.filtfilt(&[1.0; 200]).unwrap();
    assert_eq!(output.len(), 200);
    assert!(output.iter().all(|y| y.abs() < 1e-9));

    let output = mains_filter().filtfilt(&[1.0; 500]).unwrap();
    assert!(output.iter().all(|y| y.abs() < 1e-6));
}

#[test]
fn filtfilt_length_boundary() {
    let filter = mains_filter();
    let min = filter.padlen() + 1;
    assert_eq!(filter.padlen(), 30);

    let err = filter.filtfilt(&sine(60.0, min - 1)).unwrap_err();
    assert_eq!(err, FilterError::SignalTooShort { len: min - 1, min });
    assert!(filter.filtfilt(&[]).is_err());
    assert_eq!(filter.filtfilt(&sine(60.0, min)).unwrap().len(), min);
}

#[test]
fn raw_coefficients_match_designed_filter() {
    let filter = mains_filter();
    let signal = sine(60.0, 400);
    assert_eq!(
        filtfilt(filter.numerator(), filter.denominator(), &signal).unwrap(),
        filter.filtfilt(&signal).unwrap()
    );
}

#[test]
fn design_rejects_bad_parameters() {
    assert_eq!(
        design_bandpass_butterworth(59.0, 55.0, 61.0, 65.0, 60.0, 1.0, FS),
        Err(FilterError::InvalidFrequencies)
    );
    assert_eq!(
        design_bandpass_butterworth(55.0, 59.0, 61.0, 65.0, 60.0, 0.0, FS),
        Err(FilterError::InvalidAttenuation)
    );
    assert_eq!(
        design_bandpass_butterworth(55.0, 59.0, 61.0, 65.0, 1.0, 1.0, FS),
        Err(FilterError::InvalidAttenuation)
    );
}
