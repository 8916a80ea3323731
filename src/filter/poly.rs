//! Polynomial helpers for going between roots and coefficients.
//!
//! Coefficient vectors are ordered from the leading (highest power)
//! coefficient down, so `[1.0, -3.0, 2.0]` is `x^2 - 3x + 2`. Read the same
//! vector as powers of `z^-1` and it is the numerator or denominator of a
//! transfer function.

use crate::filter::zpk::REAL_TOLERANCE;
use crate::util::math::imag_residual;
use num::Complex;

/// Expands `prod(x - r)` over `roots` into its coefficients.
///
/// Starting from `[1]`, each root convolves the coefficients with `[1, -r]`.
///
/// # Examples
///
/// ```
/// use butter_rs::filter::poly::expand;
/// use num::Complex;
///
/// let coeffs = expand(&[Complex::new(1.0, 0.0), Complex::new(2.0, 0.0)]);
/// assert_eq!(coeffs.len(), 3);
/// assert!((coeffs[1].re + 3.0).abs() < 1e-12);
/// ```
pub fn expand(roots: &[Complex<f64>]) -> Vec<Complex<f64>> {
    roots
        .iter()
        .fold(vec![Complex::new(1.0, 0.0)], |coeffs, &root| {
            let mut next = coeffs.clone();
            next.push(Complex::new(0.0, 0.0));
            for (i, &c) in coeffs.iter().enumerate() {
                next[i + 1] = next[i + 1] - root * c;
            }
            next
        })
}

/// Expands `roots` like [`expand`] and keeps the real parts, scaled by
/// `gain`.
///
/// The roots should come in conjugate pairs so that the imaginary parts
/// cancel; a leftover imaginary part gets logged.
pub fn expand_real(roots: &[Complex<f64>], gain: f64) -> Vec<f64> {
    let coeffs = expand(roots);
    let residual = coeffs
        .iter()
        .map(|&c| imag_residual(c))
        .fold(0.0, f64::max);
    if residual > REAL_TOLERANCE {
        warn!(
            "expanded polynomial has imaginary residual {:e}, keeping the real part",
            residual
        );
    }
    coeffs.iter().map(|c| c.re * gain).collect()
}

/// Evaluates `sum(coeffs[k] * x^k)` with Horner's method.
///
/// With `x = e^(-jw)` this is a transfer function numerator or denominator
/// evaluated at normalized frequency `w`.
pub fn eval_ascending(coeffs: &[f64], x: Complex<f64>) -> Complex<f64> {
    coeffs
        .iter()
        .rev()
        .fold(Complex::new(0.0, 0.0), |acc, &c| acc * x + c)
}

#[cfg(test)]
mod test {
    use crate::filter::poly::*;
    use assert_approx_eq::assert_approx_eq;
    use num::Complex;

    #[test]
    fn test_expand_real_roots() {
        let coeffs = expand_real(&[Complex::new(1.0, 0.0), Complex::new(2.0, 0.0)], 1.0);
        assert_eq!(coeffs.len(), 3);
        assert_approx_eq!(coeffs[0], 1.0);
        assert_approx_eq!(coeffs[1], -3.0);
        assert_approx_eq!(coeffs[2], 2.0);
    }

    #[test]
    fn test_expand_conjugate_pair() {
        let roots = vec![Complex::new(1.0, 1.0), Complex::new(1.0, -1.0)];
        let coeffs = expand(&roots);
        for c in &coeffs {
            assert_approx_eq!(c.im, 0.0);
        }
        let real = expand_real(&roots, 2.0);
        assert_approx_eq!(real[0], 2.0);
        assert_approx_eq!(real[1], -4.0);
        assert_approx_eq!(real[2], 4.0);
    }

    #[test]
    fn test_expand_empty() {
        assert_eq!(expand_real(&[], 3.0), vec![3.0]);
    }

    #[test]
    fn test_expand_vanishes_at_roots() {
        let roots = vec![
            Complex::new(0.5, 0.25),
            Complex::new(0.5, -0.25),
            Complex::new(-1.0, 0.0),
        ];
        let coeffs = expand_real(&roots, 1.0);
        // Coefficients run from the leading term down.
        let ascending: Vec<f64> = coeffs.iter().rev().cloned().collect();
        for &r in &roots {
            assert!(eval_ascending(&ascending, r).norm() < 1e-12);
        }
    }

    #[test]
    fn test_eval_ascending() {
        // 1 + 2x + 3x^2 at x = 2
        let val = eval_ascending(&[1.0, 2.0, 3.0], Complex::new(2.0, 0.0));
        assert_approx_eq!(val.re, 17.0);
        assert_approx_eq!(val.im, 0.0);
        // at x = j: 1 + 2j - 3
        let val = eval_ascending(&[1.0, 2.0, 3.0], Complex::new(0.0, 1.0));
        assert_approx_eq!(val.re, -2.0);
        assert_approx_eq!(val.im, 2.0);
    }
}
