use num::Complex;
use num_traits::Float;

/// Principal square root of a complex value, computed by rotating `z` onto
/// its half-angle direction instead of going through the polar form.
///
/// The result is `sqrt(|z|) * (z + |z|) / |z + |z||`. When `z` lies on the
/// negative real axis the half-angle direction degenerates and the root is
/// taken as `j * sqrt(|z|)`.
///
/// # Examples
///
/// ```
/// use butter_rs::util::math::stable_sqrt;
/// use num::Complex;
///
/// let root = stable_sqrt(Complex::new(3.0_f64, 4.0));
/// assert!((root - Complex::new(2.0, 1.0)).norm() < 1e-12);
/// ```
pub fn stable_sqrt<T>(z: Complex<T>) -> Complex<T>
where
    T: Float,
{
    let mag = z.norm();
    if mag == T::zero() {
        return Complex::new(T::zero(), T::zero());
    }

    let shifted = z + mag;
    let shifted_mag = shifted.norm();
    if shifted_mag == T::zero() {
        return Complex::new(T::zero(), mag.sqrt());
    }
    shifted * (mag.sqrt() / shifted_mag)
}

/// Converts a linear magnitude to decibels.
pub fn to_db(magnitude: f64) -> f64 {
    20.0 * magnitude.log10()
}

/// Relative size of the imaginary part of `z`, used to check that a value
/// which should be real really is.
pub fn imag_residual(z: Complex<f64>) -> f64 {
    let mag = z.norm();
    if mag == 0.0 {
        0.0
    } else {
        z.im.abs() / mag
    }
}
