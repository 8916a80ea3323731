use crate::util::MathError;
use num_traits::Float;

/// Solves the square system `matrix * x = rhs` by reducing the augmented
/// matrix to reduced row echelon form.
///
/// Rows are swapped so the largest remaining entry of each column becomes
/// the pivot. A column with no nonzero pivot is left unscaled (the pivot is
/// replaced by one), which yields a finite answer for singular systems
/// instead of NaNs.
///
/// # Arguments
///
/// * `matrix` - Rows of the coefficient matrix.
/// * `rhs` - Right-hand side vector, one entry per row.
///
/// # Examples
///
/// ```
/// use butter_rs::util::linalg::solve;
///
/// let matrix: Vec<Vec<f64>> = vec![vec![2.0, 1.0], vec![1.0, 3.0]];
/// let x = solve(&matrix, &[3.0, 5.0]).unwrap();
/// assert!((x[0] - 0.8).abs() < 1e-12);
/// assert!((x[1] - 1.4).abs() < 1e-12);
/// ```
pub fn solve<T>(matrix: &[Vec<T>], rhs: &[T]) -> Result<Vec<T>, MathError>
where
    T: Float,
{
    let n = rhs.len();
    if matrix.len() != n || matrix.iter().any(|row| row.len() != n) {
        return Err(MathError::DimensionMismatch);
    }

    let mut aug: Vec<Vec<T>> = matrix
        .iter()
        .zip(rhs.iter())
        .map(|(row, &r)| {
            let mut row = row.clone();
            row.push(r);
            row
        })
        .collect();

    for col in 0..n {
        // Only a strictly larger entry displaces the current row, so an
        // all-zero column stays where it is.
        let pivot_row = (col + 1..n).fold(col, |best, i| {
            if aug[i][col].abs() > aug[best][col].abs() {
                i
            } else {
                best
            }
        });
        aug.swap(col, pivot_row);

        let mut pivot = aug[col][col];
        if pivot == T::zero() {
            pivot = T::one();
        }
        for v in aug[col].iter_mut() {
            *v = *v / pivot;
        }

        let pivot_vals = aug[col].clone();
        for (i, row) in aug.iter_mut().enumerate() {
            if i == col || row[col] == T::zero() {
                continue;
            }
            let factor = row[col];
            for (v, &p) in row.iter_mut().zip(pivot_vals.iter()) {
                *v = *v - factor * p;
            }
        }
    }

    Ok(aug.into_iter().map(|row| row[n]).collect())
}
