//! Ordinary least squares solver.
//!
//! The forecaster fits one tiny regression per report: a straight line
//! `y = a·x + b` over the historical index. We still solve it through SVD
//! rather than the closed-form slope/intercept formulas:
//!
//! - SVD handles tall design matrices robustly (nalgebra's `QR::solve` is
//!   intended for square systems and will panic for non-square matrices).
//! - The parameter dimension is 2, so SVD cost is irrelevant.

use nalgebra::{DMatrix, DVector};

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    // Try progressively looser tolerances if strict solve fails.
    for &tol in &[1e-10, 1e-8, 1e-6] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

/// Design matrix for a straight-line fit: one `[1, x]` row per observation.
pub fn line_design(xs: &[f64]) -> DMatrix<f64> {
    DMatrix::from_fn(xs.len(), 2, |r, c| if c == 0 { 1.0 } else { xs[r] })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn least_squares_solves_simple_system() {
        // Fit y = 2 + 3x on x = [0,1,2]
        let x = line_design(&[0.0, 1.0, 2.0]);
        let y = DVector::from_row_slice(&[2.0, 5.0, 8.0]);

        let beta = solve_least_squares(&x, &y).unwrap();
        assert!((beta[0] - 2.0).abs() < 1e-10);
        assert!((beta[1] - 3.0).abs() < 1e-10);
    }

    #[test]
    fn line_design_has_intercept_column() {
        let x = line_design(&[5.0, 6.0]);
        assert_eq!(x.nrows(), 2);
        assert_eq!(x[(0, 0)], 1.0);
        assert_eq!(x[(1, 1)], 6.0);
    }
}
