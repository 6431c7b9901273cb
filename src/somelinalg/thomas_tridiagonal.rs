//! Thomas algorithm (tridiagonal matrix algorithm, "progonka") for M x = rhs.
//!
//! Row i is written as a_i x_{i-1} - c_i x_i + b_i x_{i+1} = -f_i with
//! a_i = M[i][i-1], b_i = M[i][i+1], c_i = -M[i][i], f_i = -rhs_i, and the solution is
//! looked for in the form x_i = alpha_{i+1} x_{i+1} + beta_{i+1}.
use crate::config::SolverConfig;
use crate::somelinalg::linalg_error::{LinSysError, Result};
use crate::somelinalg::matrix_ops::{Matrix, ensure_finite, ensure_rhs};
use itertools::iproduct;
use log::{info, warn};
use nalgebra::DVector;

/// sweep coefficients and the solution; alpha and beta have alpha[0] = beta[0] = 0
#[derive(Debug, Clone, PartialEq)]
pub struct ThomasSweep {
    pub x: DVector<f64>,
    pub alpha: DVector<f64>,
    pub beta: DVector<f64>,
    /// denominators of the forward sweep
    pub z: DVector<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TridiagonalResult {
    pub is_success: bool,
    /// None when the matrix is not strictly tridiagonal
    pub solution: Option<ThomasSweep>,
}

/// strict structure: non-zero exactly on the main, sub- and super-diagonals
pub fn is_tridiagonal(m: &Matrix) -> bool {
    let n = m.nrows();
    if n == 0 || n != m.ncols() {
        return false;
    }
    check_band(m).is_ok()
}

/// first entry breaking the band structure: zero on the band or non-zero off it
fn check_band(m: &Matrix) -> Result<()> {
    let n = m.nrows();
    match iproduct!(0..n, 0..m.ncols()).find(|&(i, j)| {
        let on_band = i == j || i == j + 1 || j == i + 1;
        (m[(i, j)] != 0.0) != on_band
    }) {
        Some((row, col)) => Err(LinSysError::NotTridiagonal { row, col }),
        None => Ok(()),
    }
}

pub fn solve_tridiagonal(m: &Matrix, rhs: &DVector<f64>) -> Result<TridiagonalResult> {
    solve_tridiagonal_with(m, rhs, &SolverConfig::default())
}

pub fn solve_tridiagonal_with(
    m: &Matrix,
    rhs: &DVector<f64>,
    config: &SolverConfig,
) -> Result<TridiagonalResult> {
    let n = ensure_rhs(m, rhs)?;
    ensure_finite(m, "tridiagonal matrix")?;
    if let Err(e) = check_band(m) {
        info!("Thomas algorithm is not applicable: {}", e);
        return Ok(TridiagonalResult {
            is_success: false,
            solution: None,
        });
    }

    let a: DVector<f64> = DVector::from_fn(n, |i, _| if i == 0 { 0.0 } else { m[(i, i - 1)] });
    let b: DVector<f64> = DVector::from_fn(n, |i, _| if i == n - 1 { 0.0 } else { m[(i, i + 1)] });
    let c: DVector<f64> = DVector::from_fn(n, |i, _| -m[(i, i)]);
    let f = -rhs;

    let mut alpha: DVector<f64> = DVector::zeros(n);
    let mut beta: DVector<f64> = DVector::zeros(n);
    let mut z: DVector<f64> = DVector::zeros(n);
    let checked = |i: usize, zi: f64| -> Result<f64> {
        if zi.abs() <= config.pivot_tolerance || !zi.is_finite() {
            warn!("Thomas sweep denominator z[{}] = {:e}", i, zi);
            return Err(LinSysError::SingularMatrix { step: i, value: zi });
        }
        Ok(zi)
    };
    // forward sweep
    for i in 0..n - 1 {
        z[i] = checked(i, c[i] - alpha[i] * a[i])?;
        alpha[i + 1] = b[i] / z[i];
        beta[i + 1] = (f[i] + a[i] * beta[i]) / z[i];
    }
    z[n - 1] = checked(n - 1, c[n - 1] - alpha[n - 1] * a[n - 1])?;

    // back sweep
    let mut x: DVector<f64> = DVector::zeros(n);
    x[n - 1] = (f[n - 1] + a[n - 1] * beta[n - 1]) / z[n - 1];
    for i in (0..n - 1).rev() {
        x[i] = alpha[i + 1] * x[i + 1] + beta[i + 1];
    }
    if x.iter().any(|v: &f64| !v.is_finite()) {
        return Err(LinSysError::NumericInstability(
            "Thomas sweep produced non-finite solution".to_string(),
        ));
    }
    info!("Thomas algorithm finished for n = {}", n);
    Ok(TridiagonalResult {
        is_success: true,
        solution: Some(ThomasSweep { x, alpha, beta, z }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::somelinalg::gauss_elimination::solve_gaussian_system;
    use crate::somelinalg::matrix_ops::from_rows;
    use approx::assert_relative_eq;
    use nalgebra::DMatrix;

    #[test]
    fn test_is_tridiagonal() {
        let m = from_rows(&[
            vec![2.0, -1.0, 0.0],
            vec![-1.0, 2.0, -1.0],
            vec![0.0, -1.0, 2.0],
        ])
        .unwrap();
        assert!(is_tridiagonal(&m));
        // zero on the band is rejected
        let m = from_rows(&[
            vec![2.0, 0.0, 0.0],
            vec![-1.0, 2.0, -1.0],
            vec![0.0, -1.0, 2.0],
        ])
        .unwrap();
        assert!(!is_tridiagonal(&m));
        // non-zero off the band is rejected
        let m = from_rows(&[
            vec![2.0, -1.0, 1.0],
            vec![-1.0, 2.0, -1.0],
            vec![0.0, -1.0, 2.0],
        ])
        .unwrap();
        assert!(!is_tridiagonal(&m));
        assert!(is_tridiagonal(&from_rows(&[vec![3.0]]).unwrap()));
        assert!(!is_tridiagonal(&from_rows(&[vec![0.0]]).unwrap()));
    }

    #[test]
    fn test_thomas_3x3() {
        let m = from_rows(&[
            vec![2.0, -1.0, 0.0],
            vec![-1.0, 2.0, -1.0],
            vec![0.0, -1.0, 2.0],
        ])
        .unwrap();
        let rhs = DVector::from_vec(vec![1.0, 0.0, 1.0]);
        let res = solve_tridiagonal(&m, &rhs).unwrap();
        assert!(res.is_success);
        let sweep = res.solution.unwrap();
        for xi in sweep.x.iter() {
            assert_relative_eq!(*xi, 1.0, epsilon = 1e-12);
        }
        assert_eq!(sweep.alpha[0], 0.0);
        assert_eq!(sweep.beta[0], 0.0);
        assert_relative_eq!(sweep.alpha[1], 0.5, epsilon = 1e-15);
        assert_relative_eq!(sweep.beta[1], 0.5, epsilon = 1e-15);
        assert_relative_eq!(sweep.alpha[2], 2.0 / 3.0, epsilon = 1e-15);
        assert_relative_eq!(sweep.beta[2], 1.0 / 3.0, epsilon = 1e-15);
        assert_relative_eq!(sweep.z[0], -2.0, epsilon = 1e-15);
        assert_relative_eq!(sweep.z[1], -1.5, epsilon = 1e-15);
        assert_relative_eq!(sweep.z[2], -4.0 / 3.0, epsilon = 1e-15);
    }

    #[test]
    fn test_thomas_matches_gauss() {
        let n = 6;
        let m = DMatrix::from_fn(n, n, |i, j| {
            if i == j {
                4.0 + i as f64
            } else if i == j + 1 {
                -1.0 - 0.1 * j as f64
            } else if j == i + 1 {
                2.0
            } else {
                0.0
            }
        });
        let rhs = DVector::from_fn(n, |i, _| (i as f64).sin() + 1.0);
        let sweep = solve_tridiagonal(&m, &rhs).unwrap().solution.unwrap();
        let gauss = solve_gaussian_system(&m, &rhs).unwrap();
        assert_relative_eq!(sweep.x, gauss.solution, epsilon = 1e-12);
    }

    #[test]
    fn test_one_by_one() {
        let m = from_rows(&[vec![4.0]]).unwrap();
        let rhs = DVector::from_vec(vec![2.0]);
        let sweep = solve_tridiagonal(&m, &rhs).unwrap().solution.unwrap();
        assert_eq!(sweep.x[0], 0.5);
    }

    #[test]
    fn test_not_tridiagonal() {
        let m = from_rows(&[
            vec![4.0, 1.0, 1.0],
            vec![1.0, 4.0, 1.0],
            vec![1.0, 1.0, 4.0],
        ])
        .unwrap();
        let rhs = DVector::from_vec(vec![1.0, 1.0, 1.0]);
        let res = solve_tridiagonal(&m, &rhs).unwrap();
        assert!(!res.is_success);
        assert!(res.solution.is_none());
        assert!(matches!(
            check_band(&m),
            Err(LinSysError::NotTridiagonal { row: 0, col: 2 })
        ));
    }

    #[test]
    fn test_zero_denominator() {
        // z[1] = c1 - alpha1 * a1 = -1 + 1 = 0 for this singular matrix
        let m = from_rows(&[vec![1.0, 1.0], vec![1.0, 1.0]]).unwrap();
        let rhs = DVector::from_vec(vec![1.0, 2.0]);
        assert!(matches!(
            solve_tridiagonal(&m, &rhs),
            Err(LinSysError::SingularMatrix { step: 1, .. })
        ));
    }

    #[test]
    fn test_non_finite_rhs() {
        let m = from_rows(&[vec![2.0, -1.0], vec![-1.0, 2.0]]).unwrap();
        for bad in [f64::NAN, f64::INFINITY] {
            let rhs = DVector::from_vec(vec![bad, 1.0]);
            assert!(matches!(
                solve_tridiagonal(&m, &rhs),
                Err(LinSysError::NumericInstability(_))
            ));
        }
    }

    #[test]
    fn test_dimension_mismatch() {
        let m = from_rows(&[vec![2.0, -1.0], vec![-1.0, 2.0]]).unwrap();
        let rhs = DVector::from_vec(vec![1.0, 0.0, 1.0]);
        assert!(matches!(
            solve_tridiagonal(&m, &rhs),
            Err(LinSysError::InvalidDimension { .. })
        ));
    }
}
