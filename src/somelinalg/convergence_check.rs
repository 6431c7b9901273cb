//! Sufficient conditions for the convergence of the Seidel iteration:
//! a symmetric positive definite matrix, or a (row) diagonally dominant one.
use crate::config::SolverConfig;
use crate::somelinalg::determinant::{leading_minor_from_trace, leading_minor_with};
use crate::somelinalg::linalg_error::Result;
use crate::somelinalg::matrix_ops::{Matrix, ensure_square};
use log::{debug, info};

/// verdict of the convergence test, with every partial answer kept so a caller can
/// explain why a matrix is (not) eligible
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeidelCheck {
    pub applicable: bool,
    pub symmetric: bool,
    pub positive_definite: bool,
    pub diagonally_dominant: bool,
}

/// exact elementwise symmetry m[i][j] == m[j][i]; non-square matrices are not symmetric
pub fn is_symmetric(m: &Matrix) -> bool {
    let n = m.nrows();
    if n != m.ncols() {
        return false;
    }
    (0..n).all(|i| (i + 1..n).all(|j| m[(i, j)] == m[(j, i)]))
}

pub fn is_positive_definite(m: &Matrix) -> Result<bool> {
    is_positive_definite_with(m, &SolverConfig::default())
}

/// Sylvester-style test: every leading principal minor must be non-negative.
/// NOTE: a zero minor passes, the textbook criterion wants strictly positive minors.
/// Minors above `config.max_cofactor_order` are taken from an elimination trace.
pub fn is_positive_definite_with(m: &Matrix, config: &SolverConfig) -> Result<bool> {
    let n = ensure_square(m)?;
    for order in 1..=n {
        let minor = if order <= config.max_cofactor_order {
            leading_minor_with(m, order, config)?
        } else {
            leading_minor_from_trace(m, order, config)?
        };
        if minor < 0.0 {
            debug!("leading minor of order {} is negative: {}", order, minor);
            return Ok(false);
        }
    }
    Ok(true)
}

/// strict row dominance |m_ii| > sum_{j != i} |m_ij| for every row
pub fn is_diagonally_dominant(m: &Matrix) -> bool {
    if !m.is_square() {
        return false;
    }
    m.row_iter().enumerate().all(|(i, row)| {
        let off_diagonal: f64 = row
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != i)
            .map(|(_, v)| v.abs())
            .sum();
        row[i].abs() > off_diagonal
    })
}

pub fn check_seidel_applicability(m: &Matrix) -> Result<SeidelCheck> {
    check_seidel_applicability_with(m, &SolverConfig::default())
}

/// applicable = (symmetric and positive definite) or diagonally dominant
pub fn check_seidel_applicability_with(m: &Matrix, config: &SolverConfig) -> Result<SeidelCheck> {
    ensure_square(m)?;
    let symmetric = is_symmetric(m);
    let positive_definite = is_positive_definite_with(m, config)?;
    let diagonally_dominant = is_diagonally_dominant(m);
    let check = SeidelCheck {
        applicable: (symmetric && positive_definite) || diagonally_dominant,
        symmetric,
        positive_definite,
        diagonally_dominant,
    };
    info!("Seidel convergence check: {:?}", check);
    Ok(check)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::somelinalg::linalg_error::LinSysError;
    use crate::somelinalg::matrix_ops::from_rows;
    use nalgebra::DMatrix;
    use rand::Rng;

    #[test]
    fn test_is_symmetric() {
        let m = from_rows(&[vec![1.0, 2.0], vec![2.0, 1.0]]).unwrap();
        assert!(is_symmetric(&m));
        let m = from_rows(&[vec![1.0, 2.0], vec![2.0000001, 1.0]]).unwrap();
        assert!(!is_symmetric(&m));
        let rect = from_rows(&[vec![1.0, 2.0, 3.0]]).unwrap();
        assert!(!is_symmetric(&rect));
    }

    #[test]
    fn test_is_positive_definite() {
        let m = from_rows(&[vec![4.0, 1.0], vec![1.0, 3.0]]).unwrap();
        assert!(is_positive_definite(&m).unwrap());
        let m = from_rows(&[vec![1.0, 2.0], vec![2.0, 1.0]]).unwrap();
        assert!(!is_positive_definite(&m).unwrap());
        // zero minors are accepted
        let m = from_rows(&[vec![0.0, 0.0], vec![0.0, 1.0]]).unwrap();
        assert!(is_positive_definite(&m).unwrap());
        let rect = from_rows(&[vec![1.0, 2.0, 3.0]]).unwrap();
        assert!(matches!(
            is_positive_definite(&rect),
            Err(LinSysError::InvalidDimension { .. })
        ));
    }

    #[test]
    fn test_positive_definite_large_uses_trace() {
        // 12x12 tridiagonal [-1 2 -1] is positive definite, beyond the cofactor limit
        let n = 12;
        let m = DMatrix::from_fn(n, n, |i, j| {
            if i == j {
                2.0
            } else if i.abs_diff(j) == 1 {
                -1.0
            } else {
                0.0
            }
        });
        assert!(is_positive_definite(&m).unwrap());
        let negated = -m;
        assert!(!is_positive_definite(&negated).unwrap());
    }

    #[test]
    fn test_is_diagonally_dominant() {
        let m = from_rows(&[vec![4.0, 1.0], vec![1.0, 3.0]]).unwrap();
        assert!(is_diagonally_dominant(&m));
        // ties are rejected
        let m = from_rows(&[vec![2.0, 2.0], vec![1.0, 3.0]]).unwrap();
        assert!(!is_diagonally_dominant(&m));
        // negative diagonal uses its magnitude
        let m = from_rows(&[vec![-5.0, 1.0], vec![1.0, -3.0]]).unwrap();
        assert!(is_diagonally_dominant(&m));
    }

    #[test]
    fn test_check_seidel() {
        let m = from_rows(&[vec![4.0, 1.0], vec![1.0, 3.0]]).unwrap();
        let check = check_seidel_applicability(&m).unwrap();
        assert_eq!(
            check,
            SeidelCheck {
                applicable: true,
                symmetric: true,
                positive_definite: true,
                diagonally_dominant: true,
            }
        );
        // symmetric, positive definite, not dominant
        let m = from_rows(&[vec![1.0, 1.0], vec![1.0, 2.0]]).unwrap();
        let check = check_seidel_applicability(&m).unwrap();
        assert!(check.applicable && !check.diagonally_dominant);
        // neither
        let m = from_rows(&[vec![1.0, 3.0], vec![2.0, 1.0]]).unwrap();
        let check = check_seidel_applicability(&m).unwrap();
        assert!(!check.applicable);
        assert!(!check.symmetric);
        assert!(!check.positive_definite);
    }

    #[test]
    fn test_diagonally_dominant_is_always_applicable() {
        let mut rng = rand::rng();
        for n in 1..7 {
            let mut m = DMatrix::from_fn(n, n, |_, _| rng.random_range(-1.0..1.0_f64));
            for i in 0..n {
                let off: f64 = (0..n).filter(|j| *j != i).map(|j| m[(i, j)].abs()).sum();
                let sign = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
                m[(i, i)] = sign * (off + rng.random_range(0.1..1.0));
            }
            let check = check_seidel_applicability(&m).unwrap();
            assert!(check.diagonally_dominant);
            assert!(check.applicable);
        }
    }
}
