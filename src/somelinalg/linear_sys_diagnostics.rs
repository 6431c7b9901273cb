use crate::somelinalg::linalg_error::Result;
use crate::somelinalg::matrix_ops::{Matrix, ensure_rhs, identity, multiply};
use log::warn;
use nalgebra::{DMatrix, DVector, stack};
/// In mathematics, the Rouché–Capelli theorem gives a necessary and sufficient condition for a system of
/// linear equations to have a solution: Ax = b is solvable if and only if rank(A) = rank([A b]).
/// If additionally rank(A) < n the system has infinitely many solutions, so a zero pivot met
/// during elimination means either "no solution" or "no unique solution".
pub fn Rouche_Capelli_theorem(A: &DMatrix<f64>, b: &DVector<f64>) -> bool {
    let Ab: DMatrix<f64> = stack![A, b];
    let eps = f64::EPSILON.sqrt(); // tolerance for rank calculation
    let rank_A = A.rank(eps);
    let rank_Ab = Ab.rank(eps);

    let result = rank_A == rank_Ab;
    if !result {
        warn!(
            "The system has no solution. rank(A) = {} != rank([A b]) = {}",
            rank_A, rank_Ab
        );
    }
    result
}

/// human readable reason why the augmented system [A | b] has no unique solution
pub fn explain_singular_system(augmented: &Matrix) -> String {
    let n = augmented.nrows();
    if augmented.ncols() != n + 1 {
        return "not an augmented square system".to_string();
    }
    let A = augmented.columns(0, n).into_owned();
    let b: DVector<f64> = augmented.column(n).into_owned();
    let rank_A = A.rank(f64::EPSILON.sqrt());
    if rank_A == n {
        format!(
            "rank(A) = {} is full, a pivot fell below the pivot tolerance",
            rank_A
        )
    } else if Rouche_Capelli_theorem(&A, &b) {
        format!(
            "rank(A) = {} < {}, the system has infinitely many solutions",
            rank_A, n
        )
    } else {
        format!("rank(A) = {}, the system is inconsistent", rank_A)
    }
}

/// ||A x - b||_2
pub fn residual_norm(A: &Matrix, x: &DVector<f64>, b: &DVector<f64>) -> Result<f64> {
    ensure_rhs(A, b)?;
    ensure_rhs(A, x)?;
    Ok((A * x - b).norm())
}

/// true if A*M is the unit matrix up to tol (max abs deviation)
pub fn is_inverse_of(A: &Matrix, M: &Matrix, tol: f64) -> bool {
    match multiply(A, M) {
        Ok(product) if product.is_square() => (product - identity(A.nrows())).amax() <= tol,
        _ => false,
    }
}

/// famous example of ill-conditioned matrix
pub fn hilbert_matrix(n: usize) -> DMatrix<f64> {
    DMatrix::from_fn(n, n, |i, j| 1.0 / (i as f64 + j as f64 + 1.0))
}
