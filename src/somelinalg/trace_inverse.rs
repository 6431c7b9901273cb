//! Inverting of matrix is A*B = E where A is given matrix, E - is Unit matrix, and B is inverse matrix.
//! Gaussian elimination reduces A to E by a chain of elementary matrices E_k...E_2 E_1 A = E,
//! so the product E_k...E_1 of everything recorded in the trace is exactly B.
use crate::config::SolverConfig;
use crate::somelinalg::gauss_elimination::{EliminationTrace, solve_gaussian_with};
use crate::somelinalg::linalg_error::Result;
use crate::somelinalg::matrix_ops::{Matrix, augment, ensure_square, identity, multiply};
use log::info;
use nalgebra::DVector;

/// running product of the elementary matrices, one entry per non-initial step.
/// The last entry is the inverse of the coefficient part of the traced system.
pub fn inverse_from_trace(trace: &EliminationTrace) -> Result<Vec<Matrix>> {
    let mut acc = identity(trace.size());
    let mut products = Vec::with_capacity(trace.steps().len().saturating_sub(1));
    for op in trace.iter().filter_map(|s| s.operation_matrix.as_ref()) {
        acc = multiply(op, &acc)?;
        products.push(acc.clone());
    }
    Ok(products)
}

pub fn inverse(a: &Matrix) -> Result<Matrix> {
    inverse_with(a, &SolverConfig::default())
}

/// inverse of a square matrix: eliminate [A | 0] and take the final running product
pub fn inverse_with(a: &Matrix, config: &SolverConfig) -> Result<Matrix> {
    let n = ensure_square(a)?;
    let res = solve_gaussian_with(&augment(a, &DVector::zeros(n))?, config)?;
    let mut products = inverse_from_trace(&res.trace)?;
    info!("inverse of {}x{} matrix from {} steps", n, n, products.len());
    Ok(products.pop().unwrap_or_else(|| identity(n)))
}
