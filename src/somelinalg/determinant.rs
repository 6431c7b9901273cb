//! Two independent ways to get a determinant:
//! - from an elimination trace: product of the pivots met before each scaling step,
//!   sign flipped once per row swap. Linear in the trace length.
//! - by recursive cofactor expansion along the first row. Factorial cost, so the order
//!   is bounded by `SolverConfig::max_cofactor_order`.
use crate::config::SolverConfig;
use crate::somelinalg::gauss_elimination::{EliminationTrace, RowOperation, eliminate_traced};
use crate::somelinalg::linalg_error::{LinSysError, Result};
use crate::somelinalg::matrix_ops::{
    Matrix, augment, ensure_finite, ensure_square, leading_submatrix, remove_row_col,
};
use itertools::Itertools;
use log::debug;
use nalgebra::DVector;

#[derive(Debug, Clone, PartialEq)]
pub struct TraceDeterminant {
    pub determinant: f64,
    /// unnormalized pivots in the order they were used
    pub pivots: Vec<f64>,
    pub permutation_count: usize,
}

pub fn determinant_from_trace(trace: &EliminationTrace) -> Result<TraceDeterminant> {
    let mut pivots = Vec::with_capacity(trace.size());
    let mut permutation_count = 0;
    for (prev, step) in trace.iter().tuple_windows() {
        match step.operation {
            RowOperation::Swap { .. } => permutation_count += 1,
            // pivot before it was normalized to 1
            RowOperation::Scale { row, .. } => pivots.push(prev.matrix_state[(row, row)]),
            _ => {}
        }
    }
    let sign = if permutation_count % 2 == 1 { -1.0 } else { 1.0 };
    let determinant = sign * pivots.iter().product::<f64>();
    if !determinant.is_finite() {
        return Err(LinSysError::NumericInstability(format!(
            "determinant from pivots {:?} is {}",
            pivots, determinant
        )));
    }
    Ok(TraceDeterminant {
        determinant,
        pivots,
        permutation_count,
    })
}

pub fn determinant(m: &Matrix) -> Result<f64> {
    determinant_with(m, &SolverConfig::default())
}

/// cofactor expansion, refuses matrices above `config.max_cofactor_order`
pub fn determinant_with(m: &Matrix, config: &SolverConfig) -> Result<f64> {
    let n = ensure_square(m)?;
    if n > config.max_cofactor_order {
        return Err(LinSysError::CofactorOrderExceeded {
            order: n,
            limit: config.max_cofactor_order,
        });
    }
    ensure_finite(m, "determinant input")?;
    let det = cofactor_expansion(m);
    if !det.is_finite() {
        return Err(LinSysError::NumericInstability(format!(
            "cofactor expansion gave {}",
            det
        )));
    }
    Ok(det)
}

fn cofactor_expansion(m: &Matrix) -> f64 {
    let n = m.nrows();
    if n == 1 {
        return m[(0, 0)];
    }
    let mut d = 0.0;
    let mut sign = 1.0;
    for i in 0..n {
        d += sign * m[(0, i)] * cofactor_expansion(&remove_row_col(m, 0, i));
        sign = -sign;
    }
    d
}

pub fn leading_minor(m: &Matrix, order: usize) -> Result<f64> {
    leading_minor_with(m, order, &SolverConfig::default())
}

/// determinant of the top-left order x order block by cofactor expansion
pub fn leading_minor_with(m: &Matrix, order: usize, config: &SolverConfig) -> Result<f64> {
    let sub = leading_block(m, order)?;
    determinant_with(&sub, config)
}

/// same minor, computed from the pivots of an elimination of the block; a singular
/// block has minor 0
pub fn leading_minor_from_trace(m: &Matrix, order: usize, config: &SolverConfig) -> Result<f64> {
    let sub = leading_block(m, order)?;
    let system = augment(&sub, &DVector::zeros(order))?;
    match eliminate_traced(&system, config) {
        Ok(res) => Ok(determinant_from_trace(&res.trace)?.determinant),
        Err(LinSysError::SingularMatrix { step, .. }) => {
            debug!("leading block of order {} is singular at column {}", order, step);
            Ok(0.0)
        }
        Err(e) => Err(e),
    }
}

fn leading_block(m: &Matrix, order: usize) -> Result<Matrix> {
    let n = ensure_square(m)?;
    if order < 1 || order > n {
        return Err(LinSysError::InvalidOrder { order, size: n });
    }
    Ok(leading_submatrix(m, order))
}
