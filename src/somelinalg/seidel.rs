//! Seidel (fixed point) iteration for A x = b.
//!
//! The system is rewritten as x = C x + d with C[i][j] = -A[i][j]/A[i][i] (C[i][i] = 0) and
//! d[i] = b[i]/A[i][i]. The schema matrix stores C with d appended as column n, so one row of
//! the schema applied to (x, 1) gives the next value of x_i.
//!
//! NOTE: the default [`SeidelUpdate::PreviousIterate`] computes every component of the new
//! iterate from the previous full iterate, which is the Jacobi update although the method is
//! named after Seidel. [`SeidelUpdate::InPlace`] reuses components already updated in the
//! current sweep (the Gauss-Seidel update).
//! ```
//! use RustedLinSteps::somelinalg::seidel::solve_seidel;
//! use RustedLinSteps::somelinalg::matrix_ops::from_rows;
//! use nalgebra::DVector;
//! let a = from_rows(&[vec![4.0, 1.0], vec![1.0, 3.0]]).unwrap();
//! let b = DVector::from_vec(vec![1.0, 2.0]);
//! let res = solve_seidel(&a, &b, 1e-3).unwrap();
//! assert!(res.is_success);
//! let x = res.solution.unwrap().last().clone();
//! assert!((x[0] - 1.0 / 11.0).abs() < 1e-3);
//! ```
use crate::config::SolverConfig;
use crate::somelinalg::convergence_check::{SeidelCheck, check_seidel_applicability_with};
use crate::somelinalg::linalg_error::{LinSysError, Result};
use crate::somelinalg::matrix_ops::{Matrix, ensure_finite, ensure_rhs};
use log::{info, warn};
use nalgebra::{DMatrix, DVector};
use strum_macros::{Display, EnumString};

/// how the components of the next iterate are computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum SeidelUpdate {
    /// every component from the previous iterate only (Jacobi-style)
    PreviousIterate,
    /// component i uses components 0..i already computed in this sweep
    InPlace,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeidelSolution {
    /// n x (n+1): iteration matrix with the constant term as last column
    pub schema: Matrix,
    /// iterate 0 is the zero vector, the last one is the solution
    pub iterates: Vec<DVector<f64>>,
}

impl SeidelSolution {
    pub fn last(&self) -> &DVector<f64> {
        &self.iterates[self.iterates.len() - 1]
    }
    /// number of iterations performed (iterate 0 excluded)
    pub fn iterations(&self) -> usize {
        self.iterates.len() - 1
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeidelResult {
    pub is_success: bool,
    pub diagnostics: SeidelCheck,
    /// None when the convergence test rejects the matrix
    pub solution: Option<SeidelSolution>,
}

/// builds x = C x + d in the augmented form [C | d]; a zero diagonal entry is singular
pub fn build_schema(a: &Matrix, b: &DVector<f64>, pivot_tolerance: f64) -> Result<Matrix> {
    let n = ensure_rhs(a, b)?;
    if let Some(i) = (0..n).find(|&i| a[(i, i)].abs() <= pivot_tolerance) {
        return Err(LinSysError::SingularMatrix {
            step: i,
            value: a[(i, i)],
        });
    }
    Ok(DMatrix::from_fn(n, n + 1, |i, j| {
        if j == n {
            b[i] / a[(i, i)]
        } else if i == j {
            0.0
        } else {
            -a[(i, j)] / a[(i, i)]
        }
    }))
}

/// one sweep x_next = C x + d
fn next_iterate(schema: &Matrix, prev: &DVector<f64>, update: SeidelUpdate) -> DVector<f64> {
    let n = prev.len();
    let mut next = prev.clone();
    for i in 0..n {
        // the appended constant is multiplied by an explicit 1
        let mut acc = schema[(i, n)];
        for j in 0..n {
            let xj = match update {
                SeidelUpdate::PreviousIterate => prev[j],
                SeidelUpdate::InPlace => next[j],
            };
            acc += schema[(i, j)] * xj;
        }
        next[i] = acc;
    }
    next
}

pub fn solve_seidel(a: &Matrix, b: &DVector<f64>, epsilon: f64) -> Result<SeidelResult> {
    solve_seidel_with(a, b, epsilon, &SolverConfig::default())
}

/// iterates from the zero vector until ||x_k - x_{k-1}||_2 <= epsilon.
/// Not applicable matrices give `is_success == false`; hitting `config.max_iterations`
/// is a `ConvergenceFailure`.
pub fn solve_seidel_with(
    a: &Matrix,
    b: &DVector<f64>,
    epsilon: f64,
    config: &SolverConfig,
) -> Result<SeidelResult> {
    let n = ensure_rhs(a, b)?;
    if !epsilon.is_finite() || epsilon <= 0.0 {
        return Err(LinSysError::InvalidTolerance(epsilon));
    }
    ensure_finite(a, "coefficient matrix")?;
    if b.iter().any(|v| !v.is_finite()) {
        return Err(LinSysError::NumericInstability(
            "right hand side has non-finite entries".to_string(),
        ));
    }

    let diagnostics = check_seidel_applicability_with(a, config)?;
    if !diagnostics.applicable {
        info!("Seidel method is not applicable: {:?}", diagnostics);
        return Ok(SeidelResult {
            is_success: false,
            diagnostics,
            solution: None,
        });
    }

    let schema = build_schema(a, b, config.pivot_tolerance)?;
    let mut prev: DVector<f64> = DVector::zeros(n);
    let mut iterates = vec![prev.clone()];
    let mut delta = f64::INFINITY;
    for iteration in 1..=config.max_iterations {
        let next = next_iterate(&schema, &prev, config.seidel_update);
        if next.iter().any(|v| !v.is_finite()) {
            return Err(LinSysError::NumericInstability(format!(
                "iterate {} has non-finite entries",
                iteration
            )));
        }
        delta = (&next - &prev).norm();
        iterates.push(next.clone());
        if delta <= epsilon {
            info!(
                "Seidel iteration ({} update) converged in {} iterations, delta = {:e}",
                config.seidel_update, iteration, delta
            );
            return Ok(SeidelResult {
                is_success: true,
                diagnostics,
                solution: Some(SeidelSolution { schema, iterates }),
            });
        }
        prev = next;
    }
    warn!(
        "Seidel iteration did not converge in {} iterations, delta = {:e}",
        config.max_iterations, delta
    );
    Err(LinSysError::ConvergenceFailure {
        iterations: config.max_iterations,
        last_delta: delta,
    })
}
