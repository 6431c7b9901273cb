//! Gaussian elimination with partial (row) pivoting on an augmented matrix [A | b].
//!
//! Every row operation is expressed as an elementary matrix E and applied as E*M, and
//! each application is recorded as a [`Step`], so the whole derivation can be replayed:
//! the running product of the recorded E's is the inverse of A (see `trace_inverse`),
//! and the pivots met along the way give the determinant (see `determinant`).
//! ```
//! use RustedLinSteps::somelinalg::gauss_elimination::solve_gaussian;
//! use RustedLinSteps::somelinalg::matrix_ops::from_rows;
//! let ab = from_rows(&[
//!     vec![2.0, 1.0, -1.0, 8.0],
//!     vec![-3.0, -1.0, 2.0, -11.0],
//!     vec![-2.0, 1.0, 2.0, -3.0],
//! ])
//! .unwrap();
//! let res = solve_gaussian(&ab).unwrap();
//! assert!((res.solution[0] - 2.0).abs() < 1e-10);
//! assert!((res.solution[1] - 3.0).abs() < 1e-10);
//! assert!((res.solution[2] + 1.0).abs() < 1e-10);
//! ```
use crate::config::SolverConfig;
use crate::somelinalg::linalg_error::{LinSysError, Result};
use crate::somelinalg::linear_sys_diagnostics::explain_singular_system;
use crate::somelinalg::matrix_ops::{
    Matrix, augment, elimination_matrix, ensure_finite, multiply, permutation_matrix,
    scaling_matrix,
};
use log::{debug, info, warn};
use nalgebra::DVector;
use strum_macros::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum OperationType {
    None,
    Permutation,
    Scaling,
    Elimination,
}

/// the row operation a step performs, with its rows and factor
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RowOperation {
    /// snapshot of the input, nothing applied
    Initial,
    Swap { row_a: usize, row_b: usize },
    Scale { row: usize, factor: f64 },
    /// row target -= factor * row source
    Eliminate {
        target: usize,
        source: usize,
        factor: f64,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub operation: RowOperation,
    /// elementary matrix applied at this step, None only for the initial snapshot
    pub operation_matrix: Option<Matrix>,
    /// state of the system after the operation
    pub matrix_state: Matrix,
}

impl Step {
    pub fn operation_type(&self) -> OperationType {
        match self.operation {
            RowOperation::Initial => OperationType::None,
            RowOperation::Swap { .. } => OperationType::Permutation,
            RowOperation::Scale { .. } => OperationType::Scaling,
            RowOperation::Eliminate { .. } => OperationType::Elimination,
        }
    }

    /// one-line label of the operation
    pub fn describe(&self) -> String {
        match self.operation {
            RowOperation::Initial => "initial system".to_string(),
            RowOperation::Swap { row_a, row_b } => format!("swap rows {} and {}", row_a, row_b),
            RowOperation::Scale { row, factor } => format!("scale row {} by {}", row, factor),
            RowOperation::Eliminate {
                target,
                source,
                factor,
            } => format!("row {} -= {} * row {}", target, factor, source),
        }
    }
}

/// chronological list of steps, always starting with the `none` snapshot of the input.
/// Only the solver builds it, so the structure is valid by construction.
#[derive(Debug, Clone, PartialEq)]
pub struct EliminationTrace {
    steps: Vec<Step>,
}

impl EliminationTrace {
    fn new(original: Matrix) -> Self {
        EliminationTrace {
            steps: vec![Step {
                operation: RowOperation::Initial,
                operation_matrix: None,
                matrix_state: original,
            }],
        }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Step> {
        self.steps.iter()
    }

    /// number of equations (rows) of the system
    pub fn size(&self) -> usize {
        self.original().nrows()
    }

    pub fn original(&self) -> &Matrix {
        &self.steps[0].matrix_state
    }

    pub fn final_state(&self) -> &Matrix {
        &self.steps[self.steps.len() - 1].matrix_state
    }

    pub fn permutation_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| s.operation_type() == OperationType::Permutation)
            .count()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GaussResult {
    pub trace: EliminationTrace,
    pub solution: DVector<f64>,
}

/// holds the current state while the trace is being recorded
struct TraceRecorder {
    trace: EliminationTrace,
    current: Matrix,
    n: usize,
}

impl TraceRecorder {
    fn apply(&mut self, operation: RowOperation, op_matrix: Matrix) -> Result<()> {
        let next = multiply(&op_matrix, &self.current)?;
        ensure_finite(&next, "gaussian elimination")?;
        self.current = next;
        let step = Step {
            operation,
            operation_matrix: Some(op_matrix),
            matrix_state: self.current.clone(),
        };
        debug!("step {}: {}", self.trace.steps.len(), step.describe());
        self.trace.steps.push(step);
        Ok(())
    }

    /// subtract current[(target, col)] times row `source` from row `target`
    fn eliminate(&mut self, target: usize, source: usize, col: usize) -> Result<()> {
        let factor = self.current[(target, col)];
        self.apply(
            RowOperation::Eliminate {
                target,
                source,
                factor,
            },
            elimination_matrix(self.n, target, source, factor),
        )
    }
}

/// solves the augmented system (n rows, n+1 columns) with the default settings
pub fn solve_gaussian(augmented: &Matrix) -> Result<GaussResult> {
    solve_gaussian_with(augmented, &SolverConfig::default())
}

/// convenience for A x = b given separately
pub fn solve_gaussian_system(a: &Matrix, b: &DVector<f64>) -> Result<GaussResult> {
    solve_gaussian(&augment(a, b)?)
}

pub fn solve_gaussian_with(augmented: &Matrix, config: &SolverConfig) -> Result<GaussResult> {
    match eliminate_traced(augmented, config) {
        Ok(res) => {
            info!(
                "Gaussian elimination finished: {} steps, {} permutations",
                res.trace.steps().len(),
                res.trace.permutation_count()
            );
            Ok(res)
        }
        Err(LinSysError::SingularMatrix { step, value }) => {
            warn!(
                "zero pivot {:e} in column {}: {}",
                value,
                step,
                explain_singular_system(augmented)
            );
            Err(LinSysError::SingularMatrix { step, value })
        }
        Err(e) => Err(e),
    }
}

/// the elimination itself, logging individual steps at debug level only
pub(crate) fn eliminate_traced(augmented: &Matrix, config: &SolverConfig) -> Result<GaussResult> {
    let (n, ncols) = augmented.shape();
    if n == 0 || ncols != n + 1 {
        return Err(LinSysError::InvalidDimension {
            expected: format!("{}x{} augmented matrix", n.max(1), n.max(1) + 1),
            found: (n, ncols),
        });
    }
    ensure_finite(augmented, "input matrix")?;

    let mut rec = TraceRecorder {
        trace: EliminationTrace::new(augmented.clone()),
        current: augmented.clone(),
        n,
    };
    // forward phase: row echelon form with 1 on the diagonal
    for k in 0..n {
        // first row holding the largest |a_ik|, i >= k
        let piv = rec.current.view_range(k..n, k).icamax() + k;
        if piv != k {
            rec.apply(
                RowOperation::Swap { row_a: k, row_b: piv },
                permutation_matrix(n, k, piv),
            )?;
        }

        let pivot = rec.current[(k, k)];
        if pivot.abs() <= config.pivot_tolerance {
            debug!("pivot {:e} in column {} is below tolerance", pivot, k);
            return Err(LinSysError::SingularMatrix {
                step: k,
                value: pivot,
            });
        }
        let factor = 1.0 / pivot;
        rec.apply(
            RowOperation::Scale { row: k, factor },
            scaling_matrix(n, k, factor),
        )?;

        for i in k + 1..n {
            rec.eliminate(i, k, k)?;
        }
    }
    // backward phase: clear everything above the diagonal
    for k in (0..n).rev() {
        for i in (0..k).rev() {
            rec.eliminate(i, k, k)?;
        }
    }

    let solution: DVector<f64> = rec.current.column(n).into_owned();
    Ok(GaussResult {
        trace: rec.trace,
        solution,
    })
}
