//! dense matrix helpers shared by all the solvers: identity, checked product and
//! the elementary matrices of the three row operations.
//! Every function builds and returns a new matrix, nothing is changed in place,
//! so a snapshot stored in a trace never aliases a later one.
use crate::somelinalg::linalg_error::{LinSysError, Result};
use nalgebra::{DMatrix, DVector};

pub type Matrix = DMatrix<f64>;

/// n x n unit matrix
pub fn identity(n: usize) -> Matrix {
    DMatrix::identity(n, n)
}

/// standard product X*Y, fails if X.ncols != Y.nrows
pub fn multiply(x: &Matrix, y: &Matrix) -> Result<Matrix> {
    if x.ncols() != y.nrows() {
        return Err(LinSysError::InvalidDimension {
            expected: format!("{} rows in the right factor", x.ncols()),
            found: y.shape(),
        });
    }
    Ok(x * y)
}

/// build a matrix from a row-major list of rows, all rows must have the same length
pub fn from_rows(rows: &[Vec<f64>]) -> Result<Matrix> {
    let nrows = rows.len();
    if nrows == 0 {
        return Err(LinSysError::InvalidDimension {
            expected: "at least one row".to_string(),
            found: (0, 0),
        });
    }
    let ncols = rows[0].len();
    if let Some(bad) = rows.iter().find(|r| r.len() != ncols) {
        return Err(LinSysError::InvalidDimension {
            expected: format!("rows of length {}", ncols),
            found: (nrows, bad.len()),
        });
    }
    Ok(DMatrix::from_fn(nrows, ncols, |i, j| rows[i][j]))
}

/// size of a square matrix or InvalidDimension
pub fn ensure_square(m: &Matrix) -> Result<usize> {
    let (n, k) = m.shape();
    if n == 0 || n != k {
        return Err(LinSysError::InvalidDimension {
            expected: "non-empty square matrix".to_string(),
            found: (n, k),
        });
    }
    Ok(n)
}

/// checks that the right hand side matches the size of the system
pub fn ensure_rhs(m: &Matrix, b: &DVector<f64>) -> Result<usize> {
    let n = ensure_square(m)?;
    if b.len() != n {
        return Err(LinSysError::InvalidDimension {
            expected: format!("right hand side of length {}", n),
            found: (b.len(), 1),
        });
    }
    Ok(n)
}

/// every entry must be finite (no inf, no NaN)
pub fn ensure_finite(m: &Matrix, context: &str) -> Result<()> {
    if let Some((idx, v)) = m.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        // column-major storage
        let (i, j) = (idx % m.nrows(), idx / m.nrows());
        return Err(LinSysError::NumericInstability(format!(
            "{}: entry ({}, {}) = {}",
            context, i, j, v
        )));
    }
    Ok(())
}

/// [A | b]
pub fn augment(a: &Matrix, b: &DVector<f64>) -> Result<Matrix> {
    let n = ensure_rhs(a, b)?;
    Ok(DMatrix::from_fn(n, n + 1, |i, j| if j < n { a[(i, j)] } else { b[i] }))
}

/// unit matrix with rows i and j swapped
pub fn permutation_matrix(n: usize, i: usize, j: usize) -> Matrix {
    DMatrix::from_fn(n, n, |r, c| {
        let src = if r == i {
            j
        } else if r == j {
            i
        } else {
            r
        };
        if c == src { 1.0 } else { 0.0 }
    })
}

/// unit matrix with `factor` at (i, i): multiplies row i by factor
pub fn scaling_matrix(n: usize, i: usize, factor: f64) -> Matrix {
    DMatrix::from_fn(n, n, |r, c| match (r == c, r == i) {
        (true, true) => factor,
        (true, false) => 1.0,
        _ => 0.0,
    })
}

/// unit matrix with -factor at (target, source): row target -= factor * row source
pub fn elimination_matrix(n: usize, target: usize, source: usize, factor: f64) -> Matrix {
    DMatrix::from_fn(n, n, |r, c| {
        if r == c {
            1.0
        } else if r == target && c == source {
            -factor
        } else {
            0.0
        }
    })
}

/// top-left order x order block
pub fn leading_submatrix(m: &Matrix, order: usize) -> Matrix {
    m.view((0, 0), (order, order)).into_owned()
}

/// the matrix without the given row and column (the minor's matrix)
pub fn remove_row_col(m: &Matrix, row: usize, col: usize) -> Matrix {
    m.clone().remove_row(row).remove_column(col)
}
