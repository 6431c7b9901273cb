//! linear systems solved step by step: Gaussian elimination with a recorded trace,
//! Seidel iteration and the Thomas algorithm
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
/// error taxonomy shared by all solvers
pub mod linalg_error;
/// dense matrix helpers and elementary matrices
pub mod matrix_ops;

/// Gaussian elimination with partial pivoting, every row operation recorded
pub mod gauss_elimination;
/// inverse matrix as the running product of the recorded elementary matrices
pub mod trace_inverse;
/// determinant from the pivots of a trace, or by cofactor expansion
pub mod determinant;

/// sufficient conditions for the convergence of the Seidel method
pub mod convergence_check;
pub mod seidel;

pub mod thomas_tridiagonal;

/// diagnostics for linear systems and matrices: if it is singular
/// or the computed solution/inverse is accurate
pub mod linear_sys_diagnostics;
/// many independent systems solved in parallel
pub mod batch;
