use std::fmt;

/// Error types for the direct and iterative linear system solvers
#[derive(Debug, Clone, PartialEq)]
pub enum LinSysError {
    /// input shape does not match what the method needs
    InvalidDimension {
        expected: String,
        found: (usize, usize),
    },
    /// zero (or near-zero) pivot or sweep denominator at the given step
    SingularMatrix { step: usize, value: f64 },
    NotTridiagonal { row: usize, col: usize },
    /// iteration cap reached before the tolerance was met
    ConvergenceFailure { iterations: usize, last_delta: f64 },
    InvalidOrder { order: usize, size: usize },
    NumericInstability(String),
    /// recursive cofactor expansion refused for a matrix this large
    CofactorOrderExceeded { order: usize, limit: usize },
    InvalidTolerance(f64),
    InvalidConfig(String),
}

impl fmt::Display for LinSysError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LinSysError::InvalidDimension { expected, found } => write!(
                f,
                "Invalid dimension: expected {}, found {}x{}",
                expected, found.0, found.1
            ),
            LinSysError::SingularMatrix { step, value } => write!(
                f,
                "Matrix is singular: pivot {:e} at step {}",
                value, step
            ),
            LinSysError::NotTridiagonal { row, col } => {
                write!(f, "Matrix is not tridiagonal at ({}, {})", row, col)
            }
            LinSysError::ConvergenceFailure {
                iterations,
                last_delta,
            } => write!(
                f,
                "No convergence after {} iterations, last delta = {:e}",
                iterations, last_delta
            ),
            LinSysError::InvalidOrder { order, size } => write!(
                f,
                "Invalid minor order {} for matrix of size {}",
                order, size
            ),
            LinSysError::NumericInstability(msg) => write!(f, "Numeric instability: {}", msg),
            LinSysError::CofactorOrderExceeded { order, limit } => write!(
                f,
                "Cofactor expansion of order {} exceeds the limit {}",
                order, limit
            ),
            LinSysError::InvalidTolerance(eps) => {
                write!(f, "Tolerance must be finite and positive, got {}", eps)
            }
            LinSysError::InvalidConfig(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl std::error::Error for LinSysError {}

pub type Result<T> = std::result::Result<T, LinSysError>;
