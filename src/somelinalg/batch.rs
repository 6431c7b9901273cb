use crate::config::SolverConfig;
use crate::somelinalg::gauss_elimination::{GaussResult, solve_gaussian_with};
use crate::somelinalg::linalg_error::Result;
use crate::somelinalg::matrix_ops::Matrix;
use crate::somelinalg::thomas_tridiagonal::{TridiagonalResult, solve_tridiagonal_with};
use nalgebra::DVector;
use rayon::prelude::*;
// Every solve is a pure function of its input, so independent systems are simply handed
// to rayon's parallel iterator, one task per system. Results keep the order of the input.
pub fn solve_gaussian_batch(systems: &[Matrix], config: &SolverConfig) -> Vec<Result<GaussResult>> {
    systems
        .par_iter()
        .map(|augmented| solve_gaussian_with(augmented, config))
        .collect()
}

pub fn solve_tridiagonal_batch(
    systems: &[(Matrix, DVector<f64>)],
    config: &SolverConfig,
) -> Vec<Result<TridiagonalResult>> {
    systems
        .par_iter()
        .map(|(m, rhs)| solve_tridiagonal_with(m, rhs, config))
        .collect()
}
