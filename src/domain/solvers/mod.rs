pub mod highs_solver;

#[cfg(feature = "cbc-solver")]
pub mod cbc_solver;

pub use highs_solver::HighsSolver;

#[cfg(feature = "cbc-solver")]
pub use cbc_solver::CbcSolver;
