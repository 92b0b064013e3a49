use crate::domain::solver::Solver;
use crate::domain::solvers::HighsSolver;

#[cfg(feature = "cbc-solver")]
use crate::domain::solvers::CbcSolver;

/// Available solver backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SolverType {
    #[default]
    Highs,
    #[cfg(feature = "cbc-solver")]
    Cbc,
}

impl SolverType {
    /// Parse solver type from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "highs" => Some(SolverType::Highs),
            #[cfg(feature = "cbc-solver")]
            "cbc" => Some(SolverType::Cbc),
            _ => None,
        }
    }
}

/// Create a solver instance based on the specified type
pub fn create_solver(solver_type: SolverType) -> Box<dyn Solver> {
    match solver_type {
        SolverType::Highs => Box::new(HighsSolver::new()),
        #[cfg(feature = "cbc-solver")]
        SolverType::Cbc => Box::new(CbcSolver::new()),
    }
}
