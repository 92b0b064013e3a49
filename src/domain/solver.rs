use std::fmt;

use serde::Serialize;

use crate::domain::program::LinearProgram;

/// Solver status as reported to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Status {
    Optimal,
    #[serde(rename = "Not Solved")]
    NotSolved,
    Infeasible,
    Unbounded,
    Undefined,
}

impl Status {
    /// Whether the solver produced primal values worth reading back
    pub fn has_solution(self) -> bool {
        matches!(self, Status::Optimal)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Optimal => write!(f, "Optimal"),
            Status::NotSolved => write!(f, "Not Solved"),
            Status::Infeasible => write!(f, "Infeasible"),
            Status::Unbounded => write!(f, "Unbounded"),
            Status::Undefined => write!(f, "Undefined"),
        }
    }
}

/// Raw result of a backend run: values are in variable order of the program
/// and empty when the backend has none to offer.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverOutcome {
    pub status: Status,
    pub values: Vec<f64>,
    pub error: Option<String>,
}

impl SolverOutcome {
    pub fn failed(status: Status, error: impl Into<String>) -> Self {
        SolverOutcome {
            status,
            values: Vec::new(),
            error: Some(error.into()),
        }
    }
}

/// Common interface for MILP solvers
pub trait Solver: Send + Sync {
    /// Minimise the program. Backend failures are reported through the
    /// outcome status and `error`, never by panicking.
    fn solve(&self, program: &LinearProgram) -> SolverOutcome;

    /// Get the solver name for logging/debugging
    fn name(&self) -> &str;
}
