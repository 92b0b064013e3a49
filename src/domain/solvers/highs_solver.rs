use crate::domain::program::{ConstraintSense, LinearProgram, VariableKind};
use crate::domain::solver::{Solver, SolverOutcome, Status};

use ::highs::{Col, HighsModelStatus, RowProblem, Sense};

/// HiGHS solver implementation
pub struct HighsSolver;

impl HighsSolver {
    pub fn new() -> Self {
        HighsSolver
    }

    /// Convert HiGHS status to our status
    fn convert_status(model_status: HighsModelStatus) -> Status {
        match model_status {
            HighsModelStatus::Optimal => Status::Optimal,
            HighsModelStatus::Infeasible => Status::Infeasible,
            HighsModelStatus::UnboundedOrInfeasible => Status::Unbounded,
            HighsModelStatus::Unbounded => Status::Unbounded,
            HighsModelStatus::NotSet => Status::NotSolved,
            _ => Status::Undefined,
        }
    }
}

impl Default for HighsSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver for HighsSolver {
    fn solve(&self, program: &LinearProgram) -> SolverOutcome {
        let mut problem = RowProblem::default();

        // Add variables (columns) first, then the rows referencing them
        let cols: Vec<Col> = program
            .variables
            .iter()
            .map(|var| match (var.kind, var.upper) {
                (VariableKind::Binary, _) => problem.add_integer_column(var.cost, 0.0..=1.0),
                (VariableKind::Continuous, Some(upper)) => {
                    problem.add_column(var.cost, var.lower..=upper)
                }
                (VariableKind::Continuous, None) => problem.add_column(var.cost, var.lower..),
            })
            .collect();

        for constraint in &program.constraints {
            let factors: Vec<(Col, f64)> = constraint
                .terms
                .iter()
                .map(|&(idx, coeff)| (cols[idx], coeff))
                .collect();
            match constraint.sense {
                ConstraintSense::LessOrEqual => problem.add_row(..=constraint.rhs, &factors),
                ConstraintSense::Equal => {
                    problem.add_row(constraint.rhs..=constraint.rhs, &factors)
                }
            }
        }

        let mut model = problem.optimise(Sense::Minimise);
        // Keep the solver silent and insist on a proven optimum
        model.set_option("output_flag", false);
        model.set_option("mip_rel_gap", 0.0);

        let solved = match model.try_solve() {
            Ok(solved) => solved,
            Err(status) => {
                return SolverOutcome::failed(
                    Status::Undefined,
                    format!("HiGHS failed to run: {:?}", status),
                )
            }
        };

        let status = Self::convert_status(solved.status());
        let values = if status.has_solution() {
            solved.get_solution().columns().to_vec()
        } else {
            Vec::new()
        };

        SolverOutcome {
            status,
            values,
            error: None,
        }
    }

    fn name(&self) -> &str {
        "HiGHS"
    }
}
