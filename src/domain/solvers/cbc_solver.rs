use crate::domain::program::{ConstraintSense, LinearProgram, VariableKind};
use crate::domain::solver::{Solver, SolverOutcome, Status};

use good_lp::{
    solvers::coin_cbc, variable, variables, Expression, ResolutionError,
    Solution as GoodLpSolutionTrait, SolverModel, Variable as GoodLpVariable,
};

/// COIN-OR CBC solver implementation, driven through good_lp
pub struct CbcSolver;

impl CbcSolver {
    pub fn new() -> Self {
        CbcSolver
    }
}

impl Default for CbcSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver for CbcSolver {
    fn solve(&self, program: &LinearProgram) -> SolverOutcome {
        let mut vars = variables!();
        let mut lp_variables: Vec<GoodLpVariable> = Vec::with_capacity(program.variables.len());
        let mut objective: Expression = 0.into();

        for var_def in &program.variables {
            let definition = match var_def.kind {
                VariableKind::Binary => variable().binary(),
                VariableKind::Continuous => match var_def.upper {
                    Some(upper) => variable().min(var_def.lower).max(upper),
                    None => variable().min(var_def.lower),
                },
            };
            let var = vars.add(definition);
            objective += var_def.cost * var;
            lp_variables.push(var);
        }

        let mut lp_model = vars.minimise(objective).using(coin_cbc::coin_cbc);
        lp_model.set_parameter("log", "0");

        for constraint in &program.constraints {
            let mut lhs: Expression = 0.into();
            for &(idx, coeff) in &constraint.terms {
                lhs += coeff * lp_variables[idx];
            }
            lp_model = match constraint.sense {
                ConstraintSense::LessOrEqual => lp_model.with(lhs.leq(constraint.rhs)),
                ConstraintSense::Equal => lp_model.with(lhs.eq(constraint.rhs)),
            };
        }

        match lp_model.solve() {
            Ok(sol) => SolverOutcome {
                status: Status::Optimal,
                values: lp_variables.iter().map(|&var| sol.value(var)).collect(),
                error: None,
            },
            Err(ResolutionError::Infeasible) => SolverOutcome {
                status: Status::Infeasible,
                values: Vec::new(),
                error: None,
            },
            Err(ResolutionError::Unbounded) => SolverOutcome {
                status: Status::Unbounded,
                values: Vec::new(),
                error: None,
            },
            Err(e) => SolverOutcome::failed(Status::Undefined, format!("CBC failed: {}", e)),
        }
    }

    fn name(&self) -> &str {
        "CBC"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solves_small_mixed_program() {
        let mut lp = LinearProgram::new();
        let x = lp.add_continuous("x", 1.0);
        let w = lp.add_binary("w", 5.0);
        lp.add_le("gate", vec![(x, 1.0), (w, -10.0)], 0.0);
        lp.add_eq("fix", vec![(x, 1.0)], 4.0);

        let outcome = CbcSolver::new().solve(&lp);
        assert_eq!(outcome.status, Status::Optimal);
        assert!((lp.objective_value(&outcome.values) - 9.0).abs() < 1e-6);
    }
}
