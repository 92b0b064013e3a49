use log::{info, warn};
use serde::Serialize;

use crate::domain::formulation::NetworkModel;
use crate::domain::network::{FixedCosts, Mine, Network, Plant, Smelter};
use crate::domain::solver::{Solver, Status};

/// Flows below this are solver noise and are not reported
const FLOW_EPSILON: f64 = 1e-6;

/// Largest relative row violation accepted without a warning
const FEASIBILITY_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shipment<From, To> {
    pub from: From,
    pub to: To,
    pub tonnes: f64,
}

/// The readable outcome of one solve.
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    pub status: Status,
    pub solver: String,
    /// `None` when the solver produced no primal values
    pub objective: Option<f64>,
    /// Open decision per plant, always 0 or 1. Empty without a solution.
    pub open_plants: Vec<(Plant, u8)>,
    pub bauxite_shipments: Vec<Shipment<Mine, Plant>>,
    pub alumina_shipments: Vec<Shipment<Plant, Smelter>>,
    /// Aluminium produced per smelter from the alumina it receives
    pub aluminum_output: Vec<(Smelter, f64)>,
    pub error: Option<String>,
}

impl Plan {
    /// `"<status>, total cost: $<value>"`
    pub fn summary(&self) -> String {
        let cost = match self.objective {
            Some(value) => format!("${}", format_money(value)),
            None => "n/a".to_string(),
        };
        format!("{}, total cost: {}", self.status, cost)
    }

    /// Alumina delivered to a smelter
    pub fn delivered(&self, smelter: Smelter) -> f64 {
        self.alumina_shipments
            .iter()
            .filter(|s| s.to == smelter)
            .map(|s| s.tonnes)
            .sum()
    }
}

/// Build the network model for the given fixed costs, run it through the
/// solver and read the decisions back.
pub fn solve_plan(solver: &dyn Solver, network: &Network, fixed_costs: &FixedCosts) -> Plan {
    let model = NetworkModel::build(network, fixed_costs);
    let outcome = solver.solve(&model.program);

    if let Some(error) = &outcome.error {
        warn!("{} reported an error: {}", solver.name(), error);
    }

    let values = &outcome.values;
    if values.len() != model.program.variables.len() {
        if !values.is_empty() {
            warn!(
                "{} returned {} values for {} variables, ignoring them",
                solver.name(),
                values.len(),
                model.program.variables.len()
            );
        }
        info!("Solved with {}: {}", solver.name(), outcome.status);
        return Plan {
            status: outcome.status,
            solver: solver.name().to_string(),
            objective: None,
            open_plants: Vec::new(),
            bauxite_shipments: Vec::new(),
            alumina_shipments: Vec::new(),
            aluminum_output: Vec::new(),
            error: outcome.error,
        };
    }

    if let Some((row, violation)) = model.program.worst_violation(values) {
        if violation > FEASIBILITY_TOLERANCE {
            warn!(
                "{} solution breaks {} by {:e} (relative)",
                solver.name(),
                row.name,
                violation
            );
        }
    }

    let objective = model.program.objective_value(values);

    let open_plants = Plant::ALL
        .iter()
        .map(|&plant| (plant, round_indicator(values[model.open[plant as usize]])))
        .collect();

    let mut bauxite_shipments = Vec::new();
    for mine in Mine::ALL {
        for plant in Plant::ALL {
            let tonnes = values[model.bauxite_flow[mine as usize][plant as usize]];
            if tonnes > FLOW_EPSILON {
                bauxite_shipments.push(Shipment { from: mine, to: plant, tonnes });
            }
        }
    }

    let mut alumina_shipments = Vec::new();
    for plant in Plant::ALL {
        for smelter in Smelter::ALL {
            let tonnes = values[model.alumina_flow[plant as usize][smelter as usize]];
            if tonnes > FLOW_EPSILON {
                alumina_shipments.push(Shipment { from: plant, to: smelter, tonnes });
            }
        }
    }

    let aluminum_output = Smelter::ALL
        .iter()
        .map(|&smelter| {
            let received: f64 = Plant::ALL
                .iter()
                .map(|&plant| values[model.alumina_flow[plant as usize][smelter as usize]])
                .sum();
            (smelter, received * network.alumina_yield)
        })
        .collect();

    info!(
        "Solved with {}: {}, objective {:.2}",
        solver.name(),
        outcome.status,
        objective
    );

    Plan {
        status: outcome.status,
        solver: solver.name().to_string(),
        objective: Some(objective),
        open_plants,
        bauxite_shipments,
        alumina_shipments,
        aluminum_output,
        error: outcome.error,
    }
}

fn round_indicator(value: f64) -> u8 {
    if value.round() >= 1.0 {
        1
    } else {
        0
    }
}

/// Two decimals with thousands separators, e.g. `27,673,000.00`.
pub fn format_money(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (whole, fraction) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && formatted.chars().any(|c| c != '0' && c != '.') {
        "-"
    } else {
        ""
    };
    format!("{}{}.{}", sign, grouped, fraction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::solver::SolverOutcome;
    use crate::domain::program::LinearProgram;
    use crate::domain::solvers::HighsSolver;

    const BASELINE_COST: f64 = 27_673_000.0;

    impl Plan {
        fn is_open(&self, plant: Plant) -> Option<bool> {
            self.open_plants
                .iter()
                .find(|(p, _)| *p == plant)
                .map(|&(_, open)| open == 1)
        }
    }

    fn solve(costs: FixedCosts) -> Plan {
        solve_plan(&HighsSolver::new(), &Network::standard(), &costs)
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= 1e-6 * expected.abs().max(1.0),
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_zero_fixed_costs_reproduce_baseline() {
        let plan = solve(FixedCosts::default());
        assert_eq!(plan.status, Status::Optimal);
        assert_close(plan.objective.unwrap(), BASELINE_COST);
        // Everything is made at plant B from mine B bauxite
        assert_eq!(plan.is_open(Plant::B), Some(true));
        assert_eq!(plan.bauxite_shipments.len(), 1);
        assert_eq!(plan.bauxite_shipments[0].from, Mine::B);
        assert_eq!(plan.bauxite_shipments[0].to, Plant::B);
        assert_close(plan.bauxite_shipments[0].tonnes, 27_500.0);
    }

    #[test]
    fn test_only_cheapest_plant_opens_when_all_have_a_cost() {
        let plan = solve(FixedCosts::new(1_000.0, 1_000.0, 1_000.0, 1_000.0));
        assert_close(plan.objective.unwrap(), BASELINE_COST + 1_000.0);
        assert_eq!(
            plan.open_plants,
            vec![(Plant::B, 1), (Plant::C, 0), (Plant::D, 0), (Plant::E, 0)]
        );
        assert_eq!(plan.summary(), "Optimal, total cost: $27,674,000.00");
    }

    #[test]
    fn test_prohibitive_plant_is_closed_and_production_moves() {
        let plan = solve(FixedCosts::new(1e9, 0.0, 0.0, 0.0));
        assert_close(plan.objective.unwrap(), 33_464_000.0);
        assert_eq!(plan.is_open(Plant::B), Some(false));
        assert_eq!(plan.is_open(Plant::D), Some(true));
    }

    #[test]
    fn test_demand_is_met_exactly() {
        let network = Network::standard();
        let plan = solve(FixedCosts::new(250_000.0, 10_000.0, 75_000.0, 0.0));
        for site in &network.smelters {
            assert_close(plan.delivered(site.smelter), site.demand);
        }
        let aluminum: Vec<f64> = plan.aluminum_output.iter().map(|&(_, t)| t).collect();
        assert_close(aluminum[0], 400.0);
        assert_close(aluminum[1], 480.0);
    }

    #[test]
    fn test_solved_values_satisfy_every_constraint() {
        let network = Network::standard();
        for costs in [
            FixedCosts::default(),
            FixedCosts::new(1_000.0, 1_000.0, 1_000.0, 1_000.0),
            FixedCosts::new(1e9, 0.0, 0.0, 0.0),
            FixedCosts::new(250_000.0, 10_000.0, 75_000.0, 0.0),
            FixedCosts::new(5e8, 2e5, 3e5, 4e5),
            FixedCosts::new(1e9, 1e9, 1e9, 1e9),
        ] {
            let model = NetworkModel::build(&network, &costs);
            let outcome = HighsSolver::new().solve(&model.program);
            assert_eq!(outcome.status, Status::Optimal, "{costs:?}");
            assert_eq!(outcome.values.len(), model.program.variables.len());
            for row in &model.program.constraints {
                let violation = model.program.row_violation(row, &outcome.values);
                assert!(
                    violation <= FEASIBILITY_TOLERANCE,
                    "{} broken by {violation:e} for {costs:?}",
                    row.name
                );
            }
            for (i, var) in model.program.variables.iter().enumerate() {
                assert!(outcome.values[i] >= var.lower - 1e-9, "{} below bound", var.name);
            }
        }
    }

    #[test]
    fn test_closed_plants_receive_no_bauxite() {
        let plan = solve(FixedCosts::new(5e8, 2e5, 3e5, 4e5));
        for shipment in &plan.bauxite_shipments {
            assert_eq!(plan.is_open(shipment.to), Some(true));
        }
    }

    #[test]
    fn test_raising_a_fixed_cost_never_lowers_total_cost() {
        let base = FixedCosts::new(500_000.0, 200_000.0, 300_000.0, 100_000.0);
        let base_cost = solve(base).objective.unwrap();
        assert!(base_cost >= 0.0);
        for plant in Plant::ALL {
            for increase in [1.0, 1e6, 1e8] {
                let raised = base.with(plant, base.get(plant) + increase);
                let cost = solve(raised).objective.unwrap();
                assert!(
                    cost >= base_cost - 1e-6 * base_cost,
                    "raising {plant} by {increase} lowered cost {base_cost} -> {cost}"
                );
            }
        }
    }

    #[test]
    fn test_open_indicators_are_binary() {
        for costs in [
            FixedCosts::default(),
            FixedCosts::new(1.0, 1e7, 0.0, 3.5),
            FixedCosts::new(1e9, 1e9, 1e9, 1e9),
        ] {
            let plan = solve(costs);
            assert_eq!(plan.open_plants.len(), 4);
            assert!(plan.open_plants.iter().all(|&(_, open)| open <= 1));
        }
    }

    struct FailingSolver;

    impl Solver for FailingSolver {
        fn solve(&self, _program: &LinearProgram) -> SolverOutcome {
            SolverOutcome::failed(Status::Undefined, "license expired")
        }

        fn name(&self) -> &str {
            "Failing"
        }
    }

    #[test]
    fn test_solver_failure_passes_status_through() {
        let plan = solve_plan(&FailingSolver, &Network::standard(), &FixedCosts::default());
        assert_eq!(plan.status, Status::Undefined);
        assert_eq!(plan.objective, None);
        assert!(plan.open_plants.is_empty());
        assert_eq!(plan.error.as_deref(), Some("license expired"));
        assert_eq!(plan.summary(), "Undefined, total cost: n/a");
    }

    #[test]
    fn test_format_money_groups_thousands() {
        assert_eq!(format_money(0.0), "0.00");
        assert_eq!(format_money(999.999), "1,000.00");
        assert_eq!(format_money(27_673_000.0), "27,673,000.00");
        assert_eq!(format_money(123_456.789), "123,456.79");
        assert_eq!(format_money(-1234.5), "-1,234.50");
        assert_eq!(format_money(-0.001), "0.00");
    }

    #[test]
    fn test_round_indicator_snaps_solver_noise() {
        assert_eq!(round_indicator(0.9999999), 1);
        assert_eq!(round_indicator(1e-9), 0);
        assert_eq!(round_indicator(-1e-9), 0);
    }
}
