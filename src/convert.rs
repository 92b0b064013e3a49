use crate::domain::network::FixedCosts;
use crate::domain::solve::Plan;
use crate::domain::validate::{parse_cost, CostInputError};
use crate::models::{ApiPlan, CostForm, SolveRequest};

impl TryFrom<&CostForm> for FixedCosts {
    type Error = CostInputError;

    fn try_from(form: &CostForm) -> Result<Self, Self::Error> {
        Ok(FixedCosts {
            b: parse_cost("costoB", &form.cost_b)?,
            c: parse_cost("costoC", &form.cost_c)?,
            d: parse_cost("costoD", &form.cost_d)?,
            e: parse_cost("costoE", &form.cost_e)?,
        })
    }
}

impl From<&SolveRequest> for FixedCosts {
    fn from(req: &SolveRequest) -> Self {
        FixedCosts::new(req.cost_b, req.cost_c, req.cost_d, req.cost_e)
    }
}

impl From<Plan> for ApiPlan {
    fn from(plan: Plan) -> Self {
        ApiPlan {
            status: plan.status,
            summary: plan.summary(),
            objective: plan.objective,
            open_plants: plan
                .open_plants
                .iter()
                .map(|(plant, open)| (plant.code().to_string(), *open))
                .collect(),
            aluminum_output: plan
                .aluminum_output
                .iter()
                .map(|(smelter, tonnes)| (smelter.code().to_string(), *tonnes))
                .collect(),
            bauxite_shipments: plan.bauxite_shipments,
            alumina_shipments: plan.alumina_shipments,
            solver: plan.solver,
            error: plan.error,
        }
    }
}
