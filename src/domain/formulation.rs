use log::debug;

use crate::domain::network::{FixedCosts, Mine, Network, Plant, Smelter};
use crate::domain::program::LinearProgram;

/// The plant-location MILP for one request, together with the indices of its
/// variables so a solution can be read back per mine, plant and smelter.
#[derive(Debug, Clone)]
pub struct NetworkModel {
    pub program: LinearProgram,
    /// Bauxite shipped mine -> plant, indexed `[mine][plant]`
    pub bauxite_flow: [[usize; 4]; 3],
    /// Alumina shipped plant -> smelter, indexed `[plant][smelter]`
    pub alumina_flow: [[usize; 2]; 4],
    /// Open indicator per plant
    pub open: [usize; 4],
}

impl NetworkModel {
    pub fn build(network: &Network, fixed_costs: &FixedCosts) -> Self {
        let mut program = LinearProgram::new();

        let mut bauxite_flow = [[0usize; 4]; 3];
        for site in &network.mines {
            for plant in Plant::ALL {
                let cost = site.extraction_cost + network.bauxite_transport_cost(site.mine, plant);
                bauxite_flow[site.mine as usize][plant as usize] =
                    program.add_continuous(format!("x[{},{}]", site.mine, plant), cost);
            }
        }

        let mut alumina_flow = [[0usize; 2]; 4];
        for site in &network.plants {
            for smelter in &network.smelters {
                let cost = site.production_cost
                    + smelter.smelting_cost
                    + network.alumina_transport_cost(site.plant, smelter.smelter);
                alumina_flow[site.plant as usize][smelter.smelter as usize] = program
                    .add_continuous(format!("y[{},{}]", site.plant, smelter.smelter), cost);
            }
        }

        let mut open = [0usize; 4];
        for plant in Plant::ALL {
            open[plant as usize] =
                program.add_binary(format!("w[{}]", plant), fixed_costs.get(plant));
        }

        for site in &network.mines {
            let terms = Plant::ALL
                .iter()
                .map(|&plant| (bauxite_flow[site.mine as usize][plant as usize], 1.0))
                .collect();
            program.add_le(format!("mine_capacity[{}]", site.mine), terms, site.capacity);
        }

        // Inflow is only allowed once the plant is open.
        for site in &network.plants {
            let p = site.plant as usize;
            let mut terms: Vec<(usize, f64)> =
                Mine::ALL.iter().map(|&mine| (bauxite_flow[mine as usize][p], 1.0)).collect();
            terms.push((open[p], -site.capacity));
            program.add_le(format!("plant_capacity[{}]", site.plant), terms, 0.0);
        }

        for site in &network.smelters {
            let s = site.smelter as usize;
            let inflow = || -> Vec<(usize, f64)> {
                Plant::ALL.iter().map(|&plant| (alumina_flow[plant as usize][s], 1.0)).collect()
            };
            program.add_le(format!("smelter_capacity[{}]", site.smelter), inflow(), site.capacity);
            program.add_eq(format!("demand[{}]", site.smelter), inflow(), site.demand);
        }

        // Alumina leaving a plant equals the yield of the bauxite it received.
        for plant in Plant::ALL {
            let p = plant as usize;
            let mut terms: Vec<(usize, f64)> = network
                .mines
                .iter()
                .map(|site| (bauxite_flow[site.mine as usize][p], site.bauxite_yield))
                .collect();
            terms.extend(
                Smelter::ALL
                    .iter()
                    .map(|&smelter| (alumina_flow[p][smelter as usize], -1.0)),
            );
            program.add_eq(format!("mass_balance[{}]", plant), terms, 0.0);
        }

        debug!(
            "Built network model: {} variables ({} binary), {} constraints",
            program.variables.len(),
            program.num_binary(),
            program.constraints.len()
        );

        NetworkModel { program, bauxite_flow, alumina_flow, open }
    }
}
