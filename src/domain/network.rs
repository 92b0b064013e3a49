use std::fmt;

use serde::Serialize;

/// Bauxite mines
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Mine {
    A,
    B,
    C,
}

/// Alumina plants. Each one carries a fixed opening cost supplied by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Plant {
    B,
    C,
    D,
    E,
}

/// Smelting sites
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Smelter {
    D,
    E,
}

impl Mine {
    pub const ALL: [Mine; 3] = [Mine::A, Mine::B, Mine::C];

    pub fn code(self) -> &'static str {
        match self {
            Mine::A => "A",
            Mine::B => "B",
            Mine::C => "C",
        }
    }
}

impl Plant {
    pub const ALL: [Plant; 4] = [Plant::B, Plant::C, Plant::D, Plant::E];

    pub fn code(self) -> &'static str {
        match self {
            Plant::B => "B",
            Plant::C => "C",
            Plant::D => "D",
            Plant::E => "E",
        }
    }
}

impl Smelter {
    pub const ALL: [Smelter; 2] = [Smelter::D, Smelter::E];

    pub fn code(self) -> &'static str {
        match self {
            Smelter::D => "D",
            Smelter::E => "E",
        }
    }
}

impl fmt::Display for Mine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl fmt::Display for Plant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl fmt::Display for Smelter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MineSite {
    pub mine: Mine,
    /// Tonnes of bauxite that can be extracted
    pub capacity: f64,
    pub extraction_cost: f64,
    /// Fraction of the bauxite mass that ends up as alumina
    pub bauxite_yield: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlantSite {
    pub plant: Plant,
    /// Tonnes of bauxite the plant can take in
    pub capacity: f64,
    /// Cost per tonne of alumina produced
    pub production_cost: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SmelterSite {
    pub smelter: Smelter,
    pub capacity: f64,
    pub demand: f64,
    pub smelting_cost: f64,
}

/// Fixed opening costs per plant, the only per-request input of the model.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FixedCosts {
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
}

impl FixedCosts {
    pub fn new(b: f64, c: f64, d: f64, e: f64) -> Self {
        FixedCosts { b, c, d, e }
    }

    pub fn get(&self, plant: Plant) -> f64 {
        match plant {
            Plant::B => self.b,
            Plant::C => self.c,
            Plant::D => self.d,
            Plant::E => self.e,
        }
    }
}

/// The production network: sites, their parameters and the transport tables.
///
/// Transport tables are indexed by position in [`Mine::ALL`], [`Plant::ALL`]
/// and [`Smelter::ALL`].
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    pub mines: Vec<MineSite>,
    pub plants: Vec<PlantSite>,
    pub smelters: Vec<SmelterSite>,
    /// Fraction of alumina turned into aluminium at a smelter
    pub alumina_yield: f64,
    bauxite_transport: [[f64; 4]; 3],
    alumina_transport: [[f64; 2]; 4],
}

impl Network {
    /// The three-mine, four-plant, two-smelter network served by this planner.
    pub fn standard() -> Self {
        Network {
            mines: vec![
                MineSite {
                    mine: Mine::A,
                    capacity: 36_000.0,
                    extraction_cost: 420.0,
                    bauxite_yield: 0.06,
                },
                MineSite {
                    mine: Mine::B,
                    capacity: 52_000.0,
                    extraction_cost: 360.0,
                    bauxite_yield: 0.08,
                },
                MineSite {
                    mine: Mine::C,
                    capacity: 28_000.0,
                    extraction_cost: 540.0,
                    bauxite_yield: 0.062,
                },
            ],
            plants: vec![
                PlantSite { plant: Plant::B, capacity: 40_000.0, production_cost: 330.0 },
                PlantSite { plant: Plant::C, capacity: 20_000.0, production_cost: 320.0 },
                PlantSite { plant: Plant::D, capacity: 30_000.0, production_cost: 380.0 },
                PlantSite { plant: Plant::E, capacity: 80_000.0, production_cost: 240.0 },
            ],
            smelters: vec![
                SmelterSite {
                    smelter: Smelter::D,
                    capacity: 4_000.0,
                    demand: 1_000.0,
                    smelting_cost: 8_500.0,
                },
                SmelterSite {
                    smelter: Smelter::E,
                    capacity: 7_000.0,
                    demand: 1_200.0,
                    smelting_cost: 5_200.0,
                },
            ],
            alumina_yield: 0.4,
            //                  B       C       D      E
            bauxite_transport: [
                [400.0, 2010.0, 510.0, 1920.0],  // A
                [10.0, 630.0, 220.0, 1510.0],    // B
                [1630.0, 10.0, 620.0, 940.0],    // C
            ],
            //                  D       E
            alumina_transport: [
                [220.0, 1510.0], // B
                [620.0, 940.0],  // C
                [0.0, 1615.0],   // D
                [1465.0, 0.0],   // E
            ],
        }
    }

    pub fn bauxite_transport_cost(&self, mine: Mine, plant: Plant) -> f64 {
        self.bauxite_transport[mine as usize][plant as usize]
    }

    pub fn alumina_transport_cost(&self, plant: Plant, smelter: Smelter) -> f64 {
        self.alumina_transport[plant as usize][smelter as usize]
    }
}

impl Default for Network {
    fn default() -> Self {
        Network::standard()
    }
}

#[cfg(test)]
impl FixedCosts {
    pub(crate) fn with(mut self, plant: Plant, cost: f64) -> Self {
        match plant {
            Plant::B => self.b = cost,
            Plant::C => self.c = cost,
            Plant::D => self.d = cost,
            Plant::E => self.e = cost,
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_network_has_one_site_per_enum_variant_in_order() {
        let network = Network::standard();
        let mines: Vec<Mine> = network.mines.iter().map(|m| m.mine).collect();
        let plants: Vec<Plant> = network.plants.iter().map(|p| p.plant).collect();
        let smelters: Vec<Smelter> = network.smelters.iter().map(|s| s.smelter).collect();
        assert_eq!(mines, Mine::ALL.to_vec());
        assert_eq!(plants, Plant::ALL.to_vec());
        assert_eq!(smelters, Smelter::ALL.to_vec());
    }

    #[test]
    fn test_transport_lookup_uses_site_positions() {
        let network = Network::standard();
        assert_eq!(network.bauxite_transport_cost(Mine::A, Plant::B), 400.0);
        assert_eq!(network.bauxite_transport_cost(Mine::B, Plant::B), 10.0);
        assert_eq!(network.bauxite_transport_cost(Mine::C, Plant::E), 940.0);
        assert_eq!(network.alumina_transport_cost(Plant::D, Smelter::D), 0.0);
        assert_eq!(network.alumina_transport_cost(Plant::E, Smelter::D), 1465.0);
        assert_eq!(network.alumina_transport_cost(Plant::D, Smelter::E), 1615.0);
    }

    #[test]
    fn test_demand_fits_within_smelter_capacity() {
        let network = Network::standard();
        for smelter in &network.smelters {
            assert!(smelter.demand <= smelter.capacity);
        }
        let total: f64 = network.smelters.iter().map(|s| s.demand).sum();
        assert_eq!(total, 2_200.0);
    }

    #[test]
    fn test_fixed_costs_with_replaces_single_plant() {
        let costs = FixedCosts::new(1.0, 2.0, 3.0, 4.0).with(Plant::D, 30.0);
        assert_eq!(costs.get(Plant::B), 1.0);
        assert_eq!(costs.get(Plant::C), 2.0);
        assert_eq!(costs.get(Plant::D), 30.0);
        assert_eq!(costs.get(Plant::E), 4.0);
    }
}
