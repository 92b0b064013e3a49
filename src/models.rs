use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::network::{Mine, Plant, Smelter};
use crate::domain::solve::Shipment;
use crate::domain::solver::Status;

// ---------- Form (wire) types: raw strings, validated later ----------

/// Submitted HTML form. Missing fields are empty and fail validation.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct CostForm {
    #[serde(rename = "costoB", default)]
    pub cost_b: String,
    #[serde(rename = "costoC", default)]
    pub cost_c: String,
    #[serde(rename = "costoD", default)]
    pub cost_d: String,
    #[serde(rename = "costoE", default)]
    pub cost_e: String,
}

// ---------- JSON API types ----------

#[derive(Deserialize, Serialize, Debug, Clone, Copy)]
pub struct SolveRequest {
    #[serde(rename = "costoB")]
    pub cost_b: f64,
    #[serde(rename = "costoC")]
    pub cost_c: f64,
    #[serde(rename = "costoD")]
    pub cost_d: f64,
    #[serde(rename = "costoE")]
    pub cost_e: f64,
}

#[derive(Serialize, Debug)]
pub struct ApiPlan {
    pub status: Status,
    pub summary: String,
    pub objective: Option<f64>,
    pub open_plants: BTreeMap<String, u8>,
    pub bauxite_shipments: Vec<Shipment<Mine, Plant>>,
    pub alumina_shipments: Vec<Shipment<Plant, Smelter>>,
    pub aluminum_output: BTreeMap<String, f64>,
    pub solver: String,
    pub error: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct ApiError {
    pub error: String,
}
