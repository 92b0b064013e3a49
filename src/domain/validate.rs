use thiserror::Error;

use crate::domain::network::FixedCosts;

/// Message shown above any cost validation detail
pub const INVALID_COSTS_MESSAGE: &str =
    "Please enter each fixed cost as a non-negative number below 1e20.";

/// Solvers read objective coefficients from here up as infinite, which would
/// silently force the plant closed.
pub const MAX_FIXED_COST: f64 = 1e20;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CostInputError {
    #[error("{field}: {value:?} is not a number")]
    NotNumeric { field: &'static str, value: String },

    #[error("{field}: {value} is not a finite number")]
    NotFinite { field: &'static str, value: f64 },

    #[error("{field}: fixed cost cannot be negative (got {value})")]
    Negative { field: &'static str, value: f64 },

    #[error("{field}: fixed cost must be below 1e20 (got {value:e})")]
    TooLarge { field: &'static str, value: f64 },
}

impl CostInputError {
    pub fn field(&self) -> &'static str {
        match self {
            CostInputError::NotNumeric { field, .. }
            | CostInputError::NotFinite { field, .. }
            | CostInputError::Negative { field, .. }
            | CostInputError::TooLarge { field, .. } => field,
        }
    }
}

/// Parse one submitted form value. Surrounding whitespace is ignored.
pub fn parse_cost(field: &'static str, raw: &str) -> Result<f64, CostInputError> {
    let value: f64 = raw.trim().parse().map_err(|_| CostInputError::NotNumeric {
        field,
        value: raw.to_string(),
    })?;
    check_cost(field, value)
}

pub fn check_cost(field: &'static str, value: f64) -> Result<f64, CostInputError> {
    if !value.is_finite() {
        return Err(CostInputError::NotFinite { field, value });
    }
    if value < 0.0 {
        return Err(CostInputError::Negative { field, value });
    }
    if value >= MAX_FIXED_COST {
        return Err(CostInputError::TooLarge { field, value });
    }
    Ok(value)
}

/// Validate already-numeric costs, as received from the JSON API.
pub fn check_fixed_costs(costs: FixedCosts) -> Result<FixedCosts, CostInputError> {
    Ok(FixedCosts {
        b: check_cost("costoB", costs.b)?,
        c: check_cost("costoC", costs.c)?,
        d: check_cost("costoD", costs.d)?,
        e: check_cost("costoE", costs.e)?,
    })
}
