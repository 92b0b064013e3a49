/// Kind of decision variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableKind {
    Continuous,
    Binary,
}

/// Comparison of a constraint row against its right-hand side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintSense {
    LessOrEqual,
    Equal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableDef {
    pub name: String,
    pub kind: VariableKind,
    pub lower: f64,
    /// `None` means unbounded above
    pub upper: Option<f64>,
    /// Objective coefficient
    pub cost: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintDef {
    pub name: String,
    /// Sparse row: (variable index, coefficient)
    pub terms: Vec<(usize, f64)>,
    pub sense: ConstraintSense,
    pub rhs: f64,
}

/// A minimisation MILP in row form, independent of any solver backend.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinearProgram {
    pub variables: Vec<VariableDef>,
    pub constraints: Vec<ConstraintDef>,
}

impl LinearProgram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a non-negative continuous variable and returns its index.
    pub fn add_continuous(&mut self, name: impl Into<String>, cost: f64) -> usize {
        self.push_variable(VariableDef {
            name: name.into(),
            kind: VariableKind::Continuous,
            lower: 0.0,
            upper: None,
            cost,
        })
    }

    /// Adds a {0, 1} variable and returns its index.
    pub fn add_binary(&mut self, name: impl Into<String>, cost: f64) -> usize {
        self.push_variable(VariableDef {
            name: name.into(),
            kind: VariableKind::Binary,
            lower: 0.0,
            upper: Some(1.0),
            cost,
        })
    }

    fn push_variable(&mut self, def: VariableDef) -> usize {
        self.variables.push(def);
        self.variables.len() - 1
    }

    pub fn add_le(&mut self, name: impl Into<String>, terms: Vec<(usize, f64)>, rhs: f64) {
        self.add_constraint(name.into(), terms, ConstraintSense::LessOrEqual, rhs);
    }

    pub fn add_eq(&mut self, name: impl Into<String>, terms: Vec<(usize, f64)>, rhs: f64) {
        self.add_constraint(name.into(), terms, ConstraintSense::Equal, rhs);
    }

    fn add_constraint(
        &mut self,
        name: String,
        terms: Vec<(usize, f64)>,
        sense: ConstraintSense,
        rhs: f64,
    ) {
        debug_assert!(terms.iter().all(|&(i, _)| i < self.variables.len()));
        self.constraints.push(ConstraintDef { name, terms, sense, rhs });
    }

    pub fn num_binary(&self) -> usize {
        self.variables
            .iter()
            .filter(|v| v.kind == VariableKind::Binary)
            .count()
    }

    /// Objective value of an assignment given in variable order.
    pub fn objective_value(&self, values: &[f64]) -> f64 {
        self.variables
            .iter()
            .zip(values)
            .map(|(var, value)| var.cost * value)
            .sum()
    }

    /// How far an assignment breaks a row, relative to the row's largest
    /// coefficient or right-hand side. Zero when the row holds.
    pub fn row_violation(&self, row: &ConstraintDef, values: &[f64]) -> f64 {
        let activity: f64 = row
            .terms
            .iter()
            .map(|&(i, coeff)| coeff * values.get(i).copied().unwrap_or(0.0))
            .sum();
        let gap = match row.sense {
            ConstraintSense::LessOrEqual => (activity - row.rhs).max(0.0),
            ConstraintSense::Equal => (activity - row.rhs).abs(),
        };
        let scale = row
            .terms
            .iter()
            .map(|&(_, coeff)| coeff.abs())
            .fold(row.rhs.abs().max(1.0), f64::max);
        gap / scale
    }

    /// The row an assignment breaks the most, with its relative violation.
    pub fn worst_violation(&self, values: &[f64]) -> Option<(&ConstraintDef, f64)> {
        self.constraints
            .iter()
            .map(|row| (row, self.row_violation(row, values)))
            .max_by(|a, b| a.1.total_cmp(&b.1))
    }
}
