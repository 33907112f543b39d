//! Solver-agnostic MIP model description.
//!
//! A [`MipModel`] is a flat list of decision variables, linear
//! constraints and one linear objective. Adapters translate it into the
//! native API of a concrete engine.

use serde::{Deserialize, Serialize};

/// Index of a variable within its [`MipModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VarId(pub usize);

/// Domain of a decision variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VarKind {
    /// 0/1 variable.
    Binary,
    /// Bounded integer variable.
    Integer,
    /// Real-valued variable.
    Continuous,
}

/// A decision variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    /// Name (unique within the model).
    pub name: String,
    /// Variable domain.
    pub kind: VarKind,
    /// Lower bound.
    pub lower: f64,
    /// Upper bound (`None` = +infinity).
    pub upper: Option<f64>,
}

impl Variable {
    /// Whether the bounds pin the variable to a single value.
    pub fn is_fixed(&self) -> bool {
        self.upper == Some(self.lower)
    }
}

/// A linear expression `sum(coef * var) + constant`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinearExpr {
    /// Variable terms, in insertion order.
    pub terms: Vec<(VarId, f64)>,
    /// Constant term.
    pub constant: f64,
}

impl LinearExpr {
    /// The empty expression (0).
    pub fn new() -> Self {
        Self::default()
    }

    /// `sum(vars)` with unit coefficients.
    pub fn sum(vars: impl IntoIterator<Item = VarId>) -> Self {
        Self {
            terms: vars.into_iter().map(|v| (v, 1.0)).collect(),
            constant: 0.0,
        }
    }

    /// Adds `coef * var`. Zero coefficients are dropped.
    pub fn add_term(&mut self, var: VarId, coef: f64) {
        if coef != 0.0 {
            self.terms.push((var, coef));
        }
    }

    /// Builder form of [`add_term`](Self::add_term).
    pub fn with_term(mut self, var: VarId, coef: f64) -> Self {
        self.add_term(var, coef);
        self
    }

    /// Evaluates the expression for the given variable values.
    pub fn evaluate(&self, values: &[f64]) -> f64 {
        self.constant
            + self
                .terms
                .iter()
                .map(|(v, c)| c * values.get(v.0).copied().unwrap_or(0.0))
                .sum::<f64>()
    }

    /// Coefficient of a variable (summed over repeated terms).
    pub fn coefficient(&self, var: VarId) -> f64 {
        self.terms
            .iter()
            .filter(|(v, _)| *v == var)
            .map(|(_, c)| c)
            .sum()
    }

    /// Whether the expression has no variable terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Comparison sense of a constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sense {
    /// `expr <= rhs`
    Le,
    /// `expr >= rhs`
    Ge,
    /// `expr == rhs`
    Eq,
}

/// A named linear constraint `expr sense rhs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constraint {
    /// Constraint name (for diagnostics).
    pub name: String,
    /// Left-hand side.
    pub expr: LinearExpr,
    /// Comparison sense.
    pub sense: Sense,
    /// Right-hand side.
    pub rhs: f64,
}

impl Constraint {
    /// Whether the constraint holds for the given values (with tolerance).
    pub fn is_satisfied(&self, values: &[f64], tolerance: f64) -> bool {
        let lhs = self.expr.evaluate(values);
        match self.sense {
            Sense::Le => lhs <= self.rhs + tolerance,
            Sense::Ge => lhs >= self.rhs - tolerance,
            Sense::Eq => (lhs - self.rhs).abs() <= tolerance,
        }
    }
}

/// Optimization direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ObjectiveSense {
    /// Minimize the objective.
    #[default]
    Minimize,
    /// Maximize the objective.
    Maximize,
}

/// Linear objective.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Objective {
    /// Direction.
    pub sense: ObjectiveSense,
    /// Objective expression.
    pub expr: LinearExpr,
}

/// A complete solver-agnostic model.
///
/// # Example
/// ```
/// use u_workforce::mip::{LinearExpr, MipModel, ObjectiveSense, Sense, VarKind};
///
/// let mut model = MipModel::new("demo");
/// let x = model.add_var("x", VarKind::Binary, 0.0, Some(1.0));
/// let y = model.add_var("y", VarKind::Binary, 0.0, Some(1.0));
/// model.add_constraint("pick_one", LinearExpr::sum([x, y]), Sense::Le, 1.0);
/// model.set_objective(ObjectiveSense::Maximize, LinearExpr::new().with_term(x, 2.0));
///
/// assert_eq!(model.variable_count(), 2);
/// assert_eq!(model.constraint_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MipModel {
    /// Model name.
    pub name: String,
    /// Decision variables, indexed by [`VarId`].
    pub variables: Vec<Variable>,
    /// Linear constraints.
    pub constraints: Vec<Constraint>,
    /// Objective function.
    pub objective: Objective,
}

impl MipModel {
    /// Creates an empty model.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Adds a variable and returns its id.
    pub fn add_var(
        &mut self,
        name: impl Into<String>,
        kind: VarKind,
        lower: f64,
        upper: Option<f64>,
    ) -> VarId {
        self.variables.push(Variable {
            name: name.into(),
            kind,
            lower,
            upper,
        });
        VarId(self.variables.len() - 1)
    }

    /// Adds a linear constraint.
    pub fn add_constraint(
        &mut self,
        name: impl Into<String>,
        expr: LinearExpr,
        sense: Sense,
        rhs: f64,
    ) {
        self.constraints.push(Constraint {
            name: name.into(),
            expr,
            sense,
            rhs,
        });
    }

    /// Sets the objective.
    pub fn set_objective(&mut self, sense: ObjectiveSense, expr: LinearExpr) {
        self.objective = Objective { sense, expr };
    }

    /// Fixes a variable to a single value by tightening both bounds.
    pub fn fix_var(&mut self, var: VarId, value: f64) {
        if let Some(v) = self.variables.get_mut(var.0) {
            v.lower = value;
            v.upper = Some(value);
        }
    }

    /// Looks up a variable.
    pub fn var(&self, var: VarId) -> Option<&Variable> {
        self.variables.get(var.0)
    }

    /// Finds a variable by name.
    pub fn var_by_name(&self, name: &str) -> Option<VarId> {
        self.variables.iter().position(|v| v.name == name).map(VarId)
    }

    /// Finds a constraint by name.
    pub fn constraint(&self, name: &str) -> Option<&Constraint> {
        self.constraints.iter().find(|c| c.name == name)
    }

    /// Number of variables.
    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    /// Number of constraints.
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Names of all constraints violated by `values`.
    ///
    /// Variable bounds are checked too and reported by variable name.
    pub fn violations(&self, values: &[f64], tolerance: f64) -> Vec<&str> {
        let mut violated: Vec<&str> = self
            .variables
            .iter()
            .zip(values)
            .filter(|&(v, &x)| {
                x < v.lower - tolerance || v.upper.is_some_and(|u| x > u + tolerance)
            })
            .map(|(v, _)| v.name.as_str())
            .collect();
        violated.extend(
            self.constraints
                .iter()
                .filter(|c| !c.is_satisfied(values, tolerance))
                .map(|c| c.name.as_str()),
        );
        violated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_var_ids_are_sequential() {
        let mut m = MipModel::new("t");
        let a = m.add_var("a", VarKind::Binary, 0.0, Some(1.0));
        let b = m.add_var("b", VarKind::Integer, 2.0, None);
        assert_eq!(a, VarId(0));
        assert_eq!(b, VarId(1));
        assert_eq!(m.var_by_name("b"), Some(b));
        assert_eq!(m.var(b).map(|v| v.kind), Some(VarKind::Integer));
        assert!(m.var_by_name("zzz").is_none());
    }

    #[test]
    fn test_fix_var() {
        let mut m = MipModel::new("t");
        let a = m.add_var("a", VarKind::Binary, 0.0, Some(1.0));
        assert!(!m.variables[0].is_fixed());
        m.fix_var(a, 0.0);
        assert!(m.variables[0].is_fixed());
        assert_eq!(m.variables[0].upper, Some(0.0));
    }

    #[test]
    fn test_linear_expr() {
        let e = LinearExpr::sum([VarId(0), VarId(1)])
            .with_term(VarId(2), 3.0)
            .with_term(VarId(0), 0.0); // dropped
        assert_eq!(e.terms.len(), 3);
        assert!((e.evaluate(&[1.0, 2.0, 1.0]) - 6.0).abs() < 1e-10);
        assert!((e.coefficient(VarId(2)) - 3.0).abs() < 1e-10);
        assert!((e.coefficient(VarId(5)) - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_constraint_satisfaction() {
        let mut m = MipModel::new("t");
        let x = m.add_var("x", VarKind::Integer, 0.0, Some(3.0));
        let y = m.add_var("y", VarKind::Integer, 0.0, None);
        m.add_constraint("le", LinearExpr::sum([x, y]), Sense::Le, 4.0);
        m.add_constraint("eq", LinearExpr::new().with_term(x, 1.0), Sense::Eq, 2.0);
        m.add_constraint("ge", LinearExpr::new().with_term(y, 1.0), Sense::Ge, 1.0);

        assert!(m.violations(&[2.0, 2.0], 1e-6).is_empty());
        assert_eq!(m.violations(&[2.0, 3.0], 1e-6), vec!["le"]);
        assert_eq!(m.violations(&[4.0, 0.0], 1e-6), vec!["x", "eq", "ge"]);
    }
}
