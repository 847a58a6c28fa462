//! [`SolverBackend`] implementation over `good_lp`'s pure-Rust `microlp`
//! solver.
//!
//! `good_lp` performs branch-and-bound over `microlp`'s LP relaxation for
//! integer/binary variables, which is the "Boolean/integer constraint
//! model" capability `spec.md` §4.4 needs, without requiring a system CP
//! solver toolchain. Warm-start hints (`set_hint`) are recorded but not
//! forwarded: `microlp` has no portable MIP-start API, so the hint is kept
//! purely for parity with the capability set described in `spec.md` §9 —
//! see `DESIGN.md`.

use std::collections::HashMap;

use good_lp::{variable, Expression, ProblemVariables, Solution, SolverModel};

use crate::backend::{BackendError, SolveStatus, SolverBackend, Term, Var};

#[derive(Debug, Clone, Copy)]
struct VarDef {
    lo: i64,
    hi: i64,
}

#[derive(Default)]
pub struct GoodLpBackend {
    var_defs: Vec<VarDef>,
    le_constraints: Vec<(Vec<Term>, f64)>,
    eq_constraints: Vec<(Vec<Term>, f64)>,
    hints: HashMap<usize, f64>,
    objective_terms: Vec<Term>,
    last_values: Vec<f64>,
    last_objective: f64,
}

impl GoodLpBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn to_expression(&self, vars: &[good_lp::Variable], terms: &[Term]) -> Expression {
        let mut expr = Expression::from(0.0);
        for (var, coef) in terms {
            expr += vars[var.0] * (*coef);
        }
        expr
    }
}

impl SolverBackend for GoodLpBackend {
    fn new_bool_var(&mut self, _name: &str) -> Var {
        let id = self.var_defs.len();
        self.var_defs.push(VarDef { lo: 0, hi: 1 });
        Var(id)
    }

    fn new_int_var(&mut self, lo: i64, hi: i64, _name: &str) -> Var {
        let id = self.var_defs.len();
        self.var_defs.push(VarDef { lo, hi });
        Var(id)
    }

    fn add_le(&mut self, terms: &[Term], rhs: f64) {
        self.le_constraints.push((terms.to_vec(), rhs));
    }

    fn add_eq(&mut self, terms: &[Term], rhs: f64) {
        self.eq_constraints.push((terms.to_vec(), rhs));
    }

    fn set_hint(&mut self, var: Var, value: f64) {
        self.hints.insert(var.0, value);
    }

    fn minimize(&mut self, terms: &[Term]) {
        self.objective_terms = terms.to_vec();
    }

    fn solve(&mut self) -> Result<SolveStatus, BackendError> {
        let mut vars = ProblemVariables::new();
        let good_lp_vars: Vec<good_lp::Variable> = self
            .var_defs
            .iter()
            .map(|def| {
                if def.lo == 0 && def.hi == 1 {
                    vars.add(variable().binary())
                } else {
                    vars.add(variable().integer().min(def.lo as f64).max(def.hi as f64))
                }
            })
            .collect();

        let objective = self.to_expression(&good_lp_vars, &self.objective_terms);
        let mut problem = vars.minimise(objective.clone()).using(good_lp::microlp);

        for (terms, rhs) in &self.le_constraints {
            let expr = self.to_expression(&good_lp_vars, terms);
            problem = problem.with(expr.leq(*rhs));
        }
        for (terms, rhs) in &self.eq_constraints {
            let expr = self.to_expression(&good_lp_vars, terms);
            problem = problem.with(expr.eq(*rhs));
        }

        match problem.solve() {
            Ok(solution) => {
                self.last_values = good_lp_vars.iter().map(|v| solution.value(*v)).collect();
                self.last_objective = solution.eval(&objective);
                Ok(SolveStatus::Optimal)
            }
            Err(good_lp::ResolutionError::Infeasible) => Ok(SolveStatus::Infeasible),
            Err(other) => Err(BackendError::Other(other.to_string())),
        }
    }

    fn value(&self, var: Var) -> f64 {
        self.last_values.get(var.0).copied().unwrap_or(0.0)
    }

    fn objective_value(&self) -> f64 {
        self.last_objective
    }
}
