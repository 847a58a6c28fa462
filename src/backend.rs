//! Solver capability set (`spec.md` §4.5/§9, "solver abstraction"): the
//! Model Builder and Two-Phase Solver Driver are written against this
//! trait, not against any particular CP/MILP library, so the model is
//! testable with [`MockBackend`] and retargetable to another backend.

use std::collections::HashMap;

/// Opaque handle to a decision variable. Both Boolean and bounded-integer
/// variables share one handle type — a Boolean variable is just an integer
/// variable bounded to `[0, 1]`, which is how every MILP backend (including
/// `good_lp`) represents it internally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Var(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    Optimal,
    Feasible,
    Infeasible,
}

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("solver backend error: {0}")]
    Other(String),
}

/// A linear term `coefficient * var`.
pub type Term = (Var, f64);

pub trait SolverBackend {
    fn new_bool_var(&mut self, name: &str) -> Var;
    fn new_int_var(&mut self, lo: i64, hi: i64, name: &str) -> Var;

    fn add_le(&mut self, terms: &[Term], rhs: f64);
    fn add_eq(&mut self, terms: &[Term], rhs: f64);

    /// Warm-start hint; backends that cannot accept hints may ignore this.
    fn set_hint(&mut self, var: Var, value: f64);

    fn minimize(&mut self, terms: &[Term]);

    fn solve(&mut self) -> Result<SolveStatus, BackendError>;

    fn value(&self, var: Var) -> f64;
    fn objective_value(&self) -> f64;
}

/// In-memory backend that records variables and constraints but never
/// solves; used by the `model` module's unit tests to assert the shape of
/// the generated model without depending on a real CP/MILP solve.
#[derive(Default)]
pub struct MockBackend {
    pub var_count: usize,
    pub bounds: HashMap<usize, (i64, i64)>,
    pub le_constraints: Vec<(Vec<Term>, f64)>,
    pub eq_constraints: Vec<(Vec<Term>, f64)>,
    pub hints: HashMap<usize, f64>,
    pub objective: Vec<Term>,
}

impl SolverBackend for MockBackend {
    fn new_bool_var(&mut self, _name: &str) -> Var {
        let id = self.var_count;
        self.var_count += 1;
        self.bounds.insert(id, (0, 1));
        Var(id)
    }

    fn new_int_var(&mut self, lo: i64, hi: i64, _name: &str) -> Var {
        let id = self.var_count;
        self.var_count += 1;
        self.bounds.insert(id, (lo, hi));
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
        self.objective = terms.to_vec();
    }

    fn solve(&mut self) -> Result<SolveStatus, BackendError> {
        Ok(SolveStatus::Optimal)
    }

    fn value(&self, _var: Var) -> f64 {
        0.0
    }

    fn objective_value(&self) -> f64 {
        0.0
    }
}
