//! Two-Phase Solver Driver (`spec.md` §4.5): invokes the underlying solver
//! twice against the same model — fairness first, then request satisfaction
//! locked behind the fairness optimum — threading Phase-1 values back as
//! warm-start hints.

use std::time::Instant;

use tracing::info;

use crate::backend::{SolveStatus, SolverBackend};
use crate::domain::{ScheduleResult, Snapshot, Window};
use crate::index::SnapshotIndex;
use crate::model::{self, Model};
use crate::options::SolveOptions;
use crate::requests::{self, RequestOverlap};

/// Tagged outcome of a `solve` call, per `spec.md` §4.5/§6.
#[derive(Debug, Clone)]
pub enum Outcome {
    Optimal {
        result: ScheduleResult,
        phase1_objective: f64,
        phase2_objective: f64,
    },
    Feasible {
        result: ScheduleResult,
        phase1_objective: f64,
        phase2_objective: f64,
    },
    Phase1Infeasible,
    Phase2Infeasible,
    DeadlineExceeded,
}

struct Deadline {
    started_at: Instant,
    budget_seconds: Option<f64>,
}

impl Deadline {
    fn new(budget_seconds: Option<f64>, started_at: Instant) -> Self {
        Self { started_at, budget_seconds }
    }

    fn expired(&self) -> bool {
        match self.budget_seconds {
            Some(budget) => self.started_at.elapsed().as_secs_f64() >= budget,
            None => false,
        }
    }
}

/// Runs both phases against `backend`, using a pre-built model and the
/// request overlap set, and materializes the result.
///
/// `started_at` is taken by the caller rather than inside this function so
/// that `Instant::now()` is called exactly once per `solve` invocation.
pub fn run_two_phase<B: SolverBackend>(
    backend: &mut B,
    snapshot: &Snapshot,
    window: &Window,
    index: &SnapshotIndex,
    options: &SolveOptions,
    started_at: Instant,
) -> Outcome {
    let deadline = Deadline::new(options.deadline_seconds, started_at);
    if deadline.expired() {
        return Outcome::DeadlineExceeded;
    }

    let model = model::build(backend, snapshot, window, index, options);

    info!(phase = 1, "solving fairness objective");
    let phase1_status = match backend.solve() {
        Ok(status) => status,
        Err(_) => return Outcome::Phase1Infeasible,
    };
    if phase1_status == SolveStatus::Infeasible {
        return Outcome::Phase1Infeasible;
    }
    let phase1_objective = backend.objective_value();

    if deadline.expired() {
        return Outcome::DeadlineExceeded;
    }

    // Warm-start: pin every x[m,d,s] and every diff_s at its Phase-1 value.
    for var in model.x.values() {
        backend.set_hint(*var, backend.value(*var));
    }
    for var in model.diff.values() {
        backend.set_hint(*var, backend.value(*var));
    }

    // Lock fairness: sum(diff_s) <= F*.
    let diff_terms: Vec<_> = model.diff.values().map(|&v| (v, 1.0)).collect();
    backend.add_le(&diff_terms, phase1_objective);

    let request_overlaps = requests::map_requests(snapshot, window, options);
    let v_vars = add_request_violation_vars(backend, &model, index, &request_overlaps);

    let objective_terms: Vec<_> = v_vars.iter().map(|&(var, _)| (var, 1.0)).collect();
    backend.minimize(&objective_terms);

    info!(phase = 2, violations_tracked = v_vars.len(), "solving request-violation objective");
    let phase2_status = match backend.solve() {
        Ok(status) => status,
        Err(_) => return Outcome::Phase2Infeasible,
    };
    if phase2_status == SolveStatus::Infeasible {
        return Outcome::Phase2Infeasible;
    }
    let phase2_objective = backend.objective_value();
    info!(duration = ?started_at.elapsed(), phase1_objective, phase2_objective, "solve complete");

    let result = crate::materializer::materialize(backend, snapshot, window, index, &model);

    match (phase1_status, phase2_status) {
        (SolveStatus::Optimal, SolveStatus::Optimal) => Outcome::Optimal {
            result,
            phase1_objective,
            phase2_objective,
        },
        _ => Outcome::Feasible {
            result,
            phase1_objective,
            phase2_objective,
        },
    }
}

/// Introduces `v[m,d,s] = x[m,d,s]` for each `(m,d,s)` in the request
/// overlap set, returning the created variables for use as the Phase-2
/// objective.
fn add_request_violation_vars<B: SolverBackend>(
    backend: &mut B,
    model: &Model,
    index: &SnapshotIndex,
    overlaps: &std::collections::HashSet<RequestOverlap>,
) -> Vec<(crate::backend::Var, (usize, i64, usize))> {
    let mut v_vars = Vec::with_capacity(overlaps.len());
    for overlap in overlaps {
        let (Some(m), Some(s)) = (
            index.person_index(&overlap.person),
            index.template_index(&overlap.template),
        ) else {
            continue;
        };
        let d = overlap.day_index;
        if d < 0 || d >= model.day_count {
            continue;
        }
        let x = model.x_var(m, d, s);
        let v = backend.new_bool_var(&format!("v_m{m}_d{d}_s{s}"));
        backend.add_eq(&[(v, 1.0), (x, -1.0)], 0.0);
        v_vars.push((v, (m, d, s)));
    }
    v_vars
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockBackend;
    use crate::domain::{weekday_mask, Group, GroupId, GroupShiftLink, Person, PersonId, ShiftTemplate, TemplateId};
    use chrono::NaiveDateTime;

    fn dt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn snapshot() -> (Snapshot, Window) {
        let snap = Snapshot {
            persons: vec![
                Person { id: PersonId::new("p0"), group: GroupId::new("g") },
                Person { id: PersonId::new("p1"), group: GroupId::new("g") },
            ],
            groups: vec![Group { id: GroupId::new("g") }],
            templates: vec![ShiftTemplate {
                id: TemplateId::new("t0"),
                start_of_day_seconds: 0,
                duration_seconds: 8 * 3600,
                weekdays: weekday_mask(0..7),
                required_count: 1,
            }],
            group_shift_links: vec![GroupShiftLink { group: GroupId::new("g"), template: TemplateId::new("t0") }],
            requests: vec![],
            pairwise_constraints: vec![],
        };
        let window = Window {
            start_instant: dt("2026-01-05 00:00:00"),
            end_instant: dt("2026-01-08 00:00:00"),
        };
        (snap, window)
    }

    #[test]
    fn mock_backend_always_reports_optimal_outcome() {
        let (snap, window) = snapshot();
        let index = SnapshotIndex::build(&snap);
        let mut backend = MockBackend::default();
        let outcome = run_two_phase(&mut backend, &snap, &window, &index, &SolveOptions::default(), Instant::now());
        assert!(matches!(outcome, Outcome::Optimal { .. }));
    }

    #[test]
    fn expired_deadline_short_circuits_before_any_solve() {
        let (snap, window) = snapshot();
        let index = SnapshotIndex::build(&snap);
        let mut backend = MockBackend::default();
        let started = Instant::now() - std::time::Duration::from_secs(10);
        let options = SolveOptions {
            deadline_seconds: Some(1.0),
            ..SolveOptions::default()
        };
        let outcome = run_two_phase(&mut backend, &snap, &window, &index, &options, started);
        assert!(matches!(outcome, Outcome::DeadlineExceeded));
        assert_eq!(backend.var_count, 0);
    }
}
