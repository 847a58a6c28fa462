//! Model Builder (`spec.md` §4.4): constructs the Boolean/integer
//! constraint model — decision variables, coverage, eligibility, pairwise
//! temporal constraints, fairness auxiliaries, and (optionally) the daily
//! workload cap.
//!
//! Request-violation auxiliaries (§4.4 "Phase 2") are added later by
//! [`crate::solver`] once the Phase-1 objective is known, using the same
//! backend and the same `x` variables this module creates.

use std::collections::HashMap;

use crate::backend::{SolverBackend, Var};
use crate::domain::{Snapshot, Window};
use crate::index::SnapshotIndex;
use crate::options::SolveOptions;
use crate::time::weekday_of_day;

/// Dense key for an `x[m,d,s]` decision variable.
pub type XKey = (usize, i64, usize);

pub struct Model {
    pub day_count: i64,
    /// `x[m,d,s]`: person `m` assigned to template `s` on day `d`.
    pub x: HashMap<XKey, Var>,
    /// `diff_s` fairness-spread variable, keyed by template index, only for
    /// templates with more than one eligible person.
    pub diff: HashMap<usize, Var>,
    pub eligibility: Vec<Vec<bool>>,
}

impl Model {
    pub fn x_var(&self, m: usize, d: i64, s: usize) -> Var {
        self.x[&(m, d, s)]
    }
}

/// Builds the Phase-1 model: every hard constraint from `spec.md` §4.4 plus
/// the fairness objective. Window weekday-of-day is computed once up front
/// from `window.start_instant`, under `options.weekday_origin`.
pub fn build<B: SolverBackend>(
    backend: &mut B,
    snapshot: &Snapshot,
    window: &Window,
    index: &SnapshotIndex,
    options: &SolveOptions,
) -> Model {
    let day_count = window.day_count();
    let person_count = index.person_count();
    let template_count = index.template_count();
    let eligibility = index.eligibility_matrix();

    let window_start_weekday = crate::time::weekday_index(window.start_instant, options.weekday_origin);

    // Decision variables x[m,d,s].
    let mut x: HashMap<XKey, Var> = HashMap::with_capacity(person_count * template_count * day_count.max(0) as usize);
    for m in 0..person_count {
        for d in 0..day_count {
            for s in 0..template_count {
                let var = backend.new_bool_var(&format!("x_m{m}_d{d}_s{s}"));
                x.insert((m, d, s), var);
            }
        }
    }

    // Coverage: sum_m x[m,d,s] == required_count if active, else == 0.
    for d in 0..day_count {
        let weekday = weekday_of_day(window_start_weekday, d);
        for (s, template) in snapshot.templates.iter().enumerate() {
            let terms: Vec<_> = (0..person_count).map(|m| (x[&(m, d, s)], 1.0)).collect();
            let rhs = if template.active_on(weekday) {
                template.required_count as f64
            } else {
                0.0
            };
            backend.add_eq(&terms, rhs);
        }
    }

    // Eligibility: x[m,d,s] == 0 when m's group is not linked to s.
    for m in 0..person_count {
        for s in 0..template_count {
            if !eligibility[m][s] {
                for d in 0..day_count {
                    backend.add_eq(&[(x[&(m, d, s)], 1.0)], 0.0);
                }
            }
        }
    }

    // Pairwise temporal constraints.
    for constraint in &snapshot.pairwise_constraints {
        let (Some(a), Some(b)) = (
            index.template_index(&constraint.from),
            index.template_index(&constraint.to),
        ) else {
            continue;
        };
        let k = constraint.within_last_shifts;
        if k >= day_count {
            continue;
        }
        for m in 0..person_count {
            for d in 0..(day_count - k) {
                if a != b {
                    backend.add_le(&[(x[&(m, d, a)], 1.0), (x[&(m, d, b)], 1.0)], 1.0);
                }
                for i in 1..=k {
                    backend.add_le(&[(x[&(m, d, a)], 1.0), (x[&(m, d + i, b)], 1.0)], 1.0);
                }
            }
        }
    }

    // Fairness auxiliaries: for templates with > 1 eligible person,
    // lo_s <= c[m,s] <= hi_s for each eligible m, diff_s = hi_s - lo_s.
    let mut diff = HashMap::new();
    let mut fairness_terms = Vec::new();
    for s in 0..template_count {
        let eligible_members: Vec<usize> = (0..person_count).filter(|&m| eligibility[m][s]).collect();
        if eligible_members.len() <= 1 {
            continue;
        }

        let lo = backend.new_int_var(0, day_count, &format!("lo_s{s}"));
        let hi = backend.new_int_var(0, day_count, &format!("hi_s{s}"));
        let diff_var = backend.new_int_var(0, day_count, &format!("diff_s{s}"));

        for &m in &eligible_members {
            let count_terms: Vec<_> = (0..day_count).map(|d| (x[&(m, d, s)], 1.0)).collect();
            // lo <= c[m,s]  <=>  lo - c[m,s] <= 0
            let mut lo_terms = count_terms.clone();
            lo_terms.push((lo, -1.0));
            backend.add_le(&lo_terms, 0.0);
            // c[m,s] <= hi  <=>  c[m,s] - hi <= 0
            let mut hi_terms = count_terms;
            hi_terms.push((hi, -1.0));
            backend.add_le(&hi_terms, 0.0);
        }
        // diff_s == hi - lo
        backend.add_eq(&[(diff_var, 1.0), (hi, -1.0), (lo, 1.0)], 0.0);

        diff.insert(s, diff_var);
        fairness_terms.push((diff_var, 1.0));
    }
    backend.minimize(&fairness_terms);

    // Optional extension: daily workload cap (spec.md §4.4, "Optional
    // extension: daily workload cap").
    if let Some(h_max) = options.max_hours_per_2_days {
        add_workload_cap(backend, snapshot, &x, person_count, template_count, day_count, h_max);
    }

    Model {
        day_count,
        x,
        diff,
        eligibility,
    }
}

fn add_workload_cap<B: SolverBackend>(
    backend: &mut B,
    snapshot: &Snapshot,
    x: &HashMap<XKey, Var>,
    person_count: usize,
    template_count: usize,
    day_count: i64,
    h_max: u32,
) {
    // h[m,d,s] == duration_hours(s) if x[m,d,s] else 0, modeled as a pair of
    // big-M inequalities since h is only ever read through a sum, never
    // individually constrained elsewhere:
    //   h <= duration * x   and   h >= duration * x   (forces equality)
    let mut h: HashMap<XKey, Var> = HashMap::new();
    for m in 0..person_count {
        for d in 0..day_count {
            for s in 0..template_count {
                let hours = (snapshot.templates[s].duration_seconds / 3600).min(24).max(0);
                let var = backend.new_int_var(0, 24, &format!("h_m{m}_d{d}_s{s}"));
                let x_var = x[&(m, d, s)];
                backend.add_le(&[(var, 1.0), (x_var, -(hours as f64))], 0.0);
                backend.add_le(&[(var, -1.0), (x_var, hours as f64)], 0.0);
                h.insert((m, d, s), var);
            }
        }
    }

    for d in 0..(day_count.saturating_sub(1)) {
        for m in 0..person_count {
            let mut terms = Vec::with_capacity(template_count * 2);
            for s in 0..template_count {
                terms.push((h[&(m, d, s)], 1.0));
                terms.push((h[&(m, d + 1, s)], 1.0));
            }
            backend.add_le(&terms, h_max as f64);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockBackend;
    use crate::domain::{
        weekday_mask, Group, GroupId, GroupShiftLink, Person, PersonId, ShiftTemplate, TemplateId,
    };
    use chrono::NaiveDateTime;

    fn dt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn two_person_one_template_snapshot() -> (Snapshot, Window) {
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
            end_instant: dt("2026-01-12 00:00:00"),
        };
        (snap, window)
    }

    #[test]
    fn builds_one_x_var_per_person_day_template() {
        let (snap, window) = two_person_one_template_snapshot();
        let index = SnapshotIndex::build(&snap);
        let mut backend = MockBackend::default();
        let model = build(&mut backend, &snap, &window, &index, &SolveOptions::default());
        assert_eq!(model.x.len(), 2 * 7 * 1);
    }

    #[test]
    fn fairness_diff_var_created_for_shared_template() {
        let (snap, window) = two_person_one_template_snapshot();
        let index = SnapshotIndex::build(&snap);
        let mut backend = MockBackend::default();
        let model = build(&mut backend, &snap, &window, &index, &SolveOptions::default());
        assert_eq!(model.diff.len(), 1);
        assert!(!backend.objective.is_empty());
    }

    #[test]
    fn coverage_constraints_emitted_for_every_day_and_template() {
        let (snap, window) = two_person_one_template_snapshot();
        let index = SnapshotIndex::build(&snap);
        let mut backend = MockBackend::default();
        let _model = build(&mut backend, &snap, &window, &index, &SolveOptions::default());
        // 7 coverage == constraints (one per day) plus 1 fairness `diff_s =
        // hi - lo` == constraint for the shared template; both persons are
        // eligible, so there are no additional eligibility-forcing ones.
        assert_eq!(backend.eq_constraints.len(), 8);
    }
}
