//! Constraint inference and two-phase CP/MILP solver for recurring shift
//! scheduling.
//!
//! The entry point is [`solve`]: validate a [`domain::Snapshot`] against a
//! [`domain::Window`], infer pairwise temporal constraints between shift
//! templates, build the assignment model, solve it twice (fairness, then
//! request satisfaction), and materialize the result.

pub mod backend;
pub mod domain;
pub mod error;
pub mod fixtures;
pub mod goodlp_backend;
pub mod index;
pub mod materializer;
pub mod model;
pub mod options;
pub mod overlap;
pub mod requests;
pub mod solver;
pub mod time;
pub mod validate;

use std::time::Instant;

use tracing::info;

use domain::{Snapshot, Window};
use error::CoreResult;
use goodlp_backend::GoodLpBackend;
use index::SnapshotIndex;
use options::SolveOptions;
use solver::Outcome;

/// Validates `snapshot` against `window` and `options`, infers temporal
/// constraints from the template catalog, folds them into the snapshot, and
/// runs the two-phase solve.
///
/// The whole call runs inside a `"solve"` span so every event emitted by
/// `validate`/`overlap`/`model`/`solver` downstream is attributed to the
/// same invocation in structured log output.
#[tracing::instrument(
    name = "solve",
    skip_all,
    fields(persons = snapshot.persons.len(), templates = snapshot.templates.len(), days = window.day_count())
)]
pub fn solve(snapshot: &Snapshot, window: Window, options: SolveOptions) -> CoreResult<Outcome> {
    let started_at = Instant::now();

    options.validate()?;
    validate::validate_snapshot(snapshot, &window)?;

    info!("starting solve");

    let inferred = overlap::analyze(&snapshot.templates);
    let mut merged_snapshot = snapshot.clone();
    overlap::merge_into(&mut merged_snapshot.pairwise_constraints, &inferred);

    let index = SnapshotIndex::build(&merged_snapshot);
    let mut backend = GoodLpBackend::new();

    let outcome = solver::run_two_phase(
        &mut backend,
        &merged_snapshot,
        &window,
        &index,
        &options,
        started_at,
    );

    Ok(outcome)
}
