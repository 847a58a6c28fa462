//! Benchmark for end-to-end solve performance.
//!
//! Run with: cargo run --release --bin bench

use shift_scheduling_core::fixtures::{self, FixtureSize};
use shift_scheduling_core::options::SolveOptions;
use shift_scheduling_core::solver::Outcome;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("shift_scheduling_core=info".parse().unwrap()))
        .init();

    let (snapshot, window) = fixtures::generate(FixtureSize::Large);

    println!("Benchmark: Two-Phase Solve");
    println!("  Persons: {}", snapshot.persons.len());
    println!("  Templates: {}", snapshot.templates.len());
    println!("  Days: {}", window.day_count());
    println!();

    let start = Instant::now();
    let outcome = shift_scheduling_core::solve(&snapshot, window, SolveOptions::default())
        .expect("fixture snapshot is valid");
    let elapsed = start.elapsed();

    match outcome {
        Outcome::Optimal { result, phase1_objective, phase2_objective }
        | Outcome::Feasible { result, phase1_objective, phase2_objective } => {
            println!("Occurrences: {}", result.occurrences.len());
            println!("Assignments: {}", result.assignments.len());
            println!("Phase 1 objective (fairness spread): {phase1_objective}");
            println!("Phase 2 objective (request violations): {phase2_objective}");
        }
        other => println!("Solve did not produce a schedule: {other:?}"),
    }

    println!("Elapsed: {elapsed:.2?}");
}
