//! Error kinds raised by the scheduling core, per `spec.md` §7.
//!
//! All validation failures are reported eagerly, before any model
//! construction; `Phase1Infeasible`/`Phase2Infeasible`/`DeadlineExceeded`
//! are not errors — they are [`crate::solver::Outcome`] variants.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("snapshot invalid: {0}")]
    SnapshotInvalid(String),

    #[error("configuration invalid: {0}")]
    ConfigurationInvalid(String),

    #[error("solver unavailable: {0}")]
    SolverUnavailable(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
