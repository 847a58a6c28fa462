//! Options recognized by [`crate::solve`], per `spec.md` §6.

use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekdayOrigin {
    Sunday,
    Monday,
}

impl Default for WeekdayOrigin {
    fn default() -> Self {
        WeekdayOrigin::Sunday
    }
}

#[derive(Debug, Clone)]
pub struct SolveOptions {
    /// Enables the §4.4 optional daily-workload cap when `Some`.
    pub max_hours_per_2_days: Option<u32>,
    /// Forwarded to the underlying solver; accepted for parity with the
    /// capability set, though `good_lp`'s `microlp` backend runs
    /// single-threaded regardless of this value.
    pub solver_workers: u32,
    /// Total wall-clock budget across both phases, in seconds.
    pub deadline_seconds: Option<f64>,
    pub weekday_origin: WeekdayOrigin,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            max_hours_per_2_days: None,
            solver_workers: 1,
            deadline_seconds: None,
            weekday_origin: WeekdayOrigin::default(),
        }
    }
}

impl SolveOptions {
    pub fn validate(&self) -> CoreResult<()> {
        if self.solver_workers == 0 {
            return Err(CoreError::ConfigurationInvalid(
                "solver_workers must be >= 1".into(),
            ));
        }
        if let Some(deadline) = self.deadline_seconds {
            if deadline <= 0.0 {
                return Err(CoreError::ConfigurationInvalid(
                    "deadline_seconds must be positive when set".into(),
                ));
            }
        }
        Ok(())
    }
}
