//! Eager snapshot validation, per `spec.md` §7.
//!
//! Every check here runs before any model variable is created, so callers
//! can distinguish "bad input" (`CoreError::SnapshotInvalid`) from "solver
//! could not satisfy" (an `Outcome::*Infeasible` variant).

use std::collections::HashSet;

use crate::domain::{Snapshot, Window};
use crate::error::{CoreError, CoreResult};
use crate::time::SECONDS_PER_DAY;

pub fn validate_snapshot(snapshot: &Snapshot, window: &Window) -> CoreResult<()> {
    if window.end_instant <= window.start_instant {
        return Err(CoreError::SnapshotInvalid(
            "window must be non-empty (end_instant > start_instant)".into(),
        ));
    }
    let span_seconds = (window.end_instant - window.start_instant).num_seconds();
    if span_seconds % SECONDS_PER_DAY != 0 {
        return Err(CoreError::SnapshotInvalid(
            "window span must be a whole number of days".into(),
        ));
    }

    let group_ids: HashSet<_> = snapshot.groups.iter().map(|g| &g.id).collect();
    let template_ids: HashSet<_> = snapshot.templates.iter().map(|t| &t.id).collect();
    let person_ids: HashSet<_> = snapshot.persons.iter().map(|p| &p.id).collect();

    for person in &snapshot.persons {
        if !group_ids.contains(&person.group) {
            return Err(CoreError::SnapshotInvalid(format!(
                "person {} references unknown group {}",
                person.id, person.group
            )));
        }
    }

    for template in &snapshot.templates {
        if template.required_count == 0 {
            return Err(CoreError::SnapshotInvalid(format!(
                "template {} has required_count == 0",
                template.id
            )));
        }
        if template.weekdays == 0 {
            return Err(CoreError::SnapshotInvalid(format!(
                "template {} has empty weekdays",
                template.id
            )));
        }
        if !(0..SECONDS_PER_DAY).contains(&template.start_of_day_seconds) {
            return Err(CoreError::SnapshotInvalid(format!(
                "template {} has start_of_day_seconds outside [0, 86400)",
                template.id
            )));
        }
        if template.duration_seconds <= 0 {
            return Err(CoreError::SnapshotInvalid(format!(
                "template {} has non-positive duration_seconds",
                template.id
            )));
        }
    }

    for link in &snapshot.group_shift_links {
        if !group_ids.contains(&link.group) {
            return Err(CoreError::SnapshotInvalid(format!(
                "group_shift_link references unknown group {}",
                link.group
            )));
        }
        if !template_ids.contains(&link.template) {
            return Err(CoreError::SnapshotInvalid(format!(
                "group_shift_link references unknown template {}",
                link.template
            )));
        }
    }

    for constraint in &snapshot.pairwise_constraints {
        if !template_ids.contains(&constraint.from) {
            return Err(CoreError::SnapshotInvalid(format!(
                "pairwise constraint references unknown template {}",
                constraint.from
            )));
        }
        if !template_ids.contains(&constraint.to) {
            return Err(CoreError::SnapshotInvalid(format!(
                "pairwise constraint references unknown template {}",
                constraint.to
            )));
        }
        if constraint.within_last_shifts < 0 {
            return Err(CoreError::SnapshotInvalid(format!(
                "pairwise constraint {} -> {} has negative within_last_shifts",
                constraint.from, constraint.to
            )));
        }
    }

    for request in &snapshot.requests {
        if !person_ids.contains(&request.person) {
            return Err(CoreError::SnapshotInvalid(format!(
                "time-off request references unknown person {}",
                request.person
            )));
        }
        if request.end_instant < request.start_instant {
            return Err(CoreError::SnapshotInvalid(format!(
                "time-off request for {} has end before start",
                request.person
            )));
        }
    }

    Ok(())
}
