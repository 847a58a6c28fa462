//! Read-only snapshot entities consumed by the scheduling core, and the
//! entities it produces.
//!
//! The snapshot is built once per `solve` call and never mutated; all
//! dense-index precomputation happens in [`crate::index::SnapshotIndex`],
//! not here.

use std::collections::HashSet;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

macro_rules! stable_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self::new(s)
            }
        }
    };
}

stable_id!(PersonId);
stable_id!(GroupId);
stable_id!(TemplateId);

/// A member of the roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub group: GroupId,
}

/// Defines the eligibility partition: a person's group determines which
/// templates they may be assigned to, via [`GroupShiftLink`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
}

/// A recurring shift specification. An occurrence is generated on every day
/// whose weekday is in `weekdays`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftTemplate {
    pub id: TemplateId,
    /// Seconds after local midnight at which the shift begins, `[0, 86400)`.
    pub start_of_day_seconds: i64,
    /// Duration in seconds; may exceed 86400 for multi-day shifts.
    pub duration_seconds: i64,
    /// Bitmask over weekdays `0 = Sunday .. 6 = Saturday`: bit `i` set iff
    /// an occurrence is generated on weekday `i`.
    pub weekdays: u8,
    /// Members required per occurrence.
    pub required_count: u32,
}

impl ShiftTemplate {
    pub fn active_on(&self, weekday: u8) -> bool {
        debug_assert!(weekday < 7);
        self.weekdays & (1 << weekday) != 0
    }

    pub fn weekday_set(&self) -> impl Iterator<Item = u8> + '_ {
        (0u8..7).filter(move |&w| self.active_on(w))
    }
}

/// Bitmask helper shared by validation and fixture generation.
pub fn weekday_mask(weekdays: impl IntoIterator<Item = u8>) -> u8 {
    weekdays.into_iter().fold(0u8, |acc, w| acc | (1 << w))
}

/// Derives the set of distinct weekdays touched by a mask; used by
/// validation to reject templates with empty `weekdays`.
pub fn weekday_members(mask: u8) -> HashSet<u8> {
    (0u8..7).filter(|&w| mask & (1 << w) != 0).collect()
}

/// Many-to-many link: a person is eligible for `template` iff their group
/// appears in a link with that template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupShiftLink {
    pub group: GroupId,
    pub template: TemplateId,
}

/// Directed pairwise temporal constraint: if a person is assigned `from` on
/// day `d`, they must not be assigned `to` on day `d+i` for the `i` range
/// specified in `spec.md` §3 (depends on whether `from == to`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PairwiseConstraint {
    pub from: TemplateId,
    pub to: TemplateId,
    pub within_last_shifts: i64,
}

/// A person's declared time-off interval, closed-open in wall-clock time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeOffRequest {
    pub person: PersonId,
    pub start_instant: NaiveDateTime,
    pub end_instant: NaiveDateTime,
}

/// The half-open scheduling window `[start_instant, end_instant)`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Window {
    pub start_instant: NaiveDateTime,
    pub end_instant: NaiveDateTime,
}

impl Window {
    /// Number of whole days in the window. Fractional-day windows are
    /// rejected by [`crate::validate::validate_snapshot`], not here.
    pub fn day_count(&self) -> i64 {
        (self.end_instant - self.start_instant).num_seconds() / crate::time::SECONDS_PER_DAY
    }
}

/// Read-only input to a single `solve` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub persons: Vec<Person>,
    pub groups: Vec<Group>,
    pub templates: Vec<ShiftTemplate>,
    pub group_shift_links: Vec<GroupShiftLink>,
    pub requests: Vec<TimeOffRequest>,
    pub pairwise_constraints: Vec<PairwiseConstraint>,
}

/// One instantiation of a template on a specific calendar day, produced only
/// when the template is active that day and `required_count > 0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledOccurrence {
    pub template: TemplateId,
    pub day_index: i64,
    pub start_instant: NaiveDateTime,
    pub end_instant: NaiveDateTime,
}

/// A person paired with an occurrence they were assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub person: PersonId,
    pub template: TemplateId,
    pub day_index: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleResult {
    pub occurrences: Vec<ScheduledOccurrence>,
    pub assignments: Vec<Assignment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekday_mask_round_trips_membership() {
        let mask = weekday_mask([0u8, 2, 6]);
        assert!(mask & 0b0000_0001 != 0);
        assert!(mask & 0b0000_0100 != 0);
        assert!(mask & 0b0100_0000 != 0);
        assert!(mask & 0b0000_0010 == 0);
    }

    #[test]
    fn template_active_on_respects_mask() {
        let t = ShiftTemplate {
            id: TemplateId::new("t1"),
            start_of_day_seconds: 0,
            duration_seconds: 3600,
            weekdays: weekday_mask([1, 3]),
            required_count: 1,
        };
        assert!(t.active_on(1));
        assert!(t.active_on(3));
        assert!(!t.active_on(0));
    }

    #[test]
    fn snapshot_round_trips_through_json() {
        let snapshot = Snapshot {
            persons: vec![Person { id: PersonId::new("p0"), group: GroupId::new("g0") }],
            groups: vec![Group { id: GroupId::new("g0") }],
            templates: vec![],
            group_shift_links: vec![],
            requests: vec![],
            pairwise_constraints: vec![],
        };
        let json = serde_json::to_string(&snapshot).unwrap();
        let restored: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.persons[0].id, snapshot.persons[0].id);
    }

    #[test]
    fn window_day_count_is_exact_for_aligned_windows() {
        let start = NaiveDateTime::parse_from_str("2026-01-01 00:00:00", "%Y-%m-%d %H:%M:%S")
            .unwrap();
        let end = start + chrono::Duration::days(7);
        let w = Window {
            start_instant: start,
            end_instant: end,
        };
        assert_eq!(w.day_count(), 7);
    }
}
