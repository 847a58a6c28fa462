//! Request Mapper (`spec.md` §4.3): expands each time-off request into the
//! set of `(person, day, template)` triples it collides with inside the
//! scheduling window.
//!
//! This is a soft-penalty index only — it never forbids an assignment, it
//! only tells the Model Builder which `(m, d, s)` variables the Phase 2
//! objective should try to keep at zero.

use std::collections::HashSet;

use crate::domain::{PersonId, Snapshot, TemplateId, Window};
use crate::options::SolveOptions;
use crate::time::{instant_of, weekday_index, weekday_of_day};

/// A single `(person, day_index, template)` collision with a declared
/// time-off interval.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestOverlap {
    pub person: PersonId,
    pub day_index: i64,
    pub template: TemplateId,
}

/// Builds the set `R` of violating triples, per `spec.md` §4.3.
pub fn map_requests(snapshot: &Snapshot, window: &Window, options: &SolveOptions) -> HashSet<RequestOverlap> {
    let day_count = window.day_count();
    let window_start_weekday = weekday_index(window.start_instant, options.weekday_origin);
    let mut out = HashSet::new();

    for request in &snapshot.requests {
        let clipped_start = request.start_instant.max(window.start_instant);
        let clipped_end = request.end_instant.min(window.end_instant);
        if clipped_start >= clipped_end {
            continue;
        }

        for d in 0..day_count {
            for template in &snapshot.templates {
                let weekday = weekday_of_day(window_start_weekday, d);
                if !template.active_on(weekday) {
                    continue;
                }

                let (start, end) = instant_of(window.start_instant, d, template);
                if start.max(clipped_start) < end.min(clipped_end) {
                    out.insert(RequestOverlap {
                        person: request.person.clone(),
                        day_index: d,
                        template: template.id.clone(),
                    });
                }
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{weekday_mask, ShiftTemplate, TemplateId, TimeOffRequest};
    use chrono::NaiveDateTime;

    fn dt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn snapshot_with(templates: Vec<ShiftTemplate>, requests: Vec<TimeOffRequest>) -> Snapshot {
        Snapshot {
            persons: vec![],
            groups: vec![],
            templates,
            group_shift_links: vec![],
            requests,
            pairwise_constraints: vec![],
        }
    }

    #[test]
    fn request_outside_window_is_skipped() {
        let window = Window {
            start_instant: dt("2026-01-05 00:00:00"), // Monday
            end_instant: dt("2026-01-12 00:00:00"),
        };
        let template = ShiftTemplate {
            id: TemplateId::new("t0"),
            start_of_day_seconds: 0,
            duration_seconds: 8 * 3600,
            weekdays: weekday_mask(0..7),
            required_count: 1,
        };
        let request = TimeOffRequest {
            person: PersonId::new("p0"),
            start_instant: dt("2025-01-01 00:00:00"),
            end_instant: dt("2025-01-02 00:00:00"),
        };
        let snap = snapshot_with(vec![template], vec![request]);
        assert!(map_requests(&snap, &window, &SolveOptions::default()).is_empty());
    }

    #[test]
    fn request_overlapping_a_shift_is_recorded() {
        let window = Window {
            start_instant: dt("2026-01-05 00:00:00"), // Monday
            end_instant: dt("2026-01-12 00:00:00"),
        };
        let template = ShiftTemplate {
            id: TemplateId::new("t0"),
            start_of_day_seconds: 8 * 3600,
            duration_seconds: 8 * 3600,
            weekdays: weekday_mask(0..7),
            required_count: 1,
        };
        // Day index 3 (Thursday) covered entirely by the request.
        let request = TimeOffRequest {
            person: PersonId::new("p0"),
            start_instant: dt("2026-01-08 00:00:00"),
            end_instant: dt("2026-01-09 00:00:00"),
        };
        let snap = snapshot_with(vec![template], vec![request]);
        let overlaps = map_requests(&snap, &window, &SolveOptions::default());
        assert_eq!(overlaps.len(), 1);
        let hit = overlaps.iter().next().unwrap();
        assert_eq!(hit.day_index, 3);
        assert_eq!(hit.person, PersonId::new("p0"));
    }

    #[test]
    fn request_not_covering_shift_time_is_not_recorded() {
        let window = Window {
            start_instant: dt("2026-01-05 00:00:00"),
            end_instant: dt("2026-01-12 00:00:00"),
        };
        let template = ShiftTemplate {
            id: TemplateId::new("t0"),
            start_of_day_seconds: 22 * 3600,
            duration_seconds: 2 * 3600, // 22:00-00:00
            weekdays: weekday_mask(0..7),
            required_count: 1,
        };
        // Request only covers 00:00-06:00, never touching the 22:00-00:00 shift.
        let request = TimeOffRequest {
            person: PersonId::new("p0"),
            start_instant: dt("2026-01-08 00:00:00"),
            end_instant: dt("2026-01-08 06:00:00"),
        };
        let snap = snapshot_with(vec![template], vec![request]);
        assert!(map_requests(&snap, &window, &SolveOptions::default()).is_empty());
    }

    #[test]
    fn weekday_origin_changes_which_day_index_a_template_is_active_on() {
        use crate::options::WeekdayOrigin;

        let window = Window {
            start_instant: dt("2026-01-05 00:00:00"), // Monday
            end_instant: dt("2026-01-12 00:00:00"),
        };
        // Active only on mask bit 0: weekday index 0 means Sunday under the
        // default origin, Monday under the Monday origin.
        let template = ShiftTemplate {
            id: TemplateId::new("t0"),
            start_of_day_seconds: 0,
            duration_seconds: 8 * 3600,
            weekdays: weekday_mask([0]),
            required_count: 1,
        };
        // Covers all of day index 0 (the window's start day, a Monday).
        let request = TimeOffRequest {
            person: PersonId::new("p0"),
            start_instant: dt("2026-01-05 00:00:00"),
            end_instant: dt("2026-01-06 00:00:00"),
        };
        let snap = snapshot_with(vec![template], vec![request]);

        let sunday_origin = SolveOptions { weekday_origin: WeekdayOrigin::Sunday, ..SolveOptions::default() };
        assert!(map_requests(&snap, &window, &sunday_origin).is_empty());

        let monday_origin = SolveOptions { weekday_origin: WeekdayOrigin::Monday, ..SolveOptions::default() };
        assert_eq!(map_requests(&snap, &window, &monday_origin).len(), 1);
    }
}
