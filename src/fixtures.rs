//! Synthetic snapshot generators, used by benchmarks and integration tests.
//!
//! Grounded in the teacher's `demo_data` module: a seeded RNG plus weighted
//! count distributions, scaled to two reference sizes.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use rand::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::domain::{
    weekday_mask, Group, GroupId, GroupShiftLink, PairwiseConstraint, Person, PersonId,
    ShiftTemplate, TemplateId, TimeOffRequest, Window,
};
use crate::domain::Snapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixtureSize {
    Small,
    Large,
}

impl std::str::FromStr for FixtureSize {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "SMALL" => Ok(FixtureSize::Small),
            "LARGE" => Ok(FixtureSize::Large),
            _ => Err(()),
        }
    }
}

struct FixtureParameters {
    group_count: usize,
    persons_per_group: usize,
    templates_per_group: usize,
    days_in_window: i64,
    request_count_distribution: Vec<(usize, f64)>,
}

impl FixtureSize {
    fn parameters(&self) -> FixtureParameters {
        match self {
            FixtureSize::Small => FixtureParameters {
                group_count: 2,
                persons_per_group: 5,
                templates_per_group: 2,
                days_in_window: 14,
                request_count_distribution: vec![(0, 5.0), (1, 3.0), (2, 1.0)],
            },
            FixtureSize::Large => FixtureParameters {
                group_count: 5,
                persons_per_group: 12,
                templates_per_group: 3,
                days_in_window: 28,
                request_count_distribution: vec![(0, 4.0), (1, 3.0), (2, 2.0), (3, 1.0)],
            },
        }
    }
}

/// Generates a synthetic snapshot plus a window covering it, seeded for
/// reproducibility across runs.
pub fn generate(size: FixtureSize) -> (Snapshot, Window) {
    let params = size.parameters();
    let mut rng = StdRng::seed_from_u64(0);

    let start_date = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(); // a Monday
    let start_instant = NaiveDateTime::new(start_date, chrono::NaiveTime::from_hms_opt(0, 0, 0).unwrap());
    let window = Window {
        start_instant,
        end_instant: start_instant + Duration::days(params.days_in_window),
    };

    let groups: Vec<Group> = (0..params.group_count)
        .map(|i| Group { id: GroupId::new(format!("group-{i}")) })
        .collect();

    let mut persons = Vec::new();
    for (gi, group) in groups.iter().enumerate() {
        for pi in 0..params.persons_per_group {
            persons.push(Person {
                id: PersonId::new(format!("person-{gi}-{pi}")),
                group: group.id.clone(),
            });
        }
    }

    let shift_start_combos: [i64; 3] = [6 * 3600, 14 * 3600, 22 * 3600];
    let mut templates = Vec::new();
    let mut group_shift_links = Vec::new();
    for (gi, group) in groups.iter().enumerate() {
        for ti in 0..params.templates_per_group {
            let template_id = TemplateId::new(format!("template-{gi}-{ti}"));
            templates.push(ShiftTemplate {
                id: template_id.clone(),
                start_of_day_seconds: shift_start_combos[ti % shift_start_combos.len()],
                duration_seconds: 8 * 3600,
                weekdays: weekday_mask(0..7),
                required_count: 1,
            });
            group_shift_links.push(GroupShiftLink {
                group: group.id.clone(),
                template: template_id,
            });
        }
    }

    // A rest-period constraint between consecutive templates within each
    // group: the closing shift must not be immediately followed by the
    // opening shift the next day.
    let mut pairwise_constraints = Vec::new();
    for gi in 0..params.group_count {
        let last = params.templates_per_group.saturating_sub(1);
        if last == 0 {
            continue;
        }
        pairwise_constraints.push(PairwiseConstraint {
            from: TemplateId::new(format!("template-{gi}-{last}")),
            to: TemplateId::new(format!("template-{gi}-0")),
            within_last_shifts: 1,
        });
    }

    let mut requests = Vec::new();
    for person in &persons {
        let request_count = pick_count(&mut rng, &params.request_count_distribution);
        let mut offsets: Vec<i64> = (0..params.days_in_window).collect();
        offsets.shuffle(&mut rng);
        for &day in offsets.iter().take(request_count) {
            let day_start = start_instant + Duration::days(day);
            requests.push(TimeOffRequest {
                person: person.id.clone(),
                start_instant: day_start,
                end_instant: day_start + Duration::days(1),
            });
        }
    }

    let snapshot = Snapshot {
        persons,
        groups,
        templates,
        group_shift_links,
        requests,
        pairwise_constraints,
    };

    (snapshot, window)
}

fn pick_count(rng: &mut StdRng, distribution: &[(usize, f64)]) -> usize {
    let total_weight: f64 = distribution.iter().map(|(_, w)| w).sum();
    let mut choice = rng.gen::<f64>() * total_weight;

    for (count, weight) in distribution {
        if choice < *weight {
            return *count;
        }
        choice -= weight;
    }
    distribution.last().map(|(c, _)| *c).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_fixture_has_expected_scale() {
        let (snapshot, window) = generate(FixtureSize::Small);
        assert_eq!(snapshot.persons.len(), 10);
        assert_eq!(snapshot.templates.len(), 4);
        assert_eq!(window.day_count(), 14);
    }

    #[test]
    fn large_fixture_has_expected_scale() {
        let (snapshot, _window) = generate(FixtureSize::Large);
        assert_eq!(snapshot.persons.len(), 60);
        assert_eq!(snapshot.templates.len(), 15);
    }

    #[test]
    fn every_group_has_at_least_one_linked_template() {
        let (snapshot, _window) = generate(FixtureSize::Small);
        for group in &snapshot.groups {
            assert!(snapshot
                .group_shift_links
                .iter()
                .any(|link| link.group == group.id));
        }
    }

    #[test]
    fn fixture_size_parses_case_insensitively() {
        assert_eq!("small".parse::<FixtureSize>(), Ok(FixtureSize::Small));
        assert_eq!("LARGE".parse::<FixtureSize>(), Ok(FixtureSize::Large));
        assert!("huge".parse::<FixtureSize>().is_err());
    }
}
