//! Result Materializer (`spec.md` §4.6): walks solved `x[m,d,s]` values and
//! emits the occurrence/assignment pair the caller persists.

use crate::backend::SolverBackend;
use crate::domain::{Assignment, ScheduleResult, ScheduledOccurrence, Snapshot, Window};
use crate::index::SnapshotIndex;
use crate::model::Model;
use crate::time::instant_of;

pub fn materialize<B: SolverBackend>(
    backend: &B,
    snapshot: &Snapshot,
    window: &Window,
    index: &SnapshotIndex,
    model: &Model,
) -> ScheduleResult {
    let mut occurrences = Vec::new();
    let mut assignments = Vec::new();

    for (s, template) in snapshot.templates.iter().enumerate() {
        for d in 0..model.day_count {
            let assigned: Vec<usize> = (0..index.person_count())
                .filter(|&m| backend.value(model.x_var(m, d, s)) > 0.5)
                .collect();
            if assigned.is_empty() {
                continue;
            }

            let (start, end) = instant_of(window.start_instant, d, template);
            occurrences.push(ScheduledOccurrence {
                template: template.id.clone(),
                day_index: d,
                start_instant: start,
                end_instant: end,
            });

            for m in assigned {
                assignments.push(Assignment {
                    person: snapshot.persons[m].id.clone(),
                    template: template.id.clone(),
                    day_index: d,
                });
            }
        }
    }

    ScheduleResult { occurrences, assignments }
}
