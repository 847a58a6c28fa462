//! Overlap Analyzer (`spec.md` §4.2): derives pairwise temporal constraints
//! from a shift-template catalog alone.
//!
//! Pure and deterministic: the set of emitted triples is a function only of
//! the catalog (`spec.md` §8, "Overlap Analyzer is a pure function").

use std::collections::BTreeSet;

use crate::domain::{PairwiseConstraint, ShiftTemplate, TemplateId};
use crate::time::{next_weekday, overlap, spillover_at};

/// Emits the set of `(from, to, within_last_shifts)` triples implied by
/// every unordered pair of distinct templates in `catalog`.
///
/// Templates whose `duration_seconds` spans more than one midnight spill
/// into templates `j` days later for every `j` at which the remaining
/// spillover is still positive (`spec.md` §9, "cross-day spillover greater
/// than 24h" resolved as an iterative extension of the single-day case).
pub fn analyze(catalog: &[ShiftTemplate]) -> BTreeSet<PairwiseConstraint> {
    let mut out: BTreeSet<(TemplateId, TemplateId, i64)> = BTreeSet::new();

    for i in 0..catalog.len() {
        for j in (i + 1)..catalog.len() {
            let a = &catalog[i];
            let b = &catalog[j];

            same_day_overlap(a, b, &mut out);
            spillover_into(a, b, &mut out);
            spillover_into(b, a, &mut out);
        }
    }

    out.into_iter()
        .map(|(from, to, k)| PairwiseConstraint {
            from,
            to,
            within_last_shifts: k,
        })
        .collect()
}

fn same_day_overlap(
    a: &ShiftTemplate,
    b: &ShiftTemplate,
    out: &mut BTreeSet<(TemplateId, TemplateId, i64)>,
) {
    let shares_a_weekday = a
        .weekday_set()
        .any(|w| b.active_on(w) && overlap(a.start_of_day_seconds, a.duration_seconds, b.start_of_day_seconds, b.duration_seconds));

    if shares_a_weekday {
        out.insert((a.id.clone(), b.id.clone(), 0));
        out.insert((b.id.clone(), a.id.clone(), 0));
    }
}

/// Emits `(a, b, j)` for every spillover offset `j >= 1` at which `a`'s
/// occurrence still extends into a day active for `b`.
fn spillover_into(
    a: &ShiftTemplate,
    b: &ShiftTemplate,
    out: &mut BTreeSet<(TemplateId, TemplateId, i64)>,
) {
    let mut j = 1i64;
    loop {
        let spill = spillover_at(a.start_of_day_seconds, a.duration_seconds, j);
        if spill <= 0 {
            break;
        }

        let reaches_b = a.weekday_set().any(|w| {
            let mut target = w;
            for _ in 0..j {
                target = next_weekday(target);
            }
            b.active_on(target)
        });

        if reaches_b && b.start_of_day_seconds < spill {
            out.insert((a.id.clone(), b.id.clone(), j));
        }

        j += 1;
    }
}

/// Merges freshly-derived constraints into an existing registry: creates
/// missing triples, updates `within_last_shifts` on mismatch, leaves
/// matching ones untouched. Precise merge semantics beyond this are
/// out-of-core per `spec.md` §4.2.
pub fn merge_into(
    existing: &mut Vec<PairwiseConstraint>,
    derived: &BTreeSet<PairwiseConstraint>,
) {
    for d in derived {
        if let Some(found) = existing
            .iter_mut()
            .find(|e| e.from == d.from && e.to == d.to)
        {
            found.within_last_shifts = d.within_last_shifts;
        } else {
            existing.push(d.clone());
        }
    }
}
