//! Precomputed dense indices over a [`Snapshot`], per `spec.md` §9
//! ("Template-to-key mapping"): every hot loop after construction works
//! over `usize` indices instead of repeated string-keyed lookups.

use std::collections::HashMap;

use crate::domain::{PersonId, Snapshot, TemplateId};

#[derive(Debug)]
pub struct SnapshotIndex<'a> {
    snapshot: &'a Snapshot,
    person_idx: HashMap<&'a PersonId, usize>,
    template_idx: HashMap<&'a TemplateId, usize>,
}

impl<'a> SnapshotIndex<'a> {
    pub fn build(snapshot: &'a Snapshot) -> Self {
        let person_idx = snapshot
            .persons
            .iter()
            .enumerate()
            .map(|(i, p)| (&p.id, i))
            .collect();
        let template_idx = snapshot
            .templates
            .iter()
            .enumerate()
            .map(|(i, t)| (&t.id, i))
            .collect();
        Self {
            snapshot,
            person_idx,
            template_idx,
        }
    }

    pub fn person_count(&self) -> usize {
        self.snapshot.persons.len()
    }

    pub fn template_count(&self) -> usize {
        self.snapshot.templates.len()
    }

    pub fn person_index(&self, id: &PersonId) -> Option<usize> {
        self.person_idx.get(id).copied()
    }

    pub fn template_index(&self, id: &TemplateId) -> Option<usize> {
        self.template_idx.get(id).copied()
    }

    /// Dense `person_idx -> bool` eligibility matrix indexed
    /// `[person][template]`: `true` iff the person's group is linked to the
    /// template.
    pub fn eligibility_matrix(&self) -> Vec<Vec<bool>> {
        let persons = self.person_count();
        let templates = self.template_count();
        let mut matrix = vec![vec![false; templates]; persons];

        for link in &self.snapshot.group_shift_links {
            let Some(t_idx) = self.template_index(&link.template) else {
                continue;
            };
            for (p_idx, person) in self.snapshot.persons.iter().enumerate() {
                if person.group == link.group {
                    matrix[p_idx][t_idx] = true;
                }
            }
        }
        matrix
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Group, GroupId, Person};

    fn snap() -> Snapshot {
        Snapshot {
            persons: vec![
                Person {
                    id: PersonId::new("p0"),
                    group: GroupId::new("g0"),
                },
                Person {
                    id: PersonId::new("p1"),
                    group: GroupId::new("g1"),
                },
            ],
            groups: vec![
                Group { id: GroupId::new("g0") },
                Group { id: GroupId::new("g1") },
            ],
            templates: vec![],
            group_shift_links: vec![],
            requests: vec![],
            pairwise_constraints: vec![],
        }
    }

    #[test]
    fn indices_are_dense_and_stable() {
        let snap = snap();
        let idx = SnapshotIndex::build(&snap);
        assert_eq!(idx.person_index(&PersonId::new("p0")), Some(0));
        assert_eq!(idx.person_index(&PersonId::new("p1")), Some(1));
        assert_eq!(idx.person_index(&PersonId::new("missing")), None);
    }
}
