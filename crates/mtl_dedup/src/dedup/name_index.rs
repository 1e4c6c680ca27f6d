//! Material name to canonical name resolution

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use super::selector::Selection;
use crate::error::{DedupError, DedupResult};
use crate::materials::RenderEquivalence;

/// Exact-match lookup from any member name to its group's canonical name
#[derive(Debug, Default)]
pub struct NameIndex<'a> {
    entries: HashMap<&'a str, Resolved<'a>>,
}

#[derive(Debug, Clone, Copy)]
struct Resolved<'a> {
    group: usize,
    canonical: &'a str,
}

impl<'a> NameIndex<'a> {
    /// Index every member name of `selection`
    ///
    /// Fails with [`DedupError::AmbiguousMaterialName`] when one name belongs
    /// to members of two different groups, since references to it could not
    /// be resolved without guessing.
    pub fn build<T: RenderEquivalence>(selection: &Selection<'a, T>) -> DedupResult<Self> {
        let mut entries: HashMap<&'a str, Resolved<'a>> = HashMap::new();

        for (group_index, group) in selection.groups().iter().enumerate() {
            let resolved = Resolved {
                group: group_index,
                canonical: group.canonical_name(),
            };

            for member in group.members() {
                match entries.entry(member.name()) {
                    Entry::Occupied(existing) if existing.get().group != group_index => {
                        return Err(DedupError::AmbiguousMaterialName {
                            name: member.name().to_string(),
                        });
                    }
                    Entry::Occupied(_) => {}
                    Entry::Vacant(slot) => {
                        slot.insert(resolved);
                    }
                }
            }
        }

        Ok(Self { entries })
    }

    /// Canonical name for a referenced material name
    pub fn resolve(&self, name: &str) -> Option<&'a str> {
        self.entries.get(name).map(|resolved| resolved.canonical)
    }

    /// Number of indexed names
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no names are indexed
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
