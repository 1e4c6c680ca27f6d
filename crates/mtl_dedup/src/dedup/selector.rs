//! Canonical member selection and deterministic ordering

use std::collections::BTreeSet;

use super::grouper::Grouping;
use crate::foundation::text::natural_cmp;
use crate::materials::RenderEquivalence;

/// A duplicate class with its canonical member decided
#[derive(Debug)]
pub struct SelectedGroup<'a, T> {
    canonical: &'a T,
    members: Vec<&'a T>,
    duplicates: Vec<&'a T>,
}

impl<'a, T: RenderEquivalence> SelectedGroup<'a, T> {
    /// Member whose name every reference in the group resolves to
    pub fn canonical(&self) -> &'a T {
        self.canonical
    }

    /// Name of the canonical member
    pub fn canonical_name(&self) -> &'a str {
        self.canonical.name()
    }

    /// All members in input order, canonical first
    pub fn members(&self) -> &[&'a T] {
        &self.members
    }

    /// How many input materials the group absorbed
    pub fn occurrences(&self) -> usize {
        self.members.len()
    }

    /// Members that are folded into the canonical one, in natural name order
    ///
    /// Members carrying the canonical name are not listed.
    pub fn duplicates(&self) -> &[&'a T] {
        &self.duplicates
    }
}

/// Ordered groups plus the names that must not be emitted
#[derive(Debug)]
pub struct Selection<'a, T> {
    groups: Vec<SelectedGroup<'a, T>>,
    duplicate_names: BTreeSet<String>,
}

impl<'a, T: RenderEquivalence> Selection<'a, T> {
    /// Groups, most duplicated first
    pub fn groups(&self) -> &[SelectedGroup<'a, T>] {
        &self.groups
    }

    /// Names of every non-canonical member
    pub fn duplicate_names(&self) -> &BTreeSet<String> {
        &self.duplicate_names
    }

    /// Whether `name` was folded into another material
    pub fn is_duplicate(&self, name: &str) -> bool {
        self.duplicate_names.contains(name)
    }

    /// Number of distinct materials
    pub fn distinct_count(&self) -> usize {
        self.groups.len()
    }

    /// Canonical members in group order
    pub fn canonical_members(&self) -> impl Iterator<Item = &'a T> + '_ {
        self.groups.iter().map(|group| group.canonical)
    }
}

/// Orders groups and picks canonical members
pub struct CanonicalSelector;

impl CanonicalSelector {
    /// Decide canonical members for every group
    ///
    /// Groups are sorted by descending size; equal sizes keep first-seen
    /// order. The canonical member is the first-seen one.
    pub fn select<T: RenderEquivalence>(grouping: Grouping<'_, T>) -> Selection<'_, T> {
        let mut groups: Vec<SelectedGroup<'_, T>> = grouping
            .into_groups()
            .into_iter()
            .map(|group| {
                let canonical = group.witness();
                let members = group.members().to_vec();
                let mut duplicates: Vec<&T> = members[1..]
                    .iter()
                    .copied()
                    .filter(|member| member.name() != canonical.name())
                    .collect();
                duplicates.sort_by(|a, b| natural_cmp(a.name(), b.name()));

                SelectedGroup {
                    canonical,
                    members,
                    duplicates,
                }
            })
            .collect();

        // Stable sort keeps first-seen order between equally sized groups
        groups.sort_by(|a, b| b.members.len().cmp(&a.members.len()));

        let duplicate_names = groups
            .iter()
            .flat_map(|group| group.duplicates.iter().map(|member| member.name().to_string()))
            .collect();

        Selection {
            groups,
            duplicate_names,
        }
    }
}
