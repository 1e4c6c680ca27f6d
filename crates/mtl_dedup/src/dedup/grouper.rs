//! Partition materials into duplicate classes

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::materials::RenderEquivalence;

/// Materials that render identically, in first-seen order
///
/// Never empty: the first member is the witness the group was keyed on.
#[derive(Debug)]
pub struct MaterialGroup<'a, T> {
    members: Vec<&'a T>,
}

impl<'a, T> MaterialGroup<'a, T> {
    fn new(first: &'a T) -> Self {
        Self { members: vec![first] }
    }

    /// First material seen for this group
    pub fn witness(&self) -> &'a T {
        self.members[0]
    }

    /// All members, witness included, in input order
    pub fn members(&self) -> &[&'a T] {
        &self.members
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always false, groups hold at least their witness
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Result of [`MaterialGrouper::group`]
#[derive(Debug)]
pub struct Grouping<'a, T> {
    groups: Vec<MaterialGroup<'a, T>>,
}

impl<'a, T> Grouping<'a, T> {
    /// Groups ordered by the position of their witness in the input
    pub fn groups(&self) -> &[MaterialGroup<'a, T>] {
        &self.groups
    }

    /// Consume into the group list
    pub fn into_groups(self) -> Vec<MaterialGroup<'a, T>> {
        self.groups
    }

    /// Number of distinct materials
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether the input was empty
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Groups materials by [`RenderEquivalence`]
pub struct MaterialGrouper;

impl MaterialGrouper {
    /// Partition `materials` into classes of render-equivalent values
    ///
    /// Every input element lands in exactly one group. Runs in expected O(n).
    pub fn group<T: RenderEquivalence>(materials: &[T]) -> Grouping<'_, T> {
        let mut index_by_key: HashMap<T::Key, usize> = HashMap::with_capacity(materials.len());
        let mut groups: Vec<MaterialGroup<'_, T>> = Vec::new();

        for material in materials {
            match index_by_key.entry(material.render_key()) {
                Entry::Occupied(entry) => groups[*entry.get()].members.push(material),
                Entry::Vacant(entry) => {
                    entry.insert(groups.len());
                    groups.push(MaterialGroup::new(material));
                }
            }
        }

        log::debug!("Grouped {} materials into {} classes", materials.len(), groups.len());
        Grouping { groups }
    }
}
