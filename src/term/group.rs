use std::collections::HashSet;
use std::ops::{BitAnd, BitOr};

use smallvec::SmallVec;

use crate::TermId;

/// A set of [`TermId`]s representing a group of terms
///
/// Each term can occur only once in the group and the group is
/// always sorted.
///
/// This group is used e.g. for the parent or child terms of a [`crate::Term`]
/// or for the ancestor closure of a term.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TermGroup {
    ids: SmallVec<[TermId; crate::DEFAULT_NUM_PARENTS]>,
}

impl TermGroup {
    /// Constructs a new, empty [`TermGroup`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Constructs a new, empty [`TermGroup`] with the given capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ids: SmallVec::with_capacity(capacity),
        }
    }

    /// Returns `true` if the group contains no [`TermId`]s
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Returns the number of [`TermId`]s in the group
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Adds a new [`TermId`] to the group
    ///
    /// Returns whether the `TermId` was newly inserted. That is:
    ///
    /// - If the group did not previously contain this `TermId`, true is returned.
    /// - If the group already contained this `TermId`, false is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use phenodiff::{TermGroup, TermId};
    ///
    /// let mut group = TermGroup::new();
    /// assert!(group.insert(TermId::try_from("HP:2").unwrap()));
    /// assert!(group.insert(TermId::try_from("HP:1").unwrap()));
    /// assert!(!group.insert(TermId::try_from("HP:2").unwrap()));
    /// assert_eq!(group.len(), 2);
    /// ```
    pub fn insert(&mut self, id: TermId) -> bool {
        match self.ids.binary_search(&id) {
            Ok(_) => false,
            Err(idx) => {
                self.ids.insert(idx, id);
                true
            }
        }
    }

    /// Returns `true` if the group contains the [`TermId`]
    pub fn contains(&self, id: &TermId) -> bool {
        self.ids.binary_search(id).is_ok()
    }

    /// Returns an Iterator of the [`TermId`]s inside the group
    pub fn iter(&self) -> std::slice::Iter<'_, TermId> {
        self.ids.iter()
    }
}

impl From<HashSet<TermId>> for TermGroup {
    fn from(s: HashSet<TermId>) -> Self {
        let mut ids: SmallVec<[TermId; crate::DEFAULT_NUM_PARENTS]> = s.into_iter().collect();
        ids.sort_unstable();
        Self { ids }
    }
}

impl FromIterator<TermId> for TermGroup {
    fn from_iter<T: IntoIterator<Item = TermId>>(iter: T) -> Self {
        let mut group = TermGroup::new();
        for id in iter {
            group.insert(id);
        }
        group
    }
}

impl<'a> IntoIterator for &'a TermGroup {
    type Item = &'a TermId;
    type IntoIter = std::slice::Iter<'a, TermId>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter()
    }
}

impl BitOr for &TermGroup {
    type Output = TermGroup;

    fn bitor(self, rhs: &TermGroup) -> TermGroup {
        let (large, small) = if self.len() > rhs.len() {
            (self, rhs)
        } else {
            (rhs, self)
        };

        let mut group = large.clone();
        for id in &small.ids {
            group.insert(id.clone());
        }
        group
    }
}

impl BitAnd for &TermGroup {
    type Output = TermGroup;

    fn bitand(self, rhs: &TermGroup) -> TermGroup {
        let (large, small) = if self.len() > rhs.len() {
            (self, rhs)
        } else {
            (rhs, self)
        };

        // `small` is sorted, so the filtered result is sorted as well
        TermGroup {
            ids: small
                .ids
                .iter()
                .filter(|id| large.contains(id))
                .cloned()
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(ids: &[&str]) -> TermGroup {
        ids.iter()
            .map(|id| TermId::try_from(*id).unwrap())
            .collect()
    }

    #[test]
    fn test_termgroup_iter() {
        let group = group(&["HP:1", "HP:2", "HP:3"]);

        let mut ids = Vec::new();
        for id in &group {
            ids.push(id)
        }
        assert_eq!(ids.len(), 3);

        for id in &group {
            ids.push(id)
        }
        assert_eq!(ids.len(), 6);
    }

    #[test]
    fn test_bitor() {
        let group1 = group(&["HP:1", "HP:2", "HP:3"]);
        let group2 = group(&["HP:2", "HP:4"]);

        let result = group1.bitor(&group2);
        assert_eq!(result, group(&["HP:1", "HP:2", "HP:3", "HP:4"]));
    }

    #[test]
    fn test_bitand() {
        let group1 = group(&["HP:1", "HP:2", "HP:3"]);
        let group2 = group(&["HP:2", "HP:4", "HP:5", "HP:1"]);

        let result = group1.bitand(&group2);
        assert_eq!(result, group(&["HP:1", "HP:2"]));
        assert!(result.ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn from_hashset_is_sorted() {
        let set: HashSet<TermId> = ["HP:9", "HP:1", "HP:5"]
            .iter()
            .map(|id| TermId::try_from(*id).unwrap())
            .collect();
        let group = TermGroup::from(set);
        assert_eq!(group, self::group(&["HP:1", "HP:5", "HP:9"]));
    }
}
