//! [`Term`]s are the nodes of the [`OntologyGraph`](`crate::OntologyGraph`)
//!
//! This module contains the plain term record, its [`TermId`] and
//! the [`TermGroup`] used to store sets of related terms.

mod group;
mod information_content;
mod termid;

pub use group::TermGroup;
pub use information_content::InformationContent;
pub use termid::TermId;
pub(crate) use termid::separator_position;

use crate::{DEFAULT_NUM_ALL_PARENTS, DEFAULT_NUM_PARENTS};

/// A single term of the ontology
///
/// The term does not reference other terms directly. Parents and children
/// are stored as [`TermId`]s and must be looked up in the
/// [`OntologyGraph`](`crate::OntologyGraph`).
#[derive(Debug, Clone)]
pub struct Term {
    id: TermId,
    name: String,
    parents: TermGroup,
    children: TermGroup,
    all_parents: TermGroup,
    ancestors_cached: bool,
}

impl Term {
    /// Constructs a new [`Term`] without any parents or children
    pub fn new(id: TermId, name: &str) -> Term {
        Term {
            id,
            name: name.to_string(),
            parents: TermGroup::with_capacity(DEFAULT_NUM_PARENTS),
            children: TermGroup::with_capacity(DEFAULT_NUM_PARENTS),
            all_parents: TermGroup::with_capacity(DEFAULT_NUM_ALL_PARENTS),
            ancestors_cached: false,
        }
    }

    /// Returns the [`TermId`] of the term
    ///
    /// e.g.: `HP:0012345`
    pub fn id(&self) -> &TermId {
        &self.id
    }

    /// Returns the name of the term
    ///
    /// e.g.: `Abnormality of the nervous system`
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the [`TermId`]s of the direct parents
    pub fn parents(&self) -> &TermGroup {
        &self.parents
    }

    /// Returns the [`TermId`]s of the direct children
    pub fn children(&self) -> &TermGroup {
        &self.children
    }

    /// Returns the cached direct and indirect parents
    ///
    /// The group is only populated after
    /// [`OntologyGraph::create_cache`](`crate::OntologyGraph::create_cache`)
    /// and never contains the term itself.
    pub fn all_parents(&self) -> &TermGroup {
        &self.all_parents
    }

    pub(crate) fn ancestors_cached(&self) -> bool {
        self.ancestors_cached
    }

    pub(crate) fn add_parent(&mut self, parent_id: TermId) -> bool {
        self.parents.insert(parent_id)
    }

    pub(crate) fn add_child(&mut self, child_id: TermId) -> bool {
        self.children.insert(child_id)
    }

    pub(crate) fn set_all_parents(&mut self, all_parents: TermGroup) {
        self.all_parents = all_parents;
        self.ancestors_cached = true;
    }

    pub(crate) fn clear_all_parents(&mut self) {
        self.all_parents = TermGroup::new();
        self.ancestors_cached = false;
    }
}

impl PartialEq for Term {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Term {}
