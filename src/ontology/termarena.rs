use std::collections::hash_map::{Keys, Values, ValuesMut};
use std::collections::HashMap;

use crate::term::Term;
use crate::TermId;

/// Id-indexed storage of all [`Term`]s
///
/// Terms never hold references to each other, only ids, so the arena
/// is the single owner of every term.
#[derive(Clone)]
pub(crate) struct Arena {
    terms: HashMap<TermId, Term>,
}

impl Arena {
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn insert(&mut self, term: Term) {
        self.terms.insert(term.id().clone(), term);
    }

    pub fn contains(&self, id: &TermId) -> bool {
        self.terms.contains_key(id)
    }

    pub fn get(&self, id: &TermId) -> Option<&Term> {
        self.terms.get(id)
    }

    pub fn get_mut(&mut self, id: &TermId) -> Option<&mut Term> {
        self.terms.get_mut(id)
    }

    pub fn values(&self) -> Values<'_, TermId, Term> {
        self.terms.values()
    }

    pub fn values_mut(&mut self) -> ValuesMut<'_, TermId, Term> {
        self.terms.values_mut()
    }

    pub fn keys(&self) -> Keys<'_, TermId, Term> {
        self.terms.keys()
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            terms: HashMap::with_capacity(1_000),
        }
    }
}
