//! The in-memory term hierarchy
use core::fmt::Debug;
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use tracing::{debug, trace, warn};

use crate::term::Term;
use crate::{PhenoError, PhenoResult, TermGroup, TermId};

mod termarena;
use termarena::Arena;

/// Looks up [`Term`]s by their [`TermId`]
///
/// Callers use a resolver to validate phenotype ids and to attach display
/// names to results. [`OntologyGraph`] is the default implementation.
pub trait TermResolver {
    /// Returns the [`Term`] with the given id, if it exists
    fn resolve(&self, id: &TermId) -> Option<&Term>;

    /// Returns the display name of the term, if it exists
    fn display_name(&self, id: &TermId) -> Option<&str> {
        self.resolve(id).map(Term::name)
    }
}

#[cfg_attr(doc, aquamarine::aquamarine)]
/// `OntologyGraph` holds all [`Term`]s and their `is_a` relationships
///
/// Terms are stored in an id-indexed table. Parent and child edges are
/// stored as [`TermId`]s on each term, so the graph never contains
/// references between terms.
///
/// The graph is built once and is read-only afterwards. Together with an
/// [`AnnotationStore`](`crate::AnnotationStore`) it forms a
/// [`Snapshot`](`crate::Snapshot`) that all queries operate on.
///
/// ```mermaid
/// classDiagram
///     class SnapshotHandle {
///         load(Snapshot)
///         current() Arc~Snapshot~
///     }
///     class Snapshot {
///         OntologyGraph
///         AnnotationStore
///         information_content()
///     }
///     class Matcher {
///         rank_diagnoses() Vec~DiagnosisMatch~
///     }
///     class DifferentialPhenotypePredictor {
///         compute_differential() Vec~PhenotypeSuggestion~
///     }
///     SnapshotHandle --> Snapshot
///     DifferentialPhenotypePredictor --> SnapshotHandle
///     DifferentialPhenotypePredictor --> Matcher
///     Matcher ..> Snapshot
/// ```
///
/// # Examples
///
/// ```
/// use phenodiff::OntologyGraph;
///
/// let mut ontology = OntologyGraph::default();
/// let root = ontology.insert_term("HP:0000001", "All").unwrap();
/// let pheno = ontology.insert_term("HP:0000118", "Phenotypic abnormality").unwrap();
/// let nerve = ontology.insert_term("HP:0000707", "Abnormality of the nervous system").unwrap();
///
/// ontology.add_parent(&root, &pheno).unwrap();
/// ontology.add_parent(&pheno, &nerve).unwrap();
///
/// let ancestors = ontology.ancestors(&nerve);
/// assert_eq!(ancestors.len(), 3);
/// assert!(ancestors.contains(&root));
///
/// let unknown = "HP:9999999".try_into().unwrap();
/// assert!(ontology.term(&unknown).is_none());
/// assert!(ontology.ancestors(&unknown).is_empty());
/// ```
#[derive(Default, Clone)]
pub struct OntologyGraph {
    terms: Arena,
    alt_ids: HashMap<TermId, TermId>,
    cached: bool,
}

impl Debug for OntologyGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OntologyGraph with {} terms", self.terms.len())
    }
}

/// Public API of the `OntologyGraph`
impl OntologyGraph {
    /// Returns the number of terms in the graph
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns `true` if the graph does not contain any terms
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the primary [`TermId`] for `id`
    ///
    /// Alternative ids are mapped to the term they were merged into,
    /// primary ids map to themselves. Unknown ids return `None`.
    pub fn real_id<'a>(&'a self, id: &'a TermId) -> Option<&'a TermId> {
        if self.terms.contains(id) {
            Some(id)
        } else {
            self.alt_ids.get(id)
        }
    }

    /// Returns the [`Term`] with the given id
    ///
    /// Alternative ids are resolved to their primary term.
    /// If no such term is present, `None` is returned.
    pub fn term(&self, id: &TermId) -> Option<&Term> {
        self.real_id(id).and_then(|id| self.terms.get(id))
    }

    /// Returns the [`Term`] for an unparsed id string
    ///
    /// Malformed ids are treated like unknown ids.
    pub fn term_by_str(&self, id: &str) -> Option<&Term> {
        let id = TermId::try_from(id).ok()?;
        self.term(&id)
    }

    /// Returns `true` if the graph contains the term or an alternative id for it
    pub fn contains(&self, id: &TermId) -> bool {
        self.real_id(id).is_some()
    }

    /// Returns the ids of the term and all its direct and indirect parents
    ///
    /// The term itself is part of the result. For an alternative id, the
    /// result contains both `id` and the primary id of the term. Unknown ids
    /// return an empty group. The traversal keeps track of all visited terms
    /// and terminates even if the graph contains a cycle.
    pub fn ancestors(&self, id: &TermId) -> TermGroup {
        let Some(term) = self.term(id) else {
            trace!("No ancestors for unknown term {}", id);
            return TermGroup::new();
        };
        let mut res: TermGroup = if term.ancestors_cached() {
            let mut res = term.all_parents().clone();
            res.insert(term.id().clone());
            res
        } else {
            self.collect_ancestors(term.id()).into()
        };
        res.insert(id.clone());
        res
    }

    /// Returns the direct parents of the term, `None` for unknown ids
    pub fn parents(&self, id: &TermId) -> Option<&TermGroup> {
        self.term(id).map(Term::parents)
    }

    /// Returns the direct children of the term, `None` for unknown ids
    pub fn children(&self, id: &TermId) -> Option<&TermGroup> {
        self.term(id).map(Term::children)
    }

    /// Returns the union of the ancestor closures of all `ids`
    ///
    /// Unknown ids do not contribute to the result.
    pub fn ancestors_of<'a, I: IntoIterator<Item = &'a TermId>>(&self, ids: I) -> TermGroup {
        let mut res = TermGroup::new();
        for id in ids {
            for ancestor in &self.ancestors(id) {
                res.insert(ancestor.clone());
            }
        }
        res
    }

    /// Returns all terms that don't have a parent
    ///
    /// A well-formed ontology has exactly one root.
    pub fn roots(&self) -> Vec<&Term> {
        let mut roots: Vec<&Term> = self
            .terms
            .values()
            .filter(|term| term.parents().is_empty())
            .collect();
        roots.sort_by(|a, b| a.id().cmp(b.id()));
        roots
    }

    /// Returns an iterator of all [`Term`]s in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = &Term> {
        self.terms.values()
    }
}

/// Methods to build the `OntologyGraph`
///
/// Building happens once, before the graph is wrapped in a
/// [`Snapshot`](`crate::Snapshot`).
impl OntologyGraph {
    /// Creates and inserts a new term
    ///
    /// If the term already exists, it is kept unchanged and its id is returned.
    /// This method does not link the term to any parents.
    ///
    /// # Errors
    ///
    /// [`PhenoError::InvalidId`] if `id` is not of the form `<PREFIX>:<value>`
    pub fn insert_term(&mut self, id: &str, name: &str) -> PhenoResult<TermId> {
        let id = TermId::try_from(id)?;
        if self.terms.contains(&id) {
            debug!("Term {} is already present", id);
        } else {
            self.terms.insert(Term::new(id.clone(), name));
        }
        Ok(id)
    }

    /// Adds an `is_a` connection from `child_id` to `parent_id`
    ///
    /// Both the parent and the child record the connection. Adding a
    /// connection invalidates the ancestor cache.
    ///
    /// # Errors
    ///
    /// [`PhenoError::DoesNotExist`] if one of the terms is not present
    pub fn add_parent(&mut self, parent_id: &TermId, child_id: &TermId) -> PhenoResult<()> {
        let parent_id = self
            .real_id(parent_id)
            .ok_or(PhenoError::DoesNotExist)?
            .clone();
        let child_id = self
            .real_id(child_id)
            .ok_or(PhenoError::DoesNotExist)?
            .clone();

        if parent_id == child_id {
            warn!("Ignoring self-reference of {}", child_id);
            return Ok(());
        }

        self.terms
            .get_mut(&parent_id)
            .ok_or(PhenoError::DoesNotExist)?
            .add_child(child_id.clone());
        self.terms
            .get_mut(&child_id)
            .ok_or(PhenoError::DoesNotExist)?
            .add_parent(parent_id);

        if self.cached {
            self.clear_cache();
        }
        Ok(())
    }

    /// Registers `alt_id` as an alternative id of `primary_id`
    ///
    /// Lookups of `alt_id` return the primary term afterwards.
    ///
    /// # Errors
    ///
    /// - [`PhenoError::InvalidId`] if `alt_id` is malformed
    /// - [`PhenoError::DoesNotExist`] if `primary_id` is not present
    /// - [`PhenoError::InvalidInput`] if `alt_id` is itself a primary term
    ///   or already maps to a different term
    pub fn add_alt_id(&mut self, alt_id: &str, primary_id: &TermId) -> PhenoResult<()> {
        let alt_id = TermId::try_from(alt_id)?;
        if !self.terms.contains(primary_id) {
            return Err(PhenoError::DoesNotExist);
        }
        if self.terms.contains(&alt_id) {
            return Err(PhenoError::InvalidInput(format!(
                "{alt_id} is a primary term and can't be an alternative id"
            )));
        }
        match self.alt_ids.entry(alt_id) {
            Entry::Occupied(entry) if entry.get() != primary_id => {
                Err(PhenoError::InvalidInput(format!(
                    "{} is already an alternative id of {}",
                    entry.key(),
                    entry.get()
                )))
            }
            Entry::Occupied(_) => Ok(()),
            Entry::Vacant(entry) => {
                entry.insert(primary_id.clone());
                Ok(())
            }
        }
    }

    /// Caches the direct and indirect parents of every term
    ///
    /// This method should be called once all terms and connections are
    /// added. Afterwards [`OntologyGraph::ancestors`] is answered from the
    /// cache instead of traversing the graph.
    ///
    /// # Examples
    ///
    /// ```
    /// use phenodiff::OntologyGraph;
    ///
    /// let mut ontology = OntologyGraph::default();
    /// let root = ontology.insert_term("HP:1", "Root").unwrap();
    /// let foo = ontology.insert_term("HP:2", "Foo").unwrap();
    /// let bar = ontology.insert_term("HP:3", "Bar").unwrap();
    ///
    /// ontology.add_parent(&root, &foo).unwrap();
    /// ontology.add_parent(&foo, &bar).unwrap();
    ///
    /// // At this point #3 does not have cached info about grandparents
    /// assert!(ontology.term(&bar).unwrap().all_parents().is_empty());
    ///
    /// ontology.create_cache();
    /// assert!(ontology.term(&bar).unwrap().all_parents().contains(&root));
    /// ```
    pub fn create_cache(&mut self) {
        let closures: Vec<(TermId, TermGroup)> = self
            .terms
            .keys()
            .map(|id| {
                let mut closure = self.collect_ancestors(id);
                closure.remove(id);
                (id.clone(), closure.into())
            })
            .collect();

        for (id, closure) in closures {
            if let Some(term) = self.terms.get_mut(&id) {
                term.set_all_parents(closure);
            }
        }
        self.cached = true;
        debug!("Cached ancestors of {} terms", self.terms.len());
    }
}

/// Crate-only helper methods
impl OntologyGraph {
    /// Traverses the graph upwards, starting at `id`
    ///
    /// `id` must be a primary id. The result contains `id` itself.
    fn collect_ancestors(&self, id: &TermId) -> HashSet<TermId> {
        let mut visited: HashSet<TermId> = HashSet::new();
        visited.insert(id.clone());
        let mut front: Vec<&TermId> = vec![id];

        while let Some(current) = front.pop() {
            let Some(term) = self.terms.get(current) else {
                continue;
            };
            for parent in term.parents() {
                if parent == id {
                    warn!("Cycle detected: {} is its own ancestor", id);
                }
                if visited.insert(parent.clone()) {
                    front.push(parent);
                }
            }
        }
        visited
    }

    fn clear_cache(&mut self) {
        for term in self.terms.values_mut() {
            term.clear_all_parents();
        }
        self.cached = false;
    }
}

impl TermResolver for OntologyGraph {
    fn resolve(&self, id: &TermId) -> Option<&Term> {
        self.term(id)
    }
}

impl<'a> IntoIterator for &'a OntologyGraph {
    type Item = &'a Term;
    type IntoIter = std::collections::hash_map::Values<'a, TermId, Term>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.values()
    }
}
