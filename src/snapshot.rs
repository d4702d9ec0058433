//! A consistent pairing of [`OntologyGraph`] and [`AnnotationStore`]
//!
//! All queries run against exactly one [`Snapshot`]. The [`SnapshotHandle`]
//! holds the current snapshot and replaces it as a whole, so a running
//! query never observes a partially updated ontology or annotation set.
use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::aggregate::CounterMap;
use crate::annotations::DiseaseId;
use crate::term::InformationContent;
use crate::{AnnotationStore, OntologyGraph, PhenoError, PhenoResult, TermGroup, TermId};

/// Read-only data that all queries operate on
///
/// Constructing a snapshot caches the ancestors of every term and
/// derives two things from the annotations:
///
/// - the ancestor closure of each disease's phenotypes
/// - the [`InformationContent`] of every term, based on the fraction of
///   diseases annotated to the term or one of its descendants
///
/// # Examples
///
/// ```
/// use phenodiff::{AnnotationStore, OntologyGraph, Snapshot, TermId};
///
/// let mut ontology = OntologyGraph::default();
/// let root = ontology.insert_term("HP:0000001", "All").unwrap();
/// let child = ontology.insert_term("HP:0000118", "Phenotypic abnormality").unwrap();
/// ontology.add_parent(&root, &child).unwrap();
///
/// let mut annotations = AnnotationStore::default();
/// annotations.annotate("OMIM:1", "Foo", "HP:0000118").unwrap();
/// annotations.annotate("OMIM:2", "Bar", "HP:0000001").unwrap();
///
/// let snapshot = Snapshot::new(ontology, annotations).unwrap();
///
/// // both diseases reach the root term
/// assert_eq!(snapshot.information_content(&root).disease(), 0.0);
/// // only one of two diseases is annotated to the child term
/// assert!((snapshot.information_content(&child).disease() - 2f64.ln()).abs() < 1e-12);
/// ```
#[derive(Debug)]
pub struct Snapshot {
    ontology: OntologyGraph,
    annotations: AnnotationStore,
    disease_terms: HashMap<DiseaseId, TermGroup>,
    information_content: HashMap<TermId, InformationContent>,
}

impl Snapshot {
    /// Builds a new snapshot from a fully built ontology and annotation store
    ///
    /// Annotations to alternative term ids are moved to the primary term.
    /// Annotations to terms that are not part of the ontology are kept in the
    /// store, but do not contribute to ancestor closures or information content.
    ///
    /// # Errors
    ///
    /// [`PhenoError::InvalidInput`] if the information content can't be calculated
    pub fn new(mut ontology: OntologyGraph, annotations: AnnotationStore) -> PhenoResult<Self> {
        ontology.create_cache();
        let annotations = annotations.with_primary_ids(&ontology);

        let mut unknown_terms = 0usize;
        let mut disease_terms = HashMap::with_capacity(annotations.len());
        for disease in annotations.diseases() {
            let mut terms = TermGroup::new();
            for (phenotype, _) in disease.phenotypes() {
                let ancestors = ontology.ancestors(phenotype);
                if ancestors.is_empty() {
                    unknown_terms += 1;
                }
                for ancestor in &ancestors {
                    terms.insert(ancestor.clone());
                }
            }
            disease_terms.insert(disease.id().clone(), terms);
        }
        if unknown_terms > 0 {
            warn!(
                "{} annotations refer to terms that are not in the ontology",
                unknown_terms
            );
        }

        let mut counts: CounterMap<&TermId> = CounterMap::new();
        for terms in disease_terms.values() {
            for term in terms {
                counts.add_to(term);
            }
        }

        let n_diseases = annotations.len();
        let mut information_content = HashMap::with_capacity(ontology.len());
        for term in &ontology {
            let mut ic = InformationContent::default();
            ic.set_disease(n_diseases, counts.get(term.id()))?;
            information_content.insert(term.id().clone(), ic);
        }

        debug!(
            "Built snapshot with {} terms and {} diseases",
            ontology.len(),
            n_diseases
        );
        Ok(Self {
            ontology,
            annotations,
            disease_terms,
            information_content,
        })
    }

    /// Returns the [`OntologyGraph`]
    pub fn ontology(&self) -> &OntologyGraph {
        &self.ontology
    }

    /// Returns the [`AnnotationStore`]
    pub fn annotations(&self) -> &AnnotationStore {
        &self.annotations
    }

    /// Returns the [`InformationContent`] of the term
    ///
    /// Unknown terms have an information content of `0`.
    pub fn information_content(&self, id: &TermId) -> InformationContent {
        self.ontology
            .real_id(id)
            .and_then(|id| self.information_content.get(id))
            .copied()
            .unwrap_or_default()
    }

    /// Returns the annotated phenotypes of the disease and all their ancestors
    ///
    /// Returns `None` for unknown diseases.
    pub fn disease_terms(&self, id: &DiseaseId) -> Option<&TermGroup> {
        self.disease_terms.get(id)
    }
}

/// Holds the currently active [`Snapshot`]
///
/// Queries call [`SnapshotHandle::current`] once and keep the returned
/// `Arc` for their whole lifetime. [`SnapshotHandle::load`] replaces the
/// snapshot for all subsequent queries, while running queries finish on
/// the snapshot they started with.
///
/// # Examples
///
/// ```
/// use phenodiff::{AnnotationStore, OntologyGraph, PhenoError, Snapshot, SnapshotHandle};
///
/// let handle = SnapshotHandle::new();
/// assert_eq!(handle.current().unwrap_err(), PhenoError::DataUnavailable);
///
/// let snapshot = Snapshot::new(OntologyGraph::default(), AnnotationStore::default()).unwrap();
/// handle.load(snapshot);
/// assert!(handle.current().is_ok());
/// ```
#[derive(Debug, Default)]
pub struct SnapshotHandle {
    inner: RwLock<Option<Arc<Snapshot>>>,
}

impl SnapshotHandle {
    /// Constructs a new handle without any data
    pub fn new() -> Self {
        Self::default()
    }

    /// Constructs a new handle that holds `snapshot`
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            inner: RwLock::new(Some(Arc::new(snapshot))),
        }
    }

    /// Replaces the current snapshot and returns the previous one
    pub fn load(&self, snapshot: Snapshot) -> Option<Arc<Snapshot>> {
        let snapshot = Arc::new(snapshot);
        let previous = self.inner.write().replace(snapshot);
        info!("Loaded new snapshot");
        previous
    }

    /// Removes the current snapshot and returns it
    ///
    /// Subsequent queries fail with [`PhenoError::DataUnavailable`] until
    /// a new snapshot is loaded.
    pub fn unload(&self) -> Option<Arc<Snapshot>> {
        self.inner.write().take()
    }

    /// Returns `true` if a snapshot is loaded
    pub fn is_loaded(&self) -> bool {
        self.inner.read().is_some()
    }

    /// Returns the current snapshot
    ///
    /// # Errors
    ///
    /// [`PhenoError::DataUnavailable`] if no snapshot is loaded
    pub fn current(&self) -> PhenoResult<Arc<Snapshot>> {
        self.inner
            .read()
            .as_ref()
            .map(Arc::clone)
            .ok_or(PhenoError::DataUnavailable)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::fixtures;

    fn term(s: &str) -> TermId {
        TermId::try_from(s).unwrap()
    }

    #[test]
    fn disease_terms_contain_ancestors() {
        let snapshot = fixtures::snapshot();
        let terms = snapshot
            .disease_terms(&DiseaseId::try_from("OMIM:1").unwrap())
            .unwrap();
        assert!(terms.contains(&term("HP:0000001")));
        assert!(terms.contains(&term("HP:0000118")));
        assert!(snapshot
            .disease_terms(&DiseaseId::try_from("OMIM:999").unwrap())
            .is_none());
    }

    #[test]
    fn information_content() {
        let snapshot = fixtures::snapshot();
        // every annotated disease reaches the root
        assert_eq!(snapshot.information_content(&term("HP:0000001")).disease(), 0.0);
        // unknown terms have no information content
        assert_eq!(snapshot.information_content(&term("HP:9999999")).disease(), 0.0);

        let root = snapshot.information_content(&term("HP:0000118")).disease();
        let leaf = snapshot.information_content(&term("HP:0012285")).disease();
        assert!(leaf > root);
    }

    #[test]
    fn unknown_annotation_terms_are_ignored() {
        let mut annotations = AnnotationStore::default();
        annotations.annotate("OMIM:1", "Foo", "HP:0000118").unwrap();
        annotations.annotate("OMIM:1", "Foo", "HP:7777777").unwrap();
        let snapshot = Snapshot::new(fixtures::ontology(), annotations).unwrap();

        let terms = snapshot
            .disease_terms(&DiseaseId::try_from("OMIM:1").unwrap())
            .unwrap();
        assert_eq!(terms.len(), 2);
        assert!(!terms.contains(&term("HP:7777777")));
    }

    #[test]
    fn annotations_use_primary_ids() {
        let mut ontology = fixtures::ontology();
        ontology.add_alt_id("HP:0008888", &term("HP:0012648")).unwrap();
        let mut annotations = AnnotationStore::default();
        annotations.annotate("OMIM:1", "Foo", "HP:0008888").unwrap();
        let snapshot = Snapshot::new(ontology, annotations).unwrap();

        let disease = DiseaseId::try_from("OMIM:1").unwrap();
        let phenotypes = snapshot.annotations().phenotypes_for_disease(&disease);
        assert_eq!(phenotypes.len(), 1);
        assert!(phenotypes.contains_key(&term("HP:0012648")));
        assert!(snapshot
            .disease_terms(&disease)
            .unwrap()
            .contains(&term("HP:0012648")));
        assert_eq!(
            snapshot
                .annotations()
                .diseases_for_phenotype(&term("HP:0012648"))
                .count(),
            1
        );
    }

    #[test]
    fn swap_snapshots() {
        let handle = SnapshotHandle::new();
        assert!(!handle.is_loaded());
        assert_eq!(handle.current().unwrap_err(), PhenoError::DataUnavailable);

        assert!(handle.load(fixtures::snapshot()).is_none());
        let first = handle.current().unwrap();
        assert_eq!(first.annotations().len(), fixtures::snapshot().annotations().len());

        let empty = Snapshot::new(OntologyGraph::default(), AnnotationStore::default()).unwrap();
        let previous = handle.load(empty).unwrap();
        assert!(Arc::ptr_eq(&first, &previous));

        // the old snapshot is still fully usable by whoever holds it
        assert!(!first.ontology().is_empty());
        assert!(handle.current().unwrap().ontology().is_empty());

        assert!(handle.unload().is_some());
        assert_eq!(handle.current().unwrap_err(), PhenoError::DataUnavailable);
    }
}
