use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use tracing::{debug, trace};

use super::disease::{Disease, DiseaseId, DEFAULT_WEIGHT};
use crate::{OntologyGraph, PhenoError, PhenoResult, TermId};

/// Read-only index of diseases and their annotated phenotypes
///
/// The store keeps two indices that are updated together:
/// disease -> phenotypes (with weights) and phenotype -> diseases.
///
/// Annotations are stored as given. The store does not know about the
/// term hierarchy and does not propagate annotations to parent terms.
/// [`Snapshot::new`](`crate::Snapshot::new`) replaces alternative term ids
/// by their primary ids.
///
/// # Examples
///
/// ```
/// use phenodiff::{AnnotationStore, DiseaseId, TermId};
///
/// let mut store = AnnotationStore::default();
/// store.annotate("OMIM:154700", "Marfan syndrome", "HP:0001166").unwrap();
/// store.annotate_weighted("OMIM:154700", "Marfan syndrome", "HP:0001519", 0.8).unwrap();
///
/// let marfan = DiseaseId::try_from("OMIM:154700").unwrap();
/// let phenotypes = store.phenotypes_for_disease(&marfan);
/// assert_eq!(phenotypes.len(), 2);
/// assert_eq!(phenotypes[&TermId::try_from("HP:0001166").unwrap()], 1.0);
///
/// let arachnodactyly = TermId::try_from("HP:0001166").unwrap();
/// assert!(store.diseases_for_phenotype(&arachnodactyly).any(|id| id == &marfan));
///
/// // unknown ids are not an error
/// let unknown = DiseaseId::try_from("OMIM:1").unwrap();
/// assert!(store.phenotypes_for_disease(&unknown).is_empty());
/// ```
#[derive(Debug, Default, Clone)]
pub struct AnnotationStore {
    diseases: HashMap<DiseaseId, Disease>,
    phenotype_index: HashMap<TermId, HashSet<DiseaseId>>,
}

/// Public API of the `AnnotationStore`
impl AnnotationStore {
    /// Returns the number of diseases
    pub fn len(&self) -> usize {
        self.diseases.len()
    }

    /// Returns `true` if the store does not contain any disease
    pub fn is_empty(&self) -> bool {
        self.diseases.is_empty()
    }

    /// Returns the [`Disease`] of the provided [`DiseaseId`]
    ///
    /// If no such disease is present, `None` is returned
    pub fn disease(&self, id: &DiseaseId) -> Option<&Disease> {
        self.diseases.get(id)
    }

    /// Returns the name of the disease, if present
    pub fn disease_name(&self, id: &DiseaseId) -> Option<&str> {
        self.disease(id).map(Disease::name)
    }

    /// Returns an Iterator of all [`Disease`]s
    pub fn diseases(&self) -> std::collections::hash_map::Values<'_, DiseaseId, Disease> {
        self.diseases.values()
    }

    /// Returns all phenotypes of the disease and their weights
    ///
    /// Unknown diseases, and diseases without annotations, return an empty map.
    pub fn phenotypes_for_disease(&self, id: &DiseaseId) -> HashMap<&TermId, f64> {
        match self.diseases.get(id) {
            Some(disease) => disease.phenotypes().collect(),
            None => {
                trace!("No annotations for unknown disease {}", id);
                HashMap::new()
            }
        }
    }

    /// Returns all diseases that are directly annotated to the phenotype
    ///
    /// Unknown phenotypes return an empty iterator.
    pub fn diseases_for_phenotype<'a>(
        &'a self,
        phenotype: &TermId,
    ) -> impl Iterator<Item = &'a DiseaseId> + 'a {
        self.phenotype_index
            .get(phenotype)
            .into_iter()
            .flat_map(HashSet::iter)
    }

    /// Returns the number of diseases directly annotated to the phenotype
    pub fn disease_count(&self, phenotype: &TermId) -> usize {
        self.phenotype_index.get(phenotype).map_or(0, HashSet::len)
    }
}

/// Methods to add annotations
///
/// Building happens once, before the store is wrapped in a
/// [`Snapshot`](`crate::Snapshot`).
impl AnnotationStore {
    /// Adds a disease without annotations and returns its [`DiseaseId`]
    ///
    /// If the disease already exists, it is not added again.
    ///
    /// # Errors
    ///
    /// [`PhenoError::InvalidId`] if the id is malformed
    pub fn add_disease(&mut self, id: &str, name: &str) -> PhenoResult<DiseaseId> {
        let id = DiseaseId::try_from(id)?;
        if let Entry::Vacant(entry) = self.diseases.entry(id.clone()) {
            entry.insert(Disease::new(id.clone(), name));
        }
        Ok(id)
    }

    /// Annotates the phenotype to the disease with [`DEFAULT_WEIGHT`]
    ///
    /// The disease is created if it does not exist yet.
    ///
    /// # Errors
    ///
    /// [`PhenoError::InvalidId`] if the disease or phenotype id is malformed
    pub fn annotate(&mut self, disease: &str, name: &str, phenotype: &str) -> PhenoResult<()> {
        self.annotate_weighted(disease, name, phenotype, DEFAULT_WEIGHT)
    }

    /// Annotates the phenotype to the disease with the given weight
    ///
    /// The disease is created if it does not exist yet. Annotating the same
    /// phenotype again replaces the weight.
    ///
    /// # Errors
    ///
    /// - [`PhenoError::InvalidId`] if the disease or phenotype id is malformed
    /// - [`PhenoError::InvalidInput`] if the weight is negative or not finite
    pub fn annotate_weighted(
        &mut self,
        disease: &str,
        name: &str,
        phenotype: &str,
        weight: f64,
    ) -> PhenoResult<()> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(PhenoError::InvalidInput(format!(
                "invalid weight {weight} for {disease} - {phenotype}"
            )));
        }
        let phenotype = TermId::try_from(phenotype)?;
        let disease_id = self.add_disease(disease, name)?;

        self.phenotype_index
            .entry(phenotype.clone())
            .or_default()
            .insert(disease_id.clone());

        self.diseases
            .get_mut(&disease_id)
            .ok_or(PhenoError::DoesNotExist)?
            .add_phenotype(phenotype, weight);
        Ok(())
    }
}

/// Crate-only helper methods
impl AnnotationStore {
    /// Rebuilds the store with every phenotype mapped to its primary id
    ///
    /// Phenotypes unknown to the ontology are kept unchanged. If a disease is
    /// annotated to a primary id and one of its alternative ids, the larger
    /// weight is kept.
    pub(crate) fn with_primary_ids(self, ontology: &OntologyGraph) -> Self {
        let mut store = AnnotationStore::default();
        let mut remapped = 0usize;
        for disease in self.diseases.into_values() {
            let mut primary = Disease::new(disease.id().clone(), disease.name());
            for (phenotype, weight) in disease.phenotypes() {
                let id = match ontology.real_id(phenotype) {
                    Some(real_id) if real_id != phenotype => {
                        trace!(
                            "{}: {} is an alternative id of {}",
                            disease.id(),
                            phenotype,
                            real_id
                        );
                        remapped += 1;
                        real_id.clone()
                    }
                    _ => phenotype.clone(),
                };
                let weight = primary.weight(&id).map_or(weight, |known| known.max(weight));
                store
                    .phenotype_index
                    .entry(id.clone())
                    .or_default()
                    .insert(primary.id().clone());
                primary.add_phenotype(id, weight);
            }
            store.diseases.insert(primary.id().clone(), primary);
        }
        if remapped > 0 {
            debug!("Mapped {} annotations to primary term ids", remapped);
        }
        store
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn term(s: &str) -> TermId {
        TermId::try_from(s).unwrap()
    }

    fn disease(s: &str) -> DiseaseId {
        DiseaseId::try_from(s).unwrap()
    }

    #[test]
    fn forward_and_reverse_index() {
        let mut store = AnnotationStore::default();
        store.annotate("OMIM:1", "One", "HP:1").unwrap();
        store.annotate("OMIM:1", "One", "HP:2").unwrap();
        store.annotate("OMIM:2", "Two", "HP:2").unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.phenotypes_for_disease(&disease("OMIM:1")).len(), 2);
        assert_eq!(store.phenotypes_for_disease(&disease("OMIM:2")).len(), 1);

        let mut diseases: Vec<&DiseaseId> = store.diseases_for_phenotype(&term("HP:2")).collect();
        diseases.sort();
        assert_eq!(diseases, vec![&disease("OMIM:1"), &disease("OMIM:2")]);
        assert_eq!(store.disease_count(&term("HP:1")), 1);
    }

    #[test]
    fn unknown_ids_are_empty() {
        let store = AnnotationStore::default();
        assert!(store.phenotypes_for_disease(&disease("OMIM:1")).is_empty());
        assert_eq!(store.diseases_for_phenotype(&term("HP:1")).count(), 0);
        assert_eq!(store.disease_count(&term("HP:1")), 0);
        assert!(store.disease_name(&disease("OMIM:1")).is_none());
    }

    #[test]
    fn disease_without_annotations() {
        let mut store = AnnotationStore::default();
        let id = store.add_disease("OMIM:1", "Lonely").unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.disease_name(&id), Some("Lonely"));
        assert!(store.phenotypes_for_disease(&id).is_empty());
    }

    #[test]
    fn weights() {
        let mut store = AnnotationStore::default();
        store.annotate("OMIM:1", "One", "HP:1").unwrap();
        store.annotate_weighted("OMIM:1", "One", "HP:2", 0.25).unwrap();

        let phenotypes = store.phenotypes_for_disease(&disease("OMIM:1"));
        assert_eq!(phenotypes[&term("HP:1")], DEFAULT_WEIGHT);
        assert_eq!(phenotypes[&term("HP:2")], 0.25);

        assert!(store.annotate_weighted("OMIM:1", "One", "HP:3", -1.0).is_err());
        assert!(store.annotate_weighted("OMIM:1", "One", "HP:3", f64::NAN).is_err());
        assert_eq!(store.phenotypes_for_disease(&disease("OMIM:1")).len(), 2);
    }

    #[test]
    fn invalid_ids() {
        let mut store = AnnotationStore::default();
        assert!(matches!(
            store.annotate("1", "One", "HP:1"),
            Err(PhenoError::InvalidId(_))
        ));
        assert!(matches!(
            store.annotate("OMIM:1", "One", "HP"),
            Err(PhenoError::InvalidId(_))
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn alternative_ids_are_mapped_to_primary_ids() {
        let mut ontology = OntologyGraph::default();
        let primary = ontology.insert_term("HP:2", "Primary").unwrap();
        ontology.insert_term("HP:3", "Other").unwrap();
        ontology.add_alt_id("HP:99", &primary).unwrap();

        let mut store = AnnotationStore::default();
        store.annotate_weighted("OMIM:1", "One", "HP:99", 0.5).unwrap();
        store.annotate("OMIM:1", "One", "HP:3").unwrap();
        store.annotate_weighted("OMIM:2", "Two", "HP:99", 0.25).unwrap();
        store.annotate_weighted("OMIM:2", "Two", "HP:2", 0.75).unwrap();
        store.annotate("OMIM:3", "Three", "HP:7").unwrap();

        let store = store.with_primary_ids(&ontology);
        assert_eq!(store.len(), 3);
        assert_eq!(store.disease_name(&disease("OMIM:2")), Some("Two"));

        let one = store.phenotypes_for_disease(&disease("OMIM:1"));
        assert_eq!(one.len(), 2);
        assert_eq!(one[&term("HP:2")], 0.5);
        assert!(!one.contains_key(&term("HP:99")));

        let two = store.phenotypes_for_disease(&disease("OMIM:2"));
        assert_eq!(two.len(), 1);
        assert_eq!(two[&term("HP:2")], 0.75);

        assert_eq!(store.disease_count(&term("HP:2")), 2);
        assert_eq!(store.disease_count(&term("HP:99")), 0);
        // terms outside of the ontology are kept
        assert_eq!(store.disease_count(&term("HP:7")), 1);
    }
}
