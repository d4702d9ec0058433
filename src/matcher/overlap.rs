use tracing::trace;

use crate::aggregate::SumMap;
use crate::matcher::{check_limit, known_terms, ranked_matches, Matcher};
use crate::{DiagnosisMatch, PhenoResult, Snapshot, TermGroup};

/// Ranks diseases by the summed weights of directly shared phenotypes
///
/// Only exact annotations count. An observed term does not match a
/// disease that is annotated to one of its ancestors or descendants.
/// Use [`InformationContentMatcher`](`crate::InformationContentMatcher`)
/// to take the hierarchy into account.
///
/// # Examples
///
/// ```
/// use phenodiff::{AnnotationStore, OntologyGraph, Snapshot, TermGroup, TermId};
/// use phenodiff::matcher::{Matcher, OverlapMatcher};
///
/// let mut ontology = OntologyGraph::default();
/// let root = ontology.insert_term("HP:0000001", "All").unwrap();
/// let child = ontology.insert_term("HP:0000118", "Phenotypic abnormality").unwrap();
/// ontology.add_parent(&root, &child).unwrap();
///
/// let mut annotations = AnnotationStore::default();
/// annotations.annotate_weighted("OMIM:1", "Foo", "HP:0000118", 0.5).unwrap();
/// annotations.annotate("OMIM:2", "Bar", "HP:0000118").unwrap();
/// let snapshot = Snapshot::new(ontology, annotations).unwrap();
///
/// let observed: TermGroup = [child].into_iter().collect();
/// let matches = OverlapMatcher::default().rank_diagnoses(&snapshot, &observed, 5).unwrap();
///
/// assert_eq!(matches.len(), 2);
/// assert_eq!(matches[0].id().as_str(), "OMIM:2");
/// assert_eq!(matches[1].score(), 0.5);
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct OverlapMatcher {}

impl Matcher for OverlapMatcher {
    fn rank_diagnoses(
        &self,
        snapshot: &Snapshot,
        observed: &TermGroup,
        limit: usize,
    ) -> PhenoResult<Vec<DiagnosisMatch>> {
        let limit = check_limit(limit, "match limit")?;
        let annotations = snapshot.annotations();

        let mut scores = SumMap::new();
        for term in &known_terms(snapshot.ontology(), observed) {
            for disease_id in annotations.diseases_for_phenotype(term) {
                let weight = annotations
                    .disease(disease_id)
                    .and_then(|disease| disease.weight(term))
                    .unwrap_or_default();
                trace!("{} matches {} with weight {}", term, disease_id, weight);
                scores.add_to(disease_id, weight);
            }
        }
        Ok(ranked_matches(snapshot, &scores, limit))
    }
}
