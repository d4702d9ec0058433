use statrs::distribution::{DiscreteCDF, Hypergeometric};
use tracing::{debug, trace};

use crate::aggregate::SumMap;
use crate::matcher::{check_limit, known_terms, ranked_matches, Matcher};
use crate::{DiagnosisMatch, PhenoError, PhenoResult, Snapshot, TermGroup};

/// Ranks diseases by the enrichment of shared terms
///
/// The observed terms and their ancestors are treated as a sample drawn
/// from all terms of the ontology. For each disease, the hypergeometric
/// test gives the probability to draw at least as many of the disease's
/// terms (including ancestors) by chance. The score is `-log10(p)`, so
/// unlikely overlaps score high.
///
/// The hypergeometric distribution is parametrized as:
///
/// - population: number of terms in the ontology
/// - successes: number of terms associated to the disease
/// - draws: number of observed terms
///
/// # Examples
///
/// ```
/// use phenodiff::{AnnotationStore, OntologyGraph, Snapshot, TermGroup};
/// use phenodiff::matcher::{HypergeomMatcher, Matcher};
///
/// let mut ontology = OntologyGraph::default();
/// let root = ontology.insert_term("HP:0000001", "All").unwrap();
/// let mut leaves = Vec::new();
/// for n in 2..10 {
///     let leaf = ontology.insert_term(&format!("HP:{n}"), "Leaf").unwrap();
///     ontology.add_parent(&root, &leaf).unwrap();
///     leaves.push(leaf);
/// }
///
/// let mut annotations = AnnotationStore::default();
/// annotations.annotate("OMIM:1", "Foo", "HP:2").unwrap();
/// annotations.annotate("OMIM:1", "Foo", "HP:3").unwrap();
/// annotations.annotate("OMIM:2", "Bar", "HP:4").unwrap();
/// let snapshot = Snapshot::new(ontology, annotations).unwrap();
///
/// let observed: TermGroup = leaves[..2].iter().cloned().collect();
/// let matches = HypergeomMatcher::default().rank_diagnoses(&snapshot, &observed, 5).unwrap();
///
/// assert_eq!(matches[0].id().as_str(), "OMIM:1");
/// assert!(matches[0].score() > 0.0);
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct HypergeomMatcher {}

impl Matcher for HypergeomMatcher {
    fn rank_diagnoses(
        &self,
        snapshot: &Snapshot,
        observed: &TermGroup,
        limit: usize,
    ) -> PhenoResult<Vec<DiagnosisMatch>> {
        let limit = check_limit(limit, "match limit")?;
        let ontology = snapshot.ontology();
        let query = ontology.ancestors_of(&known_terms(ontology, observed));
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let population = to_u64(ontology.len())?;
        let draws = to_u64(query.len())?;

        let mut scores = SumMap::new();
        for disease in snapshot.annotations().diseases() {
            let Some(terms) = snapshot.disease_terms(disease.id()) else {
                continue;
            };
            let observed_successes = to_u64((&query & terms).len())?;
            if observed_successes == 0 {
                trace!("Skipping {}", disease.id());
                continue;
            }
            let successes = to_u64(terms.len())?;
            let hyper = Hypergeometric::new(population, successes, draws)
                .map_err(|err| PhenoError::StatsError(err.to_string()))?;
            // sf(k) is "more than k", but we test for "k or more"
            let pvalue = hyper.sf(observed_successes - 1).max(f64::MIN_POSITIVE);
            debug!(
                "Disease:{}\tPopulation: {}, Successes: {}, Draws: {}, Observed: {}, P: {}",
                disease.id(),
                population,
                successes,
                draws,
                observed_successes,
                pvalue
            );
            scores.add_to(disease.id(), -pvalue.log10());
        }
        Ok(ranked_matches(snapshot, &scores, limit))
    }
}

fn to_u64(n: usize) -> PhenoResult<u64> {
    u64::try_from(n).map_err(|_| PhenoError::StatsError(format!("{n} does not fit into u64")))
}
