use tracing::trace;

use crate::aggregate::SumMap;
use crate::matcher::{check_limit, known_terms, ranked_matches, Matcher};
use crate::{DiagnosisMatch, PhenoResult, Snapshot, TermGroup};

/// Ranks diseases by the information content of shared terms
///
/// The observed terms and each disease's annotations are extended by all
/// their ancestors. The score of a disease is the sum of the
/// [`InformationContent`](`crate::term::InformationContent`) of every term
/// in the intersection of both sets. Shared specific terms add a lot to
/// the score, while shared general terms close to the root add little.
///
/// This is the default matcher of the
/// [`DifferentialPhenotypePredictor`](`crate::DifferentialPhenotypePredictor`).
#[derive(Debug, Default, Clone, Copy)]
pub struct InformationContentMatcher {}

impl Matcher for InformationContentMatcher {
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

        let mut scores = SumMap::new();
        for disease in snapshot.annotations().diseases() {
            let Some(terms) = snapshot.disease_terms(disease.id()) else {
                continue;
            };
            let score: f64 = (&query & terms)
                .iter()
                .map(|term| snapshot.information_content(term).disease())
                .sum();
            trace!("{}: {}", disease.id(), score);
            scores.add_to(disease.id(), score);
        }
        Ok(ranked_matches(snapshot, &scores, limit))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::fixtures;
    use crate::matcher::test::check_contract;

    #[test]
    fn contract() {
        check_contract(&InformationContentMatcher::default());
    }

    #[test]
    fn best_match_shares_most_specific_terms() {
        let snapshot = fixtures::snapshot();
        let observed = fixtures::group(&["HP:0012285", "HP:0000007"]);
        let matches = InformationContentMatcher::default()
            .rank_diagnoses(&snapshot, &observed, 10)
            .unwrap();
        assert_eq!(matches[0].id().as_str(), "OMIM:1");
        assert_eq!(matches[0].name(), Some("Disease 1"));
    }

    #[test]
    fn descendants_match_via_ancestors() {
        let snapshot = fixtures::snapshot();
        // HP:0012285 is annotated to OMIM:1 and OMIM:2 and is a descendant of HP:0012638
        let observed = fixtures::group(&["HP:0012638"]);
        let matches = InformationContentMatcher::default()
            .rank_diagnoses(&snapshot, &observed, 10)
            .unwrap();
        let ids: Vec<&str> = matches.iter().map(|m| m.id().as_str()).collect();
        assert!(ids.contains(&"OMIM:1"));
        assert!(ids.contains(&"OMIM:2"));
        assert!(!ids.contains(&"OMIM:4"));
    }

    #[test]
    fn root_alone_scores_nothing() {
        let snapshot = fixtures::snapshot();
        let observed = fixtures::group(&["HP:0000001"]);
        assert!(InformationContentMatcher::default()
            .rank_diagnoses(&snapshot, &observed, 10)
            .unwrap()
            .is_empty());
    }
}
