//! Ranking of candidate diseases for a set of observed phenotypes
//!
//! The [`Matcher`] trait is the only contract the differential diagnosis
//! depends on. Any strategy that implements it can be plugged into the
//! [`DifferentialPhenotypePredictor`](`crate::DifferentialPhenotypePredictor`).
//!
//! `phenodiff` comes with three matchers:
//!
//! - [`OverlapMatcher`]: sums the annotation weights of the observed terms
//!   that are directly annotated to a disease
//! - [`InformationContentMatcher`]: sums the information content of all
//!   terms shared by the observed terms and a disease, including ancestors
//! - [`HypergeomMatcher`]: ranks diseases by the hypergeometric enrichment
//!   of shared terms

use tracing::debug;

use crate::aggregate::SumMap;
use crate::annotations::DiseaseId;
use crate::{DiagnosisMatch, OntologyGraph, PhenoError, PhenoResult, Snapshot, TermGroup};

mod hypergeom;
mod information_content;
mod overlap;

pub use hypergeom::HypergeomMatcher;
pub use information_content::InformationContentMatcher;
pub use overlap::OverlapMatcher;

/// Trait for ranking diseases against a set of observed phenotypes
///
/// Implementations must follow these rules:
///
/// - The result contains at most `limit` matches, sorted by score,
///   highest score first.
/// - Observed ids that are not part of the ontology are ignored. The
///   remaining ids still drive the ranking.
/// - An empty set of observed phenotypes returns an empty result.
/// - The result is deterministic for the same snapshot and input.
/// - A `limit` of `0` is rejected with [`PhenoError::InvalidLimit`].
pub trait Matcher {
    /// Ranks all diseases of the snapshot against the observed phenotypes
    ///
    /// # Errors
    ///
    /// [`PhenoError::InvalidLimit`] if `limit` is `0`. Implementations may
    /// return further errors if the ranking can't be calculated.
    fn rank_diagnoses(
        &self,
        snapshot: &Snapshot,
        observed: &TermGroup,
        limit: usize,
    ) -> PhenoResult<Vec<DiagnosisMatch>>;
}

impl<M: Matcher + ?Sized> Matcher for Box<M> {
    fn rank_diagnoses(
        &self,
        snapshot: &Snapshot,
        observed: &TermGroup,
        limit: usize,
    ) -> PhenoResult<Vec<DiagnosisMatch>> {
        (**self).rank_diagnoses(snapshot, observed, limit)
    }
}

/// Returns `limit` unchanged or [`PhenoError::InvalidLimit`] if it is `0`
pub(crate) fn check_limit(limit: usize, name: &'static str) -> PhenoResult<usize> {
    if limit == 0 {
        Err(PhenoError::InvalidLimit(name))
    } else {
        Ok(limit)
    }
}

/// Returns the primary ids of all observed terms that are part of the ontology
///
/// An alternative id and its primary id are returned only once.
pub(crate) fn known_terms(ontology: &OntologyGraph, observed: &TermGroup) -> TermGroup {
    observed
        .iter()
        .filter_map(|id| {
            let real_id = ontology.real_id(id);
            if real_id.is_none() {
                debug!("Ignoring unknown term {}", id);
            }
            real_id.cloned()
        })
        .collect()
}

/// Turns disease scores into sorted and truncated [`DiagnosisMatch`]es
///
/// Diseases without a positive score are not part of the result.
pub(crate) fn ranked_matches(
    snapshot: &Snapshot,
    scores: &SumMap<&DiseaseId>,
    limit: usize,
) -> Vec<DiagnosisMatch> {
    let mut matches: Vec<DiagnosisMatch> = scores
        .iter()
        .filter(|(_, score)| **score > 0.0)
        .map(|(id, score)| {
            let mut diagnosis = DiagnosisMatch::new((*id).clone(), *score);
            diagnosis.set_name(snapshot.annotations().disease_name(id));
            diagnosis
        })
        .collect();
    DiagnosisMatch::sort(&mut matches);
    matches.truncate(limit);
    matches
}
