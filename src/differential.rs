//! Phenotypes that help to tell the top ranked diagnoses apart
//!
//! The [`DifferentialPhenotypePredictor`] ranks diseases with a
//! [`Matcher`] and then looks at all phenotypes of the best matches that
//! were not observed yet. Phenotypes that occur in only few of the matches
//! are the most informative ones: confirming or excluding them narrows
//! down the list of candidate diagnoses.
//!
//! # Scoring
//!
//! For every match `m` with score `s` and every phenotype `p` annotated to
//! the disease of `m`, but not part of the observed phenotypes:
//!
//! - `cumulative[p] += s`
//! - `support[p] += 1`
//!
//! The score of `p` is `cumulative[p] / support[p]²`.
//!
//! If even the least supported phenotype is shared by more than half of
//! all matches (`min(support) > matches / 2`), none of the phenotypes is
//! informative and the result is empty. With a single match this is always
//! the case.
use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::aggregate::{CounterMap, SumMap};
use crate::matcher::{check_limit, InformationContentMatcher, Matcher};
use crate::{
    f64_from_usize, OntologyGraph, PhenoResult, PhenotypeSuggestion, Snapshot, SnapshotHandle,
    TermGroup, TermId, TermResolver, DEFAULT_MATCH_LIMIT, DEFAULT_RESULT_LIMIT,
};

/// Limits used by [`DifferentialPhenotypePredictor::differential`]
///
/// # Examples
///
/// ```
/// use phenodiff::PredictorConfig;
///
/// let config = PredictorConfig::default()
///     .with_match_limit(50)
///     .with_result_limit(None);
///
/// assert_eq!(config.match_limit(), 50);
/// assert_eq!(config.result_limit(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PredictorConfig {
    match_limit: usize,
    result_limit: Option<usize>,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            match_limit: DEFAULT_MATCH_LIMIT,
            result_limit: Some(DEFAULT_RESULT_LIMIT),
        }
    }
}

impl PredictorConfig {
    /// Sets the number of diagnoses requested from the [`Matcher`]
    #[must_use]
    pub fn with_match_limit(mut self, match_limit: usize) -> Self {
        self.match_limit = match_limit;
        self
    }

    /// Sets the maximum number of suggestions, `None` for no limit
    #[must_use]
    pub fn with_result_limit(mut self, result_limit: Option<usize>) -> Self {
        self.result_limit = result_limit;
        self
    }

    /// Number of diagnoses requested from the [`Matcher`]
    pub fn match_limit(&self) -> usize {
        self.match_limit
    }

    /// Maximum number of suggestions, `None` if unlimited
    pub fn result_limit(&self) -> Option<usize> {
        self.result_limit
    }
}

/// Phenotypes recorded for a patient, as provided by the caller
///
/// Contains standardized term ids and free-text descriptions. Free text
/// is carried along for context but never used for scoring.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ObservedPhenotypes {
    ids: Vec<String>,
    free_text: Vec<String>,
}

impl ObservedPhenotypes {
    /// Constructs an empty set of observations
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a term id, e.g. `HP:0000118`
    pub fn add_id<S: Into<String>>(&mut self, id: S) {
        self.ids.push(id.into());
    }

    /// Adds a free-text description
    pub fn add_free_text<S: Into<String>>(&mut self, text: S) {
        self.free_text.push(text.into());
    }

    /// Returns all term ids as provided
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Returns all free-text descriptions
    pub fn free_text(&self) -> &[String] {
        &self.free_text
    }

    /// Returns `true` if neither ids nor free text were added
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty() && self.free_text.is_empty()
    }

    /// Checks all ids against the ontology
    ///
    /// Ids that are malformed or unknown to the ontology end up in
    /// [`ResolvedPhenotypes::unresolved`]. Alternative ids are replaced
    /// by the id of their primary term.
    ///
    /// # Examples
    ///
    /// ```
    /// use phenodiff::{ObservedPhenotypes, OntologyGraph};
    ///
    /// let mut ontology = OntologyGraph::default();
    /// ontology.insert_term("HP:0000118", "Phenotypic abnormality").unwrap();
    ///
    /// let mut observed: ObservedPhenotypes = ["HP:0000118", "HP:0000999", "foobar"]
    ///     .into_iter()
    ///     .collect();
    /// observed.add_free_text("pale skin");
    ///
    /// let resolved = observed.resolve(&ontology);
    /// assert_eq!(resolved.valid().len(), 1);
    /// assert_eq!(resolved.unresolved(), &["HP:0000999", "foobar"]);
    /// assert_eq!(resolved.free_text(), &["pale skin"]);
    /// ```
    pub fn resolve(&self, ontology: &OntologyGraph) -> ResolvedPhenotypes {
        let mut resolved = ResolvedPhenotypes {
            free_text: self.free_text.clone(),
            ..Default::default()
        };
        for raw in &self.ids {
            let Ok(id) = TermId::try_from(raw.as_str()) else {
                warn!("Ignoring malformed phenotype id {}", raw);
                resolved.unresolved.push(raw.clone());
                continue;
            };
            match ontology.real_id(&id) {
                Some(real_id) => {
                    resolved.valid.insert(real_id.clone());
                }
                None => {
                    debug!("Ignoring unknown phenotype {}", raw);
                    resolved.unresolved.push(raw.clone());
                }
            }
            resolved.observed.insert(id);
        }
        resolved
    }
}

impl<S: Into<String>> FromIterator<S> for ObservedPhenotypes {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self {
            ids: iter.into_iter().map(Into::into).collect(),
            free_text: Vec::new(),
        }
    }
}

/// [`ObservedPhenotypes`] after checking them against the ontology
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ResolvedPhenotypes {
    valid: TermGroup,
    observed: TermGroup,
    unresolved: Vec<String>,
    free_text: Vec<String>,
}

impl ResolvedPhenotypes {
    /// Primary ids of all terms that are part of the ontology
    pub fn valid(&self) -> &TermGroup {
        &self.valid
    }

    /// Ids that are malformed or unknown to the ontology
    pub fn unresolved(&self) -> &[String] {
        &self.unresolved
    }

    /// Free-text descriptions, unchanged
    pub fn free_text(&self) -> &[String] {
        &self.free_text
    }
}

/// Tells apart the different reasons for an empty differential
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The matcher did not return any diagnosis
    NoMatches,
    /// All phenotypes of the matched diseases were observed already
    NoCandidates,
    /// Every candidate phenotype is shared by more than half of the matches
    GateTripped,
    /// Candidate phenotypes were scored and ranked
    Ranked,
}

/// The result of [`DifferentialPhenotypePredictor::differential`]
#[derive(Debug, Clone, PartialEq)]
pub struct Differential {
    suggestions: Vec<PhenotypeSuggestion>,
    unresolved: Vec<String>,
    free_text: Vec<String>,
    outcome: Outcome,
}

impl Differential {
    /// Ranked phenotype suggestions, best first, with display names
    pub fn suggestions(&self) -> &[PhenotypeSuggestion] {
        &self.suggestions
    }

    /// Observed ids that could not be resolved and were ignored
    pub fn unresolved(&self) -> &[String] {
        &self.unresolved
    }

    /// Free-text descriptions of the observations, unchanged
    pub fn free_text(&self) -> &[String] {
        &self.free_text
    }

    /// Why the suggestions are empty, or [`Outcome::Ranked`]
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Consumes the result and returns the suggestions
    pub fn into_suggestions(self) -> Vec<PhenotypeSuggestion> {
        self.suggestions
    }
}

/// Suggests phenotypes that discriminate between candidate diagnoses
///
/// The predictor reads the current [`Snapshot`] from a shared
/// [`SnapshotHandle`] once per call, so it can be used from many threads
/// while new data is loaded into the handle.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use phenodiff::{
///     AnnotationStore, DifferentialPhenotypePredictor, ObservedPhenotypes,
///     OntologyGraph, Snapshot, SnapshotHandle,
/// };
/// use phenodiff::differential::Outcome;
///
/// let mut ontology = OntologyGraph::default();
/// let root = ontology.insert_term("HP:0000001", "All").unwrap();
/// for (id, name) in [
///     ("HP:0000002", "Abnormality of body height"),
///     ("HP:0000003", "Multicystic kidney dysplasia"),
///     ("HP:0000004", "Onset and clinical course"),
///     ("HP:0000005", "Mode of inheritance"),
/// ] {
///     let term = ontology.insert_term(id, name).unwrap();
///     ontology.add_parent(&root, &term).unwrap();
/// }
///
/// let mut annotations = AnnotationStore::default();
/// annotations.annotate("OMIM:1", "Foo", "HP:0000002").unwrap();
/// annotations.annotate("OMIM:1", "Foo", "HP:0000003").unwrap();
/// annotations.annotate("OMIM:2", "Bar", "HP:0000002").unwrap();
/// annotations.annotate("OMIM:2", "Bar", "HP:0000004").unwrap();
/// annotations.annotate("OMIM:3", "Baz", "HP:0000005").unwrap();
///
/// let handle = Arc::new(SnapshotHandle::with_snapshot(
///     Snapshot::new(ontology, annotations).unwrap()
/// ));
/// let predictor = DifferentialPhenotypePredictor::with_handle(handle);
///
/// let observed: ObservedPhenotypes = ["HP:0000002"].into_iter().collect();
/// let differential = predictor.differential(&observed).unwrap();
///
/// assert_eq!(differential.outcome(), Outcome::Ranked);
/// let ids: Vec<&str> = differential
///     .suggestions()
///     .iter()
///     .map(|s| s.id().as_str())
///     .collect();
/// assert_eq!(ids.len(), 2);
/// assert!(ids.contains(&"HP:0000003"));
/// assert!(ids.contains(&"HP:0000004"));
/// ```
#[derive(Debug)]
pub struct DifferentialPhenotypePredictor<M = InformationContentMatcher> {
    matcher: M,
    handle: Arc<SnapshotHandle>,
    config: PredictorConfig,
}

impl DifferentialPhenotypePredictor<InformationContentMatcher> {
    /// Constructs a predictor with the [`InformationContentMatcher`] and default limits
    pub fn with_handle(handle: Arc<SnapshotHandle>) -> Self {
        Self::new(
            InformationContentMatcher::default(),
            handle,
            PredictorConfig::default(),
        )
    }
}

impl<M: Matcher> DifferentialPhenotypePredictor<M> {
    /// Constructs a new predictor
    pub fn new(matcher: M, handle: Arc<SnapshotHandle>, config: PredictorConfig) -> Self {
        Self {
            matcher,
            handle,
            config,
        }
    }

    /// Returns the [`Matcher`] used to rank diagnoses
    pub fn matcher(&self) -> &M {
        &self.matcher
    }

    /// Returns the configured limits
    pub fn config(&self) -> &PredictorConfig {
        &self.config
    }

    /// Returns the handle that provides the current [`Snapshot`]
    pub fn handle(&self) -> &Arc<SnapshotHandle> {
        &self.handle
    }

    /// Returns phenotypes that help to discriminate between the best matches
    ///
    /// `observed` are the phenotypes of the patient. At most `match_limit`
    /// diagnoses are considered and at most `result_limit` suggestions are
    /// returned; `None` returns all suggestions. Observed ids that are not
    /// part of the ontology are ignored for matching, but are never suggested.
    ///
    /// The suggestions are sorted by score, highest first. They do not carry
    /// display names, use [`with_names`] for that.
    ///
    /// # Errors
    ///
    /// - [`PhenoError::InvalidLimit`](`crate::PhenoError::InvalidLimit`) if
    ///   `match_limit` is `0` or `result_limit` is `Some(0)`
    /// - [`PhenoError::DataUnavailable`](`crate::PhenoError::DataUnavailable`)
    ///   if no [`Snapshot`] is loaded
    /// - any error of the [`Matcher`]
    pub fn compute_differential(
        &self,
        observed: &TermGroup,
        match_limit: usize,
        result_limit: Option<usize>,
    ) -> PhenoResult<Vec<PhenotypeSuggestion>> {
        check_limits(match_limit, result_limit)?;
        let snapshot = self.handle.current()?;

        let mut excluded: HashSet<&TermId> = observed.iter().collect();
        excluded.extend(
            observed
                .iter()
                .filter_map(|id| snapshot.ontology().real_id(id)),
        );

        let (suggestions, _) = self.rank_phenotypes(
            &snapshot,
            observed,
            &excluded,
            match_limit,
            result_limit,
        )?;
        Ok(suggestions)
    }

    /// Resolves and scores the observations with the configured limits
    ///
    /// Unlike [`Self::compute_differential`] the result reports unresolved ids
    /// and why the suggestions are empty. Display names of the suggestions
    /// are attached from the ontology.
    ///
    /// # Errors
    ///
    /// Same as [`Self::compute_differential`]
    pub fn differential(&self, observed: &ObservedPhenotypes) -> PhenoResult<Differential> {
        let match_limit = self.config.match_limit;
        let result_limit = self.config.result_limit;
        check_limits(match_limit, result_limit)?;
        let snapshot = self.handle.current()?;

        let resolved = observed.resolve(snapshot.ontology());
        let excluded: HashSet<&TermId> =
            resolved.valid.iter().chain(resolved.observed.iter()).collect();

        let (suggestions, outcome) = self.rank_phenotypes(
            &snapshot,
            &resolved.valid,
            &excluded,
            match_limit,
            result_limit,
        )?;

        Ok(Differential {
            suggestions: with_names(suggestions, snapshot.ontology()),
            unresolved: resolved.unresolved,
            free_text: resolved.free_text,
            outcome,
        })
    }

    fn rank_phenotypes(
        &self,
        snapshot: &Snapshot,
        query: &TermGroup,
        excluded: &HashSet<&TermId>,
        match_limit: usize,
        result_limit: Option<usize>,
    ) -> PhenoResult<(Vec<PhenotypeSuggestion>, Outcome)> {
        let matches = self.matcher.rank_diagnoses(snapshot, query, match_limit)?;
        if matches.is_empty() {
            debug!("No diagnosis matches the observed phenotypes");
            return Ok((Vec::new(), Outcome::NoMatches));
        }

        let mut cumulative_scores: SumMap<&TermId> = SumMap::new();
        let mut support: CounterMap<&TermId> = CounterMap::new();
        for diagnosis in &matches {
            let phenotypes = snapshot.annotations().phenotypes_for_disease(diagnosis.id());
            for phenotype in phenotypes.into_keys() {
                if excluded.contains(phenotype) {
                    continue;
                }
                cumulative_scores.add_to(phenotype, diagnosis.score());
                support.add_to(phenotype);
            }
        }

        let Some(min_support) = support.min_value() else {
            debug!("All phenotypes of {} matches are observed", matches.len());
            return Ok((Vec::new(), Outcome::NoCandidates));
        };
        if min_support > matches.len() / 2 {
            debug!(
                "Every candidate is shared by at least {} of {} matches",
                min_support,
                matches.len()
            );
            return Ok((Vec::new(), Outcome::GateTripped));
        }

        let mut suggestions: Vec<PhenotypeSuggestion> = support
            .iter()
            .map(|(phenotype, count)| {
                let count = f64_from_usize(*count);
                let score = cumulative_scores.get(*phenotype) / (count * count);
                trace!("{}: {}", phenotype, score);
                PhenotypeSuggestion::new((*phenotype).clone(), score)
            })
            .collect();
        PhenotypeSuggestion::sort(&mut suggestions);
        if let Some(limit) = result_limit {
            suggestions.truncate(limit);
        }
        Ok((suggestions, Outcome::Ranked))
    }
}

/// Attaches display names to the results
///
/// Results whose id is unknown to the resolver keep no name.
///
/// # Examples
///
/// ```
/// use phenodiff::{OntologyGraph, PhenotypeSuggestion};
/// use phenodiff::differential::with_names;
///
/// let mut ontology = OntologyGraph::default();
/// let id = ontology.insert_term("HP:0000118", "Phenotypic abnormality").unwrap();
///
/// let results = with_names(vec![PhenotypeSuggestion::new(id, 1.0)], &ontology);
/// assert_eq!(results[0].name(), Some("Phenotypic abnormality"));
/// ```
pub fn with_names<R: TermResolver + ?Sized>(
    mut results: Vec<PhenotypeSuggestion>,
    resolver: &R,
) -> Vec<PhenotypeSuggestion> {
    for result in &mut results {
        let name = resolver.display_name(result.id());
        result.set_name(name);
    }
    results
}

fn check_limits(match_limit: usize, result_limit: Option<usize>) -> PhenoResult<()> {
    check_limit(match_limit, "match limit")?;
    if let Some(limit) = result_limit {
        check_limit(limit, "result limit")?;
    }
    Ok(())
}
