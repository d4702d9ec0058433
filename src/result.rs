use std::cmp::Ordering;
use std::fmt::Display;
use std::hash::{Hash, Hasher};

use crate::{DiseaseId, TermId};

/// A ranked disease, returned by a [`Matcher`](`crate::Matcher`)
pub type DiagnosisMatch = SearchResult<DiseaseId>;

/// A phenotype that would help to narrow down the differential diagnosis
pub type PhenotypeSuggestion = SearchResult<TermId>;

/// An identifier with a score and an optional display name
///
/// Two results are equal if their ids and scores are equal. The name is
/// only used for display and does not affect equality or hashing.
///
/// # Examples
///
/// ```
/// use phenodiff::{DiagnosisMatch, DiseaseId};
///
/// let id = DiseaseId::try_from("OMIM:154700").unwrap();
/// let a = DiagnosisMatch::new(id.clone(), 2.5);
/// let b = DiagnosisMatch::new(id.clone(), 2.5).with_name("Marfan syndrome");
/// let c = DiagnosisMatch::new(id, 1.0);
///
/// assert_eq!(a, b);
/// assert_ne!(a, c);
/// ```
#[derive(Debug, Clone)]
pub struct SearchResult<T> {
    id: T,
    name: Option<String>,
    score: f64,
}

impl<T> SearchResult<T> {
    /// Constructs a new result without a name
    pub fn new(id: T, score: f64) -> Self {
        Self {
            id,
            name: None,
            score,
        }
    }

    /// Sets the display name
    #[must_use]
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns the id of the result, a `DiseaseId` or `TermId`
    pub fn id(&self) -> &T {
        &self.id
    }

    /// Returns the display name, if known
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the score
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Compares two results by score, highest score first
    ///
    /// A result with a higher score is `Less` than one with a lower score,
    /// so an ascending sort puts the best results first. Results with
    /// equal scores are `Equal`, regardless of their id or name.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::cmp::Ordering;
    /// use phenodiff::{PhenotypeSuggestion, TermId};
    ///
    /// let high = PhenotypeSuggestion::new(TermId::try_from("HP:1").unwrap(), 10.0);
    /// let low = PhenotypeSuggestion::new(TermId::try_from("HP:2").unwrap(), 2.5);
    /// let tie = PhenotypeSuggestion::new(TermId::try_from("HP:3").unwrap(), 2.5);
    ///
    /// assert_eq!(high.cmp_score(&low), Ordering::Less);
    /// assert_eq!(low.cmp_score(&high), Ordering::Greater);
    /// assert_eq!(low.cmp_score(&tie), Ordering::Equal);
    /// ```
    pub fn cmp_score(&self, other: &Self) -> Ordering {
        other.score.total_cmp(&self.score)
    }

    pub(crate) fn set_name(&mut self, name: Option<&str>) {
        self.name = name.map(str::to_string);
    }
}

impl<T: Ord> SearchResult<T> {
    /// Sorts results by descending score, ties by ascending id
    pub(crate) fn sort(results: &mut [Self]) {
        results.sort_by(|a, b| a.cmp_score(b).then_with(|| a.id.cmp(&b.id)));
    }
}

/// Bit pattern of the score used for equality and hashing
///
/// `-0.0` is normalized to `0.0` so that equal scores hash equally.
fn score_bits(score: f64) -> u64 {
    (score + 0.0).to_bits()
}

impl<T: PartialEq> PartialEq for SearchResult<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && score_bits(self.score) == score_bits(other.score)
    }
}

impl<T: Eq> Eq for SearchResult<T> {}

impl<T: Hash> Hash for SearchResult<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        score_bits(self.score).hash(state);
    }
}

impl<T: Display> Display for SearchResult<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{}\t{}\t{:.4}", self.id, name, self.score),
            None => write!(f, "{}\t\t{:.4}", self.id, self.score),
        }
    }
}
