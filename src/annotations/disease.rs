use core::fmt::Debug;
use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;

use crate::term::separator_position;
use crate::{PhenoError, PhenoResult, TermId};

/// The weight of a disease - phenotype annotation when none is provided
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// A unique identifier for a [`Disease`], e.g. `OMIM:154700`
///
/// Like [`TermId`], a `DiseaseId` has the shape `<PREFIX>:<value>`.
/// The prefix names the source database, e.g. `OMIM` or `ORPHA`.
#[derive(Clone, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct DiseaseId {
    inner: String,
    sep: usize,
}

impl DiseaseId {
    /// Returns the source database prefix, e.g. `OMIM`
    pub fn prefix(&self) -> &str {
        &self.inner[..self.sep]
    }

    /// Returns the part after the `:`, e.g. `154700`
    pub fn value(&self) -> &str {
        &self.inner[self.sep + 1..]
    }

    /// Returns the full identifier as `str`
    pub fn as_str(&self) -> &str {
        &self.inner
    }
}

impl TryFrom<&str> for DiseaseId {
    type Error = PhenoError;
    fn try_from(s: &str) -> PhenoResult<Self> {
        let sep = separator_position(s)?;
        Ok(DiseaseId {
            inner: s.to_string(),
            sep,
        })
    }
}

impl Debug for DiseaseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DiseaseId({})", self)
    }
}

impl Display for DiseaseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl PartialEq<str> for DiseaseId {
    fn eq(&self, other: &str) -> bool {
        self.inner == other
    }
}

impl PartialEq<&str> for DiseaseId {
    fn eq(&self, other: &&str) -> bool {
        self.inner == *other
    }
}

/// A single disease
///
/// A disease has a unique [`DiseaseId`] and a name and is
/// connected to a set of phenotype terms. Each connection carries
/// a weight, [`DEFAULT_WEIGHT`] unless the source data specifies one.
#[derive(Debug, Clone)]
pub struct Disease {
    id: DiseaseId,
    name: String,
    phenotypes: HashMap<TermId, f64>,
}

impl Disease {
    /// Initializes a new disease without any phenotypes
    ///
    /// The preferred way to create diseases is through
    /// [`AnnotationStore::annotate`](`crate::AnnotationStore::annotate`)
    /// to ensure that each disease exists only once.
    pub fn new(id: DiseaseId, name: &str) -> Disease {
        Disease {
            id,
            name: name.to_string(),
            phenotypes: HashMap::with_capacity(crate::DEFAULT_NUM_DISEASES),
        }
    }

    /// The unique [`DiseaseId`] of the disease
    pub fn id(&self) -> &DiseaseId {
        &self.id
    }

    /// The disease name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of annotated phenotypes
    pub fn len(&self) -> usize {
        self.phenotypes.len()
    }

    /// Returns `true` if the disease has no annotated phenotypes
    pub fn is_empty(&self) -> bool {
        self.phenotypes.is_empty()
    }

    /// Returns the annotation weight of the phenotype, if present
    pub fn weight(&self, phenotype: &TermId) -> Option<f64> {
        self.phenotypes.get(phenotype).copied()
    }

    /// Iterates all annotated phenotypes and their weights in arbitrary order
    pub fn phenotypes(&self) -> impl Iterator<Item = (&TermId, f64)> {
        self.phenotypes.iter().map(|(id, weight)| (id, *weight))
    }

    /// Connects a phenotype to the disease
    ///
    /// Returns `true` if the phenotype was not connected before. Otherwise
    /// the weight is updated and `false` is returned.
    ///
    /// # Note
    ///
    /// This method does **not** update the reverse index of an
    /// [`AnnotationStore`](`crate::AnnotationStore`).
    pub(crate) fn add_phenotype(&mut self, phenotype: TermId, weight: f64) -> bool {
        self.phenotypes.insert(phenotype, weight).is_none()
    }
}

impl PartialEq for Disease {
    fn eq(&self, other: &Disease) -> bool {
        self.id == other.id
    }
}

impl Eq for Disease {}

impl Hash for Disease {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
