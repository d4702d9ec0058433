#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

use core::fmt::Debug;
use thiserror::Error;

pub mod aggregate;
pub mod annotations;
pub mod differential;
pub mod matcher;
pub mod ontology;
mod result;
pub mod snapshot;
pub mod term;

#[cfg(test)]
pub(crate) mod fixtures;

pub use annotations::{AnnotationStore, DiseaseId};
pub use differential::{
    Differential, DifferentialPhenotypePredictor, ObservedPhenotypes, PredictorConfig,
};
pub use matcher::{HypergeomMatcher, InformationContentMatcher, Matcher, OverlapMatcher};
pub use ontology::{OntologyGraph, TermResolver};
pub use result::{DiagnosisMatch, PhenotypeSuggestion, SearchResult};
pub use snapshot::{Snapshot, SnapshotHandle};
pub use term::{Term, TermGroup, TermId};

/// Number of [`DiagnosisMatch`]es requested from the [`Matcher`] by default
pub const DEFAULT_MATCH_LIMIT: usize = 20;
/// Number of differential phenotypes returned by default
pub const DEFAULT_RESULT_LIMIT: usize = 10;

const DEFAULT_NUM_PARENTS: usize = 10;
const DEFAULT_NUM_ALL_PARENTS: usize = 30;
const DEFAULT_NUM_DISEASES: usize = 20;

/// Main Error type for this crate
#[derive(Error, Debug, PartialEq)]
#[non_exhaustive]
pub enum PhenoError {
    /// No ontology or annotation data is loaded
    #[error("ontology and annotation data are not available")]
    DataUnavailable,
    /// Term or disease does not exist
    #[error("term or disease does not exist")]
    DoesNotExist,
    /// The identifier is not of the form `<PREFIX>:<value>`
    #[error("invalid identifier: {0}")]
    InvalidId(String),
    /// A result or match limit of `0` was requested
    #[error("invalid limit: {0} must be at least 1")]
    InvalidLimit(&'static str),
    /// Failed to build the ontology or annotations from the provided input
    #[error("invalid input data: {0}")]
    InvalidInput(String),
    /// A statistical distribution could not be created
    #[error("statistics error: {0}")]
    StatsError(String),
}

/// Shortcut for `Result<T, PhenoError>`
pub type PhenoResult<T> = Result<T, PhenoError>;

/// Converts a count into `f64`
///
/// Counts in this crate are bound by the number of terms or diseases,
/// which stay far below the 2^52 mantissa limit of `f64`.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn f64_from_usize(n: usize) -> f64 {
    n as f64
}
