//! Diseases are linked to phenotype terms and make up the annotations
//!
//! This module contains the [`Disease`] record, its [`DiseaseId`] and the
//! [`AnnotationStore`] that indexes diseases and phenotypes in both directions.
//!
//! The underlying principle for all annotations is the same:
//! - Each disease has a unique identifier and a name.
//! - Each disease holds information about which phenotype terms it is related to.
//! - The store provides lookup from phenotypes back to diseases.

mod disease;
mod store;

pub use disease::{Disease, DiseaseId, DEFAULT_WEIGHT};
pub use store::AnnotationStore;
