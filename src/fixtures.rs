//! Shared test data
//!
//! A small subset of the Human Phenotype Ontology:
//!
//! ```text
//! HP:0000001 All
//! ├── HP:0000005 Mode of inheritance
//! │   └── HP:0034345 Mendelian inheritance
//! │       └── HP:0000007 Autosomal recessive inheritance
//! ├── HP:0000118 Phenotypic abnormality
//! │   ├── HP:0000707 Abnormality of the nervous system
//! │   │   ├── HP:0012638 Abnormal nervous system physiology
//! │   │   │   └── HP:0012285 Abnormal hypothalamus physiology
//! │   │   └── HP:0012639 Abnormal nervous system morphology
//! │   │       └── HP:0002011 .. HP:0012443 .. HP:0100547 .. HP:0010662
//! │   │           └── HP:0012285
//! │   ├── HP:0000818 Abnormality of the endocrine system
//! │   │   └── HP:0000864 Abnormality of the hypothalamus-pituitary axis
//! │   │       └── HP:0012285
//! │   ├── HP:0001939 Abnormality of metabolism/homeostasis
//! │   │   ├── HP:0011017 Abnormal cellular physiology
//! │   │   └── HP:0025454 Abnormal CSF metabolite concentration
//! │   └── HP:0002715 .. HP:0010978 .. HP:0012647
//! │       └── HP:0012648 Decreased inflammatory response
//! └── HP:0012823 Clinical modifier
//!     └── HP:0031797 .. HP:0003674
//!         └── HP:0003581 Adult onset
//! ```
//!
//! HP:0002222 is an alternative id of HP:0012285.
//!
//! Annotations:
//!
//! | Disease | Phenotypes |
//! |---------|------------|
//! | OMIM:1  | HP:0012285, HP:0000007 |
//! | OMIM:2  | HP:0012285, HP:0011017 |
//! | OMIM:3  | HP:0012648, HP:0000007 |
//! | OMIM:4  | HP:0025454, HP:0003581 |
//! | OMIM:5  | HP:0012639 (weight 0.5) |

use crate::{AnnotationStore, OntologyGraph, Snapshot, TermGroup, TermId};

const TERMS: [(&str, &str); 26] = [
    ("HP:0000001", "All"),
    ("HP:0000005", "Mode of inheritance"),
    ("HP:0000007", "Autosomal recessive inheritance"),
    ("HP:0000118", "Phenotypic abnormality"),
    ("HP:0000707", "Abnormality of the nervous system"),
    ("HP:0000818", "Abnormality of the endocrine system"),
    ("HP:0000864", "Abnormality of the hypothalamus-pituitary axis"),
    ("HP:0001939", "Abnormality of metabolism/homeostasis"),
    ("HP:0002011", "Morphological central nervous system abnormality"),
    ("HP:0002715", "Abnormality of the immune system"),
    ("HP:0003581", "Adult onset"),
    ("HP:0003674", "Onset"),
    ("HP:0010662", "Abnormality of the diencephalon"),
    ("HP:0010978", "Abnormality of immune system physiology"),
    ("HP:0011017", "Abnormal cellular physiology"),
    ("HP:0012285", "Abnormal hypothalamus physiology"),
    ("HP:0012443", "Abnormality of brain morphology"),
    ("HP:0012638", "Abnormal nervous system physiology"),
    ("HP:0012639", "Abnormal nervous system morphology"),
    ("HP:0012647", "Abnormal inflammatory response"),
    ("HP:0012648", "Decreased inflammatory response"),
    ("HP:0012823", "Clinical modifier"),
    ("HP:0025454", "Abnormal CSF metabolite concentration"),
    ("HP:0031797", "Clinical course"),
    ("HP:0034345", "Mendelian inheritance"),
    ("HP:0100547", "Abnormal forebrain morphology"),
];

/// `(parent, child)`
const EDGES: [(&str, &str); 27] = [
    ("HP:0000001", "HP:0000005"),
    ("HP:0000001", "HP:0000118"),
    ("HP:0000001", "HP:0012823"),
    ("HP:0000005", "HP:0034345"),
    ("HP:0034345", "HP:0000007"),
    ("HP:0000118", "HP:0000707"),
    ("HP:0000118", "HP:0000818"),
    ("HP:0000118", "HP:0001939"),
    ("HP:0000118", "HP:0002715"),
    ("HP:0000707", "HP:0012638"),
    ("HP:0000707", "HP:0012639"),
    ("HP:0012639", "HP:0002011"),
    ("HP:0002011", "HP:0012443"),
    ("HP:0012443", "HP:0100547"),
    ("HP:0100547", "HP:0010662"),
    ("HP:0010662", "HP:0012285"),
    ("HP:0012638", "HP:0012285"),
    ("HP:0000818", "HP:0000864"),
    ("HP:0000864", "HP:0012285"),
    ("HP:0001939", "HP:0011017"),
    ("HP:0001939", "HP:0025454"),
    ("HP:0002715", "HP:0010978"),
    ("HP:0010978", "HP:0012647"),
    ("HP:0012647", "HP:0012648"),
    ("HP:0012823", "HP:0031797"),
    ("HP:0031797", "HP:0003674"),
    ("HP:0003674", "HP:0003581"),
];

/// `(alternative id, primary id)`
const ALT_IDS: [(&str, &str); 1] = [("HP:0002222", "HP:0012285")];

const ANNOTATIONS: [(&str, &str, f64); 9] = [
    ("OMIM:1", "HP:0012285", 1.0),
    ("OMIM:1", "HP:0000007", 1.0),
    ("OMIM:2", "HP:0012285", 1.0),
    ("OMIM:2", "HP:0011017", 1.0),
    ("OMIM:3", "HP:0012648", 1.0),
    ("OMIM:3", "HP:0000007", 1.0),
    ("OMIM:4", "HP:0025454", 1.0),
    ("OMIM:4", "HP:0003581", 1.0),
    ("OMIM:5", "HP:0012639", 0.5),
];

pub(crate) fn id(s: &str) -> TermId {
    TermId::try_from(s).unwrap()
}

pub(crate) fn group(ids: &[&str]) -> TermGroup {
    ids.iter().map(|s| id(s)).collect()
}

pub(crate) fn ontology() -> OntologyGraph {
    let mut ontology = OntologyGraph::default();
    for (term_id, name) in TERMS {
        ontology.insert_term(term_id, name).unwrap();
    }
    for (parent, child) in EDGES {
        ontology.add_parent(&id(parent), &id(child)).unwrap();
    }
    for (alt_id, primary) in ALT_IDS {
        ontology.add_alt_id(alt_id, &id(primary)).unwrap();
    }
    ontology
}

pub(crate) fn annotations() -> AnnotationStore {
    let mut annotations = AnnotationStore::default();
    for (disease, phenotype, weight) in ANNOTATIONS {
        let name = format!("Disease {}", &disease[5..]);
        annotations
            .annotate_weighted(disease, &name, phenotype, weight)
            .unwrap();
    }
    annotations
}

pub(crate) fn snapshot() -> Snapshot {
    Snapshot::new(ontology(), annotations()).unwrap()
}
