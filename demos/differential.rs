//! Prints the ranked diagnoses and differential phenotypes for the
//! phenotype ids given on the command line
//!
//! Uses a small, hardcoded subset of the Human Phenotype Ontology.
//! Set `RUST_LOG=debug` to see what happens inside.
//!
//! ```text
//! cargo run --example differential -- HP:0012285 HP:0000007
//! ```

use std::sync::Arc;

use simple_logger::SimpleLogger;

use phenodiff::matcher::HypergeomMatcher;
use phenodiff::{
    AnnotationStore, DifferentialPhenotypePredictor, Matcher, ObservedPhenotypes, OntologyGraph,
    PhenoResult, PredictorConfig, Snapshot, SnapshotHandle,
};

const TERMS: [(&str, &str, &[&str]); 16] = [
    ("HP:0000001", "All", &[]),
    ("HP:0000005", "Mode of inheritance", &["HP:0000001"]),
    ("HP:0000006", "Autosomal dominant inheritance", &["HP:0000005"]),
    ("HP:0000007", "Autosomal recessive inheritance", &["HP:0000005"]),
    ("HP:0000118", "Phenotypic abnormality", &["HP:0000001"]),
    ("HP:0000707", "Abnormality of the nervous system", &["HP:0000118"]),
    ("HP:0000818", "Abnormality of the endocrine system", &["HP:0000118"]),
    ("HP:0001939", "Abnormality of metabolism/homeostasis", &["HP:0000118"]),
    ("HP:0012638", "Abnormal nervous system physiology", &["HP:0000707"]),
    ("HP:0012639", "Abnormal nervous system morphology", &["HP:0000707"]),
    ("HP:0000864", "Abnormality of the hypothalamus-pituitary axis", &["HP:0000818"]),
    ("HP:0012285", "Abnormal hypothalamus physiology", &["HP:0012638", "HP:0000864"]),
    ("HP:0001250", "Seizure", &["HP:0012638"]),
    ("HP:0011017", "Abnormal cellular physiology", &["HP:0001939"]),
    ("HP:0025454", "Abnormal CSF metabolite concentration", &["HP:0001939"]),
    ("HP:0002011", "Morphological central nervous system abnormality", &["HP:0012639"]),
];

const DISEASES: [(&str, &str, &[&str]); 5] = [
    ("OMIM:100100", "Hypothalamic syndrome", &["HP:0012285", "HP:0000007", "HP:0001250"]),
    ("OMIM:100200", "Metabolic encephalopathy", &["HP:0012285", "HP:0011017", "HP:0025454"]),
    ("OMIM:100300", "Recessive epilepsy", &["HP:0001250", "HP:0000007", "HP:0002011"]),
    ("OMIM:100400", "Endocrine disorder", &["HP:0000864", "HP:0000006"]),
    ("OMIM:100500", "Brain malformation", &["HP:0002011", "HP:0000006"]),
];

fn build_snapshot() -> PhenoResult<Snapshot> {
    let mut ontology = OntologyGraph::default();
    for (id, name, _) in TERMS {
        ontology.insert_term(id, name)?;
    }
    for (id, _, parents) in TERMS {
        let child = id.try_into()?;
        for parent in parents {
            ontology.add_parent(&(*parent).try_into()?, &child)?;
        }
    }

    let mut annotations = AnnotationStore::default();
    for (id, name, phenotypes) in DISEASES {
        for phenotype in phenotypes {
            annotations.annotate(id, name, phenotype)?;
        }
    }
    Snapshot::new(ontology, annotations)
}

fn main() -> PhenoResult<()> {
    SimpleLogger::new()
        .env()
        .init()
        .map_err(|err| phenodiff::PhenoError::InvalidInput(err.to_string()))?;

    let mut observed: ObservedPhenotypes = std::env::args().skip(1).collect();
    if observed.is_empty() {
        observed.add_id("HP:0012285");
        observed.add_id("HP:0000007");
    }
    observed.add_free_text("reported by the demo");

    let handle = Arc::new(SnapshotHandle::with_snapshot(build_snapshot()?));

    println!("# Diagnoses (information content)");
    let predictor = DifferentialPhenotypePredictor::with_handle(Arc::clone(&handle));
    let snapshot = handle.current()?;
    let resolved = observed.resolve(snapshot.ontology());
    for diagnosis in predictor
        .matcher()
        .rank_diagnoses(&snapshot, resolved.valid(), predictor.config().match_limit())?
    {
        println!("{diagnosis}");
    }

    println!("\n# Differential phenotypes (information content)");
    let differential = predictor.differential(&observed)?;
    for suggestion in differential.suggestions() {
        println!("{suggestion}");
    }
    println!("Outcome: {:?}", differential.outcome());
    if !differential.unresolved().is_empty() {
        println!("Unresolved: {}", differential.unresolved().join(", "));
    }

    println!("\n# Differential phenotypes (hypergeometric)");
    let predictor = DifferentialPhenotypePredictor::new(
        HypergeomMatcher::default(),
        handle,
        PredictorConfig::default().with_result_limit(Some(5)),
    );
    for suggestion in predictor.differential(&observed)?.suggestions() {
        println!("{suggestion}");
    }
    Ok(())
}
