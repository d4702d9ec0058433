use criterion::{black_box, criterion_group, criterion_main, Criterion};

use phenodiff::{OntologyGraph, TermId};

const N_TERMS: usize = 5_000;

/// Builds a DAG where every term has up to two parents with lower ids
fn ontology() -> OntologyGraph {
    let mut ontology = OntologyGraph::default();
    let ids: Vec<TermId> = (0..N_TERMS)
        .map(|n| ontology.insert_term(&format!("HP:{n:07}"), "Term").unwrap())
        .collect();
    for n in 1..N_TERMS {
        ontology.add_parent(&ids[(n - 1) / 3], &ids[n]).unwrap();
        if n > 10 && n % 4 == 0 {
            ontology.add_parent(&ids[n / 7], &ids[n]).unwrap();
        }
    }
    ontology
}

fn ancestors(ontology: &OntologyGraph, times: usize) -> usize {
    ontology
        .iter()
        .take(times)
        .map(|term| ontology.ancestors(term.id()).len())
        .max()
        .unwrap_or_default()
}

fn traverse_benchmark(c: &mut Criterion) {
    let ontology = ontology();

    c.bench_function("ancestors traversed 1000", |b| {
        b.iter(|| ancestors(black_box(&ontology), black_box(1000)))
    });
}

fn cached_benchmark(c: &mut Criterion) {
    let mut ontology = ontology();
    ontology.create_cache();

    c.bench_function("ancestors cached 1000", |b| {
        b.iter(|| ancestors(black_box(&ontology), black_box(1000)))
    });
}

fn cache_benchmark(c: &mut Criterion) {
    let ontology = ontology();

    c.bench_function("create cache", |b| {
        b.iter(|| {
            let mut ontology = ontology.clone();
            ontology.create_cache();
            ontology
        })
    });
}

criterion_group!(
    ancestor_closure,
    traverse_benchmark,
    cached_benchmark,
    cache_benchmark
);
criterion_main!(ancestor_closure);
