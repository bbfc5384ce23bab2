//! Benchmarks for axiom listing and the object cache.

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use oxigraph::model::NamedNode;
use rand::{Rng, SeedableRng};

use ontmap::config::Config;
use ontmap::graph::{Node, Statement, StatementGraph};
use ontmap::model::{AxiomKind, Primitive};
use ontmap::vocab::{owl, rdf, rdfs};
use ontmap::Ontology;

const CLASSES: usize = 500;

fn iri(i: usize) -> NamedNode {
    NamedNode::new_unchecked(format!("http://ex.org/C{i}"))
}

/// Declared classes, each a subclass of a random `∃p.C` restriction.
fn random_graph() -> (Arc<StatementGraph>, Vec<Node>) {
    let mut rng = rand::rngs::StdRng::seed_from_u64(0);
    let graph = Arc::new(StatementGraph::new());
    let p = NamedNode::new_unchecked("http://ex.org/p");
    graph.insert(Statement::new(p.clone(), rdf::TYPE, owl::OBJECT_PROPERTY));
    let mut restrictions = Vec::with_capacity(CLASSES);
    for i in 0..CLASSES {
        graph.insert(Statement::new(iri(i), rdf::TYPE, owl::CLASS));
    }
    for i in 0..CLASSES {
        let r = Node::fresh();
        let filler = iri(rng.gen_range(0..CLASSES));
        graph.insert_all([
            Statement::new(r.clone(), rdf::TYPE, owl::RESTRICTION),
            Statement::new(r.clone(), owl::ON_PROPERTY, p.clone()),
            Statement::new(r.clone(), owl::SOME_VALUES_FROM, filler),
            Statement::new(iri(i), rdfs::SUB_CLASS_OF, r.clone()),
        ]);
        restrictions.push(r);
    }
    (graph, restrictions)
}

fn bench_list_axioms(c: &mut Criterion) {
    let (graph, _) = random_graph();
    let onto = Ontology::with_graph(graph, Config::default());

    c.bench_function("list_subclass_axioms_warm", |bench| {
        bench.iter(|| black_box(onto.axioms_of_kind(AxiomKind::SubClassOf).count()))
    });
}

fn bench_cold_read(c: &mut Criterion) {
    let (graph, restrictions) = random_graph();
    let onto = Ontology::with_graph(graph, Config::default());

    c.bench_function("class_expression_cold", |bench| {
        bench.iter(|| {
            onto.factory().cache().clear();
            for r in restrictions.iter().take(50) {
                black_box(onto.factory().class_expression(r).unwrap());
            }
        })
    });
}

fn bench_reverse_search(c: &mut Criterion) {
    let (graph, _) = random_graph();
    let onto = Ontology::with_graph(graph, Config::default());
    let target = Primitive::Iri(iri(CLASSES / 2));

    c.bench_function("axioms_referencing_class", |bench| {
        bench.iter(|| black_box(onto.referencing_axioms(&target).count()))
    });
}

criterion_group!(benches, bench_list_axioms, bench_cold_read, bench_reverse_search);
criterion_main!(benches);
