//! Write-then-read tests over every axiom kind.
//!
//! Axioms are generated from a seeded RNG over a small declared vocabulary,
//! written into a fresh graph with their translator and read back through
//! the factory.

use std::sync::Arc;

use oxigraph::model::{BlankNode, Literal, NamedNode, NamedNodeRef};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use ontmap::config::Config;
use ontmap::factory::ObjectFactory;
use ontmap::graph::{Node, Statement, StatementGraph};
use ontmap::model::{
    Annotation, AnnotationProperty, AnnotationSubject, AnnotationValue, Axiom, AxiomBody,
    AxiomKind, Class, ClassExpression, DataProperty, DataRange, Datatype, Entity,
    FacetRestriction, Individual, NamedIndividual, ObjectCharacteristic, ObjectProperty,
    ObjectPropertyExpression, Operands,
};
use ontmap::personality::{CardinalityKind, EntityKind, Personality};
use ontmap::translate::{TranslatorRegistry, is_covered};
use ontmap::vocab::{owl, rdf, rdfs, xsd};

const ROUNDS: usize = 25;

fn ex(local: &str) -> NamedNode {
    NamedNode::new_unchecked(format!("http://ex.org/{local}"))
}

const CLASSES: [&str; 4] = ["C0", "C1", "C2", "C3"];
const OBJECT_PROPERTIES: [&str; 3] = ["p0", "p1", "p2"];
const DATA_PROPERTIES: [&str; 2] = ["d0", "d1"];
const ANNOTATION_PROPERTIES: [&str; 2] = ["a0", "a1"];
const INDIVIDUALS: [&str; 4] = ["i0", "i1", "i2", "i3"];
const BASE_DATATYPES: [NamedNodeRef<'static>; 3] = [xsd::INTEGER, xsd::STRING, xsd::DECIMAL];

fn declarations() -> Vec<Statement> {
    let mut out = Vec::new();
    let mut declare = |names: &[&str], ty: NamedNodeRef<'static>| {
        for name in names {
            out.push(Statement::new(ex(name), rdf::TYPE, ty));
        }
    };
    declare(&CLASSES, owl::CLASS);
    declare(&OBJECT_PROPERTIES, owl::OBJECT_PROPERTY);
    declare(&DATA_PROPERTIES, owl::DATATYPE_PROPERTY);
    declare(&ANNOTATION_PROPERTIES, owl::ANNOTATION_PROPERTY);
    declare(&INDIVIDUALS, owl::NAMED_INDIVIDUAL);
    declare(&["dt"], rdfs::DATATYPE);
    out
}

struct Gen {
    rng: StdRng,
}

impl Gen {
    fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn name(&mut self, names: &[&str]) -> NamedNode {
        ex(names.choose(&mut self.rng).unwrap())
    }

    fn count(&mut self, low: usize, high: usize) -> usize {
        self.rng.gen_range(low..=high)
    }

    fn class(&mut self) -> Class {
        Class::new(self.name(&CLASSES))
    }

    fn object_property(&mut self) -> ObjectProperty {
        ObjectProperty::new(self.name(&OBJECT_PROPERTIES))
    }

    fn data_property(&mut self) -> DataProperty {
        DataProperty::new(self.name(&DATA_PROPERTIES))
    }

    fn annotation_property(&mut self) -> AnnotationProperty {
        if self.rng.gen_bool(0.3) {
            AnnotationProperty::new(rdfs::LABEL)
        } else {
            AnnotationProperty::new(self.name(&ANNOTATION_PROPERTIES))
        }
    }

    fn ope(&mut self) -> ObjectPropertyExpression {
        let p = self.object_property();
        if self.rng.gen_bool(0.25) {
            ObjectPropertyExpression::Inverse(p)
        } else {
            p.into()
        }
    }

    fn named_individual(&mut self) -> Individual {
        NamedIndividual::new(self.name(&INDIVIDUALS)).into()
    }

    fn individual(&mut self) -> Individual {
        if self.rng.gen_bool(0.25) {
            Individual::Anonymous(BlankNode::default())
        } else {
            self.named_individual()
        }
    }

    fn literal(&mut self) -> Literal {
        let n: u32 = self.rng.gen_range(0..100);
        match self.rng.gen_range(0..3) {
            0 => Literal::new_simple_literal(format!("v{n}")),
            1 => Literal::new_typed_literal(n.to_string(), xsd::INTEGER),
            _ => Literal::new_language_tagged_literal(format!("w{n}"), "en").unwrap(),
        }
    }

    fn cardinality_kind(&mut self) -> CardinalityKind {
        *[
            CardinalityKind::Min,
            CardinalityKind::Max,
            CardinalityKind::Exact,
        ]
        .choose(&mut self.rng)
        .unwrap()
    }

    fn classes(&mut self, depth: u32, low: usize, high: usize) -> Operands<ClassExpression> {
        let n = self.count(low, high);
        (0..n).map(|_| self.class_expression(depth)).collect()
    }

    fn class_expression(&mut self, depth: u32) -> ClassExpression {
        use ClassExpression as C;
        if depth == 0 || self.rng.gen_bool(0.4) {
            return self.class().into();
        }
        let d = depth - 1;
        match self.rng.gen_range(0..14) {
            0 => C::IntersectionOf(self.classes(d, 2, 3)),
            1 => C::UnionOf(self.classes(d, 2, 3)),
            2 => C::ComplementOf(Box::new(self.class_expression(d))),
            3 => {
                let n = self.count(1, 3);
                C::OneOf((0..n).map(|_| self.named_individual()).collect())
            }
            4 => C::ObjectSomeValuesFrom(self.ope(), Box::new(self.class_expression(d))),
            5 => C::ObjectAllValuesFrom(self.ope(), Box::new(self.class_expression(d))),
            6 => C::ObjectHasValue(self.ope(), self.named_individual()),
            7 => C::ObjectHasSelf(self.ope()),
            8 | 9 => C::ObjectCardinality {
                kind: self.cardinality_kind(),
                cardinality: self.rng.gen_range(0..5),
                property: self.ope(),
                filler: self
                    .rng
                    .gen_bool(0.5)
                    .then(|| Box::new(self.class_expression(d))),
            },
            10 => C::DataSomeValuesFrom(self.data_property(), Box::new(self.data_range(d))),
            11 => C::DataAllValuesFrom(self.data_property(), Box::new(self.data_range(d))),
            12 => C::DataHasValue(self.data_property(), self.literal()),
            _ => C::DataCardinality {
                kind: self.cardinality_kind(),
                cardinality: self.rng.gen_range(0..5),
                property: self.data_property(),
                filler: self.rng.gen_bool(0.5).then(|| Box::new(self.data_range(d))),
            },
        }
    }

    fn datatype(&mut self) -> Datatype {
        Datatype::new(*BASE_DATATYPES.choose(&mut self.rng).unwrap())
    }

    fn data_range(&mut self, depth: u32) -> DataRange {
        if depth == 0 || self.rng.gen_bool(0.5) {
            return self.datatype().into();
        }
        let d = depth - 1;
        match self.rng.gen_range(0..5) {
            0 => DataRange::IntersectionOf([self.data_range(d), self.data_range(d)].into_iter().collect()),
            1 => DataRange::UnionOf([self.data_range(d), self.data_range(d)].into_iter().collect()),
            2 => DataRange::ComplementOf(Box::new(self.data_range(d))),
            3 => {
                let n = self.count(1, 3);
                DataRange::OneOf((0..n).map(|_| self.literal()).collect())
            }
            _ => {
                let low = self.rng.gen_range(0..10u32);
                let facets = [
                    FacetRestriction {
                        facet: xsd::MIN_INCLUSIVE.into_owned(),
                        value: Literal::new_typed_literal(low.to_string(), xsd::INTEGER),
                    },
                    FacetRestriction {
                        facet: xsd::MAX_EXCLUSIVE.into_owned(),
                        value: Literal::new_typed_literal((low + 10).to_string(), xsd::INTEGER),
                    },
                ];
                let n = self.count(1, 2);
                DataRange::Restriction(
                    Datatype::new(xsd::INTEGER),
                    facets.into_iter().take(n).collect(),
                )
            }
        }
    }

    fn annotation(&mut self, nested: bool) -> Annotation {
        let value = if self.rng.gen_bool(0.7) {
            AnnotationValue::Literal(self.literal())
        } else {
            AnnotationValue::Iri(self.name(&CLASSES))
        };
        let annotation = Annotation::new(self.annotation_property(), value);
        if nested && self.rng.gen_bool(0.3) {
            let inner = self.annotation(false);
            annotation.with_annotations([inner])
        } else {
            annotation
        }
    }

    fn annotations(&mut self) -> Vec<Annotation> {
        let n = self.count(0, 2);
        (0..n).map(|_| self.annotation(true)).collect()
    }

    fn body(&mut self, kind: AxiomKind) -> AxiomBody {
        use AxiomBody as B;
        use AxiomKind as K;
        match kind {
            K::Declaration => {
                let kind = *EntityKind::ALL.choose(&mut self.rng).unwrap();
                let iri = match kind {
                    EntityKind::Class => self.name(&CLASSES),
                    EntityKind::Datatype => ex("dt"),
                    EntityKind::ObjectProperty => self.name(&OBJECT_PROPERTIES),
                    EntityKind::DataProperty => self.name(&DATA_PROPERTIES),
                    EntityKind::AnnotationProperty => self.name(&ANNOTATION_PROPERTIES),
                    EntityKind::NamedIndividual => self.name(&INDIVIDUALS),
                };
                B::Declaration(Entity::new(kind, iri))
            }
            K::SubClassOf => B::SubClassOf {
                sub: self.class_expression(2),
                sup: self.class_expression(2),
            },
            K::EquivalentClasses => B::EquivalentClasses(self.classes(2, 2, 3)),
            K::DisjointClasses => B::DisjointClasses(self.classes(2, 2, 4)),
            K::DisjointUnion => B::DisjointUnion {
                class: self.class(),
                operands: self.classes(1, 2, 3),
            },
            K::SubObjectPropertyOf => B::SubObjectPropertyOf {
                sub: self.ope(),
                sup: self.ope(),
            },
            K::SubPropertyChainOf => {
                let n = self.count(2, 3);
                B::SubPropertyChainOf {
                    chain: (0..n).map(|_| self.ope()).collect(),
                    sup: self.ope(),
                }
            }
            K::EquivalentObjectProperties => {
                B::EquivalentObjectProperties([self.ope(), self.ope()].into_iter().collect())
            }
            K::DisjointObjectProperties => {
                let n = self.count(2, 3);
                B::DisjointObjectProperties((0..n).map(|_| self.ope()).collect())
            }
            K::InverseObjectProperties => B::InverseObjectProperties(
                [self.object_property().into(), self.object_property().into()]
                    .into_iter()
                    .collect(),
            ),
            K::ObjectPropertyDomain => B::ObjectPropertyDomain {
                property: self.ope(),
                domain: self.class_expression(2),
            },
            K::ObjectPropertyRange => B::ObjectPropertyRange {
                property: self.ope(),
                range: self.class_expression(2),
            },
            K::FunctionalObjectProperty
            | K::InverseFunctionalObjectProperty
            | K::ReflexiveObjectProperty
            | K::IrreflexiveObjectProperty
            | K::SymmetricObjectProperty
            | K::AsymmetricObjectProperty
            | K::TransitiveObjectProperty => {
                let characteristic = ObjectCharacteristic::ALL
                    .into_iter()
                    .find(|c| c.kind() == kind)
                    .unwrap();
                B::ObjectCharacteristic(characteristic, self.ope())
            }
            K::SubDataPropertyOf => B::SubDataPropertyOf {
                sub: self.data_property(),
                sup: self.data_property(),
            },
            K::EquivalentDataProperties => B::EquivalentDataProperties(
                DATA_PROPERTIES
                    .iter()
                    .map(|d| DataProperty::new(ex(d)))
                    .collect(),
            ),
            K::DisjointDataProperties => B::DisjointDataProperties(
                DATA_PROPERTIES
                    .iter()
                    .map(|d| DataProperty::new(ex(d)))
                    .collect(),
            ),
            K::DataPropertyDomain => B::DataPropertyDomain {
                property: self.data_property(),
                domain: self.class_expression(2),
            },
            K::DataPropertyRange => B::DataPropertyRange {
                property: self.data_property(),
                range: self.data_range(2),
            },
            K::FunctionalDataProperty => B::FunctionalDataProperty(self.data_property()),
            K::DatatypeDefinition => B::DatatypeDefinition {
                datatype: Datatype::new(ex("dt")),
                range: self.data_range(2),
            },
            K::HasKey => {
                let n = self.count(0, 2);
                let object_properties = (0..n).map(|_| self.ope()).collect();
                let data_properties = if n == 0 || self.rng.gen_bool(0.5) {
                    [self.data_property()].into_iter().collect()
                } else {
                    Operands::empty()
                };
                B::HasKey {
                    class: self.class_expression(1),
                    object_properties,
                    data_properties,
                }
            }
            K::ClassAssertion => B::ClassAssertion {
                class: self.class_expression(2),
                individual: self.individual(),
            },
            K::ObjectPropertyAssertion => B::ObjectPropertyAssertion {
                property: self.object_property(),
                subject: self.individual(),
                object: self.individual(),
            },
            K::NegativeObjectPropertyAssertion => B::NegativeObjectPropertyAssertion {
                property: self.ope(),
                subject: self.individual(),
                object: self.individual(),
            },
            K::DataPropertyAssertion => B::DataPropertyAssertion {
                property: self.data_property(),
                subject: self.individual(),
                value: self.literal(),
            },
            K::NegativeDataPropertyAssertion => B::NegativeDataPropertyAssertion {
                property: self.data_property(),
                subject: self.individual(),
                value: self.literal(),
            },
            K::SameIndividual => {
                let n = self.count(2, 3);
                B::SameIndividual((0..n).map(|_| self.individual()).collect())
            }
            K::DifferentIndividuals => {
                let n = self.count(2, 4);
                B::DifferentIndividuals((0..n).map(|_| self.individual()).collect())
            }
            K::AnnotationAssertion => B::AnnotationAssertion {
                subject: if self.rng.gen_bool(0.2) {
                    AnnotationSubject::Anonymous(BlankNode::default())
                } else {
                    AnnotationSubject::Iri(self.name(&CLASSES))
                },
                property: self.annotation_property(),
                value: self.annotation(false).value,
            },
            K::SubAnnotationPropertyOf => B::SubAnnotationPropertyOf {
                sub: AnnotationProperty::new(ex("a0")),
                sup: self.annotation_property(),
            },
            K::AnnotationPropertyDomain => B::AnnotationPropertyDomain {
                property: self.annotation_property(),
                domain: self.name(&CLASSES),
            },
            K::AnnotationPropertyRange => B::AnnotationPropertyRange {
                property: self.annotation_property(),
                range: xsd::STRING.into_owned(),
            },
        }
    }

    fn axiom(&mut self, kind: AxiomKind) -> Axiom {
        let body = self.body(kind);
        let annotations = self.annotations();
        Axiom::new(body).with_annotations(annotations)
    }
}

/// Whether the axiom can legally be written at all.
fn is_writable(axiom: &Axiom) -> bool {
    match &axiom.body {
        AxiomBody::DisjointClasses(ops) => ops.len() >= 2,
        AxiomBody::DisjointObjectProperties(ops) => ops.len() >= 2,
        AxiomBody::DisjointDataProperties(ops) => ops.len() >= 2,
        AxiomBody::DifferentIndividuals(ops) => ops.len() >= 2,
        _ => true,
    }
}

/// Operand count of the kinds written one triple per extra operand.
fn pairwise_len(body: &AxiomBody) -> Option<usize> {
    match body {
        AxiomBody::EquivalentClasses(ops) => Some(ops.len()),
        AxiomBody::EquivalentObjectProperties(ops) => Some(ops.len()),
        AxiomBody::EquivalentDataProperties(ops) => Some(ops.len()),
        AxiomBody::SameIndividual(ops) => Some(ops.len()),
        _ => None,
    }
}

fn factory(graph: Arc<StatementGraph>) -> ObjectFactory {
    ObjectFactory::new(
        graph,
        Arc::new(Personality::default()),
        Arc::new(TranslatorRegistry::standard()),
        Config::default(),
    )
}

fn read_back(registry: &TranslatorRegistry, axiom: &Axiom) -> (Vec<Axiom>, Vec<Statement>) {
    let graph = Arc::new(StatementGraph::from_statements(declarations()));
    let written = registry
        .get(axiom.kind())
        .unwrap()
        .write(axiom, &graph)
        .unwrap();
    let f = factory(graph);
    let found = registry
        .axioms(&f, [axiom.kind()])
        .map(|a| a.unwrap().value().clone())
        .collect();
    (found, written)
}

#[test]
fn every_kind_reads_back_what_it_wrote() {
    let registry = TranslatorRegistry::standard();
    let mut checked = 0;
    for (i, kind) in AxiomKind::ALL.iter().enumerate() {
        let mut generator = Gen::new(0x5eed + i as u64);
        for _ in 0..ROUNDS {
            let axiom = generator.axiom(*kind);
            if !is_writable(&axiom) {
                continue;
            }
            let (found, written) = read_back(&registry, &axiom);
            let parts: Vec<&Axiom> = found.iter().collect();
            assert!(
                is_covered(&parts, &axiom),
                "{kind}: wrote {axiom}\nas {written:#?}\nread {found:#?}"
            );
            // Declarations share the graph with the vocabulary, and pairwise
            // kinds with more than two operands come back one pair at a time.
            let exact = match pairwise_len(&axiom.body) {
                Some(n) => n <= 2,
                None => *kind != AxiomKind::Declaration,
            };
            if exact {
                assert_eq!(found, vec![axiom], "{kind}");
            }
            checked += 1;
        }
    }
    assert!(checked > AxiomKind::ALL.len() * ROUNDS / 2);
}

#[test]
fn data_property_range_writes_one_triple() {
    let p = ex("p");
    let graph = Arc::new(StatementGraph::from_statements([Statement::new(
        p.clone(),
        rdf::TYPE,
        owl::DATATYPE_PROPERTY,
    )]));
    graph.insert(Statement::new(p.clone(), rdfs::RANGE, xsd::INTEGER));
    let f = factory(graph.clone());
    let registry = TranslatorRegistry::standard();

    let found: Vec<_> = registry
        .axioms(&f, [AxiomKind::DataPropertyRange])
        .map(|a| a.unwrap())
        .collect();
    assert_eq!(found.len(), 1);
    let axiom = found[0].value().clone();
    assert_eq!(
        axiom,
        Axiom::new(AxiomBody::DataPropertyRange {
            property: DataProperty::new(p.clone()),
            range: Datatype::new(xsd::INTEGER).into(),
        })
    );
    assert!(axiom.annotations.is_empty());

    let fresh = StatementGraph::from_statements([Statement::new(
        p.clone(),
        rdf::TYPE,
        owl::DATATYPE_PROPERTY,
    )]);
    let written = registry
        .get(AxiomKind::DataPropertyRange)
        .unwrap()
        .write(&axiom, &fresh)
        .unwrap();
    assert_eq!(written, vec![Statement::new(p.clone(), rdfs::RANGE, xsd::INTEGER)]);
    assert_eq!(fresh.len(), 2);
}

#[test]
fn two_operand_disjointness_puts_named_operand_first() {
    let registry = TranslatorRegistry::standard();
    let translator = registry.get(AxiomKind::DisjointClasses).unwrap();
    let named: ClassExpression = Class::new(ex("C0")).into();
    let anonymous = ClassExpression::ComplementOf(Box::new(Class::new(ex("C1")).into()));

    for operands in [
        [anonymous.clone(), named.clone()],
        [named.clone(), anonymous.clone()],
    ] {
        let axiom = Axiom::new(AxiomBody::DisjointClasses(operands.into_iter().collect()));
        let written = translator.emit(&axiom).unwrap();
        let roots: Vec<_> = written
            .iter()
            .filter(|st| st.has_predicate(owl::DISJOINT_WITH))
            .collect();
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].subject, Node::Iri(ex("C0")));
    }

    let concrete = Axiom::new(AxiomBody::DisjointClasses(
        [Class::new(ex("C2")).into(), Class::new(ex("C3")).into()]
            .into_iter()
            .collect(),
    ));
    let written = translator.emit(&concrete).unwrap();
    assert_eq!(
        written,
        vec![Statement::new(ex("C2"), owl::DISJOINT_WITH, ex("C3"))]
    );
}

#[test]
fn two_anonymous_operands_use_the_list_form() {
    let registry = TranslatorRegistry::standard();
    let complement = |c: &str| ClassExpression::ComplementOf(Box::new(Class::new(ex(c)).into()));
    let axiom = Axiom::new(AxiomBody::DisjointClasses(
        [complement("C0"), complement("C1")].into_iter().collect(),
    ));

    let (found, written) = read_back(&registry, &axiom);
    assert!(!written.iter().any(|st| st.has_predicate(owl::DISJOINT_WITH)));
    let anchors: Vec<_> = written
        .iter()
        .filter(|st| st.has_predicate(rdf::TYPE) && st.object.is(owl::ALL_DISJOINT_CLASSES))
        .collect();
    assert_eq!(anchors.len(), 1);
    assert!(
        written
            .iter()
            .any(|st| st.subject == anchors[0].subject && st.has_predicate(owl::MEMBERS))
    );
    assert_eq!(found, vec![axiom]);
}

#[test]
fn two_operand_equivalences_read_back_whole() {
    let registry = TranslatorRegistry::standard();
    let annotated = |body| Axiom::new(body).with_annotations([Annotation::new(
        AnnotationProperty::new(rdfs::LABEL),
        AnnotationValue::Literal(Literal::new_simple_literal("pair")),
    )]);
    let cases = [
        annotated(AxiomBody::EquivalentClasses(
            [
                ClassExpression::ComplementOf(Box::new(Class::new(ex("C1")).into())),
                Class::new(ex("C0")).into(),
            ]
            .into_iter()
            .collect(),
        )),
        annotated(AxiomBody::EquivalentObjectProperties(
            [
                ObjectPropertyExpression::Inverse(ObjectProperty::new(ex("p1"))),
                ObjectProperty::new(ex("p0")).into(),
            ]
            .into_iter()
            .collect(),
        )),
        annotated(AxiomBody::EquivalentDataProperties(
            DATA_PROPERTIES
                .iter()
                .map(|d| DataProperty::new(ex(d)))
                .collect(),
        )),
        annotated(AxiomBody::SameIndividual(
            [
                Individual::Anonymous(BlankNode::default()),
                NamedIndividual::new(ex("i0")).into(),
            ]
            .into_iter()
            .collect(),
        )),
    ];
    for axiom in cases {
        let (found, written) = read_back(&registry, &axiom);
        assert_eq!(found, vec![axiom.clone()], "wrote {written:#?}");
    }
}

#[test]
fn three_operands_always_use_the_list_form() {
    let registry = TranslatorRegistry::standard();
    let cases = [
        (
            AxiomKind::DisjointClasses,
            owl::DISJOINT_WITH,
            owl::ALL_DISJOINT_CLASSES,
            AxiomBody::DisjointClasses(
                ["C0", "C1", "C2"]
                    .iter()
                    .map(|c| Class::new(ex(c)).into())
                    .collect(),
            ),
        ),
        (
            AxiomKind::DisjointObjectProperties,
            owl::PROPERTY_DISJOINT_WITH,
            owl::ALL_DISJOINT_PROPERTIES,
            AxiomBody::DisjointObjectProperties(
                OBJECT_PROPERTIES
                    .iter()
                    .map(|p| ObjectProperty::new(ex(p)).into())
                    .collect(),
            ),
        ),
        (
            AxiomKind::DifferentIndividuals,
            owl::DIFFERENT_FROM,
            owl::ALL_DIFFERENT,
            AxiomBody::DifferentIndividuals(
                ["i0", "i1", "i2"]
                    .iter()
                    .map(|i| NamedIndividual::new(ex(i)).into())
                    .collect(),
            ),
        ),
    ];
    for (kind, pairwise, members_type, body) in cases {
        let written = registry
            .get(kind)
            .unwrap()
            .emit(&Axiom::new(body))
            .unwrap();
        assert!(!written.iter().any(|st| st.has_predicate(pairwise)), "{kind}");
        let anchors: Vec<_> = written
            .iter()
            .filter(|st| st.has_predicate(rdf::TYPE) && st.object.is(members_type))
            .collect();
        assert_eq!(anchors.len(), 1, "{kind}");
        assert!(anchors[0].subject.is_blank());
        assert!(
            written
                .iter()
                .any(|st| st.subject == anchors[0].subject && st.has_predicate(owl::MEMBERS))
        );
    }
}

#[test]
fn fewer_than_two_operands_cannot_be_written() {
    let registry = TranslatorRegistry::standard();
    let axiom = Axiom::new(AxiomBody::DifferentIndividuals(
        [NamedIndividual::new(ex("i0")).into()].into_iter().collect(),
    ));
    assert!(
        registry
            .get(AxiomKind::DifferentIndividuals)
            .unwrap()
            .emit(&axiom)
            .is_err()
    );
}
