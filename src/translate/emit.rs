//! Turning axiom operands into statements.

use oxigraph::model::{Literal, NamedNodeRef};

use super::annotations::{reify, write_annotations};
use crate::graph::list::write_list;
use crate::graph::{Node, Statement};
use crate::model::{Annotation, ClassExpression, DataRange, Individual, ObjectPropertyExpression};
use crate::personality::CardinalityKind;
use crate::vocab::{owl, rdf, rdfs, xsd};

/// Collects the statements of one axiom.
#[derive(Debug, Default)]
pub(crate) struct Writer {
    pub(crate) out: Vec<Statement>,
}

impl Writer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, subject: &Node, predicate: NamedNodeRef<'_>, object: impl Into<Node>) {
        self.out
            .push(Statement::new(subject.clone(), predicate, object.into()));
    }

    pub(crate) fn list(&mut self, items: &[Node]) -> Node {
        let (head, cells) = write_list(items);
        self.out.extend(cells);
        head
    }

    /// Emit a root triple, reifying it when the axiom is annotated.
    pub(crate) fn root(
        &mut self,
        subject: Node,
        predicate: NamedNodeRef<'_>,
        object: Node,
        annotations: &[Annotation],
    ) {
        let root = Statement::new(subject, predicate, object);
        self.out.push(root.clone());
        if !annotations.is_empty() {
            let x = reify(&root, owl::AXIOM, &mut self.out);
            write_annotations(&x, annotations, &mut self.out);
        }
    }

    /// Annotations placed directly on an anonymous root node.
    pub(crate) fn annotate(&mut self, node: &Node, annotations: &[Annotation]) {
        write_annotations(node, annotations, &mut self.out);
    }

    pub(crate) fn object_property(&mut self, p: &ObjectPropertyExpression) -> Node {
        match p {
            ObjectPropertyExpression::Named(p) => p.node(),
            ObjectPropertyExpression::Inverse(p) => {
                let x = Node::fresh();
                self.push(&x, owl::INVERSE_OF, p.node());
                x
            }
        }
    }

    pub(crate) fn individual(&mut self, i: &Individual) -> Node {
        i.node()
    }

    pub(crate) fn class(&mut self, ce: &ClassExpression) -> Node {
        use ClassExpression as C;
        if let C::Class(c) = ce {
            return c.node();
        }
        let x = Node::fresh();
        match ce {
            C::Class(_) => {}
            C::IntersectionOf(ops) | C::UnionOf(ops) => {
                let predicate = if matches!(ce, C::IntersectionOf(_)) {
                    owl::INTERSECTION_OF
                } else {
                    owl::UNION_OF
                };
                let items: Vec<Node> = ops.iter().map(|op| self.class(op)).collect();
                let head = self.list(&items);
                self.push(&x, rdf::TYPE, owl::CLASS);
                self.push(&x, predicate, head);
            }
            C::ComplementOf(inner) => {
                let inner = self.class(inner);
                self.push(&x, rdf::TYPE, owl::CLASS);
                self.push(&x, owl::COMPLEMENT_OF, inner);
            }
            C::OneOf(individuals) => {
                let items: Vec<Node> = individuals.iter().map(|i| self.individual(i)).collect();
                let head = self.list(&items);
                self.push(&x, rdf::TYPE, owl::CLASS);
                self.push(&x, owl::ONE_OF, head);
            }
            C::ObjectSomeValuesFrom(p, filler) | C::ObjectAllValuesFrom(p, filler) => {
                let predicate = if matches!(ce, C::ObjectSomeValuesFrom(..)) {
                    owl::SOME_VALUES_FROM
                } else {
                    owl::ALL_VALUES_FROM
                };
                self.restriction(&x, p);
                let filler = self.class(filler);
                self.push(&x, predicate, filler);
            }
            C::ObjectHasValue(p, i) => {
                self.restriction(&x, p);
                let value = self.individual(i);
                self.push(&x, owl::HAS_VALUE, value);
            }
            C::ObjectHasSelf(p) => {
                self.restriction(&x, p);
                self.push(&x, owl::HAS_SELF, Literal::new_typed_literal("true", xsd::BOOLEAN));
            }
            C::ObjectCardinality {
                kind,
                cardinality,
                property,
                filler,
            } => {
                self.restriction(&x, property);
                self.cardinality(&x, *kind, *cardinality, filler.is_some());
                if let Some(filler) = filler {
                    let filler = self.class(filler);
                    self.push(&x, owl::ON_CLASS, filler);
                }
            }
            C::DataSomeValuesFrom(p, range) | C::DataAllValuesFrom(p, range) => {
                let predicate = if matches!(ce, C::DataSomeValuesFrom(..)) {
                    owl::SOME_VALUES_FROM
                } else {
                    owl::ALL_VALUES_FROM
                };
                self.push(&x, rdf::TYPE, owl::RESTRICTION);
                self.push(&x, owl::ON_PROPERTY, p.node());
                let range = self.range(range);
                self.push(&x, predicate, range);
            }
            C::DataHasValue(p, value) => {
                self.push(&x, rdf::TYPE, owl::RESTRICTION);
                self.push(&x, owl::ON_PROPERTY, p.node());
                self.push(&x, owl::HAS_VALUE, value.clone());
            }
            C::DataCardinality {
                kind,
                cardinality,
                property,
                filler,
            } => {
                self.push(&x, rdf::TYPE, owl::RESTRICTION);
                self.push(&x, owl::ON_PROPERTY, property.node());
                self.cardinality(&x, *kind, *cardinality, filler.is_some());
                if let Some(filler) = filler {
                    let filler = self.range(filler);
                    self.push(&x, owl::ON_DATA_RANGE, filler);
                }
            }
        }
        x
    }

    fn restriction(&mut self, x: &Node, property: &ObjectPropertyExpression) {
        let property = self.object_property(property);
        self.push(x, rdf::TYPE, owl::RESTRICTION);
        self.push(x, owl::ON_PROPERTY, property);
    }

    fn cardinality(&mut self, x: &Node, kind: CardinalityKind, n: u32, qualified: bool) {
        let predicate = match (kind, qualified) {
            (CardinalityKind::Min, false) => owl::MIN_CARDINALITY,
            (CardinalityKind::Max, false) => owl::MAX_CARDINALITY,
            (CardinalityKind::Exact, false) => owl::CARDINALITY,
            (CardinalityKind::Min, true) => owl::MIN_QUALIFIED_CARDINALITY,
            (CardinalityKind::Max, true) => owl::MAX_QUALIFIED_CARDINALITY,
            (CardinalityKind::Exact, true) => owl::QUALIFIED_CARDINALITY,
        };
        self.push(
            x,
            predicate,
            Literal::new_typed_literal(n.to_string(), xsd::NON_NEGATIVE_INTEGER),
        );
    }

    pub(crate) fn range(&mut self, range: &DataRange) -> Node {
        if let DataRange::Datatype(d) = range {
            return d.node();
        }
        let x = Node::fresh();
        self.push(&x, rdf::TYPE, rdfs::DATATYPE);
        match range {
            DataRange::Datatype(_) => {}
            DataRange::IntersectionOf(ops) | DataRange::UnionOf(ops) => {
                let predicate = if matches!(range, DataRange::IntersectionOf(_)) {
                    owl::INTERSECTION_OF
                } else {
                    owl::UNION_OF
                };
                let items: Vec<Node> = ops.iter().map(|op| self.range(op)).collect();
                let head = self.list(&items);
                self.push(&x, predicate, head);
            }
            DataRange::ComplementOf(inner) => {
                let inner = self.range(inner);
                self.push(&x, owl::DATATYPE_COMPLEMENT_OF, inner);
            }
            DataRange::OneOf(literals) => {
                let items: Vec<Node> = literals.iter().cloned().map(Node::Literal).collect();
                let head = self.list(&items);
                self.push(&x, owl::ONE_OF, head);
            }
            DataRange::Restriction(base, facets) => {
                let items: Vec<Node> = facets
                    .iter()
                    .map(|f| {
                        let node = Node::fresh();
                        self.push(&node, f.facet.as_ref(), f.value.clone());
                        node
                    })
                    .collect();
                let head = self.list(&items);
                self.push(&x, owl::ON_DATATYPE, base.node());
                self.push(&x, owl::WITH_RESTRICTIONS, head);
            }
        }
        x
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Class, ObjectProperty, Operands};
    use oxigraph::model::NamedNode;

    fn class(s: &str) -> ClassExpression {
        Class::new(NamedNode::new_unchecked(format!("http://ex.org/{s}"))).into()
    }

    #[test]
    fn named_class_emits_nothing() {
        let mut w = Writer::new();
        let node = w.class(&class("A"));
        assert!(w.out.is_empty());
        assert!(!node.is_blank());
    }

    #[test]
    fn qualified_cardinality_uses_on_class() {
        let mut w = Writer::new();
        let p = ObjectProperty::new(NamedNode::new_unchecked("http://ex.org/p"));
        let x = w.class(&ClassExpression::ObjectCardinality {
            kind: CardinalityKind::Exact,
            cardinality: 3,
            property: p.into(),
            filler: Some(Box::new(class("A"))),
        });
        assert!(w.out.contains(&Statement::new(x.clone(), owl::ON_CLASS, class_node("A"))));
        assert!(w.out.iter().any(|st| st.subject == x
            && st.has_predicate(owl::QUALIFIED_CARDINALITY)
            && st.object.as_literal().is_some_and(|l| l.value() == "3")));
    }

    #[test]
    fn union_writes_list() {
        let mut w = Writer::new();
        let x = w.class(&ClassExpression::UnionOf(Operands::new([class("A"), class("B")])));
        assert!(x.is_blank());
        // type, unionOf, two cells of two statements
        assert_eq!(w.out.len(), 6);
    }

    fn class_node(s: &str) -> Node {
        Node::Iri(NamedNode::new_unchecked(format!("http://ex.org/{s}")))
    }
}
