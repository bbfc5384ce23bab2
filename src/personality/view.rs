//! Typed view resolution.
//!
//! A view is a node paired with the closed shape tag it was classified as.
//! Named nodes are checked against the builtin, reserved and punning tables;
//! blank nodes are classified by their structural statements.

use oxigraph::model::{NamedNode, NamedNodeRef};

use super::{EntityKind, Personality};
use crate::error::ViewError;
use crate::graph::{Node, StatementGraph};
use crate::vocab::{self, owl, rdf, rdfs};

/// What a caller wants to use a node as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Entity(EntityKind),
    ClassExpression,
    DataRange,
    ObjectPropertyExpression,
    Individual,
    AnnotationSubject,
    AnnotationValue,
}

impl Capability {
    pub fn name(self) -> &'static str {
        match self {
            Capability::Entity(kind) => kind.name(),
            Capability::ClassExpression => "ClassExpression",
            Capability::DataRange => "DataRange",
            Capability::ObjectPropertyExpression => "ObjectPropertyExpression",
            Capability::Individual => "Individual",
            Capability::AnnotationSubject => "AnnotationSubject",
            Capability::AnnotationValue => "AnnotationValue",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardinalityKind {
    Min,
    Max,
    Exact,
}

/// The closed set of node shapes a view can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewShape {
    Entity(EntityKind),
    /// A bare IRI in annotation position.
    Iri,
    Literal,
    AnonymousIndividual,
    InverseObjectProperty,
    ObjectSomeValuesFrom,
    ObjectAllValuesFrom,
    ObjectHasValue,
    ObjectHasSelf,
    ObjectCardinality(CardinalityKind),
    DataSomeValuesFrom,
    DataAllValuesFrom,
    DataHasValue,
    DataCardinality(CardinalityKind),
    ObjectIntersectionOf,
    ObjectUnionOf,
    ObjectComplementOf,
    ObjectOneOf,
    DataIntersectionOf,
    DataUnionOf,
    DataComplementOf,
    DataOneOf,
    DatatypeRestriction,
}

/// A node that passed resolution for some capability.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypedView {
    pub node: Node,
    pub shape: ViewShape,
}

/// Types that mark a blank node as a structural construct rather than an
/// anonymous individual.
const STRUCTURAL_TYPES: [NamedNodeRef<'static>; 11] = [
    owl::RESTRICTION,
    owl::CLASS,
    rdfs::DATATYPE,
    owl::AXIOM,
    owl::ANNOTATION,
    owl::ALL_DISJOINT_CLASSES,
    owl::ALL_DISJOINT_PROPERTIES,
    owl::ALL_DIFFERENT,
    owl::NEGATIVE_PROPERTY_ASSERTION,
    owl::ONTOLOGY,
    rdf::LIST,
];

/// Predicates that only structural blank nodes carry.
const STRUCTURAL_PREDICATES: [NamedNodeRef<'static>; 6] = [
    rdf::FIRST,
    rdf::REST,
    owl::INVERSE_OF,
    owl::ON_PROPERTY,
    owl::ANNOTATED_SOURCE,
    owl::MEMBERS,
];

impl Personality {
    /// Decide whether `node` may be viewed as `capability`.
    pub fn resolve_view(
        &self,
        graph: &StatementGraph,
        node: &Node,
        capability: Capability,
    ) -> Result<TypedView, ViewError> {
        let shape = match (node, capability) {
            (Node::Iri(iri), Capability::Entity(kind)) => self.entity_shape(graph, iri, kind)?,
            (Node::Iri(iri), Capability::ClassExpression) => {
                self.entity_shape(graph, iri, EntityKind::Class)?
            }
            (Node::Iri(iri), Capability::DataRange) => {
                self.entity_shape(graph, iri, EntityKind::Datatype)?
            }
            (Node::Iri(iri), Capability::ObjectPropertyExpression) => {
                self.entity_shape(graph, iri, EntityKind::ObjectProperty)?
            }
            (Node::Iri(iri), Capability::Individual) => {
                self.entity_shape(graph, iri, EntityKind::NamedIndividual)?
            }
            (Node::Iri(_), Capability::AnnotationSubject | Capability::AnnotationValue) => {
                ViewShape::Iri
            }
            (Node::Literal(_), Capability::AnnotationValue) => ViewShape::Literal,
            (Node::Blank(_), Capability::ClassExpression) => self
                .class_expression_shape(graph, node)
                .ok_or_else(|| not_a(node, capability, "no class expression structure"))?,
            (Node::Blank(_), Capability::DataRange) => data_range_shape(graph, node)
                .ok_or_else(|| not_a(node, capability, "no data range structure"))?,
            (Node::Blank(_), Capability::ObjectPropertyExpression) => {
                match graph.object(node, owl::INVERSE_OF) {
                    Some(Node::Iri(inner)) => {
                        self.entity_shape(graph, &inner, EntityKind::ObjectProperty)?;
                        ViewShape::InverseObjectProperty
                    }
                    _ => return Err(not_a(node, capability, "not an owl:inverseOf node")),
                }
            }
            (
                Node::Blank(_),
                Capability::Individual | Capability::AnnotationSubject | Capability::AnnotationValue,
            ) => {
                if is_structural(graph, node) {
                    return Err(not_a(node, capability, "structural blank node"));
                }
                ViewShape::AnonymousIndividual
            }
            (Node::Blank(_), Capability::Entity(_)) => {
                return Err(not_a(node, capability, "entities must be named"));
            }
            (Node::Literal(_), _) => {
                return Err(not_a(node, capability, "literals are annotation values only"));
            }
        };
        Ok(TypedView {
            node: node.clone(),
            shape,
        })
    }

    /// Shorthand for a successful resolution check.
    pub fn can_view(&self, graph: &StatementGraph, node: &Node, capability: Capability) -> bool {
        self.resolve_view(graph, node, capability).is_ok()
    }

    fn entity_shape(
        &self,
        graph: &StatementGraph,
        iri: &NamedNode,
        kind: EntityKind,
    ) -> Result<ViewShape, ViewError> {
        if self.is_builtin(kind, iri.as_ref()) {
            return Ok(ViewShape::Entity(kind));
        }
        if self.is_reserved(iri.as_ref()) {
            return Err(ViewError::NotAnEntityOfRequestedKind {
                node: iri.to_string(),
                requested: kind.to_string(),
                reason: "reserved vocabulary term".into(),
            });
        }
        let node = Node::Iri(iri.clone());
        let declared = graph.has_type(&node, kind.declaration_type())
            || (kind == EntityKind::NamedIndividual && self.is_class_asserted(graph, &node));
        if !declared {
            return Err(ViewError::NotAnEntityOfRequestedKind {
                node: iri.to_string(),
                requested: kind.to_string(),
                reason: format!("no `rdf:type {}` declaration", kind.declaration_type()),
            });
        }
        self.check_co_kinds(graph, iri.as_ref(), kind)?;
        Ok(ViewShape::Entity(kind))
    }

    /// A named individual may be implied by a class assertion alone.
    fn is_class_asserted(&self, graph: &StatementGraph, node: &Node) -> bool {
        graph.objects(node, rdf::TYPE).iter().any(|ty| match ty {
            Node::Iri(iri) => {
                (EntityKind::from_declaration_type(iri.as_ref()).is_none()
                    && !vocab::is_system_namespace(iri.as_str()))
                    || iri.as_ref() == owl::THING
            }
            Node::Blank(_) => true,
            Node::Literal(_) => false,
        })
    }

    fn class_expression_shape(&self, graph: &StatementGraph, node: &Node) -> Option<ViewShape> {
        if graph.has_type(node, owl::RESTRICTION) {
            return self.restriction_shape(graph, node);
        }
        if !graph.has_type(node, owl::CLASS) {
            return None;
        }
        let has = |p| graph.object(node, p).is_some();
        if has(owl::INTERSECTION_OF) {
            Some(ViewShape::ObjectIntersectionOf)
        } else if has(owl::UNION_OF) {
            Some(ViewShape::ObjectUnionOf)
        } else if has(owl::COMPLEMENT_OF) {
            Some(ViewShape::ObjectComplementOf)
        } else if has(owl::ONE_OF) {
            Some(ViewShape::ObjectOneOf)
        } else {
            None
        }
    }

    fn restriction_shape(&self, graph: &StatementGraph, node: &Node) -> Option<ViewShape> {
        let property = graph.object(node, owl::ON_PROPERTY)?;
        let has = |p| graph.object(node, p).is_some();
        if has(owl::HAS_SELF) {
            return Some(ViewShape::ObjectHasSelf);
        }
        let data = self.restriction_is_data(graph, node, &property);
        let cardinality = if has(owl::MIN_CARDINALITY) || has(owl::MIN_QUALIFIED_CARDINALITY) {
            Some(CardinalityKind::Min)
        } else if has(owl::MAX_CARDINALITY) || has(owl::MAX_QUALIFIED_CARDINALITY) {
            Some(CardinalityKind::Max)
        } else if has(owl::CARDINALITY) || has(owl::QUALIFIED_CARDINALITY) {
            Some(CardinalityKind::Exact)
        } else {
            None
        };
        let shape = match (data, cardinality) {
            (false, Some(c)) => ViewShape::ObjectCardinality(c),
            (true, Some(c)) => ViewShape::DataCardinality(c),
            (false, None) if has(owl::SOME_VALUES_FROM) => ViewShape::ObjectSomeValuesFrom,
            (false, None) if has(owl::ALL_VALUES_FROM) => ViewShape::ObjectAllValuesFrom,
            (false, None) if has(owl::HAS_VALUE) => ViewShape::ObjectHasValue,
            (true, None) if has(owl::SOME_VALUES_FROM) => ViewShape::DataSomeValuesFrom,
            (true, None) if has(owl::ALL_VALUES_FROM) => ViewShape::DataAllValuesFrom,
            (true, None) if has(owl::HAS_VALUE) => ViewShape::DataHasValue,
            _ => return None,
        };
        Some(shape)
    }

    /// Object or data restriction? The property decides when it resolves as
    /// exactly one of the two; otherwise the filler does.
    fn restriction_is_data(&self, graph: &StatementGraph, node: &Node, property: &Node) -> bool {
        if graph.object(node, owl::ON_DATA_RANGE).is_some() {
            return true;
        }
        if graph.object(node, owl::ON_CLASS).is_some() {
            return false;
        }
        let Node::Iri(iri) = property else {
            return false;
        };
        let object = self
            .entity_shape(graph, iri, EntityKind::ObjectProperty)
            .is_ok();
        let data = self
            .entity_shape(graph, iri, EntityKind::DataProperty)
            .is_ok();
        match (object, data) {
            (true, false) => false,
            (false, true) => true,
            _ => {
                let filler = graph
                    .object(node, owl::SOME_VALUES_FROM)
                    .or_else(|| graph.object(node, owl::ALL_VALUES_FROM));
                match (filler, graph.object(node, owl::HAS_VALUE)) {
                    (_, Some(Node::Literal(_))) => true,
                    (Some(filler), _) => self.can_view(graph, &filler, Capability::DataRange),
                    _ => false,
                }
            }
        }
    }
}

fn data_range_shape(graph: &StatementGraph, node: &Node) -> Option<ViewShape> {
    if !graph.has_type(node, rdfs::DATATYPE) {
        return None;
    }
    let has = |p| graph.object(node, p).is_some();
    if has(owl::INTERSECTION_OF) {
        Some(ViewShape::DataIntersectionOf)
    } else if has(owl::UNION_OF) {
        Some(ViewShape::DataUnionOf)
    } else if has(owl::DATATYPE_COMPLEMENT_OF) {
        Some(ViewShape::DataComplementOf)
    } else if has(owl::ONE_OF) {
        Some(ViewShape::DataOneOf)
    } else if has(owl::ON_DATATYPE) && has(owl::WITH_RESTRICTIONS) {
        Some(ViewShape::DatatypeRestriction)
    } else {
        None
    }
}

fn is_structural(graph: &StatementGraph, node: &Node) -> bool {
    STRUCTURAL_TYPES.iter().any(|ty| graph.has_type(node, *ty))
        || STRUCTURAL_PREDICATES
            .iter()
            .any(|p| graph.object(node, *p).is_some())
}

fn not_a(node: &Node, capability: Capability, reason: &str) -> ViewError {
    ViewError::NotAnEntityOfRequestedKind {
        node: node.to_string(),
        requested: capability.name().to_string(),
        reason: reason.to_string(),
    }
}
