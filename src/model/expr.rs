//! Class expressions, data ranges, property expressions, individuals and
//! annotations.

use oxigraph::model::{BlankNode, Literal, NamedNode};

use super::entity::{AnnotationProperty, Class, DataProperty, Datatype, NamedIndividual, ObjectProperty};
use super::{Components, HasComponents, Operands};
use crate::graph::Node;
use crate::personality::CardinalityKind;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ObjectPropertyExpression {
    Named(ObjectProperty),
    Inverse(ObjectProperty),
}

impl ObjectPropertyExpression {
    /// The underlying named property.
    pub fn named(&self) -> &ObjectProperty {
        match self {
            Self::Named(p) | Self::Inverse(p) => p,
        }
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, Self::Inverse(_))
    }
}

impl From<ObjectProperty> for ObjectPropertyExpression {
    fn from(p: ObjectProperty) -> Self {
        Self::Named(p)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Individual {
    Named(NamedIndividual),
    Anonymous(BlankNode),
}

impl Individual {
    pub fn node(&self) -> Node {
        match self {
            Individual::Named(i) => i.node(),
            Individual::Anonymous(b) => Node::Blank(b.clone()),
        }
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, Individual::Anonymous(_))
    }
}

impl From<NamedIndividual> for Individual {
    fn from(i: NamedIndividual) -> Self {
        Individual::Named(i)
    }
}

/// One `xsd:` facet constraint inside a datatype restriction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FacetRestriction {
    pub facet: NamedNode,
    pub value: Literal,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataRange {
    Datatype(Datatype),
    IntersectionOf(Operands<DataRange>),
    UnionOf(Operands<DataRange>),
    ComplementOf(Box<DataRange>),
    OneOf(Operands<Literal>),
    Restriction(Datatype, Operands<FacetRestriction>),
}

impl DataRange {
    pub fn is_anonymous(&self) -> bool {
        !matches!(self, DataRange::Datatype(_))
    }
}

impl From<Datatype> for DataRange {
    fn from(d: Datatype) -> Self {
        DataRange::Datatype(d)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ClassExpression {
    Class(Class),
    IntersectionOf(Operands<ClassExpression>),
    UnionOf(Operands<ClassExpression>),
    ComplementOf(Box<ClassExpression>),
    OneOf(Operands<Individual>),
    ObjectSomeValuesFrom(ObjectPropertyExpression, Box<ClassExpression>),
    ObjectAllValuesFrom(ObjectPropertyExpression, Box<ClassExpression>),
    ObjectHasValue(ObjectPropertyExpression, Individual),
    ObjectHasSelf(ObjectPropertyExpression),
    /// `filler: None` is the unqualified form.
    ObjectCardinality {
        kind: CardinalityKind,
        cardinality: u32,
        property: ObjectPropertyExpression,
        filler: Option<Box<ClassExpression>>,
    },
    DataSomeValuesFrom(DataProperty, Box<DataRange>),
    DataAllValuesFrom(DataProperty, Box<DataRange>),
    DataHasValue(DataProperty, Literal),
    DataCardinality {
        kind: CardinalityKind,
        cardinality: u32,
        property: DataProperty,
        filler: Option<Box<DataRange>>,
    },
}

impl ClassExpression {
    pub fn is_anonymous(&self) -> bool {
        !matches!(self, ClassExpression::Class(_))
    }
}

impl From<Class> for ClassExpression {
    fn from(c: Class) -> Self {
        ClassExpression::Class(c)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AnnotationSubject {
    Iri(NamedNode),
    Anonymous(BlankNode),
}

impl AnnotationSubject {
    pub fn node(&self) -> Node {
        match self {
            AnnotationSubject::Iri(i) => Node::Iri(i.clone()),
            AnnotationSubject::Anonymous(b) => Node::Blank(b.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AnnotationValue {
    Iri(NamedNode),
    Literal(Literal),
    Anonymous(BlankNode),
}

impl AnnotationValue {
    pub fn node(&self) -> Node {
        match self {
            AnnotationValue::Iri(i) => Node::Iri(i.clone()),
            AnnotationValue::Literal(l) => Node::Literal(l.clone()),
            AnnotationValue::Anonymous(b) => Node::Blank(b.clone()),
        }
    }
}

/// A property/value pair, itself possibly annotated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Annotation {
    pub property: AnnotationProperty,
    pub value: AnnotationValue,
    pub annotations: Operands<Annotation>,
}

impl Annotation {
    pub fn new(property: AnnotationProperty, value: AnnotationValue) -> Self {
        Self {
            property,
            value,
            annotations: Operands::empty(),
        }
    }

    pub fn with_annotations(mut self, annotations: impl IntoIterator<Item = Annotation>) -> Self {
        self.annotations = Operands::new(annotations);
        self
    }
}

impl HasComponents for ObjectPropertyExpression {
    fn collect_components(&self, out: &mut Components) {
        out.entity(self.named().clone());
    }
}

impl HasComponents for Individual {
    fn collect_components(&self, out: &mut Components) {
        match self {
            Individual::Named(i) => out.entity(i.clone()),
            Individual::Anonymous(b) => out.anonymous(b),
        }
    }
}

impl HasComponents for DataRange {
    fn collect_components(&self, out: &mut Components) {
        match self {
            DataRange::Datatype(d) => out.entity(d.clone()),
            DataRange::IntersectionOf(ops) | DataRange::UnionOf(ops) => ops.collect_components(out),
            DataRange::ComplementOf(inner) => inner.collect_components(out),
            DataRange::OneOf(literals) => literals.iter().for_each(|l| out.literal(l)),
            DataRange::Restriction(d, facets) => {
                out.entity(d.clone());
                facets.iter().for_each(|f| out.literal(&f.value));
            }
        }
    }
}

impl HasComponents for ClassExpression {
    fn collect_components(&self, out: &mut Components) {
        match self {
            ClassExpression::Class(c) => out.entity(c.clone()),
            ClassExpression::IntersectionOf(ops) | ClassExpression::UnionOf(ops) => {
                ops.collect_components(out)
            }
            ClassExpression::ComplementOf(inner) => inner.collect_components(out),
            ClassExpression::OneOf(individuals) => individuals.collect_components(out),
            ClassExpression::ObjectSomeValuesFrom(p, filler)
            | ClassExpression::ObjectAllValuesFrom(p, filler) => {
                p.collect_components(out);
                filler.collect_components(out);
            }
            ClassExpression::ObjectHasValue(p, i) => {
                p.collect_components(out);
                i.collect_components(out);
            }
            ClassExpression::ObjectHasSelf(p) => p.collect_components(out),
            ClassExpression::ObjectCardinality {
                property, filler, ..
            } => {
                property.collect_components(out);
                if let Some(filler) = filler {
                    filler.collect_components(out);
                }
            }
            ClassExpression::DataSomeValuesFrom(p, range)
            | ClassExpression::DataAllValuesFrom(p, range) => {
                out.entity(p.clone());
                range.collect_components(out);
            }
            ClassExpression::DataHasValue(p, l) => {
                out.entity(p.clone());
                out.literal(l);
            }
            ClassExpression::DataCardinality {
                property, filler, ..
            } => {
                out.entity(property.clone());
                if let Some(filler) = filler {
                    filler.collect_components(out);
                }
            }
        }
    }
}

impl HasComponents for AnnotationValue {
    fn collect_components(&self, out: &mut Components) {
        match self {
            AnnotationValue::Iri(i) => out.iri(i),
            AnnotationValue::Literal(l) => out.literal(l),
            AnnotationValue::Anonymous(b) => out.anonymous(b),
        }
    }
}

impl HasComponents for AnnotationSubject {
    fn collect_components(&self, out: &mut Components) {
        match self {
            AnnotationSubject::Iri(i) => out.iri(i),
            AnnotationSubject::Anonymous(b) => out.anonymous(b),
        }
    }
}

impl HasComponents for Annotation {
    fn collect_components(&self, out: &mut Components) {
        out.entity(self.property.clone());
        self.value.collect_components(out);
        self.annotations.collect_components(out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Entity, Primitive};

    fn class(s: &str) -> ClassExpression {
        Class::new(NamedNode::new_unchecked(format!("http://ex.org/{s}"))).into()
    }

    #[test]
    fn intersection_equality_is_order_free() {
        let a = ClassExpression::IntersectionOf(Operands::new([class("A"), class("B")]));
        let b = ClassExpression::IntersectionOf(Operands::new([class("B"), class("A")]));
        assert_eq!(a, b);
        assert!(a.is_anonymous());
    }

    #[test]
    fn restriction_components() {
        let p = ObjectProperty::new(NamedNode::new_unchecked("http://ex.org/p"));
        let expr = ClassExpression::ObjectSomeValuesFrom(p.clone().into(), Box::new(class("C")));
        let c = expr.components();
        assert_eq!(c.entities.len(), 2);
        assert!(c.mentions(&Primitive::Entity(Entity::ObjectProperty(p))));
        assert!(c.mentions(&Primitive::Iri(NamedNode::new_unchecked("http://ex.org/C"))));
    }

    #[test]
    fn data_one_of_collects_literals() {
        let range = DataRange::OneOf(Operands::new([
            Literal::new_simple_literal("a"),
            Literal::new_simple_literal("b"),
        ]));
        assert_eq!(range.components().literals.len(), 2);
    }
}
