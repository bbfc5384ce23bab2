//! Axioms: a kind-specific body plus a set of annotations.

use std::fmt;

use oxigraph::model::{BlankNode, Literal, NamedNode};

use super::entity::{AnnotationProperty, Class, DataProperty, Datatype, Entity, ObjectProperty};
use super::expr::{
    Annotation, AnnotationSubject, AnnotationValue, ClassExpression, DataRange, Individual,
    ObjectPropertyExpression,
};
use super::{Components, HasComponents, Operands, Primitive};

macro_rules! axiom_kinds {
    ($($kind:ident),* $(,)?) => {
        /// Every supported axiom kind.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum AxiomKind {
            $($kind),*
        }

        impl AxiomKind {
            pub const ALL: &'static [AxiomKind] = &[$(AxiomKind::$kind),*];

            pub fn name(self) -> &'static str {
                match self {
                    $(AxiomKind::$kind => stringify!($kind)),*
                }
            }
        }
    };
}

axiom_kinds! {
    Declaration,
    SubClassOf,
    EquivalentClasses,
    DisjointClasses,
    DisjointUnion,
    SubObjectPropertyOf,
    SubPropertyChainOf,
    EquivalentObjectProperties,
    DisjointObjectProperties,
    InverseObjectProperties,
    ObjectPropertyDomain,
    ObjectPropertyRange,
    FunctionalObjectProperty,
    InverseFunctionalObjectProperty,
    ReflexiveObjectProperty,
    IrreflexiveObjectProperty,
    SymmetricObjectProperty,
    AsymmetricObjectProperty,
    TransitiveObjectProperty,
    SubDataPropertyOf,
    EquivalentDataProperties,
    DisjointDataProperties,
    DataPropertyDomain,
    DataPropertyRange,
    FunctionalDataProperty,
    DatatypeDefinition,
    HasKey,
    ClassAssertion,
    ObjectPropertyAssertion,
    NegativeObjectPropertyAssertion,
    DataPropertyAssertion,
    NegativeDataPropertyAssertion,
    SameIndividual,
    DifferentIndividuals,
    AnnotationAssertion,
    SubAnnotationPropertyOf,
    AnnotationPropertyDomain,
    AnnotationPropertyRange,
}

impl fmt::Display for AxiomKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The seven object property characteristics, each its own axiom kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectCharacteristic {
    Functional,
    InverseFunctional,
    Reflexive,
    Irreflexive,
    Symmetric,
    Asymmetric,
    Transitive,
}

impl ObjectCharacteristic {
    pub const ALL: [ObjectCharacteristic; 7] = [
        ObjectCharacteristic::Functional,
        ObjectCharacteristic::InverseFunctional,
        ObjectCharacteristic::Reflexive,
        ObjectCharacteristic::Irreflexive,
        ObjectCharacteristic::Symmetric,
        ObjectCharacteristic::Asymmetric,
        ObjectCharacteristic::Transitive,
    ];

    pub fn kind(self) -> AxiomKind {
        match self {
            ObjectCharacteristic::Functional => AxiomKind::FunctionalObjectProperty,
            ObjectCharacteristic::InverseFunctional => AxiomKind::InverseFunctionalObjectProperty,
            ObjectCharacteristic::Reflexive => AxiomKind::ReflexiveObjectProperty,
            ObjectCharacteristic::Irreflexive => AxiomKind::IrreflexiveObjectProperty,
            ObjectCharacteristic::Symmetric => AxiomKind::SymmetricObjectProperty,
            ObjectCharacteristic::Asymmetric => AxiomKind::AsymmetricObjectProperty,
            ObjectCharacteristic::Transitive => AxiomKind::TransitiveObjectProperty,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AxiomBody {
    Declaration(Entity),
    SubClassOf {
        sub: ClassExpression,
        sup: ClassExpression,
    },
    EquivalentClasses(Operands<ClassExpression>),
    DisjointClasses(Operands<ClassExpression>),
    DisjointUnion {
        class: Class,
        operands: Operands<ClassExpression>,
    },
    SubObjectPropertyOf {
        sub: ObjectPropertyExpression,
        sup: ObjectPropertyExpression,
    },
    /// The chain is ordered.
    SubPropertyChainOf {
        chain: Vec<ObjectPropertyExpression>,
        sup: ObjectPropertyExpression,
    },
    EquivalentObjectProperties(Operands<ObjectPropertyExpression>),
    DisjointObjectProperties(Operands<ObjectPropertyExpression>),
    InverseObjectProperties(Operands<ObjectPropertyExpression>),
    ObjectPropertyDomain {
        property: ObjectPropertyExpression,
        domain: ClassExpression,
    },
    ObjectPropertyRange {
        property: ObjectPropertyExpression,
        range: ClassExpression,
    },
    ObjectCharacteristic(ObjectCharacteristic, ObjectPropertyExpression),
    SubDataPropertyOf {
        sub: DataProperty,
        sup: DataProperty,
    },
    EquivalentDataProperties(Operands<DataProperty>),
    DisjointDataProperties(Operands<DataProperty>),
    DataPropertyDomain {
        property: DataProperty,
        domain: ClassExpression,
    },
    DataPropertyRange {
        property: DataProperty,
        range: DataRange,
    },
    FunctionalDataProperty(DataProperty),
    DatatypeDefinition {
        datatype: Datatype,
        range: DataRange,
    },
    HasKey {
        class: ClassExpression,
        object_properties: Operands<ObjectPropertyExpression>,
        data_properties: Operands<DataProperty>,
    },
    ClassAssertion {
        class: ClassExpression,
        individual: Individual,
    },
    ObjectPropertyAssertion {
        property: ObjectProperty,
        subject: Individual,
        object: Individual,
    },
    NegativeObjectPropertyAssertion {
        property: ObjectPropertyExpression,
        subject: Individual,
        object: Individual,
    },
    DataPropertyAssertion {
        property: DataProperty,
        subject: Individual,
        value: Literal,
    },
    NegativeDataPropertyAssertion {
        property: DataProperty,
        subject: Individual,
        value: Literal,
    },
    SameIndividual(Operands<Individual>),
    DifferentIndividuals(Operands<Individual>),
    AnnotationAssertion {
        subject: AnnotationSubject,
        property: AnnotationProperty,
        value: AnnotationValue,
    },
    SubAnnotationPropertyOf {
        sub: AnnotationProperty,
        sup: AnnotationProperty,
    },
    AnnotationPropertyDomain {
        property: AnnotationProperty,
        domain: NamedNode,
    },
    AnnotationPropertyRange {
        property: AnnotationProperty,
        range: NamedNode,
    },
}

impl AxiomBody {
    pub fn kind(&self) -> AxiomKind {
        use AxiomBody as B;
        use AxiomKind as K;
        match self {
            B::Declaration(_) => K::Declaration,
            B::SubClassOf { .. } => K::SubClassOf,
            B::EquivalentClasses(_) => K::EquivalentClasses,
            B::DisjointClasses(_) => K::DisjointClasses,
            B::DisjointUnion { .. } => K::DisjointUnion,
            B::SubObjectPropertyOf { .. } => K::SubObjectPropertyOf,
            B::SubPropertyChainOf { .. } => K::SubPropertyChainOf,
            B::EquivalentObjectProperties(_) => K::EquivalentObjectProperties,
            B::DisjointObjectProperties(_) => K::DisjointObjectProperties,
            B::InverseObjectProperties(_) => K::InverseObjectProperties,
            B::ObjectPropertyDomain { .. } => K::ObjectPropertyDomain,
            B::ObjectPropertyRange { .. } => K::ObjectPropertyRange,
            B::ObjectCharacteristic(c, _) => c.kind(),
            B::SubDataPropertyOf { .. } => K::SubDataPropertyOf,
            B::EquivalentDataProperties(_) => K::EquivalentDataProperties,
            B::DisjointDataProperties(_) => K::DisjointDataProperties,
            B::DataPropertyDomain { .. } => K::DataPropertyDomain,
            B::DataPropertyRange { .. } => K::DataPropertyRange,
            B::FunctionalDataProperty(_) => K::FunctionalDataProperty,
            B::DatatypeDefinition { .. } => K::DatatypeDefinition,
            B::HasKey { .. } => K::HasKey,
            B::ClassAssertion { .. } => K::ClassAssertion,
            B::ObjectPropertyAssertion { .. } => K::ObjectPropertyAssertion,
            B::NegativeObjectPropertyAssertion { .. } => K::NegativeObjectPropertyAssertion,
            B::DataPropertyAssertion { .. } => K::DataPropertyAssertion,
            B::NegativeDataPropertyAssertion { .. } => K::NegativeDataPropertyAssertion,
            B::SameIndividual(_) => K::SameIndividual,
            B::DifferentIndividuals(_) => K::DifferentIndividuals,
            B::AnnotationAssertion { .. } => K::AnnotationAssertion,
            B::SubAnnotationPropertyOf { .. } => K::SubAnnotationPropertyOf,
            B::AnnotationPropertyDomain { .. } => K::AnnotationPropertyDomain,
            B::AnnotationPropertyRange { .. } => K::AnnotationPropertyRange,
        }
    }
}

/// An axiom value. Carries no graph identity of its own.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Axiom {
    pub body: AxiomBody,
    pub annotations: Operands<Annotation>,
}

impl Axiom {
    pub fn new(body: AxiomBody) -> Self {
        Self {
            body,
            annotations: Operands::empty(),
        }
    }

    pub fn with_annotations(mut self, annotations: impl IntoIterator<Item = Annotation>) -> Self {
        self.annotations = Operands::new(annotations);
        self
    }

    pub fn kind(&self) -> AxiomKind {
        self.body.kind()
    }

    pub fn is_annotated(&self) -> bool {
        !self.annotations.is_empty()
    }

    /// The same axiom without annotations.
    pub fn unannotated(&self) -> Axiom {
        Axiom::new(self.body.clone())
    }

    /// Entities mentioned anywhere, annotations included.
    pub fn signature(&self) -> Vec<Entity> {
        self.components().entities
    }

    pub fn literals(&self) -> Vec<Literal> {
        self.components().literals
    }

    pub fn anonymous_individuals(&self) -> Vec<BlankNode> {
        self.components().anonymous
    }

    /// Whether the axiom mentions the primitive.
    pub fn references(&self, primitive: &Primitive) -> bool {
        self.components().mentions(primitive)
    }
}

impl From<AxiomBody> for Axiom {
    fn from(body: AxiomBody) -> Self {
        Axiom::new(body)
    }
}

impl HasComponents for AxiomBody {
    fn collect_components(&self, out: &mut Components) {
        use AxiomBody as B;
        match self {
            B::Declaration(e) => out.entity(e.clone()),
            B::SubClassOf { sub, sup } => {
                sub.collect_components(out);
                sup.collect_components(out);
            }
            B::EquivalentClasses(ops) | B::DisjointClasses(ops) => ops.collect_components(out),
            B::DisjointUnion { class, operands } => {
                out.entity(class.clone());
                operands.collect_components(out);
            }
            B::SubObjectPropertyOf { sub, sup } => {
                sub.collect_components(out);
                sup.collect_components(out);
            }
            B::SubPropertyChainOf { chain, sup } => {
                chain.iter().for_each(|p| p.collect_components(out));
                sup.collect_components(out);
            }
            B::EquivalentObjectProperties(ops)
            | B::DisjointObjectProperties(ops)
            | B::InverseObjectProperties(ops) => ops.collect_components(out),
            B::ObjectPropertyDomain { property, domain: ce }
            | B::ObjectPropertyRange { property, range: ce } => {
                property.collect_components(out);
                ce.collect_components(out);
            }
            B::ObjectCharacteristic(_, p) => p.collect_components(out),
            B::SubDataPropertyOf { sub, sup } => {
                out.entity(sub.clone());
                out.entity(sup.clone());
            }
            B::EquivalentDataProperties(ops) | B::DisjointDataProperties(ops) => {
                ops.iter().for_each(|p| out.entity(p.clone()))
            }
            B::DataPropertyDomain { property, domain } => {
                out.entity(property.clone());
                domain.collect_components(out);
            }
            B::DataPropertyRange { property, range } => {
                out.entity(property.clone());
                range.collect_components(out);
            }
            B::FunctionalDataProperty(p) => out.entity(p.clone()),
            B::DatatypeDefinition { datatype, range } => {
                out.entity(datatype.clone());
                range.collect_components(out);
            }
            B::HasKey {
                class,
                object_properties,
                data_properties,
            } => {
                class.collect_components(out);
                object_properties.collect_components(out);
                data_properties.iter().for_each(|p| out.entity(p.clone()));
            }
            B::ClassAssertion { class, individual } => {
                class.collect_components(out);
                individual.collect_components(out);
            }
            B::ObjectPropertyAssertion {
                property,
                subject,
                object,
            } => {
                out.entity(property.clone());
                subject.collect_components(out);
                object.collect_components(out);
            }
            B::NegativeObjectPropertyAssertion {
                property,
                subject,
                object,
            } => {
                property.collect_components(out);
                subject.collect_components(out);
                object.collect_components(out);
            }
            B::DataPropertyAssertion {
                property,
                subject,
                value,
            }
            | B::NegativeDataPropertyAssertion {
                property,
                subject,
                value,
            } => {
                out.entity(property.clone());
                subject.collect_components(out);
                out.literal(value);
            }
            B::SameIndividual(ops) | B::DifferentIndividuals(ops) => ops.collect_components(out),
            B::AnnotationAssertion {
                subject,
                property,
                value,
            } => {
                subject.collect_components(out);
                out.entity(property.clone());
                value.collect_components(out);
            }
            B::SubAnnotationPropertyOf { sub, sup } => {
                out.entity(sub.clone());
                out.entity(sup.clone());
            }
            B::AnnotationPropertyDomain { property, domain: iri }
            | B::AnnotationPropertyRange { property, range: iri } => {
                out.entity(property.clone());
                out.iri(iri);
            }
        }
    }
}

impl HasComponents for Axiom {
    fn collect_components(&self, out: &mut Components) {
        self.body.collect_components(out);
        self.annotations.collect_components(out);
    }
}

impl fmt::Display for Axiom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let signature = self
            .signature()
            .iter()
            .map(|e| e.iri().as_str().to_string())
            .collect::<Vec<_>>()
            .join(" ");
        write!(f, "{}({signature})", self.kind())?;
        if self.is_annotated() {
            write!(f, " +{} annotation(s)", self.annotations.len())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AnnotationProperty, NamedIndividual};

    fn iri(s: &str) -> NamedNode {
        NamedNode::new_unchecked(format!("http://ex.org/{s}"))
    }

    #[test]
    fn thirty_eight_kinds() {
        assert_eq!(AxiomKind::ALL.len(), 38);
        assert_eq!(AxiomKind::ALL[0].name(), "Declaration");
    }

    #[test]
    fn characteristics_map_to_distinct_kinds() {
        let kinds: std::collections::HashSet<_> =
            ObjectCharacteristic::ALL.iter().map(|c| c.kind()).collect();
        assert_eq!(kinds.len(), 7);
    }

    #[test]
    fn annotations_compared_as_set() {
        let label = AnnotationProperty::new(crate::vocab::rdfs::LABEL);
        let a1 = Annotation::new(label.clone(), AnnotationValue::Literal(Literal::new_simple_literal("a")));
        let a2 = Annotation::new(label, AnnotationValue::Literal(Literal::new_simple_literal("b")));
        let body = AxiomBody::Declaration(Entity::Class(Class::new(iri("C"))));
        let x = Axiom::new(body.clone()).with_annotations([a1.clone(), a2.clone()]);
        let y = Axiom::new(body).with_annotations([a2, a1]);
        assert_eq!(x, y);
        assert_ne!(x, x.unannotated());
    }

    #[test]
    fn references_literal_and_entity() {
        let value = Literal::new_typed_literal("42", crate::vocab::xsd::INTEGER);
        let axiom = Axiom::new(AxiomBody::DataPropertyAssertion {
            property: DataProperty::new(iri("age")),
            subject: Individual::Named(NamedIndividual::new(iri("bob"))),
            value: value.clone(),
        });
        assert!(axiom.references(&Primitive::Literal(value)));
        assert!(axiom.references(&Primitive::Iri(iri("bob"))));
        assert!(!axiom.references(&Primitive::Literal(Literal::new_simple_literal("42"))));
        assert_eq!(axiom.signature().len(), 2);
    }
}
