//! Named entities: one newtype per kind plus the [`Entity`] sum.

use std::fmt;

use oxigraph::model::NamedNode;

use crate::error::{GraphError, OntResult};
use crate::graph::Node;
use crate::personality::EntityKind;

macro_rules! entity_type {
    ($(#[$doc:meta])* $name:ident => $kind:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(NamedNode);

        impl $name {
            pub const KIND: EntityKind = EntityKind::$kind;

            pub fn new(iri: impl Into<NamedNode>) -> Self {
                Self(iri.into())
            }

            /// Parse an absolute IRI.
            pub fn parse(iri: &str) -> OntResult<Self> {
                NamedNode::new(iri).map(Self).map_err(|e| {
                    GraphError::InvalidIri {
                        iri: iri.to_string(),
                        message: e.to_string(),
                    }
                    .into()
                })
            }

            pub fn iri(&self) -> &NamedNode {
                &self.0
            }

            pub fn node(&self) -> Node {
                Node::Iri(self.0.clone())
            }
        }

        impl From<$name> for Entity {
            fn from(e: $name) -> Self {
                Entity::$kind(e)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

entity_type!(
    /// `owl:Class`
    Class => Class
);
entity_type!(
    /// `rdfs:Datatype`
    Datatype => Datatype
);
entity_type!(
    /// `owl:NamedIndividual`
    NamedIndividual => NamedIndividual
);
entity_type!(
    /// `owl:ObjectProperty`
    ObjectProperty => ObjectProperty
);
entity_type!(
    /// `owl:DatatypeProperty`
    DataProperty => DataProperty
);
entity_type!(
    /// `owl:AnnotationProperty`
    AnnotationProperty => AnnotationProperty
);

/// Any named entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Entity {
    Class(Class),
    Datatype(Datatype),
    NamedIndividual(NamedIndividual),
    ObjectProperty(ObjectProperty),
    DataProperty(DataProperty),
    AnnotationProperty(AnnotationProperty),
}

impl Entity {
    /// Build the entity of `kind` named by `iri`.
    pub fn new(kind: EntityKind, iri: NamedNode) -> Self {
        match kind {
            EntityKind::Class => Entity::Class(Class(iri)),
            EntityKind::Datatype => Entity::Datatype(Datatype(iri)),
            EntityKind::NamedIndividual => Entity::NamedIndividual(NamedIndividual(iri)),
            EntityKind::ObjectProperty => Entity::ObjectProperty(ObjectProperty(iri)),
            EntityKind::DataProperty => Entity::DataProperty(DataProperty(iri)),
            EntityKind::AnnotationProperty => Entity::AnnotationProperty(AnnotationProperty(iri)),
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Class(_) => EntityKind::Class,
            Entity::Datatype(_) => EntityKind::Datatype,
            Entity::NamedIndividual(_) => EntityKind::NamedIndividual,
            Entity::ObjectProperty(_) => EntityKind::ObjectProperty,
            Entity::DataProperty(_) => EntityKind::DataProperty,
            Entity::AnnotationProperty(_) => EntityKind::AnnotationProperty,
        }
    }

    pub fn iri(&self) -> &NamedNode {
        match self {
            Entity::Class(e) => e.iri(),
            Entity::Datatype(e) => e.iri(),
            Entity::NamedIndividual(e) => e.iri(),
            Entity::ObjectProperty(e) => e.iri(),
            Entity::DataProperty(e) => e.iri(),
            Entity::AnnotationProperty(e) => e.iri(),
        }
    }

    pub fn node(&self) -> Node {
        Node::Iri(self.iri().clone())
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind(), self.iri())
    }
}
