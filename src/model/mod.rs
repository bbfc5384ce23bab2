//! The typed ontology model: entities, expressions, axioms and the
//! provenance-carrying [`OntObject`] wrapper.
//!
//! All values are immutable and compare structurally. Operand collections
//! without an intrinsic order use [`Operands`], which keeps the order they
//! were read in but compares and hashes as a set.

pub mod axiom;
pub mod entity;
pub mod expr;
pub mod object;

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

use oxigraph::model::{BlankNode, Literal, NamedNode};

pub use axiom::{Axiom, AxiomBody, AxiomKind, ObjectCharacteristic};
pub use entity::{
    AnnotationProperty, Class, DataProperty, Datatype, Entity, NamedIndividual, ObjectProperty,
};
pub use expr::{
    Annotation, AnnotationSubject, AnnotationValue, ClassExpression, DataRange, FacetRestriction,
    Individual, ObjectPropertyExpression,
};
pub use object::{OntObject, Provenance};

/// A deduplicated operand list with set equality.
#[derive(Debug, Clone)]
pub struct Operands<T>(Vec<T>);

impl<T: PartialEq> Operands<T> {
    pub fn new(items: impl IntoIterator<Item = T>) -> Self {
        let mut out = Vec::new();
        for item in items {
            if !out.contains(&item) {
                out.push(item);
            }
        }
        Self(out)
    }

    pub fn contains(&self, item: &T) -> bool {
        self.0.contains(item)
    }

    /// Add an item unless an equal one is present.
    pub fn push(&mut self, item: T) {
        if !self.0.contains(&item) {
            self.0.push(item);
        }
    }
}

impl<T> Operands<T> {
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }

    /// Items in the order they were added.
    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<T> {
        self.0
    }
}

impl<T> Default for Operands<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: PartialEq> PartialEq for Operands<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0.len() == other.0.len() && self.0.iter().all(|item| other.0.contains(item))
    }
}

impl<T: Eq> Eq for Operands<T> {}

impl<T: Hash> Hash for Operands<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let combined = self.0.iter().fold(0u64, |acc, item| {
            let mut h = DefaultHasher::new();
            item.hash(&mut h);
            acc.wrapping_add(h.finish())
        });
        state.write_usize(self.0.len());
        state.write_u64(combined);
    }
}

impl<T: PartialEq> FromIterator<T> for Operands<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<'a, T> IntoIterator for &'a Operands<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A value an axiom can be searched by.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Primitive {
    Entity(Entity),
    Literal(Literal),
    AnonymousIndividual(BlankNode),
    /// Matches entities of any kind with this IRI and bare IRI annotation
    /// subjects and values.
    Iri(NamedNode),
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Primitive::Entity(e) => e.fmt(f),
            Primitive::Literal(l) => l.fmt(f),
            Primitive::AnonymousIndividual(b) => b.fmt(f),
            Primitive::Iri(i) => i.fmt(f),
        }
    }
}

impl From<Entity> for Primitive {
    fn from(e: Entity) -> Self {
        Primitive::Entity(e)
    }
}

impl From<Literal> for Primitive {
    fn from(l: Literal) -> Self {
        Primitive::Literal(l)
    }
}

/// Everything an axiom or expression mentions, gathered in one pass.
#[derive(Debug, Clone, Default)]
pub struct Components {
    pub entities: Vec<Entity>,
    pub literals: Vec<Literal>,
    pub anonymous: Vec<BlankNode>,
    /// Bare IRIs in annotation positions.
    pub iris: Vec<NamedNode>,
}

impl Components {
    pub(crate) fn entity(&mut self, e: impl Into<Entity>) {
        let e = e.into();
        if !self.entities.contains(&e) {
            self.entities.push(e);
        }
    }

    pub(crate) fn literal(&mut self, l: &Literal) {
        if !self.literals.contains(l) {
            self.literals.push(l.clone());
        }
    }

    pub(crate) fn anonymous(&mut self, b: &BlankNode) {
        if !self.anonymous.contains(b) {
            self.anonymous.push(b.clone());
        }
    }

    pub(crate) fn iri(&mut self, i: &NamedNode) {
        if !self.iris.contains(i) {
            self.iris.push(i.clone());
        }
    }

    /// Whether the primitive occurs among the collected components.
    pub fn mentions(&self, primitive: &Primitive) -> bool {
        match primitive {
            Primitive::Entity(e) => self.entities.contains(e),
            Primitive::Literal(l) => self.literals.contains(l),
            Primitive::AnonymousIndividual(b) => self.anonymous.contains(b),
            Primitive::Iri(i) => {
                self.iris.contains(i) || self.entities.iter().any(|e| e.iri() == i)
            }
        }
    }
}

/// Values whose components can be collected.
pub trait HasComponents {
    fn collect_components(&self, out: &mut Components);

    fn components(&self) -> Components {
        let mut out = Components::default();
        self.collect_components(&mut out);
        out
    }
}

impl<T: HasComponents> HasComponents for Operands<T> {
    fn collect_components(&self, out: &mut Components) {
        for item in self {
            item.collect_components(out);
        }
    }
}
