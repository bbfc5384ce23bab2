//! [`OntObject`]: a typed value paired with the statements it was read from.

use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::Arc;

use crate::graph::{Node, Statement};

/// The statements an object was built from, its own root included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Provenance(HashSet<Statement>);

impl Provenance {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, statement: Statement) {
        self.0.insert(statement);
    }

    pub fn extend(&mut self, statements: impl IntoIterator<Item = Statement>) {
        self.0.extend(statements);
    }

    pub fn merge(&mut self, other: &Provenance) {
        self.0.extend(other.0.iter().cloned());
    }

    pub fn contains(&self, statement: &Statement) -> bool {
        self.0.contains(statement)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Statement> {
        self.0.iter()
    }

    /// Distinct subject nodes of the statements.
    pub fn subjects(&self) -> HashSet<&Node> {
        self.0.iter().map(|st| &st.subject).collect()
    }
}

impl FromIterator<Statement> for Provenance {
    fn from_iter<I: IntoIterator<Item = Statement>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A typed value with its graph provenance.
///
/// Equality and hashing look at the value only.
pub struct OntObject<T> {
    value: Arc<T>,
    root: Option<Statement>,
    provenance: Provenance,
}

impl<T> OntObject<T> {
    /// Wrap a value read from `root`. The root joins the provenance.
    pub fn new(value: T, root: Option<Statement>) -> Self {
        let mut provenance = Provenance::new();
        if let Some(root) = &root {
            provenance.insert(root.clone());
        }
        Self {
            value: Arc::new(value),
            root,
            provenance,
        }
    }

    pub fn with_statements(mut self, statements: impl IntoIterator<Item = Statement>) -> Self {
        self.provenance.extend(statements);
        self
    }

    pub fn extend(&mut self, statements: impl IntoIterator<Item = Statement>) {
        self.provenance.extend(statements);
    }

    /// Fold a sub-object's provenance into this one.
    pub fn append<U>(&mut self, other: &OntObject<U>) {
        self.provenance.merge(&other.provenance);
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn shared(&self) -> Arc<T> {
        Arc::clone(&self.value)
    }

    pub fn root(&self) -> Option<&Statement> {
        self.root.as_ref()
    }

    pub fn provenance(&self) -> &Provenance {
        &self.provenance
    }

    /// Same value, new wrapper with a replaced value type.
    pub fn map<U>(&self, f: impl FnOnce(&T) -> U) -> OntObject<U> {
        OntObject {
            value: Arc::new(f(&self.value)),
            root: self.root.clone(),
            provenance: self.provenance.clone(),
        }
    }
}

impl<T: Clone> OntObject<T> {
    pub fn into_value(self) -> T {
        Arc::unwrap_or_clone(self.value)
    }
}

impl<T> Clone for OntObject<T> {
    fn clone(&self) -> Self {
        Self {
            value: Arc::clone(&self.value),
            root: self.root.clone(),
            provenance: self.provenance.clone(),
        }
    }
}

impl<T> Deref for OntObject<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T: PartialEq> PartialEq for OntObject<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: Eq> Eq for OntObject<T> {}

impl<T: Hash> Hash for OntObject<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T: fmt::Debug> fmt::Debug for OntObject<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OntObject")
            .field("value", &self.value)
            .field("root", &self.root)
            .field("provenance", &self.provenance.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::{owl, rdf};
    use oxigraph::model::NamedNode;

    fn st(s: &str) -> Statement {
        Statement::new(NamedNode::new_unchecked(format!("http://ex.org/{s}")), rdf::TYPE, owl::CLASS)
    }

    #[test]
    fn equality_ignores_provenance() {
        let a = OntObject::new(7u32, Some(st("A")));
        let b = OntObject::new(7u32, None).with_statements([st("B"), st("C")]);
        assert_eq!(a, b);
        assert_ne!(a.provenance(), b.provenance());
    }

    #[test]
    fn append_merges_provenance() {
        let mut parent = OntObject::new("parent", Some(st("A")));
        let child = OntObject::new("child", Some(st("B")));
        parent.append(&child);
        assert_eq!(parent.provenance().len(), 2);
        assert!(parent.provenance().contains(&st("B")));
        assert_eq!(parent.root(), Some(&st("A")));
    }
}
