//! Registries of ontologies keyed by their identity.
//!
//! An ontology's id lives in its graph (the header statements), so it can
//! change underneath the map. Every lookup verifies the stored value's
//! current id; on a mismatch or a miss the map is rescanned and the entry is
//! re-indexed under the id the value reports now.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use oxigraph::model::{BlankNode, NamedNode};

/// Ontology identity: an IRI with an optional version IRI, or anonymous.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OntologyId {
    Named {
        iri: NamedNode,
        version_iri: Option<NamedNode>,
    },
    Anonymous(BlankNode),
}

impl OntologyId {
    pub fn named(iri: NamedNode) -> Self {
        OntologyId::Named {
            iri,
            version_iri: None,
        }
    }

    pub fn versioned(iri: NamedNode, version_iri: NamedNode) -> Self {
        OntologyId::Named {
            iri,
            version_iri: Some(version_iri),
        }
    }

    /// A fresh anonymous id.
    pub fn anonymous() -> Self {
        OntologyId::Anonymous(BlankNode::default())
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, OntologyId::Anonymous(_))
    }

    pub fn iri(&self) -> Option<&NamedNode> {
        match self {
            OntologyId::Named { iri, .. } => Some(iri),
            OntologyId::Anonymous(_) => None,
        }
    }

    pub fn version_iri(&self) -> Option<&NamedNode> {
        match self {
            OntologyId::Named { version_iri, .. } => version_iri.as_ref(),
            OntologyId::Anonymous(_) => None,
        }
    }
}

impl fmt::Display for OntologyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OntologyId::Named {
                iri,
                version_iri: Some(version),
            } => write!(f, "{iri} {version}"),
            OntologyId::Named { iri, .. } => iri.fmt(f),
            OntologyId::Anonymous(b) => b.fmt(f),
        }
    }
}

/// Anything that can report its current ontology id.
pub trait HasOntologyId {
    fn ontology_id(&self) -> OntologyId;
}

impl<T: HasOntologyId + ?Sized> HasOntologyId for Arc<T> {
    fn ontology_id(&self) -> OntologyId {
        (**self).ontology_id()
    }
}

/// Single-threaded ontology registry.
#[derive(Debug, Clone)]
pub struct OntologyCollection<O> {
    map: HashMap<OntologyId, O>,
}

impl<O> Default for OntologyCollection<O> {
    fn default() -> Self {
        Self {
            map: HashMap::new(),
        }
    }
}

impl<O: HasOntologyId + PartialEq> OntologyCollection<O> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    pub fn values(&self) -> impl Iterator<Item = &O> {
        self.map.values()
    }

    /// Whether the exact lookup for `id` is already correct.
    fn is_fresh(&self, id: &OntologyId) -> bool {
        self.map.get(id).is_some_and(|o| &o.ontology_id() == id)
    }

    /// Make sure the value whose current id is `id`, if any, is stored under
    /// `id`. Returns whether such a value exists.
    fn resolve(&mut self, id: &OntologyId) -> bool {
        if self.is_fresh(id) {
            return true;
        }
        if let Some(stale) = self.map.remove(id) {
            tracing::debug!(key = %id, current = %stale.ontology_id(), "re-indexing stale entry");
            self.put(stale);
            if self.is_fresh(id) {
                return true;
            }
        }
        let found = self
            .map
            .iter()
            .find(|(_, o)| &o.ontology_id() == id)
            .map(|(k, _)| k.clone());
        match found.and_then(|key| self.map.remove(&key).map(|o| (key, o))) {
            Some((key, value)) => {
                tracing::debug!(stale = %key, current = %id, "re-indexing ontology");
                self.map.insert(id.clone(), value);
                true
            }
            None => false,
        }
    }

    fn key_of(&self, value: &O) -> Option<OntologyId> {
        self.map
            .iter()
            .find(|(_, o)| *o == value)
            .map(|(k, _)| k.clone())
    }

    fn put(&mut self, value: O) {
        if let Some(key) = self.key_of(&value) {
            self.map.remove(&key);
        }
        self.map.insert(value.ontology_id(), value);
    }

    pub fn get(&mut self, id: &OntologyId) -> Option<&O> {
        if self.resolve(id) {
            self.map.get(id)
        } else {
            None
        }
    }

    /// Add a value under its current id, replacing any earlier entry for
    /// the same value or id.
    pub fn add(&mut self, value: O) {
        self.put(value);
    }

    pub fn remove(&mut self, id: &OntologyId) -> Option<O> {
        if self.resolve(id) {
            self.map.remove(id)
        } else {
            None
        }
    }

    /// Drop `value` wherever it is stored. Returns whether it was present.
    pub fn delete(&mut self, value: &O) -> bool {
        match self.key_of(value) {
            Some(key) => self.map.remove(&key).is_some(),
            None => false,
        }
    }
}

impl<O: HasOntologyId + PartialEq> FromIterator<O> for OntologyCollection<O> {
    fn from_iter<I: IntoIterator<Item = O>>(iter: I) -> Self {
        let mut collection = Self::new();
        for value in iter {
            collection.add(value);
        }
        collection
    }
}

/// [`OntologyCollection`] behind one reader/writer lock.
#[derive(Debug)]
pub struct SharedOntologyCollection<O> {
    inner: RwLock<OntologyCollection<O>>,
}

impl<O> Default for SharedOntologyCollection<O> {
    fn default() -> Self {
        Self {
            inner: RwLock::new(OntologyCollection::default()),
        }
    }
}

impl<O: HasOntologyId + PartialEq + Clone> SharedOntologyCollection<O> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.read().expect("collection lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().expect("collection lock poisoned").is_empty()
    }

    pub fn clear(&self) {
        self.inner.write().expect("collection lock poisoned").clear();
    }

    /// A snapshot of the stored values.
    pub fn values(&self) -> Vec<O> {
        let inner = self.inner.read().expect("collection lock poisoned");
        inner.values().cloned().collect()
    }

    pub fn get(&self, id: &OntologyId) -> Option<O> {
        {
            let inner = self.inner.read().expect("collection lock poisoned");
            if inner.is_fresh(id) {
                return inner.map.get(id).cloned();
            }
        }
        let mut inner = self.inner.write().expect("collection lock poisoned");
        inner.get(id).cloned()
    }

    pub fn add(&self, value: O) {
        self.inner
            .write()
            .expect("collection lock poisoned")
            .add(value);
    }

    pub fn remove(&self, id: &OntologyId) -> Option<O> {
        self.inner
            .write()
            .expect("collection lock poisoned")
            .remove(id)
    }

    pub fn delete(&self, value: &O) -> bool {
        self.inner
            .write()
            .expect("collection lock poisoned")
            .delete(value)
    }
}

impl<O: HasOntologyId + PartialEq> From<OntologyCollection<O>> for SharedOntologyCollection<O> {
    fn from(collection: OntologyCollection<O>) -> Self {
        Self {
            inner: RwLock::new(collection),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// A value whose id can be changed behind the collection's back.
    #[derive(Debug)]
    struct Doc {
        name: &'static str,
        id: Mutex<OntologyId>,
    }

    impl Doc {
        fn new(name: &'static str, iri: &str) -> Arc<Self> {
            Arc::new(Self {
                name,
                id: Mutex::new(OntologyId::named(NamedNode::new_unchecked(iri))),
            })
        }

        fn rename(&self, iri: &str) {
            *self.id.lock().unwrap() = OntologyId::named(NamedNode::new_unchecked(iri));
        }
    }

    impl PartialEq for Doc {
        fn eq(&self, other: &Self) -> bool {
            self.name == other.name
        }
    }

    impl HasOntologyId for Doc {
        fn ontology_id(&self) -> OntologyId {
            self.id.lock().unwrap().clone()
        }
    }

    fn id(iri: &str) -> OntologyId {
        OntologyId::named(NamedNode::new_unchecked(iri))
    }

    #[test]
    fn exact_lookup() {
        let a = Doc::new("a", "http://ex.org/a");
        let mut c: OntologyCollection<_> = [a.clone(), Doc::new("b", "http://ex.org/b")]
            .into_iter()
            .collect();
        assert_eq!(c.len(), 2);
        assert_eq!(c.get(&id("http://ex.org/a")), Some(&a));
        assert!(c.get(&id("http://ex.org/zzz")).is_none());
    }

    #[test]
    fn renamed_value_is_found_under_new_id() {
        let a = Doc::new("a", "http://ex.org/a");
        let mut c = OntologyCollection::new();
        c.add(a.clone());

        a.rename("http://ex.org/renamed");
        assert!(c.get(&id("http://ex.org/a")).is_none());
        assert_eq!(c.get(&id("http://ex.org/renamed")), Some(&a));
        assert!(c.map.contains_key(&id("http://ex.org/renamed")));
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn remove_resolves_stale_key() {
        let a = Doc::new("a", "http://ex.org/a");
        let mut c = OntologyCollection::new();
        c.add(a.clone());
        a.rename("http://ex.org/b");
        assert_eq!(c.remove(&id("http://ex.org/b")), Some(a));
        assert!(c.is_empty());
    }

    #[test]
    fn adding_same_value_twice_keeps_one_entry() {
        let a = Doc::new("a", "http://ex.org/a");
        let mut c = OntologyCollection::new();
        c.add(a.clone());
        a.rename("http://ex.org/a2");
        c.add(a.clone());
        assert_eq!(c.len(), 1);
        assert!(c.delete(&a));
        assert!(!c.delete(&a));
    }

    #[test]
    fn shared_collection_reindexes_under_write_lock() {
        let a = Doc::new("a", "http://ex.org/a");
        let shared = SharedOntologyCollection::new();
        shared.add(a.clone());
        a.rename("http://ex.org/moved");

        let found: Vec<_> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|_| s.spawn(|| shared.get(&id("http://ex.org/moved"))))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert!(found.iter().all(|f| f.as_ref() == Some(&a)));
        assert_eq!(shared.values(), vec![a]);
    }

    #[test]
    fn anonymous_ids_are_distinct() {
        assert_ne!(OntologyId::anonymous(), OntologyId::anonymous());
        assert!(OntologyId::anonymous().iri().is_none());
    }
}
