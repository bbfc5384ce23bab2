//! Object identity cache with provenance-driven invalidation.
//!
//! Entries are keyed by `(root, requested type)`. Every entry is indexed
//! under the subject nodes of its provenance statements and under its own
//! root node. A statement added or removed in the graph evicts the entries
//! indexed under its subject (and, for `owl:annotatedSource` statements,
//! under its object) before the graph's write lock is released.
//!
//! Insertion is version-checked: a reader that started building an object
//! before a mutation does not publish it afterwards.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use dashmap::DashMap;

use super::ObjectType;
use crate::graph::{GraphListener, Node, Statement, StatementGraph};
use crate::model::{
    AnnotationValue, Axiom, ClassExpression, DataRange, Entity, Individual,
    ObjectPropertyExpression, OntObject, Provenance,
};
use crate::vocab::owl;

/// What an object was read from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheRoot {
    /// Entities and expressions are rooted at a node.
    Node(Node),
    /// Axioms are rooted at a statement.
    Statement(Statement),
}

impl CacheRoot {
    /// The node the root hangs off.
    pub fn anchor(&self) -> &Node {
        match self {
            CacheRoot::Node(n) => n,
            CacheRoot::Statement(st) => &st.subject,
        }
    }
}

impl std::fmt::Display for CacheRoot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheRoot::Node(n) => n.fmt(f),
            CacheRoot::Statement(st) => st.fmt(f),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub root: CacheRoot,
    pub ty: ObjectType,
}

/// A cached object of any type.
#[derive(Debug, Clone)]
pub enum Cached {
    Entity(Arc<OntObject<Entity>>),
    ClassExpression(Arc<OntObject<ClassExpression>>),
    DataRange(Arc<OntObject<DataRange>>),
    ObjectPropertyExpression(Arc<OntObject<ObjectPropertyExpression>>),
    Individual(Arc<OntObject<Individual>>),
    AnnotationValue(Arc<OntObject<AnnotationValue>>),
    Axiom(Arc<OntObject<Axiom>>),
}

impl Cached {
    pub fn provenance(&self) -> &Provenance {
        match self {
            Cached::Entity(o) => o.provenance(),
            Cached::ClassExpression(o) => o.provenance(),
            Cached::DataRange(o) => o.provenance(),
            Cached::ObjectPropertyExpression(o) => o.provenance(),
            Cached::Individual(o) => o.provenance(),
            Cached::AnnotationValue(o) => o.provenance(),
            Cached::Axiom(o) => o.provenance(),
        }
    }
}

/// Hit/miss counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
    pub invalidations: u64,
    pub evictions: u64,
}

pub struct ObjectCache {
    entries: DashMap<CacheKey, Cached>,
    dependents: DashMap<Node, HashSet<CacheKey>>,
    /// Shared for publishing, exclusive for invalidation.
    gate: RwLock<()>,
    capacity: usize,
    hits: AtomicU64,
    misses: AtomicU64,
    invalidations: AtomicU64,
    evictions: AtomicU64,
}

impl ObjectCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: DashMap::new(),
            dependents: DashMap::new(),
            gate: RwLock::new(()),
            capacity: capacity.max(1),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            invalidations: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    pub fn get(&self, key: &CacheKey) -> Option<Cached> {
        match self.entries.get(key) {
            Some(entry) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(entry.value().clone())
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Publish an object built while the graph was at `version`.
    ///
    /// Returns the object now cached under `key`: an entry published by a
    /// concurrent reader wins, so every caller sees one instance. If the
    /// graph moved on since `version`, nothing is stored.
    pub fn insert(
        &self,
        key: CacheKey,
        value: Cached,
        version: u64,
        graph: &StatementGraph,
    ) -> Cached {
        let _gate = self.gate.read().expect("cache gate poisoned");
        if graph.version() != version {
            return value;
        }
        if self.entries.len() >= self.capacity {
            self.evict();
        }

        let published = self
            .entries
            .entry(key.clone())
            .or_insert(value)
            .value()
            .clone();
        for node in dependency_nodes(&key, &published) {
            self.dependents.entry(node).or_default().insert(key.clone());
        }
        published
    }

    /// Remove `key` from the dependency sets of `nodes`, dropping sets that
    /// become empty.
    fn unlink(&self, key: &CacheKey, nodes: impl IntoIterator<Item = Node>) {
        for node in nodes {
            let emptied = match self.dependents.get_mut(&node) {
                Some(mut keys) => {
                    keys.remove(key);
                    keys.is_empty()
                }
                None => false,
            };
            if emptied {
                self.dependents.remove_if(&node, |_, keys| keys.is_empty());
            }
        }
    }

    /// Drop everything that depends on `node`.
    fn touch(&self, node: &Node) {
        if let Some((_, keys)) = self.dependents.remove(node) {
            let mut removed = 0u64;
            for key in keys {
                if let Some((key, value)) = self.entries.remove(&key) {
                    self.unlink(&key, dependency_nodes(&key, &value));
                    removed += 1;
                }
            }
            if removed > 0 {
                self.invalidations.fetch_add(removed, Ordering::Relaxed);
                tracing::trace!(node = %node, removed, "invalidated cached objects");
            }
        }
    }

    fn invalidate(&self, statement: &Statement) {
        let _gate = self.gate.write().expect("cache gate poisoned");
        self.touch(&statement.subject);
        if statement.has_predicate(owl::ANNOTATED_SOURCE) {
            self.touch(&statement.object);
        }
    }

    /// Shed a tenth of the entries. The caller holds the gate.
    fn evict(&self) {
        let target = self.capacity / 10 + 1;
        let victims: Vec<CacheKey> = self
            .entries
            .iter()
            .take(target)
            .map(|entry| entry.key().clone())
            .collect();
        for key in &victims {
            if let Some((key, value)) = self.entries.remove(key) {
                self.unlink(&key, dependency_nodes(&key, &value));
            }
        }
        self.evictions
            .fetch_add(victims.len() as u64, Ordering::Relaxed);
        tracing::debug!(
            evicted = victims.len(),
            capacity = self.capacity,
            "object cache at capacity"
        );
    }

    pub fn clear(&self) {
        let _gate = self.gate.write().expect("cache gate poisoned");
        self.entries.clear();
        self.dependents.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            invalidations: self.invalidations.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
        }
    }
}

/// Nodes whose mutation invalidates the entry: the subjects of its
/// provenance and the node its root hangs off.
fn dependency_nodes(key: &CacheKey, value: &Cached) -> HashSet<Node> {
    let mut nodes: HashSet<Node> = value.provenance().subjects().into_iter().cloned().collect();
    nodes.insert(key.root.anchor().clone());
    nodes
}

impl GraphListener for ObjectCache {
    fn statement_added(&self, statement: &Statement) {
        self.invalidate(statement);
    }

    fn statement_removed(&self, statement: &Statement) {
        self.invalidate(statement);
    }
}

impl std::fmt::Debug for ObjectCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectCache")
            .field("entries", &self.entries.len())
            .field("capacity", &self.capacity)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Class;
    use crate::personality::EntityKind;
    use crate::vocab::{owl, rdf};
    use oxigraph::model::NamedNode;

    fn iri(s: &str) -> Node {
        Node::Iri(NamedNode::new_unchecked(format!("http://ex.org/{s}")))
    }

    fn class_entry(name: &str) -> (CacheKey, Cached, Statement) {
        let decl = Statement::new(iri(name), rdf::TYPE, owl::CLASS);
        let class = Class::new(NamedNode::new_unchecked(format!("http://ex.org/{name}")));
        let object = OntObject::new(Entity::from(class), None).with_statements([decl.clone()]);
        let key = CacheKey {
            root: CacheRoot::Node(iri(name)),
            ty: ObjectType::Entity(EntityKind::Class),
        };
        (key, Cached::Entity(Arc::new(object)), decl)
    }

    #[test]
    fn hit_returns_same_instance() {
        let graph = StatementGraph::new();
        let cache = ObjectCache::new(16);
        let (key, value, _) = class_entry("A");
        let published = cache.insert(key.clone(), value, graph.version(), &graph);
        let (Cached::Entity(a), Some(Cached::Entity(b))) = (published, cache.get(&key)) else {
            panic!("expected entity entries");
        };
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.stats().hits, 1);
    }

    #[test]
    fn stale_version_is_not_published() {
        let graph = StatementGraph::new();
        let cache = ObjectCache::new(16);
        let (key, value, decl) = class_entry("A");
        let version = graph.version();
        graph.insert(decl);
        cache.insert(key.clone(), value, version, &graph);
        assert!(cache.is_empty());
    }

    #[test]
    fn graph_mutation_invalidates_dependents() {
        let graph = StatementGraph::new();
        let cache = Arc::new(ObjectCache::new(16));
        let listener: Arc<dyn GraphListener> = cache.clone();
        graph.subscribe(&listener);

        let (key_a, value_a, decl_a) = class_entry("A");
        let (key_b, value_b, _) = class_entry("B");
        graph.insert(decl_a.clone());
        cache.insert(key_a.clone(), value_a, graph.version(), &graph);
        cache.insert(key_b.clone(), value_b, graph.version(), &graph);
        assert_eq!(cache.len(), 2);

        graph.remove(&decl_a);
        assert!(cache.get(&key_a).is_none());
        assert!(cache.get(&key_b).is_some());
        assert_eq!(cache.stats().invalidations, 1);
    }

    #[test]
    fn capacity_bounds_entries() {
        let graph = StatementGraph::new();
        let cache = ObjectCache::new(10);
        for i in 0..50 {
            let (key, value, _) = class_entry(&format!("C{i}"));
            cache.insert(key, value, graph.version(), &graph);
        }
        assert!(cache.len() <= 10);
        assert!(cache.stats().evictions > 0);
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn eviction_releases_dependency_sets() {
        let graph = StatementGraph::new();
        let cache = ObjectCache::new(10);
        for i in 0..5000 {
            let (key, value, _) = class_entry(&format!("C{i}"));
            cache.insert(key, value, graph.version(), &graph);
        }
        assert!(cache.len() <= 10);
        assert!(cache.dependents.len() <= 20);
        for entry in cache.dependents.iter() {
            assert!(entry.value().iter().all(|key| cache.entries.contains_key(key)));
        }
    }

    #[test]
    fn invalidation_unlinks_other_nodes() {
        let graph = StatementGraph::new();
        let cache = Arc::new(ObjectCache::new(16));
        let listener: Arc<dyn GraphListener> = cache.clone();
        graph.subscribe(&listener);

        // An entry rooted at A that also read a statement about B.
        let (key, _, decl_a) = class_entry("A");
        let decl_b = Statement::new(iri("B"), rdf::TYPE, owl::CLASS);
        let class = Class::new(NamedNode::new_unchecked("http://ex.org/A"));
        let object = OntObject::new(Entity::from(class), None)
            .with_statements([decl_a.clone(), decl_b.clone()]);
        cache.insert(key.clone(), Cached::Entity(Arc::new(object)), graph.version(), &graph);
        assert_eq!(cache.dependents.len(), 2);

        graph.insert(decl_a);
        assert!(cache.get(&key).is_none());
        assert!(cache.dependents.is_empty());
    }
}
