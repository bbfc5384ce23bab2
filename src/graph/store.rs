//! In-memory statement store with subject, predicate and object indexes.
//!
//! Every statement gets a sequence number on insertion. The indexes hold
//! ordered sequence sets, so every lookup visits statements in insertion
//! order. Lookups copy their matches out under the read lock and hand back
//! an owning iterator: no guard outlives the call that produced it.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, Weak};

use oxigraph::model::{NamedNode, NamedNodeRef};

use super::{Node, Statement};
use crate::vocab::rdf;

/// Receives statement-level change notifications.
///
/// Called while the graph's write lock is held, after the statement has been
/// added or removed. Implementations must not call back into the graph.
pub trait GraphListener: Send + Sync {
    fn statement_added(&self, statement: &Statement);
    fn statement_removed(&self, statement: &Statement);
}

#[derive(Default)]
struct Inner {
    next_seq: u64,
    by_seq: BTreeMap<u64, Statement>,
    seq_of: HashMap<Statement, u64>,
    by_subject: HashMap<Node, BTreeSet<u64>>,
    by_predicate: HashMap<NamedNode, BTreeSet<u64>>,
    by_object: HashMap<Node, BTreeSet<u64>>,
}

impl Inner {
    fn insert(&mut self, statement: Statement) -> bool {
        if self.seq_of.contains_key(&statement) {
            return false;
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.by_subject
            .entry(statement.subject.clone())
            .or_default()
            .insert(seq);
        self.by_predicate
            .entry(statement.predicate.clone())
            .or_default()
            .insert(seq);
        self.by_object
            .entry(statement.object.clone())
            .or_default()
            .insert(seq);
        self.seq_of.insert(statement.clone(), seq);
        self.by_seq.insert(seq, statement);
        true
    }

    fn remove(&mut self, statement: &Statement) -> bool {
        let Some(seq) = self.seq_of.remove(statement) else {
            return false;
        };
        self.by_seq.remove(&seq);
        unindex(&mut self.by_subject, &statement.subject, seq);
        unindex(&mut self.by_predicate, &statement.predicate, seq);
        unindex(&mut self.by_object, &statement.object, seq);
        true
    }

    fn matching(
        &self,
        subject: Option<&Node>,
        predicate: Option<NamedNodeRef<'_>>,
        object: Option<&Node>,
    ) -> Vec<Statement> {
        let empty = BTreeSet::new();
        let mut candidates: Vec<&BTreeSet<u64>> = Vec::with_capacity(3);
        if let Some(s) = subject {
            candidates.push(self.by_subject.get(s).unwrap_or(&empty));
        }
        if let Some(p) = predicate {
            candidates.push(self.by_predicate.get(&p.into_owned()).unwrap_or(&empty));
        }
        if let Some(o) = object {
            candidates.push(self.by_object.get(o).unwrap_or(&empty));
        }

        let keep = |st: &Statement| {
            subject.is_none_or(|s| &st.subject == s)
                && predicate.is_none_or(|p| st.predicate.as_ref() == p)
                && object.is_none_or(|o| &st.object == o)
        };

        match candidates.iter().min_by_key(|set| set.len()) {
            Some(smallest) => smallest
                .iter()
                .filter_map(|seq| self.by_seq.get(seq))
                .filter(|st| keep(*st))
                .cloned()
                .collect(),
            None => self.by_seq.values().cloned().collect(),
        }
    }
}

fn unindex<K: std::hash::Hash + Eq>(index: &mut HashMap<K, BTreeSet<u64>>, key: &K, seq: u64) {
    if let Some(set) = index.get_mut(key) {
        set.remove(&seq);
        if set.is_empty() {
            index.remove(key);
        }
    }
}

/// A mutable graph of statements with pattern lookup.
pub struct StatementGraph {
    inner: RwLock<Inner>,
    version: AtomicU64,
    listeners: RwLock<Vec<Weak<dyn GraphListener>>>,
}

impl StatementGraph {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            version: AtomicU64::new(0),
            listeners: RwLock::new(Vec::new()),
        }
    }

    /// Build a graph from a batch of statements.
    pub fn from_statements(statements: impl IntoIterator<Item = Statement>) -> Self {
        let graph = Self::new();
        graph.insert_all(statements);
        graph
    }

    /// Register a listener. The graph keeps a weak reference only.
    pub fn subscribe(&self, listener: &Arc<dyn GraphListener>) {
        let mut listeners = self.listeners.write().expect("listener lock poisoned");
        listeners.retain(|l| l.strong_count() > 0);
        listeners.push(Arc::downgrade(listener));
    }

    fn notify(&self, statement: &Statement, added: bool) {
        let listeners = self.listeners.read().expect("listener lock poisoned");
        for listener in listeners.iter().filter_map(Weak::upgrade) {
            if added {
                listener.statement_added(statement);
            } else {
                listener.statement_removed(statement);
            }
        }
    }

    /// Insert a statement. Returns `false` if it was already present.
    pub fn insert(&self, statement: Statement) -> bool {
        let mut inner = self.inner.write().expect("graph lock poisoned");
        if !inner.insert(statement.clone()) {
            return false;
        }
        self.version.fetch_add(1, Ordering::AcqRel);
        self.notify(&statement, true);
        true
    }

    /// Insert many statements. Returns how many were new.
    pub fn insert_all(&self, statements: impl IntoIterator<Item = Statement>) -> usize {
        let mut inner = self.inner.write().expect("graph lock poisoned");
        let mut added = 0;
        for statement in statements {
            if inner.insert(statement.clone()) {
                self.version.fetch_add(1, Ordering::AcqRel);
                self.notify(&statement, true);
                added += 1;
            }
        }
        added
    }

    /// Remove a statement. Returns `false` if it was absent.
    pub fn remove(&self, statement: &Statement) -> bool {
        let mut inner = self.inner.write().expect("graph lock poisoned");
        if !inner.remove(statement) {
            return false;
        }
        self.version.fetch_add(1, Ordering::AcqRel);
        self.notify(statement, false);
        true
    }

    /// Remove many statements. Returns how many were present.
    pub fn remove_all<'a>(&self, statements: impl IntoIterator<Item = &'a Statement>) -> usize {
        let mut inner = self.inner.write().expect("graph lock poisoned");
        let mut removed = 0;
        for statement in statements {
            if inner.remove(statement) {
                self.version.fetch_add(1, Ordering::AcqRel);
                self.notify(statement, false);
                removed += 1;
            }
        }
        removed
    }

    pub fn contains(&self, statement: &Statement) -> bool {
        let inner = self.inner.read().expect("graph lock poisoned");
        inner.seq_of.contains_key(statement)
    }

    /// Statements matching a pattern, in insertion order.
    pub fn find(
        &self,
        subject: Option<&Node>,
        predicate: Option<NamedNodeRef<'_>>,
        object: Option<&Node>,
    ) -> Statements {
        let inner = self.inner.read().expect("graph lock poisoned");
        Statements(inner.matching(subject, predicate, object).into_iter())
    }

    /// All statements, in insertion order.
    pub fn statements(&self) -> Statements {
        self.find(None, None, None)
    }

    /// Objects of `subject predicate ?`.
    pub fn objects(&self, subject: &Node, predicate: NamedNodeRef<'_>) -> Vec<Node> {
        self.find(Some(subject), Some(predicate), None)
            .map(|st| st.object)
            .collect()
    }

    /// The first object of `subject predicate ?`, if any.
    pub fn object(&self, subject: &Node, predicate: NamedNodeRef<'_>) -> Option<Node> {
        self.find(Some(subject), Some(predicate), None)
            .next()
            .map(|st| st.object)
    }

    /// Subjects of `? predicate object`.
    pub fn subjects(&self, predicate: NamedNodeRef<'_>, object: &Node) -> Vec<Node> {
        self.find(None, Some(predicate), Some(object))
            .map(|st| st.subject)
            .collect()
    }

    /// Whether `node rdf:type ty` is present.
    pub fn has_type(&self, node: &Node, ty: NamedNodeRef<'_>) -> bool {
        self.contains(&Statement::new(node.clone(), rdf::TYPE, ty))
    }

    /// Whether the node occurs in any position.
    pub fn mentions(&self, node: &Node) -> bool {
        let inner = self.inner.read().expect("graph lock poisoned");
        inner.by_subject.contains_key(node)
            || inner.by_object.contains_key(node)
            || node
                .as_iri()
                .is_some_and(|iri| inner.by_predicate.contains_key(iri))
    }

    pub fn len(&self) -> usize {
        let inner = self.inner.read().expect("graph lock poisoned");
        inner.by_seq.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bumped once per added or removed statement.
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }
}

impl Default for StatementGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StatementGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatementGraph")
            .field("statements", &self.len())
            .field("version", &self.version())
            .finish()
    }
}

/// Owning iterator over a lookup result.
#[derive(Debug)]
pub struct Statements(std::vec::IntoIter<Statement>);

impl Iterator for Statements {
    type Item = Statement;

    fn next(&mut self) -> Option<Statement> {
        self.0.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl ExactSizeIterator for Statements {}

impl FromIterator<Statement> for Statements {
    fn from_iter<I: IntoIterator<Item = Statement>>(iter: I) -> Self {
        Statements(iter.into_iter().collect::<Vec<_>>().into_iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use oxigraph::model::NamedNode;

    use crate::vocab::{owl, rdfs};

    fn iri(s: &str) -> Node {
        Node::Iri(NamedNode::new_unchecked(format!("http://ex.org/{s}")))
    }

    #[test]
    fn insert_and_query() {
        let g = StatementGraph::new();
        let a = iri("A");
        let b = iri("B");
        assert!(g.insert(Statement::new(a.clone(), rdfs::SUB_CLASS_OF, b.clone())));
        assert!(!g.insert(Statement::new(a.clone(), rdfs::SUB_CLASS_OF, b.clone())));

        assert_eq!(g.len(), 1);
        assert_eq!(g.objects(&a, rdfs::SUB_CLASS_OF), vec![b.clone()]);
        assert_eq!(g.subjects(rdfs::SUB_CLASS_OF, &b), vec![a.clone()]);
        assert!(g.mentions(&a));
        assert!(!g.mentions(&iri("C")));
    }

    #[test]
    fn lookups_follow_insertion_order() {
        let g = StatementGraph::new();
        let a = iri("A");
        for name in ["Z", "B", "M"] {
            g.insert(Statement::new(a.clone(), rdfs::SUB_CLASS_OF, iri(name)));
        }
        let objects = g.objects(&a, rdfs::SUB_CLASS_OF);
        assert_eq!(objects, vec![iri("Z"), iri("B"), iri("M")]);
    }

    #[test]
    fn remove_updates_indexes_and_version() {
        let g = StatementGraph::new();
        let st = Statement::new(iri("A"), rdf::TYPE, owl::CLASS);
        g.insert(st.clone());
        let v = g.version();
        assert!(g.remove(&st));
        assert!(!g.remove(&st));
        assert_eq!(g.version(), v + 1);
        assert!(g.is_empty());
        assert!(!g.has_type(&iri("A"), owl::CLASS));
        assert_eq!(g.find(None, Some(rdf::TYPE), None).count(), 0);
    }

    #[test]
    fn pattern_with_all_positions() {
        let g = StatementGraph::new();
        let st = Statement::new(iri("A"), rdf::TYPE, owl::CLASS);
        g.insert(st.clone());
        g.insert(Statement::new(iri("B"), rdf::TYPE, owl::CLASS));
        let found: Vec<_> = g
            .find(Some(&iri("A")), Some(rdf::TYPE), Some(&Node::from(owl::CLASS)))
            .collect();
        assert_eq!(found, vec![st]);
    }

    struct Recorder(Mutex<Vec<(bool, Statement)>>);

    impl GraphListener for Recorder {
        fn statement_added(&self, statement: &Statement) {
            self.0.lock().unwrap().push((true, statement.clone()));
        }
        fn statement_removed(&self, statement: &Statement) {
            self.0.lock().unwrap().push((false, statement.clone()));
        }
    }

    #[test]
    fn listeners_see_every_change() {
        let g = StatementGraph::new();
        let recorder = Arc::new(Recorder(Mutex::new(Vec::new())));
        let listener: Arc<dyn GraphListener> = recorder.clone();
        g.subscribe(&listener);

        let st = Statement::new(iri("A"), rdf::TYPE, owl::CLASS);
        g.insert(st.clone());
        g.insert(st.clone());
        g.remove(&st);

        let events = recorder.0.lock().unwrap();
        assert_eq!(events.len(), 2);
        assert!(events[0].0);
        assert!(!events[1].0);
    }

    #[test]
    fn dropped_listener_is_skipped() {
        let g = StatementGraph::new();
        {
            let listener: Arc<dyn GraphListener> = Arc::new(Recorder(Mutex::new(Vec::new())));
            g.subscribe(&listener);
        }
        g.insert(Statement::new(iri("A"), rdf::TYPE, owl::CLASS));
        assert_eq!(g.len(), 1);
    }
}
