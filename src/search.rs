//! Reverse lookup: which axioms mention a given entity, literal or
//! anonymous individual.
//!
//! Instead of reading every axiom, the index starts from the statements
//! that already hold the primitive's node, climbs from blank nodes up to the
//! statements that could root an axiom, and only runs the translators that
//! could anchor there.

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use crate::error::{OntError, OntResult};
use crate::factory::ObjectFactory;
use crate::graph::{Node, Statement};
use crate::model::{Annotation, Axiom, AxiomKind, HasComponents, OntObject, Primitive};
use crate::translate::annotations::read_annotations;
use crate::vocab::{owl, rdf};

/// The graph node a primitive is written as.
pub fn primitive_node(primitive: &Primitive) -> Node {
    match primitive {
        Primitive::Entity(e) => e.node(),
        Primitive::Literal(l) => Node::Literal(l.clone()),
        Primitive::AnonymousIndividual(b) => Node::Blank(b.clone()),
        Primitive::Iri(i) => Node::Iri(i.clone()),
    }
}

/// Reverse search over one factory's graph.
#[derive(Debug, Clone, Copy)]
pub struct ReverseIndex<'a> {
    factory: &'a ObjectFactory,
}

impl<'a> ReverseIndex<'a> {
    pub fn new(factory: &'a ObjectFactory) -> Self {
        Self { factory }
    }

    /// Axioms that mention `primitive`, each once.
    ///
    /// The sequence is computed lazily from the current graph state; calling
    /// this again restarts the search. A primitive absent from the graph
    /// gives an empty sequence.
    pub fn axioms_referencing(&self, primitive: &Primitive) -> Referencing<'a> {
        let node = primitive_node(primitive);
        let graph = self.factory.graph();
        let mut pending: VecDeque<Statement> = graph
            .find(Some(&node), None, None)
            .chain(graph.find(None, None, Some(&node)))
            .collect();
        if let Some(iri) = node.as_iri() {
            pending.extend(graph.find(None, Some(iri.as_ref()), None));
        }
        tracing::trace!(%primitive, seeds = pending.len(), "reverse search");
        Referencing {
            factory: self.factory,
            primitive: primitive.clone(),
            pending,
            visited: HashSet::new(),
            climbed: HashSet::new(),
            current: None,
            seen: HashSet::new(),
        }
    }

    /// The ontology header node: the subject of `rdf:type owl:Ontology`.
    pub fn header(&self) -> Option<Node> {
        self.factory
            .graph()
            .subjects(rdf::TYPE, &Node::from(owl::ONTOLOGY))
            .into_iter()
            .find(|n| !n.is_literal())
    }

    /// Annotations attached to the ontology header.
    pub fn header_annotations(&self) -> OntResult<Vec<Annotation>> {
        let Some(header) = self.header() else {
            return Ok(Vec::new());
        };
        let ctx = self.factory.context();
        let mut provenance = OntObject::new((), None);
        read_annotations(&ctx, &header, &mut provenance)
    }

    /// Whether the primitive occurs in any axiom or header annotation.
    pub fn contains_in_signature(&self, primitive: &Primitive) -> OntResult<bool> {
        if let Some(axiom) = self.axioms_referencing(primitive).next() {
            axiom?;
            return Ok(true);
        }
        Ok(self
            .header_annotations()?
            .iter()
            .any(|a| a.components().mentions(primitive)))
    }
}

/// Lazy sequence of axioms mentioning one primitive.
pub struct Referencing<'a> {
    factory: &'a ObjectFactory,
    primitive: Primitive,
    pending: VecDeque<Statement>,
    visited: HashSet<Statement>,
    climbed: HashSet<Node>,
    current: Option<(Statement, std::slice::Iter<'static, AxiomKind>)>,
    seen: HashSet<Axiom>,
}

impl Referencing<'_> {
    /// Queue the statements a blank node hangs from.
    fn climb(&mut self, node: &Node) {
        if !node.is_blank() || !self.climbed.insert(node.clone()) {
            return;
        }
        let graph = self.factory.graph();
        self.pending.extend(graph.find(Some(node), Some(rdf::TYPE), None));
        if graph.has_type(node, owl::AXIOM) || graph.has_type(node, owl::ANNOTATION) {
            let source = graph.object(node, owl::ANNOTATED_SOURCE);
            let property = graph.object(node, owl::ANNOTATED_PROPERTY);
            let target = graph.object(node, owl::ANNOTATED_TARGET);
            if let (Some(s), Some(Node::Iri(p)), Some(o)) = (source, property, target) {
                let annotated = Statement::new(s, p, o);
                if graph.contains(&annotated) {
                    self.pending.push_back(annotated);
                }
            }
        }
        self.pending.extend(graph.find(None, None, Some(node)));
    }

    fn next_root(&mut self) -> Option<Statement> {
        while let Some(st) = self.pending.pop_front() {
            if !self.visited.insert(st.clone()) {
                continue;
            }
            let subject = st.subject.clone();
            self.climb(&subject);
            return Some(st);
        }
        None
    }
}

impl Iterator for Referencing<'_> {
    type Item = OntResult<Arc<OntObject<Axiom>>>;

    fn next(&mut self) -> Option<Self::Item> {
        let factory = self.factory;
        let registry = factory.registry();
        let personality = factory.personality();
        loop {
            let Some((st, kinds)) = &mut self.current else {
                let st = self.next_root()?;
                self.current = Some((st, AxiomKind::ALL.iter()));
                continue;
            };
            let Some(&kind) = kinds.next() else {
                self.current = None;
                continue;
            };
            let Some(translator) = registry.get(kind) else {
                continue;
            };
            if !translator.could_anchor(personality, st) {
                continue;
            }
            let ctx = factory.context();
            if !translator.matches(&ctx, st) {
                continue;
            }
            match ctx.axiom(st, kind) {
                Ok(axiom) => {
                    if axiom.references(&self.primitive) && self.seen.insert(axiom.value().clone())
                    {
                        return Some(Ok(axiom));
                    }
                }
                Err(e)
                    if factory.config().ignore_read_errors
                        && (e.is_local() || matches!(e, OntError::View(_))) =>
                {
                    tracing::debug!(%kind, statement = %st, error = %e, "skipping statement");
                }
                Err(e) => return Some(Err(e)),
            }
        }
    }
}
