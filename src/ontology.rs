//! An ontology: one statement graph seen through the axiom mapping.
//!
//! The ontology owns no axioms of its own. Every call reads the current
//! graph through its [`ObjectFactory`] and writes through the translators,
//! so edits made directly to the graph are visible immediately.

use std::collections::HashSet;
use std::sync::Arc;

use oxigraph::model::NamedNode;

use crate::collection::{HasOntologyId, OntologyId};
use crate::config::Config;
use crate::error::{OntResult, TranslateError};
use crate::factory::ObjectFactory;
use crate::graph::{Node, Statement, StatementGraph};
use crate::model::{Annotation, Axiom, AxiomBody, AxiomKind, Entity, OntObject, Primitive};
use crate::personality::{EntityKind, Personality};
use crate::search::{Referencing, ReverseIndex};
use crate::translate::{self, Axioms, Translator, TranslatorRegistry};
use crate::vocab::{owl, rdf};

#[derive(Debug)]
pub struct Ontology {
    graph: Arc<StatementGraph>,
    registry: Arc<TranslatorRegistry>,
    factory: ObjectFactory,
}

impl Ontology {
    /// A fresh ontology with only a header. `None` makes it anonymous.
    pub fn new(iri: Option<NamedNode>, config: Config) -> Self {
        let ontology = Self::with_graph(Arc::new(StatementGraph::new()), config);
        if let Some(iri) = iri {
            ontology.set_id(OntologyId::named(iri));
        }
        ontology
    }

    /// Wrap an existing graph. A header is added if the graph has none.
    pub fn with_graph(graph: Arc<StatementGraph>, config: Config) -> Self {
        let registry = Arc::new(TranslatorRegistry::standard());
        let factory = ObjectFactory::new(
            graph.clone(),
            Arc::new(Personality::from_config(&config)),
            registry.clone(),
            config,
        );
        let ontology = Self {
            graph,
            registry,
            factory,
        };
        if ontology.index().header().is_none() {
            ontology
                .graph
                .insert(Statement::new(Node::fresh(), rdf::TYPE, owl::ONTOLOGY));
        }
        ontology
    }

    pub fn graph(&self) -> &Arc<StatementGraph> {
        &self.graph
    }

    pub fn config(&self) -> &Config {
        self.factory.config()
    }

    pub fn personality(&self) -> &Personality {
        self.factory.personality()
    }

    pub fn factory(&self) -> &ObjectFactory {
        &self.factory
    }

    fn index(&self) -> ReverseIndex<'_> {
        ReverseIndex::new(&self.factory)
    }

    fn translator(&self, kind: AxiomKind) -> OntResult<&dyn Translator> {
        self.registry.get(kind).ok_or_else(|| {
            TranslateError::UnknownKind {
                kind: kind.to_string(),
            }
            .into()
        })
    }

    /// The id the header currently carries.
    pub fn id(&self) -> OntologyId {
        match self.index().header() {
            Some(Node::Iri(iri)) => OntologyId::Named {
                version_iri: self
                    .graph
                    .object(&Node::Iri(iri.clone()), owl::VERSION_IRI)
                    .and_then(|v| v.as_iri().cloned()),
                iri,
            },
            Some(Node::Blank(b)) => OntologyId::Anonymous(b),
            _ => OntologyId::anonymous(),
        }
    }

    /// Move the header, and everything hanging off it, to a new id.
    pub fn set_id(&self, id: OntologyId) {
        let old = self.index().header();
        let new = match &id {
            OntologyId::Named { iri, .. } => Node::Iri(iri.clone()),
            OntologyId::Anonymous(b) => Node::Blank(b.clone()),
        };
        let mut moved = Vec::new();
        let mut dropped = Vec::new();
        if let Some(old) = &old {
            for st in self.graph.find(Some(old), None, None) {
                if !st.has_predicate(owl::VERSION_IRI) {
                    moved.push(Statement::new(new.clone(), st.predicate.clone(), st.object.clone()));
                }
                dropped.push(st);
            }
            for st in self.graph.find(None, None, Some(old)) {
                moved.push(Statement::new(st.subject.clone(), st.predicate.clone(), new.clone()));
                dropped.push(st);
            }
        } else {
            moved.push(Statement::new(new.clone(), rdf::TYPE, owl::ONTOLOGY));
        }
        if let Some(version) = id.version_iri() {
            moved.push(Statement::new(new.clone(), owl::VERSION_IRI, version.clone()));
        }
        self.graph.remove_all(&dropped);
        self.graph.insert_all(moved);
        tracing::debug!(id = %id, "ontology id changed");
    }

    /// Every axiom, each distinct value once.
    pub fn axioms(&self) -> Axioms<'_> {
        self.registry
            .axioms(&self.factory, AxiomKind::ALL.iter().copied())
    }

    pub fn axioms_of_kind(&self, kind: AxiomKind) -> Axioms<'_> {
        self.registry.axioms(&self.factory, [kind])
    }

    pub fn axiom_count(&self) -> OntResult<usize> {
        self.axioms().try_fold(0, |n, axiom| axiom.map(|_| n + 1))
    }

    /// Whether the graph encodes `axiom`, annotations included.
    pub fn contains_axiom(&self, axiom: &Axiom) -> OntResult<bool> {
        let found = self
            .axioms_of_kind(axiom.kind())
            .collect::<OntResult<Vec<_>>>()?;
        let parts: Vec<&Axiom> = found.iter().map(|o| o.value()).collect();
        Ok(translate::is_covered(&parts, axiom))
    }

    /// Write `axiom` unless it is already present. Declarations are checked
    /// against the punning rules first.
    pub fn add_axiom(&self, axiom: &Axiom) -> OntResult<bool> {
        if let AxiomBody::Declaration(entity) = &axiom.body {
            let checked = self.personality().check_declaration(
                &self.graph,
                entity.iri().as_ref(),
                entity.kind(),
            );
            if let Err(e) = checked {
                tracing::warn!(entity = %entity, error = %e, "declaration rejected");
                return Err(e.into());
            }
        }
        if self.contains_axiom(axiom)? {
            return Ok(false);
        }
        let written = self.translator(axiom.kind())?.write(axiom, &self.graph)?;
        tracing::trace!(kind = %axiom.kind(), statements = written.len(), "axiom added");
        Ok(true)
    }

    /// Remove `axiom` with its annotations and any anonymous structure only
    /// it used. Returns whether anything was removed.
    pub fn remove_axiom(&self, axiom: &Axiom) -> OntResult<bool> {
        let translator = self.translator(axiom.kind())?;
        let mut roots = Vec::new();
        for found in self.axioms_of_kind(axiom.kind()) {
            let found = found?;
            if translate::is_part_of(found.value(), axiom) {
                roots.extend(found.root().cloned());
            }
        }
        let removed: usize = roots
            .iter()
            .map(|root| translator.detach(root, &self.graph))
            .sum();
        tracing::trace!(kind = %axiom.kind(), removed, "axiom removed");
        Ok(removed > 0)
    }

    /// Entities of `kind`: those declared plus the builtins the graph
    /// mentions.
    pub fn entities(&self, kind: EntityKind) -> OntResult<Vec<Arc<OntObject<Entity>>>> {
        let declared = self
            .graph
            .subjects(rdf::TYPE, &Node::from(kind.declaration_type()))
            .into_iter()
            .filter(|n| n.as_iri().is_some());
        let builtin: Vec<Node> = self
            .personality()
            .builtins(kind)
            .map(|iri| Node::Iri(iri.clone()))
            .filter(|n| self.graph.mentions(n))
            .collect();

        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for node in declared.chain(builtin) {
            if seen.insert(node.clone()) {
                out.push(self.factory.entity(&node, kind)?);
            }
        }
        Ok(out)
    }

    pub fn referencing_axioms(&self, primitive: &Primitive) -> Referencing<'_> {
        self.index().axioms_referencing(primitive)
    }

    pub fn header_annotations(&self) -> OntResult<Vec<Annotation>> {
        self.index().header_annotations()
    }

    pub fn contains_in_signature(&self, primitive: &Primitive) -> OntResult<bool> {
        self.index().contains_in_signature(primitive)
    }

    /// Switch to a new config. Objects cached under the old one are dropped.
    pub fn reconfigure(&mut self, config: Config) {
        tracing::debug!(punning = ?config.punning_mode, "reconfiguring ontology");
        self.factory = ObjectFactory::new(
            self.graph.clone(),
            Arc::new(Personality::from_config(&config)),
            self.registry.clone(),
            config,
        );
    }
}

impl HasOntologyId for Ontology {
    fn ontology_id(&self) -> OntologyId {
        self.id()
    }
}

/// Two handles are the same ontology when they share a graph.
impl PartialEq for Ontology {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.graph, &other.graph)
    }
}

impl Eq for Ontology {}
