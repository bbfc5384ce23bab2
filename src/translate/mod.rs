//! Axiom translators: statement patterns to typed axioms and back.
//!
//! There is one [`Translator`] per [`AxiomKind`]. All standard kinds share the
//! generic [`AxiomTranslator`], parameterised by a [`Shape`] that says where
//! the axiom is rooted, which statements are candidates, and what its operand
//! positions must resolve as.

pub(crate) mod annotations;
mod emit;
mod read;

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use oxigraph::model::NamedNodeRef;

use crate::error::{OntError, OntResult, TranslateError};
use crate::factory::{ObjectFactory, ReadContext};
use crate::graph::list::read_list;
use crate::graph::{Node, Statement, StatementGraph, Statements};
use crate::model::{Axiom, AxiomBody, AxiomKind, OntObject, Operands};
use crate::personality::{Capability, EntityKind, Personality};
use crate::vocab::{self, owl, rdf, rdfs};

use emit::Writer;
use read::Reader;

/// Reads and writes one axiom kind.
pub trait Translator: Send + Sync {
    fn kind(&self) -> AxiomKind;

    /// Statements that may root an axiom of this kind.
    fn candidates(&self, graph: &StatementGraph) -> Statements;

    /// Cheap positional test: could `statement` root this kind at all?
    fn could_anchor(&self, personality: &Personality, statement: &Statement) -> bool;

    /// Full recognition: every operand position resolves as required.
    fn matches(&self, ctx: &ReadContext<'_>, statement: &Statement) -> bool;

    fn read(&self, ctx: &ReadContext<'_>, statement: &Statement) -> OntResult<OntObject<Axiom>>;

    /// The statements encoding `axiom`, without touching any graph.
    fn emit(&self, axiom: &Axiom) -> OntResult<Vec<Statement>>;

    fn write(&self, axiom: &Axiom, graph: &StatementGraph) -> OntResult<Vec<Statement>> {
        let statements = self.emit(axiom)?;
        graph.insert_all(statements.iter().cloned());
        Ok(statements)
    }

    /// Remove the axiom rooted at `root` together with its annotations and
    /// any anonymous structure left unreferenced. Returns how many
    /// statements were removed.
    fn detach(&self, root: &Statement, graph: &StatementGraph) -> usize;
}

/// What an operand position must resolve as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    ClassExpression,
    DataRange,
    /// A named or inverse object property.
    ObjectProperty,
    NamedObjectProperty,
    DataProperty,
    AnnotationProperty,
    Datatype,
    Class,
    Individual,
    Iri,
    /// Either kind of property, as listed by `owl:hasKey`.
    KeyProperty,
}

impl Role {
    pub fn accepts(self, personality: &Personality, graph: &StatementGraph, node: &Node) -> bool {
        let can = |capability| personality.can_view(graph, node, capability);
        match self {
            Role::ClassExpression => can(Capability::ClassExpression),
            Role::DataRange => can(Capability::DataRange),
            Role::ObjectProperty => can(Capability::ObjectPropertyExpression),
            Role::NamedObjectProperty => can(Capability::Entity(EntityKind::ObjectProperty)),
            Role::DataProperty => can(Capability::Entity(EntityKind::DataProperty)),
            Role::AnnotationProperty => can(Capability::Entity(EntityKind::AnnotationProperty)),
            Role::Datatype => can(Capability::Entity(EntityKind::Datatype)),
            Role::Class => can(Capability::Entity(EntityKind::Class)),
            Role::Individual => can(Capability::Individual),
            Role::Iri => node.as_iri().is_some(),
            Role::KeyProperty => {
                can(Capability::ObjectPropertyExpression)
                    || can(Capability::Entity(EntityKind::DataProperty))
            }
        }
    }
}

/// Where an axiom kind is rooted and how it is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// `e rdf:type <declaration type>`.
    Declaration,
    /// `s predicate o`.
    Triple {
        predicate: NamedNodeRef<'static>,
        subject: Role,
        object: Role,
    },
    /// `s rdf:type ty`.
    Typed {
        ty: NamedNodeRef<'static>,
        role: Role,
    },
    /// n-ary, one `a predicate b` triple per extra operand.
    Pairwise {
        predicate: NamedNodeRef<'static>,
        role: Role,
    },
    /// n-ary, a single triple for two operands, otherwise an anonymous
    /// `members_type` node with an `owl:members` list.
    TwoWay {
        predicate: NamedNodeRef<'static>,
        members_type: NamedNodeRef<'static>,
        role: Role,
    },
    /// `s predicate ( m1 m2 ... )`.
    ListValued {
        predicate: NamedNodeRef<'static>,
        subject: Role,
        member: Role,
    },
    /// An anonymous `owl:NegativePropertyAssertion` node.
    Negative { data: bool },
    /// `i rdf:type C`.
    ClassAssertion,
    /// `a p b` with a user property in predicate position.
    PropertyAssertion { data: bool },
    /// `s p v` with an annotation property in predicate position.
    AnnotationAssertion,
}

/// The translator behind every standard axiom kind.
#[derive(Debug, Clone, Copy)]
pub struct AxiomTranslator {
    kind: AxiomKind,
    shape: Shape,
}

impl AxiomTranslator {
    pub const fn new(kind: AxiomKind, shape: Shape) -> Self {
        Self { kind, shape }
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Rooted at an anonymous node rather than at a triple.
    fn is_anonymous_root(&self, root: &Statement) -> bool {
        if !root.has_predicate(rdf::TYPE) || !root.subject.is_blank() {
            return false;
        }
        match self.shape {
            Shape::TwoWay { members_type, .. } => root.object.is(members_type),
            Shape::Negative { .. } => root.object.is(owl::NEGATIVE_PROPERTY_ASSERTION),
            _ => false,
        }
    }

    fn invalid(&self, reason: impl Into<String>) -> OntError {
        TranslateError::InvalidAxiom {
            kind: self.kind.to_string(),
            reason: reason.into(),
        }
        .into()
    }

    fn predicate(&self) -> NamedNodeRef<'static> {
        match self.shape {
            Shape::Triple { predicate, .. }
            | Shape::Pairwise { predicate, .. }
            | Shape::TwoWay { predicate, .. }
            | Shape::ListValued { predicate, .. } => predicate,
            Shape::Typed { ty, .. } => ty,
            _ => rdf::TYPE,
        }
    }

    fn list_accepts(
        personality: &Personality,
        graph: &StatementGraph,
        head: Option<Node>,
        role: Role,
    ) -> bool {
        let Some(head) = head else {
            return false;
        };
        match read_list(graph, &head) {
            Ok(list) => list
                .items
                .iter()
                .all(|item| role.accepts(personality, graph, item)),
            Err(_) => false,
        }
    }

    /// Operand nodes of an n-ary body, each flagged as anonymous or not.
    fn nary_nodes(&self, w: &mut Writer, body: &AxiomBody) -> OntResult<Vec<(Node, bool)>> {
        use AxiomBody as B;
        Ok(match body {
            B::EquivalentClasses(ops) | B::DisjointClasses(ops) => ops
                .iter()
                .map(|ce| (w.class(ce), ce.is_anonymous()))
                .collect(),
            B::EquivalentObjectProperties(ops) | B::DisjointObjectProperties(ops) => ops
                .iter()
                .map(|p| (w.object_property(p), p.is_anonymous()))
                .collect(),
            B::EquivalentDataProperties(ops) | B::DisjointDataProperties(ops) => {
                ops.iter().map(|p| (p.node(), false)).collect()
            }
            B::SameIndividual(ops) | B::DifferentIndividuals(ops) => ops
                .iter()
                .map(|i| (w.individual(i), i.is_anonymous()))
                .collect(),
            other => {
                return Err(self.invalid(format!("{} is not an n-ary axiom", other.kind())));
            }
        })
    }

    /// Subject and object nodes of a single-triple body.
    fn triple_nodes(&self, w: &mut Writer, body: &AxiomBody) -> OntResult<(Node, Node)> {
        use crate::model::ObjectPropertyExpression as Ope;
        use AxiomBody as B;
        Ok(match body {
            B::SubClassOf { sub, sup } => (w.class(sub), w.class(sup)),
            B::SubObjectPropertyOf { sub, sup } => (w.object_property(sub), w.object_property(sup)),
            B::InverseObjectProperties(ops) => {
                let named: Vec<Node> = ops
                    .iter()
                    .map(|p| match p {
                        Ope::Named(p) => Ok(p.node()),
                        Ope::Inverse(_) => Err(self.invalid("operands must be named properties")),
                    })
                    .collect::<OntResult<_>>()?;
                match named.as_slice() {
                    [p] => (p.clone(), p.clone()),
                    [p, q] => (p.clone(), q.clone()),
                    _ => return Err(self.invalid("expected one or two operands")),
                }
            }
            B::ObjectPropertyDomain { property, domain } => {
                (w.object_property(property), w.class(domain))
            }
            B::ObjectPropertyRange { property, range } => {
                (w.object_property(property), w.class(range))
            }
            B::SubDataPropertyOf { sub, sup } => (sub.node(), sup.node()),
            B::DataPropertyDomain { property, domain } => (property.node(), w.class(domain)),
            B::DataPropertyRange { property, range } => (property.node(), w.range(range)),
            B::DatatypeDefinition { datatype, range } => (datatype.node(), w.range(range)),
            B::SubAnnotationPropertyOf { sub, sup } => (sub.node(), sup.node()),
            B::AnnotationPropertyDomain { property, domain } => {
                (property.node(), Node::Iri(domain.clone()))
            }
            B::AnnotationPropertyRange { property, range } => {
                (property.node(), Node::Iri(range.clone()))
            }
            other => {
                return Err(self.invalid(format!("{} is not a single-triple axiom", other.kind())));
            }
        })
    }
}

impl Translator for AxiomTranslator {
    fn kind(&self) -> AxiomKind {
        self.kind
    }

    fn candidates(&self, graph: &StatementGraph) -> Statements {
        match self.shape {
            Shape::Declaration | Shape::ClassAssertion => graph.find(None, Some(rdf::TYPE), None),
            Shape::Triple { predicate, .. }
            | Shape::Pairwise { predicate, .. }
            | Shape::ListValued { predicate, .. } => graph.find(None, Some(predicate), None),
            Shape::Typed { ty, .. } => graph.find(None, Some(rdf::TYPE), Some(&Node::from(ty))),
            Shape::TwoWay {
                predicate,
                members_type,
                ..
            } => graph
                .find(None, Some(predicate), None)
                .chain(graph.find(None, Some(rdf::TYPE), Some(&Node::from(members_type))))
                .collect(),
            Shape::Negative { .. } => graph.find(
                None,
                Some(rdf::TYPE),
                Some(&Node::from(owl::NEGATIVE_PROPERTY_ASSERTION)),
            ),
            Shape::PropertyAssertion { .. } | Shape::AnnotationAssertion => graph.statements(),
        }
    }

    fn could_anchor(&self, personality: &Personality, st: &Statement) -> bool {
        let typed = st.has_predicate(rdf::TYPE);
        match self.shape {
            Shape::Declaration => {
                typed
                    && st
                        .object
                        .as_iri()
                        .is_some_and(|ty| EntityKind::from_declaration_type(ty.as_ref()).is_some())
            }
            Shape::Triple { predicate, .. }
            | Shape::Pairwise { predicate, .. }
            | Shape::ListValued { predicate, .. } => st.has_predicate(predicate),
            Shape::Typed { ty, .. } => typed && st.object.is(ty),
            Shape::TwoWay {
                predicate,
                members_type,
                ..
            } => {
                st.has_predicate(predicate)
                    || (typed && st.subject.is_blank() && st.object.is(members_type))
            }
            Shape::Negative { .. } => {
                typed && st.subject.is_blank() && st.object.is(owl::NEGATIVE_PROPERTY_ASSERTION)
            }
            Shape::ClassAssertion => {
                typed
                    && match &st.object {
                        Node::Blank(_) => true,
                        Node::Iri(iri) => !personality.is_reserved(iri.as_ref()),
                        Node::Literal(_) => false,
                    }
            }
            Shape::PropertyAssertion { data } => {
                !typed
                    && !personality.is_reserved(st.predicate.as_ref())
                    && st.object.is_literal() == data
            }
            Shape::AnnotationAssertion => {
                !typed && !personality.is_reserved(st.predicate.as_ref())
            }
        }
    }

    fn matches(&self, ctx: &ReadContext<'_>, st: &Statement) -> bool {
        let personality = ctx.personality();
        if !self.could_anchor(personality, st) {
            return false;
        }
        let graph = ctx.graph();
        let accepts = |role: Role, node: &Node| role.accepts(personality, graph, node);
        let predicate = Node::Iri(st.predicate.clone());

        match self.shape {
            Shape::Declaration => {
                let kind = st
                    .object
                    .as_iri()
                    .and_then(|ty| EntityKind::from_declaration_type(ty.as_ref()));
                ctx.config().allow_read_declarations
                    && kind.is_some_and(|kind| {
                        personality.can_view(graph, &st.subject, Capability::Entity(kind))
                    })
            }
            Shape::Triple {
                subject, object, ..
            } => accepts(subject, &st.subject) && accepts(object, &st.object),
            Shape::Pairwise { role, .. } => accepts(role, &st.subject) && accepts(role, &st.object),
            Shape::Typed { role, .. } => accepts(role, &st.subject),
            Shape::TwoWay {
                predicate: pairwise,
                role,
                ..
            } => {
                if st.has_predicate(pairwise) {
                    accepts(role, &st.subject) && accepts(role, &st.object)
                } else {
                    let head = graph.object(&st.subject, owl::MEMBERS).or_else(|| {
                        (self.kind == AxiomKind::DifferentIndividuals)
                            .then(|| graph.object(&st.subject, owl::DISTINCT_MEMBERS))
                            .flatten()
                    });
                    Self::list_accepts(personality, graph, head, role)
                }
            }
            Shape::ListValued {
                subject, member, ..
            } => {
                accepts(subject, &st.subject)
                    && Self::list_accepts(personality, graph, Some(st.object.clone()), member)
            }
            Shape::Negative { data } => {
                let source = graph.object(&st.subject, owl::SOURCE_INDIVIDUAL);
                let property = graph.object(&st.subject, owl::ASSERTION_PROPERTY);
                let (property_role, target) = if data {
                    (Role::DataProperty, graph.object(&st.subject, owl::TARGET_VALUE))
                } else {
                    (
                        Role::ObjectProperty,
                        graph.object(&st.subject, owl::TARGET_INDIVIDUAL),
                    )
                };
                match (source, property, target) {
                    (Some(source), Some(property), Some(target)) => {
                        accepts(Role::Individual, &source)
                            && accepts(property_role, &property)
                            && if data {
                                target.is_literal()
                            } else {
                                accepts(Role::Individual, &target)
                            }
                    }
                    _ => false,
                }
            }
            Shape::ClassAssertion => {
                accepts(Role::Individual, &st.subject) && accepts(Role::ClassExpression, &st.object)
            }
            Shape::PropertyAssertion { data } => {
                let property_role = if data {
                    Role::DataProperty
                } else {
                    Role::NamedObjectProperty
                };
                accepts(property_role, &predicate)
                    && accepts(Role::Individual, &st.subject)
                    && (data || accepts(Role::Individual, &st.object))
            }
            Shape::AnnotationAssertion => {
                let header = st.subject.as_iri().is_some() && graph.has_type(&st.subject, owl::ONTOLOGY);
                !header
                    && personality.can_view(graph, &st.subject, Capability::AnnotationSubject)
                    && accepts(Role::AnnotationProperty, &predicate)
                    && personality.can_view(graph, &st.object, Capability::AnnotationValue)
            }
        }
    }

    fn read(&self, ctx: &ReadContext<'_>, st: &Statement) -> OntResult<OntObject<Axiom>> {
        let mut reader = Reader::new(ctx, st, self.kind);
        if !self.could_anchor(ctx.personality(), st) {
            return Err(reader.malformed("statement cannot root this axiom kind"));
        }
        let (body, anonymous) = read::read_body(&mut reader, self.kind)?;
        reader.finish(body, anonymous)
    }

    fn emit(&self, axiom: &Axiom) -> OntResult<Vec<Statement>> {
        use AxiomBody as B;
        if axiom.kind() != self.kind {
            return Err(self.invalid(format!("got a {} axiom", axiom.kind())));
        }
        let mut w = Writer::new();
        let annotations = axiom.annotations.as_slice();
        let predicate = self.predicate();

        match (self.shape, &axiom.body) {
            (Shape::Declaration, B::Declaration(entity)) => w.root(
                entity.node(),
                rdf::TYPE,
                Node::from(entity.kind().declaration_type()),
                annotations,
            ),
            (Shape::Triple { .. }, body) => {
                let (s, o) = self.triple_nodes(&mut w, body)?;
                w.root(s, predicate, o, annotations);
            }
            (Shape::Typed { ty, .. }, body) => {
                let subject = match body {
                    B::ObjectCharacteristic(_, p) => w.object_property(p),
                    B::FunctionalDataProperty(p) => p.node(),
                    other => {
                        return Err(self.invalid(format!("{} is not a typed axiom", other.kind())));
                    }
                };
                w.root(subject, rdf::TYPE, Node::from(ty), annotations);
            }
            (Shape::Pairwise { .. }, body) => {
                let nodes = self.nary_nodes(&mut w, body)?;
                let pivot = nodes.iter().position(|(_, anon)| !anon).unwrap_or(0);
                match nodes.as_slice() {
                    [] => return Err(self.invalid("no operands")),
                    [(only, _)] => w.root(only.clone(), predicate, only.clone(), annotations),
                    _ => {
                        let subject = nodes[pivot].0.clone();
                        for (i, (node, _)) in nodes.iter().enumerate() {
                            if i != pivot {
                                w.root(subject.clone(), predicate, node.clone(), annotations);
                            }
                        }
                    }
                }
            }
            (Shape::TwoWay { members_type, .. }, body) => {
                let nodes = self.nary_nodes(&mut w, body)?;
                let named = nodes.iter().position(|(_, anon)| !anon);
                match (nodes.len(), named) {
                    (0 | 1, _) => return Err(self.invalid("needs at least two operands")),
                    (2, Some(first)) => {
                        let other = 1 - first;
                        w.root(
                            nodes[first].0.clone(),
                            predicate,
                            nodes[other].0.clone(),
                            annotations,
                        );
                    }
                    _ => {
                        let items: Vec<Node> = nodes.into_iter().map(|(n, _)| n).collect();
                        let head = w.list(&items);
                        let x = Node::fresh();
                        w.out.push(Statement::new(x.clone(), rdf::TYPE, members_type));
                        w.out.push(Statement::new(x.clone(), owl::MEMBERS, head));
                        w.annotate(&x, annotations);
                    }
                }
            }
            (Shape::ListValued { .. }, body) => {
                let (subject, items) = match body {
                    B::DisjointUnion { class, operands } => {
                        let items: Vec<Node> = operands.iter().map(|ce| w.class(ce)).collect();
                        (class.node(), items)
                    }
                    B::SubPropertyChainOf { chain, sup } => {
                        let items: Vec<Node> = chain.iter().map(|p| w.object_property(p)).collect();
                        (w.object_property(sup), items)
                    }
                    B::HasKey {
                        class,
                        object_properties,
                        data_properties,
                    } => {
                        let mut items: Vec<Node> = object_properties
                            .iter()
                            .map(|p| w.object_property(p))
                            .collect();
                        items.extend(data_properties.iter().map(|p| p.node()));
                        (w.class(class), items)
                    }
                    other => {
                        return Err(self.invalid(format!("{} is not list-valued", other.kind())));
                    }
                };
                let head = w.list(&items);
                w.root(subject, predicate, head, annotations);
            }
            (Shape::Negative { .. }, body) => {
                let (property, subject, target_predicate, target) = match body {
                    B::NegativeObjectPropertyAssertion {
                        property,
                        subject,
                        object,
                    } => (
                        w.object_property(property),
                        w.individual(subject),
                        owl::TARGET_INDIVIDUAL,
                        w.individual(object),
                    ),
                    B::NegativeDataPropertyAssertion {
                        property,
                        subject,
                        value,
                    } => (
                        property.node(),
                        w.individual(subject),
                        owl::TARGET_VALUE,
                        Node::Literal(value.clone()),
                    ),
                    other => {
                        return Err(self.invalid(format!("{} is not a negative assertion", other.kind())));
                    }
                };
                let x = Node::fresh();
                w.out.extend([
                    Statement::new(x.clone(), rdf::TYPE, owl::NEGATIVE_PROPERTY_ASSERTION),
                    Statement::new(x.clone(), owl::SOURCE_INDIVIDUAL, subject),
                    Statement::new(x.clone(), owl::ASSERTION_PROPERTY, property),
                    Statement::new(x.clone(), target_predicate, target),
                ]);
                w.annotate(&x, annotations);
            }
            (Shape::ClassAssertion, B::ClassAssertion { class, individual }) => {
                let class = w.class(class);
                let individual = w.individual(individual);
                w.root(individual, rdf::TYPE, class, annotations);
            }
            (
                Shape::PropertyAssertion { .. },
                B::ObjectPropertyAssertion {
                    property,
                    subject,
                    object,
                },
            ) => {
                let (s, o) = (w.individual(subject), w.individual(object));
                w.root(s, property.iri().as_ref(), o, annotations);
            }
            (
                Shape::PropertyAssertion { .. },
                B::DataPropertyAssertion {
                    property,
                    subject,
                    value,
                },
            ) => {
                let s = w.individual(subject);
                w.root(
                    s,
                    property.iri().as_ref(),
                    Node::Literal(value.clone()),
                    annotations,
                );
            }
            (
                Shape::AnnotationAssertion,
                B::AnnotationAssertion {
                    subject,
                    property,
                    value,
                },
            ) => w.root(
                subject.node(),
                property.iri().as_ref(),
                value.node(),
                annotations,
            ),
            (shape, body) => {
                return Err(self.invalid(format!(
                    "{} cannot be written as {shape:?}",
                    body.kind()
                )));
            }
        }
        Ok(w.out)
    }

    fn detach(&self, root: &Statement, graph: &StatementGraph) -> usize {
        let mut doomed = vec![root.clone()];
        if self.is_anonymous_root(root) {
            doomed.extend(annotations::annotation_subtree(graph, &root.subject));
        } else {
            for x in annotations::reification_nodes(graph, root, owl::AXIOM) {
                doomed.extend(annotations::annotation_subtree(graph, &x));
            }
        }
        let removed = graph.remove_all(&doomed);
        let seeds = doomed
            .into_iter()
            .flat_map(|st| [st.subject, st.object])
            .collect();
        let swept = sweep_orphans(graph, seeds);
        tracing::trace!(kind = %self.kind, root = %root, removed, swept, "detached axiom");
        removed + swept
    }
}

/// Remove blank nodes that nothing references any more and that only carry
/// structural statements, following their objects.
fn sweep_orphans(graph: &StatementGraph, seeds: Vec<Node>) -> usize {
    let mut removed = 0;
    let mut seen = HashSet::new();
    let mut stack = seeds;
    while let Some(node) = stack.pop() {
        if !node.is_blank() || !seen.insert(node.clone()) {
            continue;
        }
        if graph.find(None, None, Some(&node)).next().is_some() {
            continue;
        }
        let own: Vec<Statement> = graph.find(Some(&node), None, None).collect();
        let structural = own.iter().all(|st| {
            vocab::is_structural_predicate(st.predicate.as_ref())
                && (!st.has_predicate(rdf::TYPE)
                    || st
                        .object
                        .as_iri()
                        .is_some_and(|ty| vocab::is_system_namespace(ty.as_str())))
        });
        if own.is_empty() || !structural {
            continue;
        }
        removed += graph.remove_all(&own);
        stack.extend(own.into_iter().map(|st| st.object));
    }
    removed
}

/// Whether `found`, read back from the graph, is one of the statements
/// encoding `whole`. Pairwise kinds come back one pair at a time.
pub fn is_part_of(found: &Axiom, whole: &Axiom) -> bool {
    use AxiomBody as B;
    fn subset<T: PartialEq>(a: &Operands<T>, b: &Operands<T>) -> bool {
        a.iter().all(|x| b.contains(x))
    }
    if found == whole {
        return true;
    }
    if found.annotations != whole.annotations {
        return false;
    }
    match (&found.body, &whole.body) {
        (B::EquivalentClasses(a), B::EquivalentClasses(b)) => subset(a, b),
        (B::EquivalentObjectProperties(a), B::EquivalentObjectProperties(b)) => subset(a, b),
        (B::EquivalentDataProperties(a), B::EquivalentDataProperties(b)) => subset(a, b),
        (B::SameIndividual(a), B::SameIndividual(b)) => subset(a, b),
        _ => false,
    }
}

/// Whether the binary pieces read back from the graph together make up
/// `whole`. Every operand must occur in some piece.
pub fn is_covered(parts: &[&Axiom], whole: &Axiom) -> bool {
    use AxiomBody as B;
    fn covers<'p, T: PartialEq + 'p>(
        pieces: impl Iterator<Item = &'p Operands<T>> + Clone,
        whole: &Operands<T>,
    ) -> bool {
        whole
            .iter()
            .all(|x| pieces.clone().any(|piece| piece.contains(x)))
    }
    if parts.iter().any(|p| *p == whole) {
        return true;
    }
    let parts = parts.iter().filter(|p| is_part_of(p, whole));
    match &whole.body {
        B::EquivalentClasses(w) => covers(
            parts.filter_map(|p| match &p.body {
                B::EquivalentClasses(o) => Some(o),
                _ => None,
            }),
            w,
        ),
        B::EquivalentObjectProperties(w) => covers(
            parts.filter_map(|p| match &p.body {
                B::EquivalentObjectProperties(o) => Some(o),
                _ => None,
            }),
            w,
        ),
        B::EquivalentDataProperties(w) => covers(
            parts.filter_map(|p| match &p.body {
                B::EquivalentDataProperties(o) => Some(o),
                _ => None,
            }),
            w,
        ),
        B::SameIndividual(w) => covers(
            parts.filter_map(|p| match &p.body {
                B::SameIndividual(o) => Some(o),
                _ => None,
            }),
            w,
        ),
        _ => false,
    }
}

/// One translator per axiom kind. Immutable once built.
pub struct TranslatorRegistry {
    translators: HashMap<AxiomKind, Arc<dyn Translator>>,
}

impl TranslatorRegistry {
    pub fn empty() -> Self {
        Self {
            translators: HashMap::new(),
        }
    }

    /// Register `translator`, replacing any previous one for its kind.
    pub fn with(mut self, translator: impl Translator + 'static) -> Self {
        self.translators.insert(translator.kind(), Arc::new(translator));
        self
    }

    /// Translators for all OWL 2 axiom kinds.
    pub fn standard() -> Self {
        use AxiomKind as K;
        use Role as R;

        let triple = |predicate, subject, object| Shape::Triple {
            predicate,
            subject,
            object,
        };
        let typed = |ty, role| Shape::Typed { ty, role };
        let two_way = |predicate, members_type, role| Shape::TwoWay {
            predicate,
            members_type,
            role,
        };
        let list = |predicate, subject, member| Shape::ListValued {
            predicate,
            subject,
            member,
        };
        let pairwise = |predicate, role| Shape::Pairwise { predicate, role };

        let table = [
            (K::Declaration, Shape::Declaration),
            (
                K::SubClassOf,
                triple(rdfs::SUB_CLASS_OF, R::ClassExpression, R::ClassExpression),
            ),
            (
                K::EquivalentClasses,
                pairwise(owl::EQUIVALENT_CLASS, R::ClassExpression),
            ),
            (
                K::DisjointClasses,
                two_way(owl::DISJOINT_WITH, owl::ALL_DISJOINT_CLASSES, R::ClassExpression),
            ),
            (
                K::DisjointUnion,
                list(owl::DISJOINT_UNION_OF, R::Class, R::ClassExpression),
            ),
            (
                K::SubObjectPropertyOf,
                triple(rdfs::SUB_PROPERTY_OF, R::ObjectProperty, R::ObjectProperty),
            ),
            (
                K::SubPropertyChainOf,
                list(owl::PROPERTY_CHAIN_AXIOM, R::ObjectProperty, R::ObjectProperty),
            ),
            (
                K::EquivalentObjectProperties,
                pairwise(owl::EQUIVALENT_PROPERTY, R::ObjectProperty),
            ),
            (
                K::DisjointObjectProperties,
                two_way(
                    owl::PROPERTY_DISJOINT_WITH,
                    owl::ALL_DISJOINT_PROPERTIES,
                    R::ObjectProperty,
                ),
            ),
            (
                K::InverseObjectProperties,
                triple(owl::INVERSE_OF, R::NamedObjectProperty, R::NamedObjectProperty),
            ),
            (
                K::ObjectPropertyDomain,
                triple(rdfs::DOMAIN, R::ObjectProperty, R::ClassExpression),
            ),
            (
                K::ObjectPropertyRange,
                triple(rdfs::RANGE, R::ObjectProperty, R::ClassExpression),
            ),
            (
                K::FunctionalObjectProperty,
                typed(owl::FUNCTIONAL_PROPERTY, R::ObjectProperty),
            ),
            (
                K::InverseFunctionalObjectProperty,
                typed(owl::INVERSE_FUNCTIONAL_PROPERTY, R::ObjectProperty),
            ),
            (
                K::ReflexiveObjectProperty,
                typed(owl::REFLEXIVE_PROPERTY, R::ObjectProperty),
            ),
            (
                K::IrreflexiveObjectProperty,
                typed(owl::IRREFLEXIVE_PROPERTY, R::ObjectProperty),
            ),
            (
                K::SymmetricObjectProperty,
                typed(owl::SYMMETRIC_PROPERTY, R::ObjectProperty),
            ),
            (
                K::AsymmetricObjectProperty,
                typed(owl::ASYMMETRIC_PROPERTY, R::ObjectProperty),
            ),
            (
                K::TransitiveObjectProperty,
                typed(owl::TRANSITIVE_PROPERTY, R::ObjectProperty),
            ),
            (
                K::SubDataPropertyOf,
                triple(rdfs::SUB_PROPERTY_OF, R::DataProperty, R::DataProperty),
            ),
            (
                K::EquivalentDataProperties,
                pairwise(owl::EQUIVALENT_PROPERTY, R::DataProperty),
            ),
            (
                K::DisjointDataProperties,
                two_way(
                    owl::PROPERTY_DISJOINT_WITH,
                    owl::ALL_DISJOINT_PROPERTIES,
                    R::DataProperty,
                ),
            ),
            (
                K::DataPropertyDomain,
                triple(rdfs::DOMAIN, R::DataProperty, R::ClassExpression),
            ),
            (
                K::DataPropertyRange,
                triple(rdfs::RANGE, R::DataProperty, R::DataRange),
            ),
            (
                K::FunctionalDataProperty,
                typed(owl::FUNCTIONAL_PROPERTY, R::DataProperty),
            ),
            (
                K::DatatypeDefinition,
                triple(owl::EQUIVALENT_CLASS, R::Datatype, R::DataRange),
            ),
            (K::HasKey, list(owl::HAS_KEY, R::ClassExpression, R::KeyProperty)),
            (K::ClassAssertion, Shape::ClassAssertion),
            (
                K::ObjectPropertyAssertion,
                Shape::PropertyAssertion { data: false },
            ),
            (
                K::NegativeObjectPropertyAssertion,
                Shape::Negative { data: false },
            ),
            (
                K::DataPropertyAssertion,
                Shape::PropertyAssertion { data: true },
            ),
            (
                K::NegativeDataPropertyAssertion,
                Shape::Negative { data: true },
            ),
            (K::SameIndividual, pairwise(owl::SAME_AS, R::Individual)),
            (
                K::DifferentIndividuals,
                two_way(owl::DIFFERENT_FROM, owl::ALL_DIFFERENT, R::Individual),
            ),
            (K::AnnotationAssertion, Shape::AnnotationAssertion),
            (
                K::SubAnnotationPropertyOf,
                triple(
                    rdfs::SUB_PROPERTY_OF,
                    R::AnnotationProperty,
                    R::AnnotationProperty,
                ),
            ),
            (
                K::AnnotationPropertyDomain,
                triple(rdfs::DOMAIN, R::AnnotationProperty, R::Iri),
            ),
            (
                K::AnnotationPropertyRange,
                triple(rdfs::RANGE, R::AnnotationProperty, R::Iri),
            ),
        ];

        table
            .into_iter()
            .fold(Self::empty(), |registry, (kind, shape)| {
                registry.with(AxiomTranslator::new(kind, shape))
            })
    }

    pub fn get(&self, kind: AxiomKind) -> Option<&dyn Translator> {
        self.translators.get(&kind).map(|t| t.as_ref())
    }

    /// Registered kinds, in declaration order.
    pub fn kinds(&self) -> Vec<AxiomKind> {
        AxiomKind::ALL
            .iter()
            .copied()
            .filter(|k| self.translators.contains_key(k))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.translators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.translators.is_empty()
    }

    /// Lazily read every axiom of `kinds` from the factory's graph.
    pub fn axioms<'a>(
        &'a self,
        factory: &'a ObjectFactory,
        kinds: impl IntoIterator<Item = AxiomKind>,
    ) -> Axioms<'a> {
        Axioms {
            registry: self,
            factory,
            kinds: kinds.into_iter().collect::<Vec<_>>().into_iter(),
            current: None,
            seen: HashSet::new(),
        }
    }
}

impl Default for TranslatorRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for TranslatorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslatorRegistry")
            .field("kinds", &self.translators.len())
            .finish()
    }
}

/// Axioms read kind by kind, each distinct value once.
///
/// Candidate statements are snapshotted per kind, so no graph lock is held
/// between calls to `next`. Dropping the iterator early releases everything.
pub struct Axioms<'a> {
    registry: &'a TranslatorRegistry,
    factory: &'a ObjectFactory,
    kinds: std::vec::IntoIter<AxiomKind>,
    current: Option<(&'a dyn Translator, Statements)>,
    seen: HashSet<Axiom>,
}

impl Iterator for Axioms<'_> {
    type Item = OntResult<Arc<OntObject<Axiom>>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let Some((translator, statements)) = &mut self.current else {
                let kind = self.kinds.next()?;
                if let Some(translator) = self.registry.get(kind) {
                    let statements = translator.candidates(self.factory.graph());
                    self.current = Some((translator, statements));
                }
                continue;
            };
            let translator = *translator;
            let Some(st) = statements.next() else {
                self.current = None;
                continue;
            };

            let ctx = self.factory.context();
            if !translator.matches(&ctx, &st) {
                continue;
            }
            match ctx.axiom(&st, translator.kind()) {
                Ok(axiom) => {
                    if self.seen.insert(axiom.value().clone()) {
                        return Some(Ok(axiom));
                    }
                }
                Err(e)
                    if self.factory.config().ignore_read_errors
                        && (e.is_local() || matches!(e, OntError::View(_))) =>
                {
                    tracing::debug!(
                        kind = %translator.kind(),
                        statement = %st,
                        error = %e,
                        "skipping statement"
                    );
                }
                Err(e) => return Some(Err(e)),
            }
        }
    }
}
