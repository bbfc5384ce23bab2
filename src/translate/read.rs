//! Reading axiom values from their root statements.

use oxigraph::model::{Literal, NamedNode, NamedNodeRef};

use super::annotations;
use crate::error::{OntError, OntResult, TranslateError};
use crate::factory::ReadContext;
use crate::graph::list::read_list;
use crate::graph::{Node, Statement};
use crate::model::{
    Annotation, AnnotationProperty, AnnotationSubject, AnnotationValue, Axiom, AxiomBody,
    AxiomKind, Class, ClassExpression, DataProperty, DataRange, Datatype, Entity, Individual,
    ObjectCharacteristic, ObjectProperty, ObjectPropertyExpression, OntObject, Operands,
};
use crate::personality::{Capability, EntityKind};
use crate::vocab::{owl, rdf};

/// Resolves the operands of one axiom and accumulates their provenance.
pub(crate) struct Reader<'c, 'a> {
    ctx: &'c ReadContext<'a>,
    root: &'c Statement,
    kind: AxiomKind,
    acc: OntObject<()>,
}

impl<'c, 'a> Reader<'c, 'a> {
    pub(crate) fn new(ctx: &'c ReadContext<'a>, root: &'c Statement, kind: AxiomKind) -> Self {
        Self {
            ctx,
            root,
            kind,
            acc: OntObject::new((), None),
        }
    }

    pub(crate) fn malformed(&self, reason: impl Into<String>) -> OntError {
        TranslateError::Malformed {
            kind: self.kind.to_string(),
            statement: self.root.to_string(),
            reason: reason.into(),
        }
        .into()
    }

    /// Take every statement of an anonymous root node into the provenance.
    pub(crate) fn own_node(&mut self, node: &Node) {
        self.acc.extend(self.ctx.graph().find(Some(node), None, None));
    }

    pub(crate) fn required(&self, node: &Node, predicate: NamedNodeRef<'_>) -> OntResult<Node> {
        self.ctx
            .graph()
            .object(node, predicate)
            .ok_or_else(|| self.malformed(format!("{node} has no {predicate}")))
    }

    pub(crate) fn list(&mut self, head: &Node) -> OntResult<Vec<Node>> {
        let list = read_list(self.ctx.graph(), head)?;
        self.acc.extend(list.cells);
        Ok(list.items)
    }

    fn entity(&mut self, node: &Node, kind: EntityKind) -> OntResult<NamedNode> {
        let entity = self.ctx.entity(node, kind)?;
        self.acc.append(&*entity);
        Ok(entity.iri().clone())
    }

    pub(crate) fn class(&mut self, node: &Node) -> OntResult<ClassExpression> {
        let object = self.ctx.class_expression(node)?;
        self.acc.append(&*object);
        Ok(object.value().clone())
    }

    pub(crate) fn range(&mut self, node: &Node) -> OntResult<DataRange> {
        let object = self.ctx.data_range(node)?;
        self.acc.append(&*object);
        Ok(object.value().clone())
    }

    pub(crate) fn object_property(&mut self, node: &Node) -> OntResult<ObjectPropertyExpression> {
        let object = self.ctx.object_property_expression(node)?;
        self.acc.append(&*object);
        Ok(object.value().clone())
    }

    pub(crate) fn named_object_property(&mut self, node: &Node) -> OntResult<ObjectProperty> {
        Ok(ObjectProperty::new(self.entity(node, EntityKind::ObjectProperty)?))
    }

    pub(crate) fn data_property(&mut self, node: &Node) -> OntResult<DataProperty> {
        Ok(DataProperty::new(self.entity(node, EntityKind::DataProperty)?))
    }

    pub(crate) fn annotation_property(&mut self, node: &Node) -> OntResult<AnnotationProperty> {
        Ok(AnnotationProperty::new(
            self.entity(node, EntityKind::AnnotationProperty)?,
        ))
    }

    pub(crate) fn individual(&mut self, node: &Node) -> OntResult<Individual> {
        let object = self.ctx.individual(node)?;
        self.acc.append(&*object);
        Ok(object.value().clone())
    }

    pub(crate) fn literal(&self, node: &Node) -> OntResult<Literal> {
        node.as_literal()
            .cloned()
            .ok_or_else(|| self.malformed(format!("expected a literal, found {node}")))
    }

    pub(crate) fn iri(&self, node: &Node) -> OntResult<NamedNode> {
        node.as_iri()
            .cloned()
            .ok_or_else(|| self.malformed(format!("expected an IRI, found {node}")))
    }

    fn annotation_subject(&self, node: &Node) -> OntResult<AnnotationSubject> {
        self.ctx
            .personality()
            .resolve_view(self.ctx.graph(), node, Capability::AnnotationSubject)?;
        match node {
            Node::Iri(iri) => Ok(AnnotationSubject::Iri(iri.clone())),
            Node::Blank(b) => Ok(AnnotationSubject::Anonymous(b.clone())),
            Node::Literal(_) => Err(self.malformed("a literal cannot be annotated")),
        }
    }

    fn annotation_value(&mut self, node: &Node) -> OntResult<AnnotationValue> {
        let object = self.ctx.annotation_value(node)?;
        self.acc.append(&*object);
        Ok(object.value().clone())
    }

    /// A `owl:hasKey` member: data property if it resolves as one.
    fn key_member(
        &mut self,
        node: &Node,
        objects: &mut Operands<ObjectPropertyExpression>,
        data: &mut Operands<DataProperty>,
    ) -> OntResult<()> {
        let personality = self.ctx.personality();
        if personality.can_view(
            self.ctx.graph(),
            node,
            Capability::Entity(EntityKind::DataProperty),
        ) {
            data.push(self.data_property(node)?);
        } else {
            objects.push(self.object_property(node)?);
        }
        Ok(())
    }

    fn annotations(&mut self, anonymous_root: bool) -> OntResult<Vec<Annotation>> {
        if !self.ctx.config().include_annotations_in_axioms {
            return Ok(Vec::new());
        }
        if anonymous_root {
            annotations::read_annotations(self.ctx, &self.root.subject, &mut self.acc)
        } else {
            annotations::read_reified(self.ctx, self.root, &mut self.acc)
        }
    }

    pub(crate) fn finish(
        mut self,
        body: AxiomBody,
        anonymous_root: bool,
    ) -> OntResult<OntObject<Axiom>> {
        let annotations = self.annotations(anonymous_root)?;
        let mut object = OntObject::new(
            Axiom::new(body).with_annotations(annotations),
            Some(self.root.clone()),
        );
        object.append(&self.acc);
        Ok(object)
    }
}

/// The two operands of a triple root.
fn pair<T: PartialEq>(a: T, b: T) -> Operands<T> {
    Operands::new([a, b])
}

/// Build the axiom body for `kind` from `root`.
///
/// Returns whether the root is anonymous alongside the body.
pub(crate) fn read_body(r: &mut Reader<'_, '_>, kind: AxiomKind) -> OntResult<(AxiomBody, bool)> {
    use AxiomBody as B;
    use AxiomKind as K;

    let root = r.root;
    let (s, o) = (&root.subject, &root.object);
    let predicate = Node::Iri(root.predicate.clone());

    let body = match kind {
        K::Declaration => {
            let ty = r.iri(o)?;
            let entity_kind = EntityKind::from_declaration_type(ty.as_ref())
                .ok_or_else(|| r.malformed(format!("{ty} is not a declaration type")))?;
            let iri = r.entity(s, entity_kind)?;
            B::Declaration(Entity::new(entity_kind, iri))
        }
        K::SubClassOf => B::SubClassOf {
            sub: r.class(s)?,
            sup: r.class(o)?,
        },
        K::EquivalentClasses => B::EquivalentClasses(pair(r.class(s)?, r.class(o)?)),
        K::SubObjectPropertyOf => B::SubObjectPropertyOf {
            sub: r.object_property(s)?,
            sup: r.object_property(o)?,
        },
        K::EquivalentObjectProperties => B::EquivalentObjectProperties(pair(
            r.object_property(s)?,
            r.object_property(o)?,
        )),
        K::InverseObjectProperties => B::InverseObjectProperties(pair(
            r.named_object_property(s)?.into(),
            r.named_object_property(o)?.into(),
        )),
        K::ObjectPropertyDomain => B::ObjectPropertyDomain {
            property: r.object_property(s)?,
            domain: r.class(o)?,
        },
        K::ObjectPropertyRange => B::ObjectPropertyRange {
            property: r.object_property(s)?,
            range: r.class(o)?,
        },
        K::FunctionalObjectProperty
        | K::InverseFunctionalObjectProperty
        | K::ReflexiveObjectProperty
        | K::IrreflexiveObjectProperty
        | K::SymmetricObjectProperty
        | K::AsymmetricObjectProperty
        | K::TransitiveObjectProperty => {
            let characteristic = ObjectCharacteristic::ALL
                .into_iter()
                .find(|c| c.kind() == kind)
                .ok_or_else(|| r.malformed("unknown property characteristic"))?;
            B::ObjectCharacteristic(characteristic, r.object_property(s)?)
        }
        K::SubDataPropertyOf => B::SubDataPropertyOf {
            sub: r.data_property(s)?,
            sup: r.data_property(o)?,
        },
        K::EquivalentDataProperties => {
            B::EquivalentDataProperties(pair(r.data_property(s)?, r.data_property(o)?))
        }
        K::DataPropertyDomain => B::DataPropertyDomain {
            property: r.data_property(s)?,
            domain: r.class(o)?,
        },
        K::DataPropertyRange => B::DataPropertyRange {
            property: r.data_property(s)?,
            range: r.range(o)?,
        },
        K::FunctionalDataProperty => B::FunctionalDataProperty(r.data_property(s)?),
        K::DatatypeDefinition => B::DatatypeDefinition {
            datatype: Datatype::new(r.entity(s, EntityKind::Datatype)?),
            range: r.range(o)?,
        },
        K::DisjointClasses | K::DisjointObjectProperties | K::DisjointDataProperties
        | K::DifferentIndividuals => {
            let anonymous = root.predicate.as_ref() == rdf::TYPE;
            let nodes = if anonymous {
                r.own_node(s);
                let head = members_head(r, s, kind)?;
                r.list(&head)?
            } else {
                vec![s.clone(), o.clone()]
            };
            let body = match kind {
                K::DisjointClasses => {
                    B::DisjointClasses(collect(&nodes, |n| r.class(n))?)
                }
                K::DisjointObjectProperties => {
                    B::DisjointObjectProperties(collect(&nodes, |n| r.object_property(n))?)
                }
                K::DisjointDataProperties => {
                    B::DisjointDataProperties(collect(&nodes, |n| r.data_property(n))?)
                }
                _ => B::DifferentIndividuals(collect(&nodes, |n| r.individual(n))?),
            };
            return Ok((body, anonymous));
        }
        K::DisjointUnion => {
            let class = Class::new(r.entity(s, EntityKind::Class)?);
            let nodes = r.list(o)?;
            B::DisjointUnion {
                class,
                operands: collect(&nodes, |n| r.class(n))?,
            }
        }
        K::SubPropertyChainOf => {
            let sup = r.object_property(s)?;
            let nodes = r.list(o)?;
            let mut chain = Vec::with_capacity(nodes.len());
            for node in &nodes {
                chain.push(r.object_property(node)?);
            }
            B::SubPropertyChainOf { chain, sup }
        }
        K::HasKey => {
            let class = r.class(s)?;
            let nodes = r.list(o)?;
            let mut object_properties = Operands::empty();
            let mut data_properties = Operands::empty();
            for node in &nodes {
                r.key_member(node, &mut object_properties, &mut data_properties)?;
            }
            B::HasKey {
                class,
                object_properties,
                data_properties,
            }
        }
        K::ClassAssertion => B::ClassAssertion {
            class: r.class(o)?,
            individual: r.individual(s)?,
        },
        K::ObjectPropertyAssertion => B::ObjectPropertyAssertion {
            property: r.named_object_property(&predicate)?,
            subject: r.individual(s)?,
            object: r.individual(o)?,
        },
        K::DataPropertyAssertion => B::DataPropertyAssertion {
            property: r.data_property(&predicate)?,
            subject: r.individual(s)?,
            value: r.literal(o)?,
        },
        K::NegativeObjectPropertyAssertion | K::NegativeDataPropertyAssertion => {
            r.own_node(s);
            let source = r.required(s, owl::SOURCE_INDIVIDUAL)?;
            let property = r.required(s, owl::ASSERTION_PROPERTY)?;
            let body = if kind == K::NegativeObjectPropertyAssertion {
                let target = r.required(s, owl::TARGET_INDIVIDUAL)?;
                B::NegativeObjectPropertyAssertion {
                    property: r.object_property(&property)?,
                    subject: r.individual(&source)?,
                    object: r.individual(&target)?,
                }
            } else {
                let target = r.required(s, owl::TARGET_VALUE)?;
                B::NegativeDataPropertyAssertion {
                    property: r.data_property(&property)?,
                    subject: r.individual(&source)?,
                    value: r.literal(&target)?,
                }
            };
            return Ok((body, true));
        }
        K::SameIndividual => B::SameIndividual(pair(r.individual(s)?, r.individual(o)?)),
        K::AnnotationAssertion => B::AnnotationAssertion {
            subject: r.annotation_subject(s)?,
            property: r.annotation_property(&predicate)?,
            value: r.annotation_value(o)?,
        },
        K::SubAnnotationPropertyOf => B::SubAnnotationPropertyOf {
            sub: r.annotation_property(s)?,
            sup: r.annotation_property(o)?,
        },
        K::AnnotationPropertyDomain => B::AnnotationPropertyDomain {
            property: r.annotation_property(s)?,
            domain: r.iri(o)?,
        },
        K::AnnotationPropertyRange => B::AnnotationPropertyRange {
            property: r.annotation_property(s)?,
            range: r.iri(o)?,
        },
    };
    Ok((body, false))
}

/// The member list of an `owl:AllDisjoint*` or `owl:AllDifferent` node.
fn members_head(r: &Reader<'_, '_>, node: &Node, kind: AxiomKind) -> OntResult<Node> {
    let graph = r.ctx.graph();
    graph
        .object(node, owl::MEMBERS)
        .or_else(|| {
            (kind == AxiomKind::DifferentIndividuals)
                .then(|| graph.object(node, owl::DISTINCT_MEMBERS))
                .flatten()
        })
        .ok_or_else(|| r.malformed(format!("{node} has no member list")))
}

fn collect<T: PartialEq>(
    nodes: &[Node],
    mut f: impl FnMut(&Node) -> OntResult<T>,
) -> OntResult<Operands<T>> {
    let mut operands = Operands::empty();
    for node in nodes {
        operands.push(f(node)?);
    }
    Ok(operands)
}
