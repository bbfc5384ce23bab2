//! Building entities and expressions from resolved views.
//!
//! Blank-node expressions carry every statement of their node plus the list
//! cells and sub-object provenance they were assembled from.

use std::sync::Arc;

use oxigraph::model::{Literal, NamedNode, NamedNodeRef};

use super::ReadContext;
use crate::error::{OntResult, TranslateError};
use crate::graph::list::read_list;
use crate::graph::{Node, Statement};
use crate::model::{
    AnnotationValue, Class, ClassExpression, DataProperty, DataRange, Datatype, Entity,
    FacetRestriction, Individual, NamedIndividual, ObjectProperty, ObjectPropertyExpression,
    OntObject, Operands,
};
use crate::personality::{Capability, CardinalityKind, EntityKind, ViewShape};
use crate::vocab::{owl, rdf, xsd};

impl ReadContext<'_> {
    pub(super) fn build_entity(&self, node: &Node, kind: EntityKind) -> OntResult<OntObject<Entity>> {
        self.personality()
            .resolve_view(self.graph(), node, Capability::Entity(kind))?;
        let iri = self.iri_of(node, kind.name())?;
        let typing = self.graph().find(Some(node), Some(rdf::TYPE), None);
        Ok(OntObject::new(Entity::new(kind, iri), None).with_statements(typing))
    }

    /// A named entity of `kind` as a sub-object.
    fn named(&self, node: &Node, kind: EntityKind) -> OntResult<(NamedNode, Arc<OntObject<Entity>>)> {
        let entity = self.entity(node, kind)?;
        Ok((entity.iri().clone(), entity))
    }

    pub(super) fn build_class_expression(&self, node: &Node) -> OntResult<OntObject<ClassExpression>> {
        let view = self
            .personality()
            .resolve_view(self.graph(), node, Capability::ClassExpression)?;
        if let ViewShape::Entity(_) = view.shape {
            let (iri, entity) = self.named(node, EntityKind::Class)?;
            let mut object = OntObject::new(ClassExpression::Class(Class::new(iri)), None);
            object.append(&*entity);
            return Ok(object);
        }

        let mut parts = Parts::new(self, node);
        let value = match view.shape {
            ViewShape::ObjectIntersectionOf => {
                ClassExpression::IntersectionOf(parts.class_list(owl::INTERSECTION_OF)?)
            }
            ViewShape::ObjectUnionOf => ClassExpression::UnionOf(parts.class_list(owl::UNION_OF)?),
            ViewShape::ObjectComplementOf => {
                let inner = parts.required(owl::COMPLEMENT_OF)?;
                ClassExpression::ComplementOf(Box::new(parts.class(&inner)?))
            }
            ViewShape::ObjectOneOf => {
                let items = parts.list(owl::ONE_OF)?;
                let mut individuals = Operands::empty();
                for item in &items {
                    individuals.push(parts.individual(item)?);
                }
                ClassExpression::OneOf(individuals)
            }
            ViewShape::ObjectSomeValuesFrom => {
                let property = parts.object_property()?;
                let filler = parts.required(owl::SOME_VALUES_FROM)?;
                ClassExpression::ObjectSomeValuesFrom(property, Box::new(parts.class(&filler)?))
            }
            ViewShape::ObjectAllValuesFrom => {
                let property = parts.object_property()?;
                let filler = parts.required(owl::ALL_VALUES_FROM)?;
                ClassExpression::ObjectAllValuesFrom(property, Box::new(parts.class(&filler)?))
            }
            ViewShape::ObjectHasValue => {
                let property = parts.object_property()?;
                let value = parts.required(owl::HAS_VALUE)?;
                ClassExpression::ObjectHasValue(property, parts.individual(&value)?)
            }
            ViewShape::ObjectHasSelf => ClassExpression::ObjectHasSelf(parts.object_property()?),
            ViewShape::ObjectCardinality(kind) => {
                let property = parts.object_property()?;
                let cardinality = parts.cardinality(kind)?;
                let filler = match self.graph().object(node, owl::ON_CLASS) {
                    Some(filler) => Some(Box::new(parts.class(&filler)?)),
                    None => None,
                };
                ClassExpression::ObjectCardinality {
                    kind,
                    cardinality,
                    property,
                    filler,
                }
            }
            ViewShape::DataSomeValuesFrom => {
                let property = parts.data_property()?;
                let filler = parts.required(owl::SOME_VALUES_FROM)?;
                ClassExpression::DataSomeValuesFrom(property, Box::new(parts.range(&filler)?))
            }
            ViewShape::DataAllValuesFrom => {
                let property = parts.data_property()?;
                let filler = parts.required(owl::ALL_VALUES_FROM)?;
                ClassExpression::DataAllValuesFrom(property, Box::new(parts.range(&filler)?))
            }
            ViewShape::DataHasValue => {
                let property = parts.data_property()?;
                let value = parts.required(owl::HAS_VALUE)?;
                ClassExpression::DataHasValue(property, parts.literal(&value)?)
            }
            ViewShape::DataCardinality(kind) => {
                let property = parts.data_property()?;
                let cardinality = parts.cardinality(kind)?;
                let filler = match self.graph().object(node, owl::ON_DATA_RANGE) {
                    Some(filler) => Some(Box::new(parts.range(&filler)?)),
                    None => None,
                };
                ClassExpression::DataCardinality {
                    kind,
                    cardinality,
                    property,
                    filler,
                }
            }
            other => return Err(parts.malformed(format!("{other:?} is not a class expression"))),
        };
        Ok(parts.finish(value))
    }

    pub(super) fn build_data_range(&self, node: &Node) -> OntResult<OntObject<DataRange>> {
        let view = self
            .personality()
            .resolve_view(self.graph(), node, Capability::DataRange)?;
        if let ViewShape::Entity(_) = view.shape {
            let (iri, entity) = self.named(node, EntityKind::Datatype)?;
            let mut object = OntObject::new(DataRange::Datatype(Datatype::new(iri)), None);
            object.append(&*entity);
            return Ok(object);
        }

        let mut parts = Parts::new(self, node);
        parts.kind = "DataRange";
        let value = match view.shape {
            ViewShape::DataIntersectionOf => {
                DataRange::IntersectionOf(parts.range_list(owl::INTERSECTION_OF)?)
            }
            ViewShape::DataUnionOf => DataRange::UnionOf(parts.range_list(owl::UNION_OF)?),
            ViewShape::DataComplementOf => {
                let inner = parts.required(owl::DATATYPE_COMPLEMENT_OF)?;
                DataRange::ComplementOf(Box::new(parts.range(&inner)?))
            }
            ViewShape::DataOneOf => {
                let items = parts.list(owl::ONE_OF)?;
                let mut literals = Operands::empty();
                for item in &items {
                    literals.push(parts.literal(item)?);
                }
                DataRange::OneOf(literals)
            }
            ViewShape::DatatypeRestriction => {
                let base = parts.required(owl::ON_DATATYPE)?;
                let (iri, entity) = self.named(&base, EntityKind::Datatype)?;
                parts.object.append(&*entity);
                let mut facets = Operands::empty();
                for facet_node in parts.list(owl::WITH_RESTRICTIONS)? {
                    facets.push(parts.facet(&facet_node)?);
                }
                DataRange::Restriction(Datatype::new(iri), facets)
            }
            other => return Err(parts.malformed(format!("{other:?} is not a data range"))),
        };
        Ok(parts.finish(value))
    }

    pub(super) fn build_object_property_expression(
        &self,
        node: &Node,
    ) -> OntResult<OntObject<ObjectPropertyExpression>> {
        let view = self.personality().resolve_view(
            self.graph(),
            node,
            Capability::ObjectPropertyExpression,
        )?;
        match view.shape {
            ViewShape::InverseObjectProperty => {
                let mut parts = Parts::new(self, node);
                parts.kind = "ObjectPropertyExpression";
                let inner = parts.required(owl::INVERSE_OF)?;
                let (iri, entity) = self.named(&inner, EntityKind::ObjectProperty)?;
                parts.object.append(&*entity);
                Ok(parts.finish(ObjectPropertyExpression::Inverse(ObjectProperty::new(iri))))
            }
            _ => {
                let (iri, entity) = self.named(node, EntityKind::ObjectProperty)?;
                let mut object =
                    OntObject::new(ObjectPropertyExpression::Named(ObjectProperty::new(iri)), None);
                object.append(&*entity);
                Ok(object)
            }
        }
    }

    pub(super) fn build_individual(&self, node: &Node) -> OntResult<OntObject<Individual>> {
        let view = self
            .personality()
            .resolve_view(self.graph(), node, Capability::Individual)?;
        match (view.shape, node) {
            (ViewShape::AnonymousIndividual, Node::Blank(b)) => {
                Ok(OntObject::new(Individual::Anonymous(b.clone()), None))
            }
            _ => {
                let (iri, entity) = self.named(node, EntityKind::NamedIndividual)?;
                let mut object =
                    OntObject::new(Individual::Named(NamedIndividual::new(iri)), None);
                object.append(&*entity);
                Ok(object)
            }
        }
    }

    pub(super) fn build_annotation_value(&self, node: &Node) -> OntResult<OntObject<AnnotationValue>> {
        self.personality()
            .resolve_view(self.graph(), node, Capability::AnnotationValue)?;
        let value = match node {
            Node::Iri(iri) => AnnotationValue::Iri(iri.clone()),
            Node::Literal(l) => AnnotationValue::Literal(l.clone()),
            Node::Blank(b) => AnnotationValue::Anonymous(b.clone()),
        };
        Ok(OntObject::new(value, None))
    }

    fn iri_of(&self, node: &Node, what: &str) -> OntResult<NamedNode> {
        node.as_iri().cloned().ok_or_else(|| {
            TranslateError::Malformed {
                kind: what.to_string(),
                statement: node.to_string(),
                reason: "expected an IRI".into(),
            }
            .into()
        })
    }
}

/// Accumulates the provenance of one blank-node expression.
struct Parts<'c, 'a> {
    ctx: &'c ReadContext<'a>,
    node: &'c Node,
    kind: &'static str,
    object: OntObject<()>,
}

impl<'c, 'a> Parts<'c, 'a> {
    fn new(ctx: &'c ReadContext<'a>, node: &'c Node) -> Self {
        let own: Vec<Statement> = ctx.graph().find(Some(node), None, None).collect();
        Self {
            ctx,
            node,
            kind: "ClassExpression",
            object: OntObject::new((), None).with_statements(own),
        }
    }

    fn finish<T>(self, value: T) -> OntObject<T> {
        let mut object = OntObject::new(value, None);
        object.append(&self.object);
        object
    }

    fn malformed(&self, reason: String) -> crate::error::OntError {
        TranslateError::Malformed {
            kind: self.kind.to_string(),
            statement: self.node.to_string(),
            reason,
        }
        .into()
    }

    fn required(&self, predicate: NamedNodeRef<'_>) -> OntResult<Node> {
        self.ctx
            .graph()
            .object(self.node, predicate)
            .ok_or_else(|| self.malformed(format!("missing {predicate}")))
    }

    fn list(&mut self, predicate: NamedNodeRef<'_>) -> OntResult<Vec<Node>> {
        let head = self.required(predicate)?;
        let list = read_list(self.ctx.graph(), &head)?;
        self.object.extend(list.cells);
        Ok(list.items)
    }

    fn class(&mut self, node: &Node) -> OntResult<ClassExpression> {
        let object = self.ctx.class_expression(node)?;
        self.object.append(&*object);
        Ok(object.value().clone())
    }

    fn range(&mut self, node: &Node) -> OntResult<DataRange> {
        let object = self.ctx.data_range(node)?;
        self.object.append(&*object);
        Ok(object.value().clone())
    }

    fn individual(&mut self, node: &Node) -> OntResult<Individual> {
        let object = self.ctx.individual(node)?;
        self.object.append(&*object);
        Ok(object.value().clone())
    }

    fn class_list(&mut self, predicate: NamedNodeRef<'_>) -> OntResult<Operands<ClassExpression>> {
        let mut operands = Operands::empty();
        for item in self.list(predicate)? {
            operands.push(self.class(&item)?);
        }
        Ok(operands)
    }

    fn range_list(&mut self, predicate: NamedNodeRef<'_>) -> OntResult<Operands<DataRange>> {
        let mut operands = Operands::empty();
        for item in self.list(predicate)? {
            operands.push(self.range(&item)?);
        }
        Ok(operands)
    }

    fn object_property(&mut self) -> OntResult<ObjectPropertyExpression> {
        let property = self.required(owl::ON_PROPERTY)?;
        let object = self.ctx.object_property_expression(&property)?;
        self.object.append(&*object);
        Ok(object.value().clone())
    }

    fn data_property(&mut self) -> OntResult<DataProperty> {
        let property = self.required(owl::ON_PROPERTY)?;
        let (iri, entity) = self.ctx.named(&property, EntityKind::DataProperty)?;
        self.object.append(&*entity);
        Ok(DataProperty::new(iri))
    }

    fn literal(&self, node: &Node) -> OntResult<Literal> {
        node.as_literal()
            .cloned()
            .ok_or_else(|| self.malformed(format!("expected a literal, found {node}")))
    }

    fn cardinality(&self, kind: CardinalityKind) -> OntResult<u32> {
        let (plain, qualified) = match kind {
            CardinalityKind::Min => (owl::MIN_CARDINALITY, owl::MIN_QUALIFIED_CARDINALITY),
            CardinalityKind::Max => (owl::MAX_CARDINALITY, owl::MAX_QUALIFIED_CARDINALITY),
            CardinalityKind::Exact => (owl::CARDINALITY, owl::QUALIFIED_CARDINALITY),
        };
        let graph = self.ctx.graph();
        let value = graph
            .object(self.node, qualified)
            .or_else(|| graph.object(self.node, plain))
            .ok_or_else(|| self.malformed("missing cardinality".into()))?;
        let literal = self.literal(&value)?;
        literal
            .value()
            .trim()
            .parse::<u32>()
            .map_err(|e| self.malformed(format!("bad cardinality {:?}: {e}", literal.value())))
    }

    /// One facet node of a `owl:withRestrictions` list.
    fn facet(&mut self, node: &Node) -> OntResult<FacetRestriction> {
        let statements: Vec<Statement> = self
            .ctx
            .graph()
            .find(Some(node), None, None)
            .filter(|st| xsd::FACETS.iter().any(|f| st.predicate.as_ref() == *f))
            .collect();
        let [st] = statements.as_slice() else {
            return Err(self.malformed(format!(
                "facet node {node} must carry exactly one facet, found {}",
                statements.len()
            )));
        };
        let value = self.literal(&st.object)?;
        let facet = FacetRestriction {
            facet: st.predicate.clone(),
            value,
        };
        self.object.extend(statements);
        Ok(facet)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use oxigraph::model::{Literal, NamedNode};

    use crate::config::Config;
    use crate::error::{OntError, TranslateError};
    use crate::factory::ObjectFactory;
    use crate::graph::list::write_list;
    use crate::graph::{Node, Statement, StatementGraph};
    use crate::model::{ClassExpression, DataRange, Datatype, Individual, ObjectPropertyExpression};
    use crate::personality::{CardinalityKind, Personality};
    use crate::translate::TranslatorRegistry;
    use crate::vocab::{owl, rdf, rdfs, xsd};

    fn iri(s: &str) -> Node {
        Node::Iri(NamedNode::new_unchecked(format!("http://ex.org/{s}")))
    }

    fn setup() -> (Arc<StatementGraph>, ObjectFactory) {
        let graph = Arc::new(StatementGraph::new());
        for (name, ty) in [
            ("A", owl::CLASS),
            ("B", owl::CLASS),
            ("op", owl::OBJECT_PROPERTY),
            ("dp", owl::DATATYPE_PROPERTY),
            ("i", owl::NAMED_INDIVIDUAL),
        ] {
            graph.insert(Statement::new(iri(name), rdf::TYPE, ty));
        }
        let factory = ObjectFactory::new(
            graph.clone(),
            Arc::new(Personality::default()),
            Arc::new(TranslatorRegistry::standard()),
            Config::default(),
        );
        (graph, factory)
    }

    #[test]
    fn union_collects_list_provenance() {
        let (graph, factory) = setup();
        let u = Node::fresh();
        let (head, cells) = write_list(&[iri("A"), iri("B")]);
        graph.insert(Statement::new(u.clone(), rdf::TYPE, owl::CLASS));
        graph.insert(Statement::new(u.clone(), owl::UNION_OF, head));
        graph.insert_all(cells.clone());

        let expr = factory.class_expression(&u).unwrap();
        assert!(matches!(expr.value(), ClassExpression::UnionOf(ops) if ops.len() == 2));
        for cell in &cells {
            assert!(expr.provenance().contains(cell));
        }
        assert!(
            expr.provenance()
                .contains(&Statement::new(iri("A"), rdf::TYPE, owl::CLASS))
        );
    }

    #[test]
    fn qualified_cardinality_over_inverse() {
        let (graph, factory) = setup();
        let inv = Node::fresh();
        graph.insert(Statement::new(inv.clone(), owl::INVERSE_OF, iri("op")));
        let r = Node::fresh();
        graph.insert(Statement::new(r.clone(), rdf::TYPE, owl::RESTRICTION));
        graph.insert(Statement::new(r.clone(), owl::ON_PROPERTY, inv));
        graph.insert(Statement::new(r.clone(), owl::ON_CLASS, iri("A")));
        graph.insert(Statement::new(
            r.clone(),
            owl::MIN_QUALIFIED_CARDINALITY,
            Literal::new_typed_literal("2", xsd::NON_NEGATIVE_INTEGER),
        ));

        let expr = factory.class_expression(&r).unwrap();
        let ClassExpression::ObjectCardinality {
            kind,
            cardinality,
            property,
            filler,
        } = expr.value()
        else {
            panic!("expected object cardinality, got {:?}", expr.value());
        };
        assert_eq!(*kind, CardinalityKind::Min);
        assert_eq!(*cardinality, 2);
        assert!(matches!(property, ObjectPropertyExpression::Inverse(_)));
        assert!(filler.is_some());
    }

    #[test]
    fn bad_cardinality_is_malformed() {
        let (graph, factory) = setup();
        let r = Node::fresh();
        graph.insert(Statement::new(r.clone(), rdf::TYPE, owl::RESTRICTION));
        graph.insert(Statement::new(r.clone(), owl::ON_PROPERTY, iri("op")));
        graph.insert(Statement::new(
            r.clone(),
            owl::CARDINALITY,
            Literal::new_simple_literal("many"),
        ));
        let err = factory.class_expression(&r).unwrap_err();
        assert!(matches!(err, OntError::Translate(TranslateError::Malformed { .. })));
        assert!(err.is_local());
    }

    #[test]
    fn datatype_restriction_with_facets() {
        let (graph, factory) = setup();
        let facet = Node::fresh();
        graph.insert(Statement::new(
            facet.clone(),
            xsd::MIN_INCLUSIVE,
            Literal::new_typed_literal("0", xsd::INTEGER),
        ));
        let (head, cells) = write_list(&[facet]);
        graph.insert_all(cells);
        let d = Node::fresh();
        graph.insert(Statement::new(d.clone(), rdf::TYPE, rdfs::DATATYPE));
        graph.insert(Statement::new(d.clone(), owl::ON_DATATYPE, xsd::INTEGER));
        graph.insert(Statement::new(d.clone(), owl::WITH_RESTRICTIONS, head));

        let range = factory.data_range(&d).unwrap();
        let DataRange::Restriction(base, facets) = range.value() else {
            panic!("expected a restriction");
        };
        assert_eq!(base, &Datatype::new(xsd::INTEGER));
        assert_eq!(facets.len(), 1);
    }

    #[test]
    fn has_value_individual_and_literal() {
        let (graph, factory) = setup();
        let o = Node::fresh();
        graph.insert(Statement::new(o.clone(), rdf::TYPE, owl::RESTRICTION));
        graph.insert(Statement::new(o.clone(), owl::ON_PROPERTY, iri("op")));
        graph.insert(Statement::new(o.clone(), owl::HAS_VALUE, iri("i")));
        let d = Node::fresh();
        graph.insert(Statement::new(d.clone(), rdf::TYPE, owl::RESTRICTION));
        graph.insert(Statement::new(d.clone(), owl::ON_PROPERTY, iri("dp")));
        graph.insert(Statement::new(
            d.clone(),
            owl::HAS_VALUE,
            Literal::new_simple_literal("x"),
        ));

        let object = factory.class_expression(&o).unwrap();
        assert!(matches!(
            object.value(),
            ClassExpression::ObjectHasValue(_, Individual::Named(_))
        ));
        let data = factory.class_expression(&d).unwrap();
        assert!(matches!(data.value(), ClassExpression::DataHasValue(_, _)));
    }

    #[test]
    fn shared_operand_is_built_once() {
        let (graph, factory) = setup();
        let c = Node::fresh();
        graph.insert(Statement::new(c.clone(), rdf::TYPE, owl::CLASS));
        graph.insert(Statement::new(c.clone(), owl::COMPLEMENT_OF, iri("A")));
        let first = factory.class_expression(&c).unwrap();
        let misses = factory.cache().stats().misses;
        let second = factory.class_expression(&c).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(factory.cache().stats().misses, misses);
    }
}
