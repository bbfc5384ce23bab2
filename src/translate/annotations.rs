//! Axiom annotations in the graph.
//!
//! A triple-rooted axiom keeps its annotations on an `owl:Axiom` node that
//! reifies the root (`owl:annotatedSource`, `owl:annotatedProperty`,
//! `owl:annotatedTarget`). An axiom rooted at an anonymous node carries its
//! annotations directly on that node. Annotations of annotations use
//! `owl:Annotation` nodes reifying the annotation statement.

use std::collections::HashSet;

use oxigraph::model::NamedNodeRef;

use crate::error::OntResult;
use crate::factory::ReadContext;
use crate::graph::{Node, Statement, StatementGraph};
use crate::model::{Annotation, AnnotationProperty, OntObject};
use crate::personality::{Capability, EntityKind};
use crate::vocab::{owl, rdf};

/// Nodes of type `ty` that reify `root`.
pub(crate) fn reification_nodes(
    graph: &StatementGraph,
    root: &Statement,
    ty: NamedNodeRef<'_>,
) -> Vec<Node> {
    let property = Node::Iri(root.predicate.clone());
    graph
        .subjects(owl::ANNOTATED_SOURCE, &root.subject)
        .into_iter()
        .filter(|x| {
            x.is_blank()
                && graph.has_type(x, ty)
                && graph.object(x, owl::ANNOTATED_PROPERTY).as_ref() == Some(&property)
                && graph.object(x, owl::ANNOTATED_TARGET).as_ref() == Some(&root.object)
        })
        .collect()
}

/// Every statement of `node` plus those of the `owl:Annotation` nodes that
/// hang off it, recursively.
pub(crate) fn annotation_subtree(graph: &StatementGraph, node: &Node) -> Vec<Statement> {
    let mut out = Vec::new();
    let mut seen = HashSet::new();
    let mut stack = vec![node.clone()];
    while let Some(current) = stack.pop() {
        if !seen.insert(current.clone()) {
            continue;
        }
        out.extend(graph.find(Some(&current), None, None));
        stack.extend(
            graph
                .subjects(owl::ANNOTATED_SOURCE, &current)
                .into_iter()
                .filter(|y| graph.has_type(y, owl::ANNOTATION)),
        );
    }
    out
}

/// Annotations carried by the statements of `node`.
pub(crate) fn read_annotations(
    ctx: &ReadContext<'_>,
    node: &Node,
    acc: &mut OntObject<()>,
) -> OntResult<Vec<Annotation>> {
    let mut seen = HashSet::new();
    read_nested(ctx, node, acc, &mut seen)
}

fn read_nested(
    ctx: &ReadContext<'_>,
    node: &Node,
    acc: &mut OntObject<()>,
    seen: &mut HashSet<Node>,
) -> OntResult<Vec<Annotation>> {
    if !seen.insert(node.clone()) {
        return Ok(Vec::new());
    }
    let graph = ctx.graph();
    let personality = ctx.personality();
    let mut annotations = Vec::new();

    for st in graph.find(Some(node), None, None) {
        let property_node = Node::Iri(st.predicate.clone());
        if !personality.can_view(
            graph,
            &property_node,
            Capability::Entity(EntityKind::AnnotationProperty),
        ) || !personality.can_view(graph, &st.object, Capability::AnnotationValue)
        {
            continue;
        }
        let property = ctx.entity(&property_node, EntityKind::AnnotationProperty)?;
        let value = ctx.annotation_value(&st.object)?;
        acc.append(&*property);
        acc.append(&*value);
        acc.extend([st.clone()]);

        let mut nested = Vec::new();
        for y in reification_nodes(graph, &st, owl::ANNOTATION) {
            acc.extend(graph.find(Some(&y), None, None));
            nested.extend(read_nested(ctx, &y, acc, seen)?);
        }
        annotations.push(
            Annotation::new(
                AnnotationProperty::new(st.predicate.clone()),
                value.value().clone(),
            )
            .with_annotations(nested),
        );
    }
    Ok(annotations)
}

/// Annotations of the triple-rooted axiom at `root`, merged across all of
/// its `owl:Axiom` reifications.
pub(crate) fn read_reified(
    ctx: &ReadContext<'_>,
    root: &Statement,
    acc: &mut OntObject<()>,
) -> OntResult<Vec<Annotation>> {
    let mut annotations = Vec::new();
    for x in reification_nodes(ctx.graph(), root, owl::AXIOM) {
        acc.extend(ctx.graph().find(Some(&x), None, None));
        annotations.extend(read_annotations(ctx, &x, acc)?);
    }
    Ok(annotations)
}

/// Statements attaching `annotations` directly to `node`.
pub(crate) fn write_annotations(node: &Node, annotations: &[Annotation], out: &mut Vec<Statement>) {
    for annotation in annotations {
        let st = Statement::new(
            node.clone(),
            annotation.property.iri().clone(),
            annotation.value.node(),
        );
        out.push(st.clone());
        if !annotation.annotations.is_empty() {
            let y = reify(&st, owl::ANNOTATION, out);
            write_annotations(&y, annotation.annotations.as_slice(), out);
        }
    }
}

/// A fresh node of type `ty` reifying `root`.
pub(crate) fn reify(root: &Statement, ty: NamedNodeRef<'_>, out: &mut Vec<Statement>) -> Node {
    let x = Node::fresh();
    out.push(Statement::new(x.clone(), rdf::TYPE, ty));
    out.push(Statement::new(x.clone(), owl::ANNOTATED_SOURCE, root.subject.clone()));
    out.push(Statement::new(
        x.clone(),
        owl::ANNOTATED_PROPERTY,
        root.predicate.clone(),
    ));
    out.push(Statement::new(x.clone(), owl::ANNOTATED_TARGET, root.object.clone()));
    x
}
