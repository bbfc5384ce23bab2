//! `rdf:List` reading and writing.

use std::collections::HashSet;

use super::{Node, Statement, StatementGraph};
use crate::error::{GraphError, OntResult, TranslateError};
use crate::vocab::rdf;

/// A list read out of the graph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RdfList {
    /// Member nodes, head to tail.
    pub items: Vec<Node>,
    /// Every statement of the list cells that was consulted.
    pub cells: Vec<Statement>,
}

/// Walk the list starting at `head`.
///
/// Each cell must carry exactly one `rdf:first` and one `rdf:rest`, and the
/// chain must end in `rdf:nil`. A chain that revisits a cell is a cycle.
pub fn read_list(graph: &StatementGraph, head: &Node) -> OntResult<RdfList> {
    let mut list = RdfList::default();
    let mut seen = HashSet::new();
    let mut cell = head.clone();

    while !cell.is(rdf::NIL) {
        if cell.is_literal() {
            return Err(GraphError::MalformedList {
                node: cell.to_string(),
                reason: "a literal cannot be a list cell".into(),
            }
            .into());
        }
        if !seen.insert(cell.clone()) {
            return Err(TranslateError::CyclicDependency {
                node: head.to_string(),
            }
            .into());
        }

        let firsts: Vec<Statement> = graph.find(Some(&cell), Some(rdf::FIRST), None).collect();
        let rests: Vec<Statement> = graph.find(Some(&cell), Some(rdf::REST), None).collect();
        let (first, rest) = match (firsts.as_slice(), rests.as_slice()) {
            ([first], [rest]) => (first.clone(), rest.clone()),
            _ => {
                return Err(GraphError::MalformedList {
                    node: cell.to_string(),
                    reason: format!(
                        "expected one rdf:first and one rdf:rest, found {} and {}",
                        firsts.len(),
                        rests.len()
                    ),
                }
                .into());
            }
        };

        list.cells.extend(
            graph
                .find(Some(&cell), Some(rdf::TYPE), Some(&Node::from(rdf::LIST)))
                .chain([first.clone(), rest.clone()]),
        );
        list.items.push(first.object);
        cell = rest.object;
    }
    Ok(list)
}

/// Encode `items` as a fresh list. Returns the head node and the cell
/// statements. An empty list is `rdf:nil` with no statements.
pub fn write_list(items: &[Node]) -> (Node, Vec<Statement>) {
    let mut head = Node::from(rdf::NIL);
    let mut statements = Vec::with_capacity(items.len() * 2);
    for item in items.iter().rev() {
        let cell = Node::fresh();
        statements.push(Statement::new(cell.clone(), rdf::FIRST, item.clone()));
        statements.push(Statement::new(cell.clone(), rdf::REST, head));
        head = cell;
    }
    statements.reverse();
    (head, statements)
}
