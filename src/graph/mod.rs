//! Statement graph: the triple-level form every ontology is stored in.
//!
//! - [`Node`] and [`Statement`] are the term and triple types, built on the
//!   `oxigraph` RDF model.
//! - [`StatementGraph`] is an in-memory, lock-protected multi-index with
//!   pattern lookup, a version counter and mutation listeners.
//! - [`list`] reads and writes `rdf:List` chains.

pub mod list;
pub mod store;

use std::fmt;

use oxigraph::model::{BlankNode, Literal, NamedNode, NamedNodeRef};

pub use store::{GraphListener, StatementGraph, Statements};

/// A term in subject or object position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Node {
    Iri(NamedNode),
    Blank(BlankNode),
    Literal(Literal),
}

impl Node {
    /// Parse an absolute IRI into a node.
    pub fn iri(iri: &str) -> crate::error::OntResult<Self> {
        NamedNode::new(iri).map(Node::Iri).map_err(|e| {
            crate::error::GraphError::InvalidIri {
                iri: iri.to_string(),
                message: e.to_string(),
            }
            .into()
        })
    }

    /// A fresh blank node.
    pub fn fresh() -> Self {
        Node::Blank(BlankNode::default())
    }

    pub fn as_iri(&self) -> Option<&NamedNode> {
        match self {
            Node::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    pub fn as_blank(&self) -> Option<&BlankNode> {
        match self {
            Node::Blank(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Node::Literal(l) => Some(l),
            _ => None,
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Node::Blank(_))
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Node::Literal(_))
    }

    /// Whether this node is exactly the given IRI.
    pub fn is(&self, iri: NamedNodeRef<'_>) -> bool {
        matches!(self, Node::Iri(n) if n.as_ref() == iri)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Iri(n) => n.fmt(f),
            Node::Blank(b) => b.fmt(f),
            Node::Literal(l) => l.fmt(f),
        }
    }
}

impl From<NamedNode> for Node {
    fn from(n: NamedNode) -> Self {
        Node::Iri(n)
    }
}

impl From<NamedNodeRef<'_>> for Node {
    fn from(n: NamedNodeRef<'_>) -> Self {
        Node::Iri(n.into_owned())
    }
}

impl From<BlankNode> for Node {
    fn from(b: BlankNode) -> Self {
        Node::Blank(b)
    }
}

impl From<Literal> for Node {
    fn from(l: Literal) -> Self {
        Node::Literal(l)
    }
}

/// An immutable subject–predicate–object triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Statement {
    pub subject: Node,
    pub predicate: NamedNode,
    pub object: Node,
}

impl Statement {
    pub fn new(
        subject: impl Into<Node>,
        predicate: impl Into<NamedNode>,
        object: impl Into<Node>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }

    /// Whether the predicate is the given IRI.
    pub fn has_predicate(&self, predicate: NamedNodeRef<'_>) -> bool {
        self.predicate.as_ref() == predicate
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} .", self.subject, self.predicate, self.object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::{owl, rdf};

    #[test]
    fn statement_displays_as_ntriples() {
        let st = Statement::new(
            NamedNode::new_unchecked("http://ex.org/A"),
            rdf::TYPE,
            owl::CLASS,
        );
        assert_eq!(
            st.to_string(),
            "<http://ex.org/A> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> \
             <http://www.w3.org/2002/07/owl#Class> ."
        );
        assert!(st.has_predicate(rdf::TYPE));
        assert!(st.object.is(owl::CLASS));
    }

    #[test]
    fn invalid_iri_is_rejected() {
        assert!(Node::iri("not an iri").is_err());
        assert!(Node::iri("http://ex.org/ok").is_ok());
    }

    #[test]
    fn fresh_blank_nodes_differ() {
        assert_ne!(Node::fresh(), Node::fresh());
        assert!(Node::fresh().is_blank());
    }
}
