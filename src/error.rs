//! Rich diagnostic error types for the ontmap core.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]` derives,
//! providing error codes and help text so that a failed resolution can be
//! diagnosed without tracing back through the graph by hand.

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type for the ontmap core.
///
/// Each variant wraps a subsystem-specific error, preserving the full diagnostic
/// chain (error codes, help text) through to the caller.
#[derive(Debug, Error, Diagnostic)]
pub enum OntError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    View(#[from] ViewError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Translate(#[from] TranslateError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}

// ---------------------------------------------------------------------------
// Typed view errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ViewError {
    #[error("punning violation: {node} cannot be viewed as {requested}, it is already typed as {conflicting}")]
    #[diagnostic(
        code(ontmap::view::punning_violation),
        help(
            "The active punning mode forbids this pair of entity kinds on one IRI. \
             Remove the conflicting declaration, use a different IRI, \
             or switch to a more permissive punning mode (medium or lax)."
        )
    )]
    PunningViolation {
        node: String,
        requested: String,
        conflicting: String,
    },

    #[error("{node} is not a {requested}: {reason}")]
    #[diagnostic(
        code(ontmap::view::wrong_kind),
        help(
            "The node has no declaration or structure that makes it legal as the requested kind. \
             Add the matching declaration statement, or request a capability the node actually has."
        )
    )]
    NotAnEntityOfRequestedKind {
        node: String,
        requested: String,
        reason: String,
    },
}

// ---------------------------------------------------------------------------
// Translation errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum TranslateError {
    #[error("cyclic dependency while building the object rooted at {node}")]
    #[diagnostic(
        code(ontmap::translate::cycle),
        help(
            "The graph contains a structure that refers back to itself \
             (for example a class expression that is its own complement, or a looping rdf:List). \
             Such structures have no finite object form; fix the statements around this node."
        )
    )]
    CyclicDependency { node: String },

    #[error("statement {statement} is not a well-formed {kind} axiom: {reason}")]
    #[diagnostic(
        code(ontmap::translate::malformed),
        help("The statement is skipped for this axiom kind. Other kinds may still recognize it.")
    )]
    Malformed {
        kind: String,
        statement: String,
        reason: String,
    },

    #[error("cannot write {kind} axiom: {reason}")]
    #[diagnostic(
        code(ontmap::translate::invalid_axiom),
        help("The axiom value has no valid statement encoding. Check its operand count and operand kinds.")
    )]
    InvalidAxiom { kind: String, reason: String },

    #[error("no translator registered for {kind} axioms")]
    #[diagnostic(
        code(ontmap::translate::unknown_kind),
        help("Build the factory with `TranslatorRegistry::standard()` or register a translator for this kind.")
    )]
    UnknownKind { kind: String },
}

// ---------------------------------------------------------------------------
// Graph errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum GraphError {
    #[error("invalid IRI {iri:?}: {message}")]
    #[diagnostic(
        code(ontmap::graph::invalid_iri),
        help("IRIs must be absolute, e.g. `http://example.org/onto#Thing`.")
    )]
    InvalidIri { iri: String, message: String },

    #[error("malformed rdf:List at {node}: {reason}")]
    #[diagnostic(
        code(ontmap::graph::malformed_list),
        help(
            "Every list cell needs exactly one rdf:first and one rdf:rest, \
             and the chain must end in rdf:nil."
        )
    )]
    MalformedList { node: String, reason: String },
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    #[diagnostic(
        code(ontmap::config::read),
        help("Check that the file exists and is readable.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {message}")]
    #[diagnostic(
        code(ontmap::config::parse),
        help(
            "The config is TOML. Valid punning modes are \"strict\", \"medium\" and \"lax\"; \
             unknown keys are rejected."
        )
    )]
    Parse { path: String, message: String },

    #[error("failed to write config file {path}")]
    #[diagnostic(
        code(ontmap::config::write),
        help("Check that the parent directory is writable.")
    )]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience result type for the ontmap core.
pub type OntResult<T> = std::result::Result<T, OntError>;

impl OntError {
    /// Whether this error describes a single statement that a translator
    /// should skip rather than a contract violation the caller must see.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            OntError::Translate(TranslateError::Malformed { .. })
                | OntError::Graph(GraphError::MalformedList { .. })
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn punning_violation_names_both_kinds() {
        let err: OntError = ViewError::PunningViolation {
            node: "<http://ex.org/X>".into(),
            requested: "Datatype".into(),
            conflicting: "Class".into(),
        }
        .into();
        let msg = err.to_string();
        assert!(msg.contains("Datatype"));
        assert!(msg.contains("Class"));
        assert!(!err.is_local());
    }

    #[test]
    fn malformed_is_local() {
        let err: OntError = TranslateError::Malformed {
            kind: "SubClassOf".into(),
            statement: "_:b <p> _:c .".into(),
            reason: "object is not a class expression".into(),
        }
        .into();
        assert!(err.is_local());
    }

    #[test]
    fn diagnostic_codes_are_namespaced() {
        let err = ViewError::NotAnEntityOfRequestedKind {
            node: "<http://ex.org/p>".into(),
            requested: "DataProperty".into(),
            reason: "no declaration".into(),
        };
        let code = err.code().map(|c| c.to_string()).unwrap_or_default();
        assert_eq!(code, "ontmap::view::wrong_kind");
    }
}
