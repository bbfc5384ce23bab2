// thiserror's #[error("...{field}...")] format strings reference struct fields,
// but the compiler doesn't see through the derive macro and reports false positives.
#![allow(unused_assignments)]

//! # ontmap
//!
//! Bidirectional mapping between OWL 2 axioms and the RDF statements that
//! encode them.
//!
//! ## Architecture
//!
//! - **Graph** (`graph`): in-memory statement store with listeners and a version counter
//! - **Personality** (`personality`): builtin and reserved vocabulary, punning rules, typed views
//! - **Model** (`model`): immutable entities, expressions and axioms with provenance
//! - **Factory** (`factory`): resolves nodes and statements into cached model objects
//! - **Translators** (`translate`): one read/write strategy per axiom kind
//! - **Search** (`search`): reverse lookup of the axioms mentioning a primitive
//! - **Collection** (`collection`): ontologies keyed by a mutable identity
//!
//! ## Library usage
//!
//! ```no_run
//! use ontmap::config::Config;
//! use ontmap::model::{Axiom, AxiomBody, Class, Entity};
//! use ontmap::ontology::Ontology;
//! use ontmap::personality::EntityKind;
//! use oxigraph::model::NamedNode;
//!
//! let onto = Ontology::new(Some(NamedNode::new("http://ex.org/onto").unwrap()), Config::default());
//! let a = NamedNode::new("http://ex.org/A").unwrap();
//! let b = NamedNode::new("http://ex.org/B").unwrap();
//! for iri in [&a, &b] {
//!     let decl = AxiomBody::Declaration(Entity::new(EntityKind::Class, iri.clone()));
//!     onto.add_axiom(&Axiom::new(decl)).unwrap();
//! }
//! onto.add_axiom(&Axiom::new(AxiomBody::SubClassOf {
//!     sub: Class::new(a).into(),
//!     sup: Class::new(b).into(),
//! }))
//! .unwrap();
//! assert_eq!(onto.axiom_count().unwrap(), 3);
//! ```

pub mod collection;
pub mod config;
pub mod error;
pub mod factory;
pub mod graph;
pub mod model;
pub mod ontology;
pub mod personality;
pub mod search;
pub mod translate;
pub mod vocab;

pub use collection::{OntologyCollection, OntologyId, SharedOntologyCollection};
pub use config::Config;
pub use error::{OntError, OntResult};
pub use ontology::Ontology;
