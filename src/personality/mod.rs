//! Personality: builtin vocabulary, reserved terms and punning rules.
//!
//! A [`Personality`] is built once per configuration and shared read-only.
//! It answers two questions:
//!
//! - may this node be viewed as capability X? ([`Personality::resolve_view`],
//!   in [`view`])
//! - may this IRI additionally be declared as kind K?
//!   ([`Personality::check_declaration`])
//!
//! The punning table is evaluated set-wise: each kind has a set of forbidden
//! co-kinds for the active [`PunningMode`].

pub mod view;

use std::collections::{HashMap, HashSet};
use std::fmt;

use oxigraph::model::{NamedNode, NamedNodeRef};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::ViewError;
use crate::graph::{Node, StatementGraph};
use crate::vocab::{self, owl, rdf, rdfs, xsd};

pub use view::{Capability, CardinalityKind, TypedView, ViewShape};

/// The six OWL 2 entity kinds.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Class,
    Datatype,
    NamedIndividual,
    ObjectProperty,
    DataProperty,
    AnnotationProperty,
}

impl EntityKind {
    pub const ALL: [EntityKind; 6] = [
        EntityKind::Class,
        EntityKind::Datatype,
        EntityKind::NamedIndividual,
        EntityKind::ObjectProperty,
        EntityKind::DataProperty,
        EntityKind::AnnotationProperty,
    ];

    /// The `rdf:type` object of this kind's declaration statement.
    pub fn declaration_type(self) -> NamedNodeRef<'static> {
        match self {
            EntityKind::Class => owl::CLASS,
            EntityKind::Datatype => rdfs::DATATYPE,
            EntityKind::NamedIndividual => owl::NAMED_INDIVIDUAL,
            EntityKind::ObjectProperty => owl::OBJECT_PROPERTY,
            EntityKind::DataProperty => owl::DATATYPE_PROPERTY,
            EntityKind::AnnotationProperty => owl::ANNOTATION_PROPERTY,
        }
    }

    /// Inverse of [`EntityKind::declaration_type`].
    pub fn from_declaration_type(ty: NamedNodeRef<'_>) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.declaration_type() == ty)
    }

    pub fn name(self) -> &'static str {
        match self {
            EntityKind::Class => "Class",
            EntityKind::Datatype => "Datatype",
            EntityKind::NamedIndividual => "NamedIndividual",
            EntityKind::ObjectProperty => "ObjectProperty",
            EntityKind::DataProperty => "DataProperty",
            EntityKind::AnnotationProperty => "AnnotationProperty",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How strictly one IRI may be reused as several entity kinds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PunningMode {
    /// Forbids class/datatype, object/data, object/annotation and
    /// data/annotation property overlaps.
    Strict,
    /// Forbids class/datatype and object/data property overlaps.
    #[default]
    Medium,
    /// Forbids nothing.
    Lax,
}

impl PunningMode {
    /// The forbidden kind pairs, each listed once.
    pub fn forbidden_pairs(self) -> &'static [(EntityKind, EntityKind)] {
        use EntityKind::*;
        const STRICT: &[(EntityKind, EntityKind)] = &[
            (Class, Datatype),
            (ObjectProperty, DataProperty),
            (ObjectProperty, AnnotationProperty),
            (DataProperty, AnnotationProperty),
        ];
        match self {
            PunningMode::Strict => STRICT,
            PunningMode::Medium => &STRICT[..2],
            PunningMode::Lax => &[],
        }
    }
}

/// Immutable bundle of builtins, reserved terms and punning rules.
#[derive(Debug, Clone)]
pub struct Personality {
    mode: PunningMode,
    builtins: HashMap<EntityKind, HashSet<NamedNode>>,
    reserved: HashSet<NamedNode>,
    forbidden: HashMap<EntityKind, HashSet<EntityKind>>,
}

impl Personality {
    /// Build the personality described by a config.
    pub fn from_config(config: &Config) -> Self {
        let mut builder = PersonalityBuilder::new().punning(config.punning_mode);
        if let Some(extra) = &config.builtin_vocabulary_override {
            for kind in EntityKind::ALL {
                for iri in extra.iris(kind) {
                    match NamedNode::new(iri.as_str()) {
                        Ok(iri) => builder = builder.builtin(kind, iri),
                        Err(e) => {
                            tracing::warn!(iri = %iri, error = %e, "ignoring invalid builtin IRI")
                        }
                    }
                }
            }
        }
        builder.build()
    }

    pub fn punning_mode(&self) -> PunningMode {
        self.mode
    }

    /// Whether the IRI is a builtin of the given kind.
    pub fn is_builtin(&self, kind: EntityKind, iri: NamedNodeRef<'_>) -> bool {
        self.builtins
            .get(&kind)
            .is_some_and(|set| set.contains(&iri.into_owned()))
    }

    /// Builtins of one kind.
    pub fn builtins(&self, kind: EntityKind) -> impl Iterator<Item = &NamedNode> {
        self.builtins.get(&kind).into_iter().flatten()
    }

    /// Whether the IRI is system vocabulary that no user entity may take.
    ///
    /// Builtins of any kind are not reserved.
    pub fn is_reserved(&self, iri: NamedNodeRef<'_>) -> bool {
        if EntityKind::ALL.iter().any(|k| self.is_builtin(*k, iri)) {
            return false;
        }
        self.reserved.contains(&iri.into_owned())
            || vocab::is_system_namespace(iri.as_str())
            || xsd::FACETS.iter().any(|f| *f == iri)
    }

    /// Whether kinds `a` and `b` may share one IRI.
    pub fn allows(&self, a: EntityKind, b: EntityKind) -> bool {
        !self.forbidden.get(&a).is_some_and(|set| set.contains(&b))
    }

    /// Kinds the IRI currently holds: builtin kinds plus declared kinds.
    pub fn declared_kinds(&self, graph: &StatementGraph, iri: NamedNodeRef<'_>) -> Vec<EntityKind> {
        let node = Node::from(iri);
        EntityKind::ALL
            .into_iter()
            .filter(|k| self.is_builtin(*k, iri) || graph.has_type(&node, k.declaration_type()))
            .collect()
    }

    /// Write-side punning gate: may `iri` be declared as `kind` in `graph`?
    pub fn check_declaration(
        &self,
        graph: &StatementGraph,
        iri: NamedNodeRef<'_>,
        kind: EntityKind,
    ) -> Result<(), ViewError> {
        if self.is_reserved(iri) {
            return Err(ViewError::NotAnEntityOfRequestedKind {
                node: iri.to_string(),
                requested: kind.to_string(),
                reason: "reserved vocabulary term".into(),
            });
        }
        self.check_co_kinds(graph, iri, kind)
    }

    fn check_co_kinds(
        &self,
        graph: &StatementGraph,
        iri: NamedNodeRef<'_>,
        kind: EntityKind,
    ) -> Result<(), ViewError> {
        match self
            .declared_kinds(graph, iri)
            .into_iter()
            .find(|other| !self.allows(kind, *other))
        {
            Some(conflicting) => Err(ViewError::PunningViolation {
                node: iri.to_string(),
                requested: kind.to_string(),
                conflicting: conflicting.to_string(),
            }),
            None => Ok(()),
        }
    }
}

impl Default for Personality {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Assembles a [`Personality`] from the standard OWL 2 vocabulary plus
/// caller-supplied additions.
#[derive(Debug, Clone)]
pub struct PersonalityBuilder {
    mode: PunningMode,
    builtins: HashMap<EntityKind, HashSet<NamedNode>>,
    reserved: HashSet<NamedNode>,
}

impl PersonalityBuilder {
    /// Start from the OWL 2 builtins under medium punning.
    pub fn new() -> Self {
        let mut builtins: HashMap<EntityKind, HashSet<NamedNode>> = HashMap::new();
        let mut put = |kind: EntityKind, iris: &[NamedNodeRef<'static>]| {
            builtins
                .entry(kind)
                .or_default()
                .extend(iris.iter().map(|i| i.into_owned()));
        };
        put(EntityKind::Class, &[owl::THING, owl::NOTHING]);
        put(
            EntityKind::Datatype,
            &[
                rdfs::LITERAL,
                rdf::PLAIN_LITERAL,
                rdf::XML_LITERAL,
                rdf::LANG_STRING,
                owl::REAL,
                owl::RATIONAL,
            ],
        );
        put(EntityKind::Datatype, &xsd::DATATYPES);
        put(
            EntityKind::ObjectProperty,
            &[owl::TOP_OBJECT_PROPERTY, owl::BOTTOM_OBJECT_PROPERTY],
        );
        put(
            EntityKind::DataProperty,
            &[owl::TOP_DATA_PROPERTY, owl::BOTTOM_DATA_PROPERTY],
        );
        put(
            EntityKind::AnnotationProperty,
            &vocab::BUILTIN_ANNOTATION_PROPERTIES,
        );
        Self {
            mode: PunningMode::default(),
            builtins,
            reserved: HashSet::new(),
        }
    }

    pub fn punning(mut self, mode: PunningMode) -> Self {
        self.mode = mode;
        self
    }

    /// Treat `iri` as a builtin of `kind`.
    pub fn builtin(mut self, kind: EntityKind, iri: NamedNode) -> Self {
        self.builtins.entry(kind).or_default().insert(iri);
        self
    }

    /// Reserve an IRI outside the system namespaces.
    pub fn reserved(mut self, iri: NamedNode) -> Self {
        self.reserved.insert(iri);
        self
    }

    pub fn build(self) -> Personality {
        let mut forbidden: HashMap<EntityKind, HashSet<EntityKind>> = HashMap::new();
        for (a, b) in self.mode.forbidden_pairs() {
            forbidden.entry(*a).or_default().insert(*b);
            forbidden.entry(*b).or_default().insert(*a);
        }
        Personality {
            mode: self.mode,
            builtins: self.builtins,
            reserved: self.reserved,
            forbidden,
        }
    }
}

impl Default for PersonalityBuilder {
    fn default() -> Self {
        Self::new()
    }
}
