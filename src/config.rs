//! Runtime configuration consumed by the mapping core.
//!
//! The core reads a [`Config`] per call and never persists it on its own.
//! [`Config::load`] and [`Config::save`] are provided for the layer above,
//! which typically keeps the options in a TOML file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, OntResult};
use crate::personality::{EntityKind, PunningMode};

/// Options recognized by the translators, the view resolver and the cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Read axiom annotations (reified or attached to anonymous roots).
    pub include_annotations_in_axioms: bool,
    /// Which entity-kind overlaps on one IRI are legal.
    pub punning_mode: PunningMode,
    /// Extra IRIs to treat as builtin entities, per kind.
    pub builtin_vocabulary_override: Option<BuiltinVocabulary>,
    /// Surface `x rdf:type owl:Class`-style statements as declaration axioms.
    pub allow_read_declarations: bool,
    /// Skip malformed statements while listing axioms instead of failing.
    pub ignore_read_errors: bool,
    /// Upper bound on cached objects before eviction kicks in.
    pub cache_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            include_annotations_in_axioms: true,
            punning_mode: PunningMode::Medium,
            builtin_vocabulary_override: None,
            allow_read_declarations: true,
            ignore_read_errors: true,
            cache_capacity: 100_000,
        }
    }
}

/// Additional builtin IRIs, per entity kind.
///
/// In TOML:
///
/// ```toml
/// [builtin_vocabulary_override]
/// class = ["http://example.org/Top"]
/// annotation_property = ["http://purl.org/dc/terms/title"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuiltinVocabulary {
    pub class: Vec<String>,
    pub datatype: Vec<String>,
    pub object_property: Vec<String>,
    pub data_property: Vec<String>,
    pub annotation_property: Vec<String>,
    pub named_individual: Vec<String>,
}

impl BuiltinVocabulary {
    /// IRIs listed for one kind.
    pub fn iris(&self, kind: EntityKind) -> &[String] {
        match kind {
            EntityKind::Class => &self.class,
            EntityKind::Datatype => &self.datatype,
            EntityKind::ObjectProperty => &self.object_property,
            EntityKind::DataProperty => &self.data_property,
            EntityKind::AnnotationProperty => &self.annotation_property,
            EntityKind::NamedIndividual => &self.named_individual,
        }
    }

    /// Add an IRI for a kind.
    pub fn with(mut self, kind: EntityKind, iri: impl Into<String>) -> Self {
        let slot = match kind {
            EntityKind::Class => &mut self.class,
            EntityKind::Datatype => &mut self.datatype,
            EntityKind::ObjectProperty => &mut self.object_property,
            EntityKind::DataProperty => &mut self.data_property,
            EntityKind::AnnotationProperty => &mut self.annotation_property,
            EntityKind::NamedIndividual => &mut self.named_individual,
        };
        slot.push(iri.into());
        self
    }
}

impl Config {
    /// Parse a config from TOML text.
    pub fn from_toml_str(content: &str) -> OntResult<Self> {
        toml::from_str(content).map_err(|e| {
            ConfigError::Parse {
                path: "<inline>".into(),
                message: e.to_string(),
            }
            .into()
        })
    }

    /// Load from a TOML file.
    pub fn load(path: &Path) -> OntResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| {
            ConfigError::Parse {
                path: path.display().to_string(),
                message: e.to_string(),
            }
            .into()
        })
    }

    /// Save to a TOML file.
    pub fn save(&self, path: &Path) -> OntResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Write {
                path: parent.display().to_string(),
                source: e,
            })?;
        }
        std::fs::write(path, content).map_err(|e| {
            ConfigError::Write {
                path: path.display().to_string(),
                source: e,
            }
            .into()
        })
    }

    /// Builder-style punning mode setter.
    pub fn with_punning_mode(mut self, mode: PunningMode) -> Self {
        self.punning_mode = mode;
        self
    }

    /// Builder-style annotation switch.
    pub fn with_annotations(mut self, include: bool) -> Self {
        self.include_annotations_in_axioms = include;
        self
    }
}
