//! Object factory: builds typed objects from the graph through the cache.
//!
//! Every request goes through [`ObjectFactory::get`] (or one of the typed
//! shortcuts). Composite objects request their operands through the same
//! path, so shared sub-expressions are built once. A [`ReadContext`] carries
//! the resolution stack of one top-level request; re-entering a key already
//! on the stack is a [`TranslateError::CyclicDependency`].

pub mod cache;
mod expr;

use std::cell::RefCell;
use std::sync::Arc;

use crate::config::Config;
use crate::error::{OntResult, TranslateError, ViewError};
use crate::graph::{GraphListener, Node, Statement, StatementGraph};
use crate::model::{
    AnnotationValue, Axiom, AxiomKind, ClassExpression, DataRange, Entity, Individual,
    ObjectPropertyExpression, OntObject,
};
use crate::personality::{EntityKind, Personality};
use crate::translate::TranslatorRegistry;

pub use cache::{CacheKey, CacheRoot, CacheStats, Cached, ObjectCache};

/// The type an object is requested as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    Entity(EntityKind),
    ClassExpression,
    DataRange,
    ObjectPropertyExpression,
    Individual,
    AnnotationValue,
    Axiom(AxiomKind),
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ObjectType::Entity(kind) => kind.fmt(f),
            ObjectType::ClassExpression => f.write_str("ClassExpression"),
            ObjectType::DataRange => f.write_str("DataRange"),
            ObjectType::ObjectPropertyExpression => f.write_str("ObjectPropertyExpression"),
            ObjectType::Individual => f.write_str("Individual"),
            ObjectType::AnnotationValue => f.write_str("AnnotationValue"),
            ObjectType::Axiom(kind) => write!(f, "{kind}Axiom"),
        }
    }
}

/// Value types the factory can hand out.
pub trait FactoryObject: Sized {
    fn from_cached(cached: Cached) -> Option<Arc<OntObject<Self>>>;
}

macro_rules! factory_object {
    ($($ty:ident),* $(,)?) => {
        $(
            impl FactoryObject for $ty {
                fn from_cached(cached: Cached) -> Option<Arc<OntObject<Self>>> {
                    match cached {
                        Cached::$ty(o) => Some(o),
                        _ => None,
                    }
                }
            }
        )*
    };
}

factory_object!(
    Entity,
    ClassExpression,
    DataRange,
    ObjectPropertyExpression,
    Individual,
    AnnotationValue,
    Axiom,
);

/// Builds and caches typed objects for one graph.
pub struct ObjectFactory {
    graph: Arc<StatementGraph>,
    personality: Arc<Personality>,
    registry: Arc<TranslatorRegistry>,
    config: Config,
    cache: Arc<ObjectCache>,
}

impl ObjectFactory {
    /// Create a factory and subscribe its cache to the graph.
    pub fn new(
        graph: Arc<StatementGraph>,
        personality: Arc<Personality>,
        registry: Arc<TranslatorRegistry>,
        config: Config,
    ) -> Self {
        let cache = Arc::new(ObjectCache::new(config.cache_capacity));
        let listener: Arc<dyn GraphListener> = cache.clone();
        graph.subscribe(&listener);
        Self {
            graph,
            personality,
            registry,
            config,
            cache,
        }
    }

    pub fn graph(&self) -> &Arc<StatementGraph> {
        &self.graph
    }

    pub fn personality(&self) -> &Arc<Personality> {
        &self.personality
    }

    pub fn registry(&self) -> &Arc<TranslatorRegistry> {
        &self.registry
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn cache(&self) -> &ObjectCache {
        &self.cache
    }

    /// A fresh resolution context.
    pub fn context(&self) -> ReadContext<'_> {
        ReadContext {
            factory: self,
            stack: RefCell::new(Vec::new()),
        }
    }

    /// Resolve `root` as `ty`, returning the cached object on a hit.
    pub fn get<T: FactoryObject>(
        &self,
        root: &CacheRoot,
        ty: ObjectType,
    ) -> OntResult<Arc<OntObject<T>>> {
        let cached = self.context().resolve(root, ty)?;
        T::from_cached(cached).ok_or_else(|| {
            ViewError::NotAnEntityOfRequestedKind {
                node: root.to_string(),
                requested: ty.to_string(),
                reason: "requested value type does not match the object type".into(),
            }
            .into()
        })
    }

    pub fn entity(&self, node: &Node, kind: EntityKind) -> OntResult<Arc<OntObject<Entity>>> {
        self.context().entity(node, kind)
    }

    pub fn class_expression(&self, node: &Node) -> OntResult<Arc<OntObject<ClassExpression>>> {
        self.context().class_expression(node)
    }

    pub fn data_range(&self, node: &Node) -> OntResult<Arc<OntObject<DataRange>>> {
        self.context().data_range(node)
    }

    pub fn object_property_expression(
        &self,
        node: &Node,
    ) -> OntResult<Arc<OntObject<ObjectPropertyExpression>>> {
        self.context().object_property_expression(node)
    }

    pub fn individual(&self, node: &Node) -> OntResult<Arc<OntObject<Individual>>> {
        self.context().individual(node)
    }

    pub fn annotation_value(&self, node: &Node) -> OntResult<Arc<OntObject<AnnotationValue>>> {
        self.context().annotation_value(node)
    }

    /// Read the axiom of `kind` rooted at `statement`.
    pub fn axiom(&self, statement: &Statement, kind: AxiomKind) -> OntResult<Arc<OntObject<Axiom>>> {
        self.context().axiom(statement, kind)
    }
}

impl std::fmt::Debug for ObjectFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectFactory")
            .field("graph", &self.graph)
            .field("punning", &self.personality.punning_mode())
            .field("cache", &self.cache)
            .finish()
    }
}

/// One top-level resolution in progress.
pub struct ReadContext<'a> {
    factory: &'a ObjectFactory,
    stack: RefCell<Vec<CacheKey>>,
}

impl<'a> ReadContext<'a> {
    pub fn factory(&self) -> &'a ObjectFactory {
        self.factory
    }

    pub fn graph(&self) -> &'a StatementGraph {
        &self.factory.graph
    }

    pub fn personality(&self) -> &'a Personality {
        &self.factory.personality
    }

    pub fn config(&self) -> &'a Config {
        &self.factory.config
    }

    fn resolve(&self, root: &CacheRoot, ty: ObjectType) -> OntResult<Cached> {
        let key = CacheKey {
            root: root.clone(),
            ty,
        };
        if let Some(hit) = self.factory.cache.get(&key) {
            return Ok(hit);
        }
        if self.stack.borrow().contains(&key) {
            return Err(TranslateError::CyclicDependency {
                node: root.to_string(),
            }
            .into());
        }

        let version = self.factory.graph.version();
        self.stack.borrow_mut().push(key.clone());
        let built = self.build(root, ty);
        self.stack.borrow_mut().pop();

        Ok(self
            .factory
            .cache
            .insert(key, built?, version, &self.factory.graph))
    }

    fn build(&self, root: &CacheRoot, ty: ObjectType) -> OntResult<Cached> {
        match (root, ty) {
            (CacheRoot::Statement(st), ObjectType::Axiom(kind)) => {
                let translator =
                    self.factory
                        .registry
                        .get(kind)
                        .ok_or_else(|| TranslateError::UnknownKind {
                            kind: kind.to_string(),
                        })?;
                Ok(Cached::Axiom(Arc::new(translator.read(self, st)?)))
            }
            (CacheRoot::Node(node), ObjectType::Entity(kind)) => {
                Ok(Cached::Entity(Arc::new(self.build_entity(node, kind)?)))
            }
            (CacheRoot::Node(node), ObjectType::ClassExpression) => Ok(Cached::ClassExpression(
                Arc::new(self.build_class_expression(node)?),
            )),
            (CacheRoot::Node(node), ObjectType::DataRange) => {
                Ok(Cached::DataRange(Arc::new(self.build_data_range(node)?)))
            }
            (CacheRoot::Node(node), ObjectType::ObjectPropertyExpression) => {
                Ok(Cached::ObjectPropertyExpression(Arc::new(
                    self.build_object_property_expression(node)?,
                )))
            }
            (CacheRoot::Node(node), ObjectType::Individual) => {
                Ok(Cached::Individual(Arc::new(self.build_individual(node)?)))
            }
            (CacheRoot::Node(node), ObjectType::AnnotationValue) => Ok(Cached::AnnotationValue(
                Arc::new(self.build_annotation_value(node)?),
            )),
            (root, ty) => Err(ViewError::NotAnEntityOfRequestedKind {
                node: root.to_string(),
                requested: ty.to_string(),
                reason: "axioms are rooted at statements, everything else at nodes".into(),
            }
            .into()),
        }
    }

    fn typed<T: FactoryObject>(&self, root: CacheRoot, ty: ObjectType) -> OntResult<Arc<OntObject<T>>> {
        let cached = self.resolve(&root, ty)?;
        T::from_cached(cached).ok_or_else(|| {
            ViewError::NotAnEntityOfRequestedKind {
                node: root.to_string(),
                requested: ty.to_string(),
                reason: "cached object has a different type".into(),
            }
            .into()
        })
    }

    pub fn entity(&self, node: &Node, kind: EntityKind) -> OntResult<Arc<OntObject<Entity>>> {
        self.typed(CacheRoot::Node(node.clone()), ObjectType::Entity(kind))
    }

    pub fn class_expression(&self, node: &Node) -> OntResult<Arc<OntObject<ClassExpression>>> {
        self.typed(CacheRoot::Node(node.clone()), ObjectType::ClassExpression)
    }

    pub fn data_range(&self, node: &Node) -> OntResult<Arc<OntObject<DataRange>>> {
        self.typed(CacheRoot::Node(node.clone()), ObjectType::DataRange)
    }

    pub fn object_property_expression(
        &self,
        node: &Node,
    ) -> OntResult<Arc<OntObject<ObjectPropertyExpression>>> {
        self.typed(
            CacheRoot::Node(node.clone()),
            ObjectType::ObjectPropertyExpression,
        )
    }

    pub fn individual(&self, node: &Node) -> OntResult<Arc<OntObject<Individual>>> {
        self.typed(CacheRoot::Node(node.clone()), ObjectType::Individual)
    }

    pub fn annotation_value(&self, node: &Node) -> OntResult<Arc<OntObject<AnnotationValue>>> {
        self.typed(CacheRoot::Node(node.clone()), ObjectType::AnnotationValue)
    }

    pub fn axiom(&self, statement: &Statement, kind: AxiomKind) -> OntResult<Arc<OntObject<Axiom>>> {
        self.typed(
            CacheRoot::Statement(statement.clone()),
            ObjectType::Axiom(kind),
        )
    }
}
