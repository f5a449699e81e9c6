pub mod builder;
pub mod description;
pub mod factory;
pub mod schema;

pub use builder::{Builder, BuiltNodes};
pub use description::{Endpoint, GraphDescription, LinkEntry, NodeEntry};
pub use factory::{parse_config, DescribeNode, FnFactory, FromConfig, NodeFactory, TypedFactory};
pub use flowgraph_macros::DescribeNode;
pub use schema::{NodeSchema, PortSchema, PropertySchema};

use crate::core::Node;
use crate::error::{DataflowError, Result};
use log::debug;
use serde_json::Value;
use std::collections::BTreeMap;

/// Type name -> factory mapping used to instantiate described nodes.
///
/// The registry is an ordinary value: fill it before building and hand it
/// to a [`Builder`]. Registering needs `&mut`, building only `&`.
#[derive(Default)]
pub struct Registry {
    factories: BTreeMap<String, Box<dyn NodeFactory>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory, replacing any previous one with the same type name.
    pub fn register<F: NodeFactory + 'static>(&mut self, factory: F) {
        let type_name = factory.type_name().to_string();
        debug!("registering node type `{}`", type_name);
        if self.factories.insert(type_name.clone(), Box::new(factory)).is_some() {
            debug!("node type `{}` replaced an earlier registration", type_name);
        }
    }

    pub fn register_fn<F>(&mut self, type_name: impl Into<String>, constructor: F)
    where
        F: Fn(&Value) -> anyhow::Result<Box<dyn Node>> + Send + Sync + 'static,
    {
        self.register(FnFactory::new(type_name, constructor));
    }

    pub fn register_node<T>(&mut self)
    where
        T: Node + DescribeNode + FromConfig + 'static,
    {
        self.register(TypedFactory::<T>::new());
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.factories.contains_key(type_name)
    }

    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    pub fn schema_of(&self, type_name: &str) -> Option<NodeSchema> {
        self.factories.get(type_name).and_then(|factory| factory.schema())
    }

    /// Schema of every registered type, keyed by type name.
    pub fn schemas(&self) -> BTreeMap<&str, Option<NodeSchema>> {
        self.factories
            .iter()
            .map(|(name, factory)| (name.as_str(), factory.schema()))
            .collect()
    }

    /// Every registered schema as one JSON object keyed by type name;
    /// undocumented types map to `null`.
    pub fn schema(&self) -> Result<Value> {
        Ok(serde_json::to_value(self.schemas())?)
    }

    /// Instantiate a node of `type_name`, labelled with its type name and
    /// with port labels taken from the type's schema.
    pub fn create(&self, type_name: &str, config: &Value) -> Result<Box<dyn Node>> {
        let factory = self
            .factories
            .get(type_name)
            .ok_or_else(|| DataflowError::UnknownNodeType(type_name.to_string()))?;

        let mut node = factory
            .create(config)
            .map_err(|source| DataflowError::NodeConstruction {
                node_type: type_name.to_string(),
                source,
            })?;
        node.set_label(type_name.to_string());

        if let Some(schema) = factory.schema() {
            schema.apply(&mut *node)?;
        }
        Ok(node)
    }
}
