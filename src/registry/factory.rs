use super::schema::NodeSchema;
use crate::core::Node;
use crate::error::Result;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::marker::PhantomData;

/// Creates nodes of one type from the opaque `data` of a description entry.
pub trait NodeFactory: Send + Sync {
    fn type_name(&self) -> &str;

    fn create(&self, config: &Value) -> anyhow::Result<Box<dyn Node>>;

    /// Port labels and properties of the produced nodes, if documented.
    fn schema(&self) -> Option<NodeSchema> {
        None
    }
}

/// Constructor closure accepted by [`FnFactory`].
pub type Constructor = dyn Fn(&Value) -> anyhow::Result<Box<dyn Node>> + Send + Sync;

/// Factory wrapping a closure and an optional schema.
pub struct FnFactory {
    type_name: String,
    constructor: Box<Constructor>,
    schema: Option<NodeSchema>,
}

impl FnFactory {
    pub fn new<F>(type_name: impl Into<String>, constructor: F) -> Self
    where
        F: Fn(&Value) -> anyhow::Result<Box<dyn Node>> + Send + Sync + 'static,
    {
        Self {
            type_name: type_name.into(),
            constructor: Box::new(constructor),
            schema: None,
        }
    }

    pub fn with_schema(mut self, schema: NodeSchema) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Attach a schema given as a JSON document.
    pub fn with_schema_json(self, schema: &str) -> Result<Self> {
        Ok(self.with_schema(NodeSchema::from_json_str(schema)?))
    }
}

impl NodeFactory for FnFactory {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn create(&self, config: &Value) -> anyhow::Result<Box<dyn Node>> {
        (self.constructor)(config)
    }

    fn schema(&self) -> Option<NodeSchema> {
        self.schema.clone()
    }
}

/// Static description of a node type; derive it with
/// `#[derive(DescribeNode)]`.
pub trait DescribeNode {
    const TYPE_NAME: &'static str;

    fn schema() -> NodeSchema;
}

/// Construction of a node type from its `data` object.
pub trait FromConfig: Sized {
    fn from_config(config: &Value) -> anyhow::Result<Self>;
}

/// Factory for a statically known node type.
pub struct TypedFactory<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> TypedFactory<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for TypedFactory<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> NodeFactory for TypedFactory<T>
where
    T: Node + DescribeNode + FromConfig + 'static,
{
    fn type_name(&self) -> &str {
        T::TYPE_NAME
    }

    fn create(&self, config: &Value) -> anyhow::Result<Box<dyn Node>> {
        Ok(Box::new(T::from_config(config)?))
    }

    fn schema(&self) -> Option<NodeSchema> {
        Some(T::schema())
    }
}

/// Deserialize a `data` object, treating an absent one as all defaults.
pub fn parse_config<T: DeserializeOwned + Default>(config: &Value) -> anyhow::Result<T> {
    if config.is_null() {
        return Ok(T::default());
    }
    Ok(serde_json::from_value(config.clone())?)
}
