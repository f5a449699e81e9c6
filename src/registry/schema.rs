use crate::core::{Node, NodeExt};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Type and label of one port
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortSchema {
    #[serde(rename = "type", default)]
    pub data_type: String,
    #[serde(default)]
    pub label: String,
}

/// Type and label of one configuration property
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySchema {
    #[serde(rename = "type", default)]
    pub data_type: String,
    #[serde(default)]
    pub label: String,
}

/// Per-type schema document: port indices with labels, plus the
/// properties a node type reads from its `data` object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSchema {
    #[serde(default)]
    pub inputs: BTreeMap<usize, PortSchema>,
    #[serde(default)]
    pub outputs: BTreeMap<usize, PortSchema>,
    #[serde(default, alias = "props")]
    pub data: BTreeMap<String, PropertySchema>,
}

impl NodeSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(schema: &str) -> Result<Self> {
        Ok(serde_json::from_str(schema)?)
    }

    pub fn with_input(mut self, index: usize, data_type: impl Into<String>, label: impl Into<String>) -> Self {
        self.inputs.insert(
            index,
            PortSchema {
                data_type: data_type.into(),
                label: label.into(),
            },
        );
        self
    }

    pub fn with_output(mut self, index: usize, data_type: impl Into<String>, label: impl Into<String>) -> Self {
        self.outputs.insert(
            index,
            PortSchema {
                data_type: data_type.into(),
                label: label.into(),
            },
        );
        self
    }

    pub fn with_property(mut self, name: impl Into<String>, data_type: impl Into<String>, label: impl Into<String>) -> Self {
        self.data.insert(
            name.into(),
            PropertySchema {
                data_type: data_type.into(),
                label: label.into(),
            },
        );
        self
    }

    /// Copy the port labels onto a freshly constructed node.
    pub fn apply(&self, node: &mut dyn Node) -> Result<()> {
        for (&index, port) in &self.inputs {
            node.set_input_label(index, port.label.clone())?;
        }
        for (&index, port) in &self.outputs {
            node.set_output_label(index, port.label.clone())?;
        }
        Ok(())
    }
}
