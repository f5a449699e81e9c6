use crate::engine::PipelineConfig;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Declarative graph description: node entries plus the links between them.
///
/// ```json
/// {
///   "nodes": [{"id": 0, "type": "constant", "data": {"value": 1}}],
///   "links": [{"from": {"id": 0, "port": 0}, "to": {"id": 1, "port": 0}}]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphDescription {
    pub nodes: Vec<NodeEntry>,
    #[serde(default)]
    pub links: Vec<LinkEntry>,
    #[serde(default)]
    pub pipeline_config: PipelineConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeEntry {
    pub id: i64,
    #[serde(rename = "type")]
    pub node_type: String,
    /// Handed to the type's constructor untouched.
    #[serde(default, alias = "props", alias = "prop")]
    pub data: Value,
}

/// Output `from.port` of node `from.id` feeds input `to.port` of node `to.id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkEntry {
    pub from: Endpoint,
    pub to: Endpoint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    pub id: i64,
    pub port: usize,
}

impl GraphDescription {
    pub fn from_json_str(description: &str) -> Result<Self> {
        Ok(serde_json::from_str(description)?)
    }

    pub fn from_value(description: Value) -> Result<Self> {
        Ok(serde_json::from_value(description)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DataflowError;
    use serde_json::json;

    #[test]
    fn test_links_and_data_are_optional() {
        let description = GraphDescription::from_value(json!({
            "nodes": [{"id": 3, "type": "print"}]
        }))
        .unwrap();

        assert!(description.links.is_empty());
        assert!(description.nodes[0].data.is_null());
        assert_eq!(description.pipeline_config.display_name(), "pipeline");
    }

    #[test]
    fn test_accepts_prop_alias() {
        let description = GraphDescription::from_value(json!({
            "nodes": [{"id": 0, "type": "constant", "prop": {"value": 4}}],
            "links": []
        }))
        .unwrap();

        assert_eq!(description.nodes[0].data["value"], 4);
    }

    #[test]
    fn test_missing_type_is_malformed() {
        let err = GraphDescription::from_value(json!({"nodes": [{"id": 0}]})).unwrap_err();
        assert!(matches!(err, DataflowError::MalformedDescription(_)));
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        let err = GraphDescription::from_json_str("{\"nodes\": [").unwrap_err();
        assert!(matches!(err, DataflowError::MalformedDescription(_)));
    }
}
