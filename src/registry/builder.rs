use super::description::GraphDescription;
use super::Registry;
use crate::core::{connect, Node, NodeExt};
use crate::engine::{Graph, NodeId};
use crate::error::{DataflowError, Result};
use log::debug;
use serde_json::Value;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

/// Turns a [`GraphDescription`] into a set of wired nodes.
pub struct Builder<'r> {
    registry: &'r Registry,
}

impl<'r> Builder<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    /// Instantiate every node entry, then apply the links in order.
    ///
    /// Nothing is kept when any step fails.
    pub fn build(&self, description: &GraphDescription) -> Result<BuiltNodes> {
        let mut nodes: BTreeMap<i64, Box<dyn Node>> = BTreeMap::new();

        for entry in &description.nodes {
            if nodes.contains_key(&entry.id) {
                return Err(DataflowError::MalformedDescription(format!(
                    "duplicate node id {}",
                    entry.id
                )));
            }
            let node = self.registry.create(&entry.node_type, &entry.data)?;
            debug!("created node {} of type `{}`", entry.id, entry.node_type);
            nodes.insert(entry.id, node);
        }

        for link in &description.links {
            let producer = nodes
                .get(&link.from.id)
                .ok_or(DataflowError::UnknownNodeReference(link.from.id))?;
            // shared handle so a node may feed itself without aliasing borrows
            let source = producer.output(link.from.port)?.share();

            let consumer = nodes
                .get_mut(&link.to.id)
                .ok_or(DataflowError::UnknownNodeReference(link.to.id))?;
            connect(consumer.input_mut(link.to.port)?, &*source)?;
            debug!(
                "linked {}:{} -> {}:{}",
                link.from.id, link.from.port, link.to.id, link.to.port
            );
        }

        Ok(BuiltNodes { nodes })
    }

    pub fn build_str(&self, description: &str) -> Result<BuiltNodes> {
        self.build(&GraphDescription::from_json_str(description)?)
    }

    pub fn build_value(&self, description: Value) -> Result<BuiltNodes> {
        self.build(&GraphDescription::from_value(description)?)
    }

    pub fn build_reader<R: Read>(&self, reader: R) -> Result<BuiltNodes> {
        self.build(&GraphDescription::from_reader(reader)?)
    }

    pub fn build_path(&self, path: impl AsRef<Path>) -> Result<BuiltNodes> {
        self.build(&GraphDescription::from_path(path)?)
    }
}

/// Nodes produced by a [`Builder`], keyed and ordered by description id.
pub struct BuiltNodes {
    nodes: BTreeMap<i64, Box<dyn Node>>,
}

impl BuiltNodes {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.nodes.keys().copied()
    }

    pub fn node(&self, id: i64) -> Option<&dyn Node> {
        self.nodes.get(&id).map(|node| &**node)
    }

    pub fn node_mut(&mut self, id: i64) -> Option<&mut dyn Node> {
        match self.nodes.get_mut(&id) {
            Some(node) => Some(&mut **node),
            None => None,
        }
    }

    /// The nodes in ascending description-id order.
    pub fn into_nodes(self) -> Vec<Box<dyn Node>> {
        self.nodes.into_values().collect()
    }

    /// Derive the graph, together with the description id -> [`NodeId`] map.
    pub fn into_graph(self) -> (Graph, BTreeMap<i64, NodeId>) {
        let ids = self
            .nodes
            .keys()
            .enumerate()
            .map(|(index, &id)| (id, NodeId::new(index)))
            .collect();
        (Graph::new(self.into_nodes()), ids)
    }
}
