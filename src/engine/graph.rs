use crate::core::{Node, NodeExt};
use crate::error::{DataflowError, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Stable identifier of a node inside a [`Graph`]: its position in the
/// node list the graph was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(usize);

impl NodeId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Dependency relation between a fixed set of nodes.
///
/// The adjacency (consumer -> producers) is derived once, from the port
/// wiring at construction time. Rewiring afterwards is not picked up; take
/// the nodes back with [`Graph::into_nodes`] and build a new graph.
pub struct Graph {
    nodes: Vec<Box<dyn Node>>,
    adjacency: BTreeMap<NodeId, BTreeSet<NodeId>>,
}

impl Graph {
    pub fn new(nodes: Vec<Box<dyn Node>>) -> Self {
        let mut adjacency = BTreeMap::new();
        for (consumer_idx, consumer) in nodes.iter().enumerate() {
            let mut producers = BTreeSet::new();
            for (producer_idx, producer) in nodes.iter().enumerate() {
                if consumer.depends_on(&**producer) {
                    producers.insert(NodeId(producer_idx));
                }
            }
            debug!(
                "node {} (`{}`) depends on {:?}",
                consumer_idx,
                consumer.label(),
                producers
            );
            adjacency.insert(NodeId(consumer_idx), producers);
        }
        Self { nodes, adjacency }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }

    pub fn adjacency(&self) -> &BTreeMap<NodeId, BTreeSet<NodeId>> {
        &self.adjacency
    }

    /// Producers feeding `id`.
    pub fn dependencies(&self, id: NodeId) -> Option<&BTreeSet<NodeId>> {
        self.adjacency.get(&id)
    }

    /// Consumers reading from `id`, in ascending order.
    pub fn dependents(&self, id: NodeId) -> Vec<NodeId> {
        self.adjacency
            .iter()
            .filter(|(_, producers)| producers.contains(&id))
            .map(|(&consumer, _)| consumer)
            .collect()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(BTreeSet::len).sum()
    }

    pub fn node(&self, id: NodeId) -> Option<&dyn Node> {
        self.nodes.get(id.0).map(|node| &**node)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut dyn Node> {
        match self.nodes.get_mut(id.0) {
            Some(node) => Some(&mut **node),
            None => None,
        }
    }

    pub fn try_node(&self, id: NodeId) -> Result<&dyn Node> {
        self.node(id)
            .ok_or_else(|| DataflowError::out_of_range("node", id.0, self.nodes.len()))
    }

    pub fn into_nodes(self) -> Vec<Box<dyn Node>> {
        self.nodes
    }

    /// Graphviz view: one box per node, one arrow per producer -> consumer edge.
    pub fn dot(&self) -> Dot<'_> {
        Dot { graph: self }
    }

    pub fn to_dot(&self) -> String {
        self.dot().to_string()
    }

    pub fn write_dot<W: std::io::Write>(&self, mut writer: W) -> Result<()> {
        write!(writer, "{}", self.dot())?;
        Ok(())
    }
}

pub struct Dot<'a> {
    graph: &'a Graph,
}

impl fmt::Display for Dot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "digraph {{")?;
        for (idx, node) in self.graph.nodes.iter().enumerate() {
            writeln!(
                f,
                "  {} [label=\"{}\", shape=\"box\"]",
                idx,
                escape_label(node.label())
            )?;
        }
        for (consumer, producers) in &self.graph.adjacency {
            for producer in producers {
                writeln!(f, "  {} -> {}", producer, consumer)?;
            }
        }
        writeln!(f, "}}")
    }
}

fn escape_label(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}
