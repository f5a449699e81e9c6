use super::graph::{Graph, NodeId};
use super::report::RunReport;
use crate::error::{DataflowError, Result};
use log::debug;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    Unvisited,
    InProgress,
    Done,
}

/// Order the nodes of `graph` so every producer precedes its consumers.
///
/// Depth-first postorder, starting from each unvisited node in ascending
/// [`NodeId`] order and following dependencies in ascending order, so the
/// result depends only on the wiring. Reaching a node that is still in
/// progress means the wiring has a cycle.
pub fn topological_order(graph: &Graph) -> Result<Vec<NodeId>> {
    let mut marks = vec![Visit::Unvisited; graph.len()];
    let mut order = Vec::with_capacity(graph.len());
    for id in graph.node_ids() {
        visit(graph, id, &mut marks, &mut order)?;
    }
    Ok(order)
}

fn visit(graph: &Graph, id: NodeId, marks: &mut [Visit], order: &mut Vec<NodeId>) -> Result<()> {
    match marks[id.index()] {
        Visit::Done => return Ok(()),
        Visit::InProgress => {
            let label = graph
                .node(id)
                .map(|node| node.label().to_string())
                .unwrap_or_default();
            return Err(DataflowError::CyclicGraph { node: id, label });
        }
        Visit::Unvisited => {}
    }

    marks[id.index()] = Visit::InProgress;
    if let Some(producers) = graph.dependencies(id) {
        for &producer in producers {
            visit(graph, producer, marks, order)?;
        }
    }
    marks[id.index()] = Visit::Done;
    order.push(id);
    Ok(())
}

/// Schedule and run every node of `graph` once.
pub fn run_serial(graph: &mut Graph) -> Result<RunReport> {
    let order = topological_order(graph)?;
    run_in_order(graph, &order)
}

/// Invoke nodes in the given order, stopping at the first failure.
///
/// Nodes that already ran keep whatever they wrote.
pub fn run_in_order(graph: &mut Graph, order: &[NodeId]) -> Result<RunReport> {
    let len = graph.len();
    let mut report = RunReport::new();

    for &id in order {
        let node = graph
            .node_mut(id)
            .ok_or_else(|| DataflowError::out_of_range("node", id.index(), len))?;
        let label = node.label().to_string();

        debug!("invoking node {} (`{}`)", id, label);
        let start = Instant::now();
        if let Err(source) = node.invoke() {
            return Err(DataflowError::NodeFailed {
                node: id,
                label,
                source,
            });
        }
        report.record(id, label, start.elapsed());
    }

    Ok(report)
}
