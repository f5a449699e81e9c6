use flowgraph::core::{connect_nodes, Node};
use flowgraph::engine::{Graph, NodeId};
use flowgraph::nodes::{Add, Constant, Double, Print, Sum};
use std::collections::BTreeSet;

fn ids(raw: &[usize]) -> BTreeSet<NodeId> {
    raw.iter().copied().map(NodeId::new).collect()
}

/// Source -> Doubler -> Sink, listed in that order.
fn chain() -> Graph {
    let source = Constant::new(1);
    let mut doubler = Double::new();
    let mut sink = Print::new();
    connect_nodes(&mut doubler, 0, &source, 0).unwrap();
    connect_nodes(&mut sink, 0, &doubler, 0).unwrap();

    Graph::new(vec![Box::new(source), Box::new(doubler), Box::new(sink)])
}

#[test]
fn test_adjacency_follows_wiring() {
    let graph = chain();

    assert_eq!(graph.len(), 3);
    assert_eq!(graph.edge_count(), 2);
    assert_eq!(graph.dependencies(NodeId::new(0)), Some(&ids(&[])));
    assert_eq!(graph.dependencies(NodeId::new(1)), Some(&ids(&[0])));
    assert_eq!(graph.dependencies(NodeId::new(2)), Some(&ids(&[1])));
    assert_eq!(graph.dependents(NodeId::new(0)), vec![NodeId::new(1)]);
    assert!(graph.dependents(NodeId::new(2)).is_empty());
}

#[test]
fn test_fan_in_yields_one_edge_per_producer() {
    let a = Constant::new(1);
    let b = Constant::new(2);
    let mut fan_in = Sum::new();
    let mut adder = Add::new();
    connect_nodes(&mut fan_in, 0, &a, 0).unwrap();
    connect_nodes(&mut fan_in, 0, &b, 0).unwrap();
    connect_nodes(&mut adder, 0, &a, 0).unwrap();
    connect_nodes(&mut adder, 1, &fan_in, 0).unwrap();

    let graph = Graph::new(vec![
        Box::new(a),
        Box::new(b),
        Box::new(fan_in),
        Box::new(adder),
    ]);

    assert_eq!(graph.dependencies(NodeId::new(2)), Some(&ids(&[0, 1])));
    assert_eq!(graph.dependencies(NodeId::new(3)), Some(&ids(&[0, 2])));
    assert_eq!(
        graph.dependents(NodeId::new(0)),
        vec![NodeId::new(2), NodeId::new(3)]
    );
}

#[test]
fn test_derivation_is_idempotent() {
    let first = chain();
    let adjacency = first.adjacency().clone();

    let again = Graph::new(first.into_nodes());
    assert_eq!(again.adjacency(), &adjacency);
}

#[test]
fn test_node_lookup() {
    let mut graph = chain();

    assert_eq!(graph.node(NodeId::new(1)).unwrap().label(), "double");
    assert!(graph.node(NodeId::new(3)).is_none());
    assert!(graph.try_node(NodeId::new(3)).is_err());

    graph
        .node_mut(NodeId::new(2))
        .unwrap()
        .set_label("sink".to_string());
    assert_eq!(graph.try_node(NodeId::new(2)).unwrap().label(), "sink");
    assert_eq!(
        graph.node_ids().collect::<Vec<_>>(),
        vec![NodeId::new(0), NodeId::new(1), NodeId::new(2)]
    );
}

#[test]
fn test_dot_export() {
    let mut graph = chain();
    graph
        .node_mut(NodeId::new(0))
        .unwrap()
        .set_label("say \"one\"".to_string());

    let expected = "digraph {\n\
                    \x20 0 [label=\"say \\\"one\\\"\", shape=\"box\"]\n\
                    \x20 1 [label=\"double\", shape=\"box\"]\n\
                    \x20 2 [label=\"print\", shape=\"box\"]\n\
                    \x20 0 -> 1\n\
                    \x20 1 -> 2\n\
                    }\n";
    assert_eq!(graph.to_dot(), expected);

    let mut written = Vec::new();
    graph.write_dot(&mut written).unwrap();
    assert_eq!(String::from_utf8(written).unwrap(), expected);
}
