//! Wires a small fan-in graph by hand, without a description document.

use flowgraph::core::connect_nodes;
use flowgraph::engine::{run_serial, Graph};
use flowgraph::nodes::{Add, Constant, Print, Sum};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let source_a = Constant::new(1);
    let source_b = Constant::new(2);
    let mut fan_in = Sum::new();
    let mut adder = Add::new();
    let mut sink = Print::with_prefix("result: ");

    connect_nodes(&mut fan_in, 0, &source_a, 0)?;
    connect_nodes(&mut fan_in, 0, &source_b, 0)?;
    connect_nodes(&mut adder, 0, &source_a, 0)?;
    connect_nodes(&mut adder, 1, &fan_in, 0)?;
    connect_nodes(&mut sink, 0, &adder, 0)?;

    // listed sinks-first; the scheduler sorts it out
    let mut graph = Graph::new(vec![
        Box::new(sink),
        Box::new(adder),
        Box::new(fan_in),
        Box::new(source_b),
        Box::new(source_a),
    ]);

    print!("{}", graph.dot());
    let report = run_serial(&mut graph)?;
    println!("{}", report.summary());
    Ok(())
}
