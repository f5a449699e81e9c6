use super::node::{Node, NodeExt};
use super::port::Port;
use crate::error::Result;
use log::debug;

/// Bind `consumer` to the cell(s) of `producer`.
///
/// A single-value consumer drops any previous binding; a multi-value
/// consumer appends. On a type mismatch neither port changes.
pub fn connect(consumer: &mut dyn Port, producer: &dyn Port) -> Result<()> {
    consumer.connect_from(producer)?;
    debug!(
        "connected `{}` ({}) <- `{}` ({})",
        consumer.label(),
        consumer.port_type(),
        producer.label(),
        producer.port_type()
    );
    Ok(())
}

/// Wire output `output` of `producer` into input `input` of `consumer`.
pub fn connect_nodes(
    consumer: &mut dyn Node,
    input: usize,
    producer: &dyn Node,
    output: usize,
) -> Result<()> {
    let source = producer.output(output)?;
    let target = consumer.input_mut(input)?;
    connect(target, source)
}
