use super::port::{connected_to, MultiPort, Port, SinglePort};
use super::port_list::PortList;
use crate::error::{DataflowError, Result};

/// Capability of owning input ports.
pub trait HasInputs {
    fn input_list(&self) -> &PortList;
    fn input_list_mut(&mut self) -> &mut PortList;
}

/// Capability of owning output ports.
pub trait HasOutputs {
    fn output_list(&self) -> &PortList;
    fn output_list_mut(&mut self) -> &mut PortList;
}

/// Input ports of a node.
pub struct Inputs {
    ports: PortList,
}

impl Inputs {
    pub fn new() -> Self {
        Self {
            ports: PortList::new("input port"),
        }
    }

    pub fn add_ports(&mut self, ports: Vec<Box<dyn Port>>) -> usize {
        self.ports.add_ports(ports)
    }

    pub fn add_single<T: Clone + 'static>(&mut self, label: impl Into<String>) -> usize {
        self.add_ports(vec![Box::new(SinglePort::<T>::input(label))])
    }

    pub fn add_multi<T: Clone + 'static>(&mut self, label: impl Into<String>) -> usize {
        self.add_ports(vec![Box::new(MultiPort::<T>::new(label))])
    }

    pub fn len(&self) -> usize {
        self.ports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }

    /// Value of the single-value input at `index`.
    pub fn read<T: Clone + 'static>(&self, index: usize) -> Result<T> {
        self.ports.single::<T>(index)?.read()
    }

    /// Values of the multi-value input at `index`, in bind order.
    pub fn read_all<T: Clone + 'static>(&self, index: usize) -> Result<Vec<T>> {
        Ok(self.ports.multi::<T>(index)?.read())
    }
}

impl Default for Inputs {
    fn default() -> Self {
        Self::new()
    }
}

impl HasInputs for Inputs {
    fn input_list(&self) -> &PortList {
        &self.ports
    }

    fn input_list_mut(&mut self) -> &mut PortList {
        &mut self.ports
    }
}

/// Output ports of a node. Every output owns the cell its consumers read.
pub struct Outputs {
    ports: PortList,
}

impl Outputs {
    pub fn new() -> Self {
        Self {
            ports: PortList::new("output port"),
        }
    }

    pub fn add_ports(&mut self, ports: Vec<Box<dyn Port>>) -> usize {
        self.ports.add_ports(ports)
    }

    pub fn add_single<T: Clone + 'static>(&mut self, label: impl Into<String>) -> usize {
        self.add_ports(vec![Box::new(SinglePort::<T>::output(label))])
    }

    pub fn len(&self) -> usize {
        self.ports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }

    pub fn write<T: Clone + 'static>(&mut self, index: usize, value: T) -> Result<()> {
        self.ports.single_mut::<T>(index)?.write(value);
        Ok(())
    }

    /// Last value written to the output at `index`.
    pub fn read<T: Clone + 'static>(&self, index: usize) -> Result<T> {
        self.ports.single::<T>(index)?.read()
    }
}

impl Default for Outputs {
    fn default() -> Self {
        Self::new()
    }
}

impl HasOutputs for Outputs {
    fn output_list(&self) -> &PortList {
        &self.ports
    }

    fn output_list_mut(&mut self) -> &mut PortList {
        &mut self.ports
    }
}

/// A computation unit of the graph.
///
/// Nodes expose their ports through the [`HasInputs`] and [`HasOutputs`]
/// capabilities; a source simply keeps the default `None` for inputs, a
/// sink for outputs. All communication happens through ports, so
/// [`Node::invoke`] takes no arguments and returns nothing but failure.
pub trait Node {
    fn label(&self) -> &str;

    fn set_label(&mut self, label: String);

    fn inputs(&self) -> Option<&dyn HasInputs> {
        None
    }

    fn inputs_mut(&mut self) -> Option<&mut dyn HasInputs> {
        None
    }

    fn outputs(&self) -> Option<&dyn HasOutputs> {
        None
    }

    fn outputs_mut(&mut self) -> Option<&mut dyn HasOutputs> {
        None
    }

    /// Run the node's behavior once.
    fn invoke(&mut self) -> anyhow::Result<()>;
}

/// Index-based port access shared by every [`Node`].
pub trait NodeExt: Node {
    fn input_count(&self) -> usize {
        self.inputs().map_or(0, |inputs| inputs.input_list().len())
    }

    fn output_count(&self) -> usize {
        self.outputs().map_or(0, |outputs| outputs.output_list().len())
    }

    fn input(&self, index: usize) -> Result<&dyn Port> {
        match self.inputs() {
            Some(inputs) => inputs.input_list().get(index),
            None => Err(DataflowError::out_of_range("input port", index, 0)),
        }
    }

    fn input_mut(&mut self, index: usize) -> Result<&mut dyn Port> {
        match self.inputs_mut() {
            Some(inputs) => inputs.input_list_mut().get_mut(index),
            None => Err(DataflowError::out_of_range("input port", index, 0)),
        }
    }

    fn output(&self, index: usize) -> Result<&dyn Port> {
        match self.outputs() {
            Some(outputs) => outputs.output_list().get(index),
            None => Err(DataflowError::out_of_range("output port", index, 0)),
        }
    }

    fn output_mut(&mut self, index: usize) -> Result<&mut dyn Port> {
        match self.outputs_mut() {
            Some(outputs) => outputs.output_list_mut().get_mut(index),
            None => Err(DataflowError::out_of_range("output port", index, 0)),
        }
    }

    fn input_label(&self, index: usize) -> Result<&str> {
        self.input(index).map(|port| port.label())
    }

    fn output_label(&self, index: usize) -> Result<&str> {
        self.output(index).map(|port| port.label())
    }

    fn set_input_label(&mut self, index: usize, label: String) -> Result<()> {
        self.input_mut(index)?.set_label(label);
        Ok(())
    }

    fn set_output_label(&mut self, index: usize, label: String) -> Result<()> {
        self.output_mut(index)?.set_label(label);
        Ok(())
    }

    /// Whether any input of `self` reads a cell written by an output of
    /// `producer`.
    fn depends_on(&self, producer: &dyn Node) -> bool {
        let (Some(inputs), Some(outputs)) = (self.inputs(), producer.outputs()) else {
            return false;
        };
        inputs.input_list().iter().any(|input| {
            outputs
                .output_list()
                .iter()
                .any(|output| connected_to(input, output))
        })
    }
}

impl<N: Node + ?Sized> NodeExt for N {}
