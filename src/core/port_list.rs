use super::port::{MultiPort, Port, PortType, SinglePort};
use crate::error::{DataflowError, Result};

/// Ordered, append-only list of ports addressed by index.
pub struct PortList {
    kind: &'static str,
    ports: Vec<Box<dyn Port>>,
}

impl PortList {
    pub(crate) fn new(kind: &'static str) -> Self {
        Self {
            kind,
            ports: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.ports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }

    /// Append a block of ports and return the index of its first port.
    ///
    /// A group of ports declared on its own counts from local index 0;
    /// adding the returned offset gives the index in this list.
    pub fn add_ports(&mut self, ports: Vec<Box<dyn Port>>) -> usize {
        let start = self.ports.len();
        self.ports.extend(ports);
        start
    }

    pub fn get(&self, index: usize) -> Result<&dyn Port> {
        self.ports
            .get(index)
            .map(|port| &**port)
            .ok_or_else(|| DataflowError::out_of_range(self.kind, index, self.ports.len()))
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut dyn Port> {
        let len = self.ports.len();
        let kind = self.kind;
        match self.ports.get_mut(index) {
            Some(port) => Ok(&mut **port),
            None => Err(DataflowError::out_of_range(kind, index, len)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Port> + '_ {
        self.ports.iter().map(|port| &**port)
    }

    pub fn label(&self, index: usize) -> Result<&str> {
        self.get(index).map(|port| port.label())
    }

    pub fn set_label(&mut self, index: usize, label: String) -> Result<()> {
        self.get_mut(index)?.set_label(label);
        Ok(())
    }

    /// The port at `index` viewed as a single-value port of `T`.
    pub fn single<T: Clone + 'static>(&self, index: usize) -> Result<&SinglePort<T>> {
        let port = self.get(index)?;
        port.as_any()
            .downcast_ref::<SinglePort<T>>()
            .ok_or_else(|| DataflowError::TypeMismatch {
                expected: PortType::single::<T>(),
                found: port.port_type(),
            })
    }

    pub fn single_mut<T: Clone + 'static>(&mut self, index: usize) -> Result<&mut SinglePort<T>> {
        let port = self.get_mut(index)?;
        let found = port.port_type();
        port.as_any_mut()
            .downcast_mut::<SinglePort<T>>()
            .ok_or_else(|| DataflowError::TypeMismatch {
                expected: PortType::single::<T>(),
                found,
            })
    }

    /// The port at `index` viewed as a multi-value port of `T`.
    pub fn multi<T: Clone + 'static>(&self, index: usize) -> Result<&MultiPort<T>> {
        let port = self.get(index)?;
        port.as_any()
            .downcast_ref::<MultiPort<T>>()
            .ok_or_else(|| DataflowError::TypeMismatch {
                expected: PortType::multi::<T>(),
                found: port.port_type(),
            })
    }
}
