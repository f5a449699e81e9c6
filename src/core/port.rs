use crate::error::{DataflowError, Result};
use log::debug;
use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// Whether a port accepts one producer or an ordered list of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinality {
    Single,
    Multi,
}

/// Runtime type descriptor of a port.
///
/// Two descriptors are equal when they move the same Rust type with the
/// same cardinality. The printable name is carried for error messages only.
#[derive(Debug, Clone, Copy)]
pub struct PortType {
    value: TypeId,
    value_name: &'static str,
    cardinality: Cardinality,
}

impl PortType {
    pub fn single<T: 'static>() -> Self {
        Self {
            value: TypeId::of::<T>(),
            value_name: std::any::type_name::<T>(),
            cardinality: Cardinality::Single,
        }
    }

    pub fn multi<T: 'static>() -> Self {
        Self {
            cardinality: Cardinality::Multi,
            ..Self::single::<T>()
        }
    }

    pub fn cardinality(&self) -> Cardinality {
        self.cardinality
    }

    pub fn value_name(&self) -> &'static str {
        self.value_name
    }

    /// Descriptor of one element of this port.
    pub fn element(&self) -> Self {
        Self {
            cardinality: Cardinality::Single,
            ..*self
        }
    }

    /// Whether a consumer with this descriptor may bind to `producer`.
    pub fn accepts(&self, producer: &PortType) -> bool {
        self == producer
            || (self.cardinality == Cardinality::Multi && self.element() == *producer)
    }
}

impl PartialEq for PortType {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value && self.cardinality == other.cardinality
    }
}

impl Eq for PortType {}

impl Hash for PortType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
        self.cardinality.hash(state);
    }
}

impl fmt::Display for PortType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.cardinality {
            Cardinality::Single => f.write_str(self.value_name),
            Cardinality::Multi => write!(f, "many<{}>", self.value_name),
        }
    }
}

/// Storage for one datum, shared between a producing port and every
/// consumer bound to it.
pub struct ValueCell<T>(Rc<RefCell<Option<T>>>);

impl<T> ValueCell<T> {
    pub fn new() -> Self {
        Self(Rc::new(RefCell::new(None)))
    }

    pub fn set(&self, value: T) {
        *self.0.borrow_mut() = Some(value);
    }

    pub fn clear(&self) {
        self.0.borrow_mut().take();
    }

    pub fn is_written(&self) -> bool {
        self.0.borrow().is_some()
    }

    /// True when both handles point at the same storage.
    pub fn same_cell(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T: Clone> ValueCell<T> {
    pub fn get(&self) -> Option<T> {
        self.0.borrow().clone()
    }
}

impl<T> Clone for ValueCell<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T> Default for ValueCell<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for ValueCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ValueCell").field(&*self.0.borrow()).finish()
    }
}

mod sealed {
    pub trait Linked {
        /// True when a value cell is shared between `self` and `other`.
        fn shares_cell_with(&self, other: &dyn super::Port) -> bool;
    }
}

/// A typed connection slot on a node.
///
/// Only [`SinglePort`] and [`MultiPort`] implement this trait.
pub trait Port: sealed::Linked + Any {
    /// Descriptor fixed at creation.
    fn port_type(&self) -> PortType;

    fn label(&self) -> &str;

    fn set_label(&mut self, label: String);

    /// Number of cells this port currently references.
    fn binding_count(&self) -> usize;

    /// Bind this port, as a consumer, to `producer`.
    ///
    /// Fails with [`DataflowError::TypeMismatch`] and leaves both ports
    /// untouched when the descriptors are incompatible.
    fn connect_from(&mut self, producer: &dyn Port) -> Result<()>;

    /// A detached handle referencing the same cells as this port.
    fn share(&self) -> Box<dyn Port>;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Whether two ports observe a common value cell.
pub(crate) fn connected_to(a: &dyn Port, b: &dyn Port) -> bool {
    use sealed::Linked;
    a.shares_cell_with(b)
}

fn check_compatible(consumer: &dyn Port, producer: &dyn Port) -> Result<()> {
    let expected = consumer.port_type();
    let found = producer.port_type();
    if expected.accepts(&found) {
        Ok(())
    } else {
        Err(DataflowError::TypeMismatch { expected, found })
    }
}

/// Port holding at most one producer binding.
///
/// Output ports own a cell from creation; input ports pick one up when
/// connected.
pub struct SinglePort<T> {
    label: String,
    cell: Option<ValueCell<T>>,
}

impl<T: Clone + 'static> SinglePort<T> {
    pub fn input(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            cell: None,
        }
    }

    pub fn output(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            cell: Some(ValueCell::new()),
        }
    }

    pub fn is_bound(&self) -> bool {
        self.cell.is_some()
    }

    pub fn has_value(&self) -> bool {
        self.cell.as_ref().is_some_and(ValueCell::is_written)
    }

    pub fn cell(&self) -> Option<&ValueCell<T>> {
        self.cell.as_ref()
    }

    /// Current value; fails when unbound or never written.
    pub fn read(&self) -> Result<T> {
        self.cell
            .as_ref()
            .and_then(ValueCell::get)
            .ok_or_else(|| DataflowError::EmptyPortAccess {
                label: self.label.clone(),
            })
    }

    /// Store `value` in the port's cell, creating one if the port has none.
    pub fn write(&mut self, value: T) {
        self.cell.get_or_insert_with(ValueCell::new).set(value);
    }
}

impl<T> Clone for SinglePort<T> {
    fn clone(&self) -> Self {
        Self {
            label: self.label.clone(),
            cell: self.cell.clone(),
        }
    }
}

impl<T: Clone + 'static> sealed::Linked for SinglePort<T> {
    fn shares_cell_with(&self, other: &dyn Port) -> bool {
        let Some(cell) = &self.cell else {
            return false;
        };
        if let Some(single) = other.as_any().downcast_ref::<SinglePort<T>>() {
            single.cell.as_ref().is_some_and(|c| c.same_cell(cell))
        } else if let Some(multi) = other.as_any().downcast_ref::<MultiPort<T>>() {
            multi.cells.iter().any(|c| c.same_cell(cell))
        } else {
            false
        }
    }
}

impl<T: Clone + 'static> Port for SinglePort<T> {
    fn port_type(&self) -> PortType {
        PortType::single::<T>()
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn set_label(&mut self, label: String) {
        self.label = label;
    }

    fn binding_count(&self) -> usize {
        usize::from(self.cell.is_some())
    }

    fn connect_from(&mut self, producer: &dyn Port) -> Result<()> {
        check_compatible(&*self, producer)?;
        let producer = producer
            .as_any()
            .downcast_ref::<SinglePort<T>>()
            .ok_or_else(|| DataflowError::TypeMismatch {
                expected: self.port_type(),
                found: producer.port_type(),
            })?;
        if self.cell.is_some() {
            debug!("rebinding port `{}`, previous producer detached", self.label);
        }
        self.cell = producer.cell.clone();
        Ok(())
    }

    fn share(&self) -> Box<dyn Port> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Port aggregating an ordered list of producers.
pub struct MultiPort<T> {
    label: String,
    cells: Vec<ValueCell<T>>,
}

impl<T: Clone + 'static> MultiPort<T> {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            cells: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Written values in bind order; unwritten cells are skipped.
    pub fn read(&self) -> Vec<T> {
        self.cells.iter().filter_map(ValueCell::get).collect()
    }
}

impl<T> Clone for MultiPort<T> {
    fn clone(&self) -> Self {
        Self {
            label: self.label.clone(),
            cells: self.cells.clone(),
        }
    }
}

impl<T: Clone + 'static> sealed::Linked for MultiPort<T> {
    fn shares_cell_with(&self, other: &dyn Port) -> bool {
        if let Some(single) = other.as_any().downcast_ref::<SinglePort<T>>() {
            single
                .cell
                .as_ref()
                .is_some_and(|cell| self.cells.iter().any(|c| c.same_cell(cell)))
        } else if let Some(multi) = other.as_any().downcast_ref::<MultiPort<T>>() {
            self.cells
                .iter()
                .any(|a| multi.cells.iter().any(|b| a.same_cell(b)))
        } else {
            false
        }
    }
}

impl<T: Clone + 'static> Port for MultiPort<T> {
    fn port_type(&self) -> PortType {
        PortType::multi::<T>()
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn set_label(&mut self, label: String) {
        self.label = label;
    }

    fn binding_count(&self) -> usize {
        self.cells.len()
    }

    fn connect_from(&mut self, producer: &dyn Port) -> Result<()> {
        check_compatible(&*self, producer)?;
        let any = producer.as_any();
        if let Some(single) = any.downcast_ref::<SinglePort<T>>() {
            // a producer without a cell has nothing to contribute
            self.cells.extend(single.cell.iter().cloned());
        } else if let Some(multi) = any.downcast_ref::<MultiPort<T>>() {
            self.cells.extend(multi.cells.iter().cloned());
        }
        Ok(())
    }

    fn share(&self) -> Box<dyn Port> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
