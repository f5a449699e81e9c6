pub mod connection;
pub mod node;
pub mod port;
pub mod port_list;

pub use connection::{connect, connect_nodes};
pub use node::{HasInputs, HasOutputs, Inputs, Node, NodeExt, Outputs};
pub use port::{Cardinality, MultiPort, Port, PortType, SinglePort, ValueCell};
pub use port_list::PortList;
