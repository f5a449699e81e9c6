//! Typed, acyclic, single-pass dataflow graphs.
//!
//! Nodes own typed ports; wiring an input to an output shares the
//! producer's value cell with the consumer. A [`engine::Graph`] derives the
//! dependency relation from that wiring and the scheduler runs every node
//! once, producers first.

// lets the derive macros name `::flowgraph` from inside this crate
extern crate self as flowgraph;

pub mod core;
pub mod engine;
pub mod error;
pub mod nodes;
pub mod registry;

pub use error::{DataflowError, Result};
