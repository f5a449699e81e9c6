pub mod config;
pub mod graph;
pub mod pipeline;
pub mod report;
pub mod scheduler;
pub mod state;

pub use config::PipelineConfig;
pub use graph::{Dot, Graph, NodeId};
pub use pipeline::Pipeline;
pub use report::{NodeRun, RunReport};
pub use scheduler::{run_in_order, run_serial, topological_order};
pub use state::RunState;
