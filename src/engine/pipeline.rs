use super::config::PipelineConfig;
use super::graph::{Graph, NodeId};
use super::report::RunReport;
use super::scheduler;
use super::state::RunState;
use crate::core::Node;
use crate::error::{DataflowError, Result};
use crate::registry::{Builder, GraphDescription, Registry};
use log::{info, warn};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Instant;

/// A described graph, built and scheduled, ready to run.
///
/// The run order is computed at construction, so a cyclic description is
/// rejected before anything runs.
pub struct Pipeline {
    graph: Graph,
    order: Vec<NodeId>,
    ids: BTreeMap<i64, NodeId>,
    config: PipelineConfig,
    state: RunState,
}

impl Pipeline {
    pub fn from_description(registry: &Registry, description: &GraphDescription) -> Result<Self> {
        let built = Builder::new(registry).build(description)?;
        let (graph, ids) = built.into_graph();
        let order = scheduler::topological_order(&graph)?;
        let config = description.pipeline_config.clone();

        info!(
            "built {} with {} nodes and {} edges",
            config.display_name(),
            graph.len(),
            graph.edge_count()
        );

        Ok(Self {
            graph,
            order,
            ids,
            config,
            state: RunState::Idle,
        })
    }

    pub fn from_json(registry: &Registry, config: Value) -> Result<Self> {
        Self::from_description(registry, &GraphDescription::from_value(config)?)
    }

    pub fn from_json_str(registry: &Registry, config: &str) -> Result<Self> {
        Self::from_description(registry, &GraphDescription::from_json_str(config)?)
    }

    pub fn from_path(registry: &Registry, path: impl AsRef<Path>) -> Result<Self> {
        Self::from_description(registry, &GraphDescription::from_path(path)?)
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    /// Transition to a new state with validation
    pub fn transition_to(&mut self, new_state: RunState) -> Result<()> {
        if !self.state.can_transition_to(&new_state) {
            return Err(DataflowError::InvalidTransition {
                from: self.state.name().to_string(),
                to: new_state.name().to_string(),
            });
        }
        self.state = new_state;
        Ok(())
    }

    /// Run every node once in schedule order.
    pub fn execute_once(&mut self) -> Result<RunReport> {
        if self.state.is_finished() {
            self.transition_to(RunState::Idle)?;
        }
        let start = Instant::now();
        self.transition_to(RunState::Running {
            start_time: Some(start),
        })?;

        match scheduler::run_in_order(&mut self.graph, &self.order) {
            Ok(report) => {
                self.transition_to(RunState::Completed {
                    duration: Some(start.elapsed()),
                    nodes_run: report.len(),
                })?;
                info!("{} completed {} nodes", self.config.display_name(), report.len());
                if self.config.log_timings {
                    info!("{}", report.summary());
                }
                Ok(report)
            }
            Err(err) => {
                warn!("{} failed: {}", self.config.display_name(), err);
                self.transition_to(RunState::Failed {
                    error_msg: err.to_string(),
                })?;
                Err(err)
            }
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn order(&self) -> &[NodeId] {
        &self.order
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Graph id of the node declared with description id `id`.
    pub fn node_id(&self, id: i64) -> Option<NodeId> {
        self.ids.get(&id).copied()
    }

    pub fn node_by_doc_id(&self, id: i64) -> Option<&dyn Node> {
        self.node_id(id).and_then(|node| self.graph.node(node))
    }
}
