use crate::core::PortType;
use crate::engine::NodeId;
use thiserror::Error;

/// Errors raised while wiring, building or running a dataflow graph.
#[derive(Debug, Error)]
pub enum DataflowError {
    /// Two port descriptors are incompatible.
    #[error("port type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: PortType, found: PortType },

    /// Read of a single-value port that is unbound or was never written.
    #[error("port `{label}` holds no value")]
    EmptyPortAccess { label: String },

    #[error("{kind} index {index} out of range (len {len})")]
    IndexOutOfRange {
        kind: &'static str,
        index: usize,
        len: usize,
    },

    #[error("unknown node type `{0}`")]
    UnknownNodeType(String),

    #[error("link references unknown node id {0}")]
    UnknownNodeReference(i64),

    #[error("malformed graph description: {0}")]
    MalformedDescription(String),

    #[error("dependency cycle detected at node {node} (`{label}`)")]
    CyclicGraph { node: NodeId, label: String },

    /// A factory rejected the `data` it was handed.
    #[error("failed to construct node of type `{node_type}`")]
    NodeConstruction {
        node_type: String,
        #[source]
        source: anyhow::Error,
    },

    /// A node's behavior failed; the run stopped there.
    #[error("node {node} (`{label}`) failed")]
    NodeFailed {
        node: NodeId,
        label: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("invalid state transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl DataflowError {
    pub(crate) fn out_of_range(kind: &'static str, index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { kind, index, len }
    }
}

impl From<serde_json::Error> for DataflowError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedDescription(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DataflowError>;
