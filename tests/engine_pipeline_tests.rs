use flowgraph::core::{HasInputs, HasOutputs, Inputs, Node};
use flowgraph::engine::{NodeId, Pipeline, RunState};
use flowgraph::nodes::builtin_registry;
use flowgraph::registry::Registry;
use flowgraph::DataflowError;
use serde_json::{json, Value};
use std::io::Write;

/// Sink that rejects every value it sees.
struct Reject {
    label: String,
    inputs: Inputs,
}

impl Node for Reject {
    fn label(&self) -> &str {
        &self.label
    }

    fn set_label(&mut self, label: String) {
        self.label = label;
    }

    fn inputs(&self) -> Option<&dyn HasInputs> {
        Some(&self.inputs)
    }

    fn inputs_mut(&mut self) -> Option<&mut dyn HasInputs> {
        Some(&mut self.inputs)
    }

    fn invoke(&mut self) -> anyhow::Result<()> {
        let value: i64 = self.inputs.read(0)?;
        anyhow::bail!("rejected {}", value)
    }
}

fn registry_with_reject() -> Registry {
    let mut registry = builtin_registry();
    registry.register_fn("reject", |_: &Value| {
        let mut inputs = Inputs::new();
        inputs.add_single::<i64>("in");
        let node: Box<dyn Node> = Box::new(Reject {
            label: String::new(),
            inputs,
        });
        Ok(node)
    });
    registry
}

fn doubling_chain() -> Value {
    json!({
        "nodes": [
            {"id": 10, "type": "print"},
            {"id": 20, "type": "double"},
            {"id": 30, "type": "constant", "data": {"value": 21}}
        ],
        "links": [
            {"from": {"id": 30, "port": 0}, "to": {"id": 20, "port": 0}},
            {"from": {"id": 20, "port": 0}, "to": {"id": 10, "port": 0}}
        ],
        "pipeline_config": {"name": "doubling", "log_timings": true}
    })
}

#[test]
fn test_pipeline_creation() {
    let registry = builtin_registry();
    let pipeline = Pipeline::from_json(&registry, doubling_chain()).unwrap();

    assert_eq!(pipeline.state(), &RunState::Idle);
    assert_eq!(pipeline.config().display_name(), "doubling");
    assert_eq!(pipeline.graph().len(), 3);
    assert_eq!(pipeline.node_id(30), Some(NodeId::new(2)));
    assert_eq!(pipeline.node_id(99), None);
    assert_eq!(
        pipeline.order(),
        &[NodeId::new(2), NodeId::new(1), NodeId::new(0)]
    );
    assert_eq!(pipeline.node_by_doc_id(20).unwrap().label(), "double");
}

#[test]
fn test_pipeline_execute() {
    let registry = builtin_registry();
    let mut pipeline = Pipeline::from_json(&registry, doubling_chain()).unwrap();

    let report = pipeline.execute_once().unwrap();
    assert_eq!(report.len(), 3);
    assert!(matches!(
        pipeline.state(),
        RunState::Completed { nodes_run: 3, .. }
    ));

    let value: i64 = pipeline
        .node_by_doc_id(20)
        .unwrap()
        .outputs()
        .unwrap()
        .output_list()
        .single::<i64>(0)
        .unwrap()
        .read()
        .unwrap();
    assert_eq!(value, 42);

    // a finished pipeline can run again
    pipeline.execute_once().unwrap();
    assert_eq!(pipeline.state().name(), "Completed");
}

#[test]
fn test_cyclic_description_is_rejected_at_build() {
    let registry = builtin_registry();
    let result = Pipeline::from_json(
        &registry,
        json!({
            "nodes": [{"id": 0, "type": "double"}, {"id": 1, "type": "double"}],
            "links": [
                {"from": {"id": 0, "port": 0}, "to": {"id": 1, "port": 0}},
                {"from": {"id": 1, "port": 0}, "to": {"id": 0, "port": 0}}
            ]
        }),
    );

    assert!(matches!(result, Err(DataflowError::CyclicGraph { .. })));
}

#[test]
fn test_self_linked_node_is_rejected() {
    let registry = builtin_registry();
    let result = Pipeline::from_json_str(
        &registry,
        r#"{
            "nodes": [{"id": 7, "type": "double"}],
            "links": [{"from": {"id": 7, "port": 0}, "to": {"id": 7, "port": 0}}]
        }"#,
    );

    assert!(matches!(
        result,
        Err(DataflowError::CyclicGraph { ref label, .. }) if label == "double"
    ));
}

#[test]
fn test_failed_run_is_recorded_and_retryable() {
    let registry = registry_with_reject();
    let mut pipeline = Pipeline::from_json(
        &registry,
        json!({
            "nodes": [
                {"id": 0, "type": "constant", "data": {"value": 5}},
                {"id": 1, "type": "reject"}
            ],
            "links": [{"from": {"id": 0, "port": 0}, "to": {"id": 1, "port": 0}}]
        }),
    )
    .unwrap();

    let err = pipeline.execute_once().unwrap_err();
    assert!(matches!(err, DataflowError::NodeFailed { node, .. } if node == NodeId::new(1)));
    match pipeline.state() {
        RunState::Failed { error_msg } => assert!(error_msg.contains("reject")),
        other => panic!("unexpected state {:?}", other),
    }

    // Failed -> Idle -> Running is allowed
    assert!(pipeline.execute_once().is_err());
    assert_eq!(pipeline.state().name(), "Failed");
}

#[test]
fn test_invalid_transition() {
    let registry = builtin_registry();
    let mut pipeline = Pipeline::from_json(&registry, doubling_chain()).unwrap();

    let err = pipeline
        .transition_to(RunState::Completed {
            duration: None,
            nodes_run: 0,
        })
        .unwrap_err();
    assert!(matches!(
        err,
        DataflowError::InvalidTransition { ref from, ref to } if from == "Idle" && to == "Completed"
    ));
    assert_eq!(pipeline.state(), &RunState::Idle);
}

#[test]
fn test_pipeline_from_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{}", doubling_chain()).unwrap();

    let registry = builtin_registry();
    let mut pipeline = Pipeline::from_path(&registry, file.path()).unwrap();
    assert_eq!(pipeline.execute_once().unwrap().len(), 3);
}
