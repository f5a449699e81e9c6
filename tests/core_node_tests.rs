use flowgraph::core::{
    HasInputs, HasOutputs, Inputs, MultiPort, Node, NodeExt, Outputs, Port, SinglePort,
};
use flowgraph::DataflowError;

/// Node with two port blocks declared separately on each side.
struct Mixer {
    label: String,
    inputs: Inputs,
    outputs: Outputs,
    extra_input: usize,
}

impl Mixer {
    fn new() -> Self {
        let mut inputs = Inputs::new();
        let base: Vec<Box<dyn Port>> = vec![
            Box::new(SinglePort::<i64>::input("a")),
            Box::new(SinglePort::<i64>::input("b")),
        ];
        inputs.add_ports(base);
        let extra: Vec<Box<dyn Port>> = vec![Box::new(MultiPort::<f64>::new("extra"))];
        let extra_input = inputs.add_ports(extra);

        let mut outputs = Outputs::new();
        outputs.add_single::<i64>("total");

        Self {
            label: "mixer".to_string(),
            inputs,
            outputs,
            extra_input,
        }
    }
}

impl Node for Mixer {
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

    fn outputs(&self) -> Option<&dyn HasOutputs> {
        Some(&self.outputs)
    }

    fn outputs_mut(&mut self) -> Option<&mut dyn HasOutputs> {
        Some(&mut self.outputs)
    }

    fn invoke(&mut self) -> anyhow::Result<()> {
        let total = self.inputs.read::<i64>(0)? + self.inputs.read::<i64>(1)?;
        self.outputs.write(0, total)?;
        Ok(())
    }
}

/// Node with no ports at all.
struct Idle {
    label: String,
}

impl Node for Idle {
    fn label(&self) -> &str {
        &self.label
    }

    fn set_label(&mut self, label: String) {
        self.label = label;
    }

    fn invoke(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}

#[test]
fn test_port_blocks_are_offset() {
    let mixer = Mixer::new();

    assert_eq!(mixer.extra_input, 2);
    assert_eq!(mixer.input_count(), 3);
    assert_eq!(mixer.input_label(mixer.extra_input).unwrap(), "extra");
    assert_eq!(
        mixer.input(2).unwrap().port_type(),
        flowgraph::core::PortType::multi::<f64>()
    );
}

#[test]
fn test_port_access_is_bounds_checked() {
    let mut mixer = Mixer::new();

    assert!(matches!(
        mixer.input(3),
        Err(DataflowError::IndexOutOfRange { index: 3, len: 3, .. })
    ));
    assert!(matches!(
        mixer.output_mut(1),
        Err(DataflowError::IndexOutOfRange { index: 1, len: 1, .. })
    ));
}

#[test]
fn test_portless_node_has_no_ports() {
    let idle = Idle {
        label: "idle".to_string(),
    };

    assert_eq!(idle.input_count(), 0);
    assert_eq!(idle.output_count(), 0);
    assert!(matches!(
        idle.output(0),
        Err(DataflowError::IndexOutOfRange { len: 0, .. })
    ));
}

#[test]
fn test_labels_are_mutable() {
    let mut mixer = Mixer::new();

    mixer.set_label("renamed".to_string());
    mixer.set_input_label(0, "left".to_string()).unwrap();
    mixer.set_output_label(0, "sum".to_string()).unwrap();

    assert_eq!(mixer.label(), "renamed");
    assert_eq!(mixer.input_label(0).unwrap(), "left");
    assert_eq!(mixer.output_label(0).unwrap(), "sum");
    assert!(mixer.set_input_label(9, "nope".to_string()).is_err());
}

#[test]
fn test_typed_reads_check_the_value_type() {
    let mixer = Mixer::new();

    assert!(matches!(
        mixer.inputs.read::<f64>(0),
        Err(DataflowError::TypeMismatch { .. })
    ));
    assert!(matches!(
        mixer.inputs.read::<i64>(0),
        Err(DataflowError::EmptyPortAccess { .. })
    ));
    assert!(mixer.inputs.read_all::<f64>(2).unwrap().is_empty());
}

#[test]
fn test_invoke_reports_missing_inputs() {
    let mut mixer = Mixer::new();
    let err = mixer.invoke().unwrap_err();

    assert!(matches!(
        err.downcast_ref::<DataflowError>(),
        Some(DataflowError::EmptyPortAccess { .. })
    ));
}
