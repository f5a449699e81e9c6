use crate::core::{HasInputs, HasOutputs, Inputs, Node, Outputs, Port, SinglePort};
use crate::registry::{DescribeNode, FromConfig};
use serde_json::Value;

#[derive(DescribeNode)]
#[node_meta(type_name = "add")]
#[input(label = "Left", data_type = "int")]
#[input(label = "Right", data_type = "int")]
#[output(label = "Sum", data_type = "int")]
pub struct Add {
    label: String,
    inputs: Inputs,
    outputs: Outputs,
}

impl Add {
    pub fn new() -> Self {
        let mut inputs = Inputs::new();
        let operands: Vec<Box<dyn Port>> = vec![
            Box::new(SinglePort::<i64>::input("left")),
            Box::new(SinglePort::<i64>::input("right")),
        ];
        inputs.add_ports(operands);
        let mut outputs = Outputs::new();
        outputs.add_single::<i64>("out");
        Self {
            label: Self::TYPE_NAME.to_string(),
            inputs,
            outputs,
        }
    }
}

impl Default for Add {
    fn default() -> Self {
        Self::new()
    }
}

impl FromConfig for Add {
    fn from_config(_config: &Value) -> anyhow::Result<Self> {
        Ok(Self::new())
    }
}

impl Node for Add {
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
        let left: i64 = self.inputs.read(0)?;
        let right: i64 = self.inputs.read(1)?;
        let sum = left
            .checked_add(right)
            .ok_or_else(|| anyhow::anyhow!("{} + {} overflows", left, right))?;
        self.outputs.write(0, sum)?;
        Ok(())
    }
}
