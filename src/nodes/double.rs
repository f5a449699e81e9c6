use crate::core::{HasInputs, HasOutputs, Inputs, Node, Outputs};
use crate::registry::{DescribeNode, FromConfig};
use serde_json::Value;

/// Writes twice its input.
#[derive(DescribeNode)]
#[node_meta(type_name = "double")]
#[input(label = "Value", data_type = "int")]
#[output(label = "Doubled", data_type = "int")]
pub struct Double {
    label: String,
    inputs: Inputs,
    outputs: Outputs,
}

impl Double {
    pub fn new() -> Self {
        let mut inputs = Inputs::new();
        inputs.add_single::<i64>("in");
        let mut outputs = Outputs::new();
        outputs.add_single::<i64>("out");
        Self {
            label: Self::TYPE_NAME.to_string(),
            inputs,
            outputs,
        }
    }
}

impl Default for Double {
    fn default() -> Self {
        Self::new()
    }
}

impl FromConfig for Double {
    fn from_config(_config: &Value) -> anyhow::Result<Self> {
        Ok(Self::new())
    }
}

impl Node for Double {
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
        let value: i64 = self.inputs.read(0)?;
        let doubled = value
            .checked_mul(2)
            .ok_or_else(|| anyhow::anyhow!("doubling {} overflows", value))?;
        self.outputs.write(0, doubled)?;
        Ok(())
    }
}
