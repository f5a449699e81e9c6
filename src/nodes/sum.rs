use crate::core::{HasInputs, HasOutputs, Inputs, Node, Outputs};
use crate::registry::{DescribeNode, FromConfig};
use serde_json::Value;

/// Fan-in: sums every value bound to its multi-value input.
#[derive(DescribeNode)]
#[node_meta(type_name = "sum")]
#[input(label = "Values", data_type = "many<int>")]
#[output(label = "Sum", data_type = "int")]
pub struct Sum {
    label: String,
    inputs: Inputs,
    outputs: Outputs,
}

impl Sum {
    pub fn new() -> Self {
        let mut inputs = Inputs::new();
        inputs.add_multi::<i64>("in");
        let mut outputs = Outputs::new();
        outputs.add_single::<i64>("out");
        Self {
            label: Self::TYPE_NAME.to_string(),
            inputs,
            outputs,
        }
    }
}

impl Default for Sum {
    fn default() -> Self {
        Self::new()
    }
}

impl FromConfig for Sum {
    fn from_config(_config: &Value) -> anyhow::Result<Self> {
        Ok(Self::new())
    }
}

impl Node for Sum {
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
        let values: Vec<i64> = self.inputs.read_all(0)?;
        let total = values
            .iter()
            .try_fold(0i64, |acc, &v| acc.checked_add(v))
            .ok_or_else(|| anyhow::anyhow!("sum of {:?} overflows", values))?;
        self.outputs.write(0, total)?;
        Ok(())
    }
}
