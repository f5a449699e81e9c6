use crate::core::{HasOutputs, Node, Outputs};
use crate::registry::{DescribeNode, FromConfig};
use anyhow::Context;
use serde::Deserialize;
use serde_json::Value;

/// Source emitting a fixed integer on every pass.
#[derive(DescribeNode)]
#[node_meta(type_name = "constant")]
#[output(label = "Value", data_type = "int")]
pub struct Constant {
    label: String,
    outputs: Outputs,

    #[param(label = "Value")]
    value: i64,
}

#[derive(Deserialize)]
struct ConstantConfig {
    value: i64,
}

impl Constant {
    pub fn new(value: i64) -> Self {
        let mut outputs = Outputs::new();
        outputs.add_single::<i64>("out");
        Self {
            label: Self::TYPE_NAME.to_string(),
            outputs,
            value,
        }
    }

    pub fn value(&self) -> i64 {
        self.value
    }
}

impl FromConfig for Constant {
    fn from_config(config: &Value) -> anyhow::Result<Self> {
        let config: ConstantConfig = serde_json::from_value(config.clone())
            .context("`constant` needs an integer `value`")?;
        Ok(Self::new(config.value))
    }
}

impl Node for Constant {
    fn label(&self) -> &str {
        &self.label
    }

    fn set_label(&mut self, label: String) {
        self.label = label;
    }

    fn outputs(&self) -> Option<&dyn HasOutputs> {
        Some(&self.outputs)
    }

    fn outputs_mut(&mut self) -> Option<&mut dyn HasOutputs> {
        Some(&mut self.outputs)
    }

    fn invoke(&mut self) -> anyhow::Result<()> {
        self.outputs.write(0, self.value)?;
        Ok(())
    }
}
