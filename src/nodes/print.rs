use crate::core::{HasInputs, Inputs, Node};
use crate::registry::{parse_config, DescribeNode, FromConfig};
use log::info;
use serde::Deserialize;
use serde_json::Value;

/// Sink printing its input to stdout and remembering the last value.
#[derive(DescribeNode)]
#[node_meta(type_name = "print")]
#[input(label = "Value", data_type = "int")]
pub struct Print {
    label: String,
    inputs: Inputs,

    #[param(label = "Prefix")]
    prefix: String,

    received: Option<i64>,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct PrintConfig {
    prefix: String,
}

impl Print {
    pub fn new() -> Self {
        Self::with_prefix("")
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        let mut inputs = Inputs::new();
        inputs.add_single::<i64>("in");
        Self {
            label: Self::TYPE_NAME.to_string(),
            inputs,
            prefix: prefix.into(),
            received: None,
        }
    }

    /// Value seen by the most recent pass.
    pub fn received(&self) -> Option<i64> {
        self.received
    }
}

impl Default for Print {
    fn default() -> Self {
        Self::new()
    }
}

impl FromConfig for Print {
    fn from_config(config: &Value) -> anyhow::Result<Self> {
        let config: PrintConfig = parse_config(config)?;
        Ok(Self::with_prefix(config.prefix))
    }
}

impl Node for Print {
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
        println!("{}{}", self.prefix, value);
        info!("[{}] received {}", self.label, value);
        self.received = Some(value);
        Ok(())
    }
}
