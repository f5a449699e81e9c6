use serde::{Deserialize, Serialize};

/// Optional `pipeline_config` section of a graph description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Name used in log lines.
    pub name: Option<String>,

    /// Log the per-node timings of every run at info level.
    pub log_timings: bool,
}

impl PipelineConfig {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("pipeline")
    }
}
