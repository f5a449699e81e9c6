use super::graph::NodeId;
use std::time::Duration;

/// One node invocation of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRun {
    pub node: NodeId,
    pub label: String,
    pub elapsed: Duration,
}

/// Nodes invoked by one pass, in invocation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    runs: Vec<NodeRun>,
}

impl RunReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, node: NodeId, label: String, elapsed: Duration) {
        self.runs.push(NodeRun {
            node,
            label,
            elapsed,
        });
    }

    pub fn runs(&self) -> &[NodeRun] {
        &self.runs
    }

    pub fn order(&self) -> Vec<NodeId> {
        self.runs.iter().map(|run| run.node).collect()
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    pub fn total_elapsed(&self) -> Duration {
        self.runs.iter().map(|run| run.elapsed).sum()
    }

    pub fn summary(&self) -> String {
        if self.runs.is_empty() {
            return "No nodes ran".to_string();
        }

        let mut summary = String::from("=== Run Report ===\n");
        for run in &self.runs {
            summary.push_str(&format!(
                "[{}] {}: {}μs\n",
                run.node,
                run.label,
                run.elapsed.as_micros()
            ));
        }
        summary.push_str(&format!(
            "Total: {} node{} in {}μs",
            self.runs.len(),
            if self.runs.len() == 1 { "" } else { "s" },
            self.total_elapsed().as_micros()
        ));
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report() {
        let report = RunReport::new();
        assert!(report.is_empty());
        assert_eq!(report.summary(), "No nodes ran");
    }

    #[test]
    fn test_summary_lists_runs_in_order() {
        let mut report = RunReport::new();
        report.record(NodeId::new(2), "source".to_string(), Duration::from_micros(5));
        report.record(NodeId::new(0), "sink".to_string(), Duration::from_micros(7));

        assert_eq!(report.order(), vec![NodeId::new(2), NodeId::new(0)]);
        assert_eq!(report.total_elapsed(), Duration::from_micros(12));

        let summary = report.summary();
        assert!(summary.contains("[2] source: 5μs"));
        assert!(summary.contains("Total: 2 nodes in 12μs"));
        assert!(summary.find("source").unwrap() < summary.find("sink").unwrap());
    }
}
