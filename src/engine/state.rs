use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Execution state of a [`Pipeline`](super::Pipeline).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    Idle,
    Running {
        #[serde(skip)]
        start_time: Option<Instant>,
    },
    Completed {
        #[serde(skip)]
        duration: Option<Duration>,
        nodes_run: usize,
    },
    Failed {
        error_msg: String,
    },
}

impl RunState {
    /// Check if transition from current state to target state is valid
    pub fn can_transition_to(&self, target: &RunState) -> bool {
        use RunState::*;

        matches!(
            (self, target),
            (Idle, Running { .. })
                | (Running { .. }, Completed { .. })
                | (Running { .. }, Failed { .. })
                | (Completed { .. }, Idle)
                | (Failed { .. }, Idle)
        )
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Idle => "Idle",
            Self::Running { .. } => "Running",
            Self::Completed { .. } => "Completed",
            Self::Failed { .. } => "Failed",
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Completed { .. } | Self::Failed { .. })
    }
}

impl Default for RunState {
    fn default() -> Self {
        Self::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_transitions() {
        let idle = RunState::Idle;
        let running = RunState::Running { start_time: None };

        assert!(idle.can_transition_to(&running));
        assert!(!running.can_transition_to(&idle));
    }

    #[test]
    fn test_finished_states_return_to_idle() {
        let completed = RunState::Completed {
            duration: None,
            nodes_run: 3,
        };
        let failed = RunState::Failed {
            error_msg: "boom".to_string(),
        };

        assert!(completed.can_transition_to(&RunState::Idle));
        assert!(failed.can_transition_to(&RunState::Idle));
        assert!(!completed.can_transition_to(&RunState::Running { start_time: None }));
        assert!(completed.is_finished() && failed.is_finished());
    }

    #[test]
    fn test_idle_cannot_complete_directly() {
        let completed = RunState::Completed {
            duration: None,
            nodes_run: 0,
        };
        assert!(!RunState::Idle.can_transition_to(&completed));
        assert_eq!(completed.name(), "Completed");
    }
}
