use serde::{Deserialize, Serialize};

/// Lifecycle state of a task
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskState {
    /// Never started
    #[default]
    Idle,
    /// Receiving heartbeats and advancing
    Running,
    /// Subscribed but ignoring heartbeats
    Paused,
    /// Stopped by a caller, a callback, or the limit
    Stopped,
}

impl TaskState {
    /// Get the name of this state
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Stopped => "stopped",
        }
    }

    /// Started and not yet stopped. Paused tasks count as running.
    #[inline]
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running | Self::Paused)
    }

    /// Running and not paused
    #[inline]
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Running)
    }

    #[inline]
    pub fn can_pause(&self) -> bool {
        matches!(self, Self::Running)
    }

    #[inline]
    pub fn can_resume(&self) -> bool {
        matches!(self, Self::Paused)
    }
}

impl From<&str> for TaskState {
    fn from(s: &str) -> Self {
        match s {
            "running" => Self::Running,
            "paused" => Self::Paused,
            "stopped" => Self::Stopped,
            _ => Self::Idle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paused_counts_as_running_but_not_active() {
        assert!(TaskState::Paused.is_running());
        assert!(!TaskState::Paused.is_active());
        assert!(TaskState::Running.is_active());
        assert!(!TaskState::Stopped.is_running());
    }

    #[test]
    fn names_round_trip() {
        for state in [
            TaskState::Idle,
            TaskState::Running,
            TaskState::Paused,
            TaskState::Stopped,
        ] {
            assert_eq!(TaskState::from(state.name()), state);
        }
    }
}
