//! Timer state structure and render snapshot

use serde::{Deserialize, Serialize};

use crate::timer::format_time;

/// Where the countdown is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerStatus {
    /// Initial state, and the state after a reset or a finished countdown
    #[default]
    Idle,
    Running,
    Paused,
}

/// Countdown state owned by the controller
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimerState {
    /// Last validly set duration in seconds, used as the reset target
    pub configured_duration: Option<u64>,
    /// Seconds left on the clock
    pub remaining: u64,
    pub status: TimerStatus,
}

impl TimerState {
    /// Create the mount-time state: idle, nothing configured, zero remaining
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the countdown is running
    pub fn is_running(&self) -> bool {
        self.status == TimerStatus::Running
    }

    /// Check if the countdown is paused
    pub fn is_paused(&self) -> bool {
        self.status == TimerStatus::Paused
    }

    /// Value `remaining` returns to on reset
    pub fn reset_target(&self) -> u64 {
        self.configured_duration.unwrap_or(0)
    }

    /// Build the view handed to the presentation layer
    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            status: self.status,
            remaining_seconds: self.remaining,
            configured_duration: self.configured_duration,
            display: format_time(self.remaining),
            start_label: if self.is_paused() { "Resume" } else { "Start" }.to_string(),
        }
    }
}

/// Everything the presentation layer needs to render the widget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub status: TimerStatus,
    pub remaining_seconds: u64,
    pub configured_duration: Option<u64>,
    /// `MM:SS` rendering of `remaining_seconds`
    pub display: String,
    /// Label for the start button
    pub start_label: String,
}

impl Default for TimerSnapshot {
    fn default() -> Self {
        TimerState::new().snapshot()
    }
}
