//! State management module
//!
//! This module contains the countdown state and the handle the HTTP layer uses to reach it.

pub mod app_state;
pub mod timer_state;

// Re-export main types
pub use app_state::AppState;
pub use timer_state::{TimerSnapshot, TimerState, TimerStatus};
