//! Background tasks module
//!
//! This module contains the event loop that runs the timer alongside the HTTP server.

pub mod timer_loop;

// Re-export main types and functions
pub use timer_loop::{spawn_timer_loop, timer_loop_task, TimerCommand, TimerLoop};
